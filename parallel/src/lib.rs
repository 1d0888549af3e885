//! Fold and merge collections sequentially or in parallel.
//!
//! This crate provides two traits:
//!
//! - [`Collector`]: a reduction described by four operations (`supply`, `accumulate`,
//!   `combine`, `finish`). A collector must produce the same output no matter how its input is
//!   split into contiguous partitions, as long as partial results are combined in sequence order.
//! - [`Strategy`]: decides how a collection is partitioned and scheduled for a fold/merge
//!   reduction.
//!
//! Three strategies are provided:
//!
//! - [`Sequential`]: a single accumulator on the current thread, no merges (works in `no_std`)
//! - [`Chunked`]: contiguous chunks of a fixed size, merged as a balanced tree (works in `no_std`)
//! - [`Parallel`]: contiguous partitions folded on a rayon thread pool (requires `std`)
//!
//! # Features
//!
//! - `std` (default): Enables the [`Parallel`] strategy backed by rayon
//!
//! # Example
//!
//! ```
//! use combinate_parallel::{Collector, Sequential, Strategy};
//!
//! /// Collects the items that are larger than every item before them.
//! struct Records;
//!
//! impl Collector<&u32> for Records {
//!     type Accumulator = Vec<u32>;
//!     type Output = Vec<u32>;
//!
//!     fn supply(&self) -> Vec<u32> {
//!         Vec::new()
//!     }
//!
//!     fn accumulate(&self, records: &mut Vec<u32>, item: &u32) {
//!         if records.last().map_or(true, |last| item > last) {
//!             records.push(*item);
//!         }
//!     }
//!
//!     fn combine(&self, mut left: Vec<u32>, right: Vec<u32>) -> Vec<u32> {
//!         let best = left.last().copied();
//!         left.extend(right.into_iter().filter(|item| best.map_or(true, |best| *item > best)));
//!         left
//!     }
//!
//!     fn finish(&self, records: Vec<u32>) -> Vec<u32> {
//!         records
//!     }
//! }
//!
//! let data = vec![3, 1, 4, 1, 5, 9, 2, 6];
//! assert_eq!(Sequential.collect(&data, &Records), vec![3, 4, 5, 9]);
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

use alloc::vec::Vec;
use cfg_if::cfg_if;
use core::{fmt, num::NonZeroUsize};

cfg_if! {
    if #[cfg(feature = "std")] {
        use rayon::{
            iter::{IndexedParallelIterator, IntoParallelIterator, ParallelIterator},
            ThreadPool,
        };
        use std::sync::Arc;
        use tracing::trace;
    }
}

/// A reduction that can be evaluated over any contiguous partitioning of its input.
///
/// Each partition is folded into its own accumulator (created by [`supply`](Self::supply) and
/// extended by [`accumulate`](Self::accumulate)). Accumulators of adjacent partitions are then
/// merged by [`combine`](Self::combine), left before right, until one remains, which
/// [`finish`](Self::finish) turns into the output.
///
/// Implementations must guarantee that `combine(fold(a), fold(b)) == fold(a ++ b)` and that the
/// freshly supplied accumulator is an identity for `combine` on both sides.
pub trait Collector<T>: Send + Sync {
    /// The partial result owned by a single fold or merge task.
    type Accumulator: Send;

    /// The final result of the reduction.
    type Output;

    /// Creates an empty accumulator.
    fn supply(&self) -> Self::Accumulator;

    /// Folds one `item` into `accumulator`.
    fn accumulate(&self, accumulator: &mut Self::Accumulator, item: T);

    /// Merges two accumulators, where every item of `left` preceded every item of `right`.
    fn combine(&self, left: Self::Accumulator, right: Self::Accumulator) -> Self::Accumulator;

    /// Converts the final accumulator into the output.
    fn finish(&self, accumulator: Self::Accumulator) -> Self::Output;
}

/// A strategy for executing fold and merge operations.
///
/// This trait abstracts over how a collection is partitioned, allowing reductions to be written
/// once and then executed sequentially, in deterministic chunks, or on a thread pool.
pub trait Strategy: Clone + Send + Sync + fmt::Debug + 'static {
    /// Reduces a collection to a single value using fold and reduce operations.
    ///
    /// The collection is split into contiguous partitions. Each partition is folded with
    /// `fold_op`, starting from `identity()`, and adjacent partial results are merged with
    /// `reduce_op` in sequence order. The shape of the merge tree depends on the strategy, so
    /// `reduce_op` must be associative and `identity()` must be its identity element.
    ///
    /// # Arguments
    ///
    /// - `iter`: The collection to fold over
    /// - `identity`: A closure that produces the identity value for the fold
    /// - `fold_op`: Combines an accumulator with a single item: `(acc, item) -> acc`
    /// - `reduce_op`: Combines two accumulators: `(left, right) -> acc`
    ///
    /// # Examples
    ///
    /// ```
    /// use combinate_parallel::{Sequential, Strategy};
    ///
    /// let words = vec!["fold", "and", "merge"];
    /// let sentence = Sequential.fold(
    ///     &words,
    ///     String::new,
    ///     |mut acc, word| {
    ///         acc.push_str(word);
    ///         acc
    ///     },
    ///     |left, right| left + &right,
    /// );
    /// assert_eq!(sentence, "foldandmerge");
    /// ```
    fn fold<I, R, ID, F, RD>(&self, iter: I, identity: ID, fold_op: F, reduce_op: RD) -> R
    where
        I: IntoIterator<IntoIter: Send, Item: Send> + Send,
        R: Send,
        ID: Fn() -> R + Send + Sync,
        F: Fn(R, I::Item) -> R + Send + Sync,
        RD: Fn(R, R) -> R + Send + Sync;

    /// Reduces a collection with a [`Collector`].
    ///
    /// # Examples
    ///
    /// ```
    /// use combinate_parallel::{Chunked, Collector, Strategy};
    /// use std::num::NonZeroUsize;
    ///
    /// struct Count;
    ///
    /// impl<T> Collector<T> for Count {
    ///     type Accumulator = usize;
    ///     type Output = usize;
    ///
    ///     fn supply(&self) -> usize { 0 }
    ///     fn accumulate(&self, count: &mut usize, _: T) { *count += 1 }
    ///     fn combine(&self, left: usize, right: usize) -> usize { left + right }
    ///     fn finish(&self, count: usize) -> usize { count }
    /// }
    ///
    /// let strategy = Chunked::new(NonZeroUsize::new(3).unwrap());
    /// assert_eq!(strategy.collect(0..10, &Count), 10);
    /// ```
    fn collect<I, C>(&self, iter: I, collector: &C) -> C::Output
    where
        I: IntoIterator<IntoIter: Send, Item: Send> + Send,
        C: Collector<I::Item>,
    {
        let accumulator = self.fold(
            iter,
            || collector.supply(),
            |mut accumulator, item| {
                collector.accumulate(&mut accumulator, item);
                accumulator
            },
            |left, right| collector.combine(left, right),
        );
        collector.finish(accumulator)
    }
}

/// A sequential execution strategy.
///
/// All items are folded into a single accumulator on the current thread, so `reduce_op` is
/// never invoked. Useful for:
///
/// - Debugging and testing (deterministic execution)
/// - `no_std` environments where threading is unavailable
/// - Small workloads where partitioning overhead exceeds benefits
///
/// # Examples
///
/// ```
/// use combinate_parallel::{Sequential, Strategy};
///
/// let data = vec![1, 2, 3, 4, 5];
/// let sum = Sequential.fold(&data, || 0, |a, &b| a + b, |a, b| a + b);
/// assert_eq!(sum, 15);
/// ```
#[derive(Default, Debug, Clone)]
pub struct Sequential;

impl Strategy for Sequential {
    fn fold<I, R, ID, F, RD>(&self, iter: I, identity: ID, fold_op: F, _reduce_op: RD) -> R
    where
        I: IntoIterator<IntoIter: Send, Item: Send> + Send,
        R: Send,
        ID: Fn() -> R + Send + Sync,
        F: Fn(R, I::Item) -> R + Send + Sync,
        RD: Fn(R, R) -> R + Send + Sync,
    {
        iter.into_iter().fold(identity(), fold_op)
    }
}

/// A deterministic partitioning strategy.
///
/// Items are split into contiguous chunks of `size` items (the last chunk may be shorter).
/// Every chunk is folded into its own accumulator on the current thread, then neighbouring
/// accumulators are merged pairwise, level by level, until one remains.
///
/// `Chunked` exercises the merge path of a reduction reproducibly, which makes it useful for
/// testing [`Collector`] implementations without a thread pool.
///
/// # Examples
///
/// ```
/// use combinate_parallel::{Chunked, Strategy};
/// use std::num::NonZeroUsize;
///
/// let strategy = Chunked::new(NonZeroUsize::new(2).unwrap());
/// let merges = strategy.fold(0..8, || 0, |acc, _| acc, |a, b| a + b + 1);
/// assert_eq!(merges, 3); // four chunks merged as a balanced tree
/// ```
#[derive(Debug, Clone)]
pub struct Chunked {
    size: NonZeroUsize,
}

impl Chunked {
    /// Creates a new [`Chunked`] strategy folding `size` items per partition.
    pub const fn new(size: NonZeroUsize) -> Self {
        Self { size }
    }

    /// Returns the number of items folded per partition.
    pub const fn size(&self) -> NonZeroUsize {
        self.size
    }
}

impl Strategy for Chunked {
    fn fold<I, R, ID, F, RD>(&self, iter: I, identity: ID, fold_op: F, reduce_op: RD) -> R
    where
        I: IntoIterator<IntoIter: Send, Item: Send> + Send,
        R: Send,
        ID: Fn() -> R + Send + Sync,
        F: Fn(R, I::Item) -> R + Send + Sync,
        RD: Fn(R, R) -> R + Send + Sync,
    {
        let mut iter = iter.into_iter().peekable();
        let mut partials = Vec::new();
        while iter.peek().is_some() {
            let partial = iter
                .by_ref()
                .take(self.size.get())
                .fold(identity(), &fold_op);
            partials.push(partial);
        }

        #[cfg(feature = "std")]
        trace!(
            partitions = partials.len(),
            size = self.size.get(),
            "merging chunks"
        );

        merge_pairwise(partials, reduce_op).unwrap_or_else(identity)
    }
}

/// Merges neighbouring partial results level by level, preserving sequence order.
fn merge_pairwise<R>(mut partials: Vec<R>, reduce_op: impl Fn(R, R) -> R) -> Option<R> {
    while partials.len() > 1 {
        let mut merged = Vec::with_capacity(partials.len().div_ceil(2));
        let mut pending = partials.into_iter();
        while let Some(left) = pending.next() {
            merged.push(match pending.next() {
                Some(right) => reduce_op(left, right),
                None => left,
            });
        }
        partials = merged;
    }
    partials.pop()
}

cfg_if! {
    if #[cfg(feature = "std")] {
        /// A parallel execution strategy backed by a rayon thread pool.
        ///
        /// Items are gathered into a buffer and split by rayon into contiguous partitions of at
        /// least [`min_len`](Self::min_len) items. Partitions are folded on the pool's worker
        /// threads and partial results are merged in sequence order, so reductions that are
        /// associative but not commutative remain correct.
        ///
        /// # Thread Pool Ownership
        ///
        /// `Parallel` holds an [`Arc<ThreadPool>`], so it can be cheaply cloned and shared
        /// across threads. Multiple [`Parallel`] instances can share the same underlying
        /// thread pool.
        ///
        /// # Examples
        ///
        /// ```
        /// use combinate_parallel::{Parallel, Strategy};
        /// use rayon::ThreadPoolBuilder;
        /// use std::sync::Arc;
        ///
        /// let pool = Arc::new(ThreadPoolBuilder::new().num_threads(2).build().unwrap());
        /// let strategy = Parallel::new(pool).with_min_len(64);
        ///
        /// let data: Vec<i64> = (0..1000).collect();
        /// let sum = strategy.fold(&data, || 0i64, |acc, &n| acc + n, |a, b| a + b);
        /// assert_eq!(sum, 499500);
        /// ```
        #[derive(Debug, Clone)]
        pub struct Parallel {
            thread_pool: Arc<ThreadPool>,
            min_len: usize,
        }

        impl Parallel {
            /// Creates a new [`Parallel`] strategy with the given [`ThreadPool`].
            ///
            /// Partitions may be as small as a single item.
            pub const fn new(thread_pool: Arc<ThreadPool>) -> Self {
                Self {
                    thread_pool,
                    min_len: 1,
                }
            }

            /// Sets the minimum number of items folded by a single partition.
            ///
            /// Values below one are treated as one.
            pub fn with_min_len(mut self, min_len: usize) -> Self {
                self.min_len = min_len.max(1);
                self
            }

            /// Returns the minimum number of items folded by a single partition.
            pub const fn min_len(&self) -> usize {
                self.min_len
            }
        }

        impl From<Arc<ThreadPool>> for Parallel {
            fn from(thread_pool: Arc<ThreadPool>) -> Self {
                Self::new(thread_pool)
            }
        }

        impl Strategy for Parallel {
            fn fold<I, R, ID, F, RD>(&self, iter: I, identity: ID, fold_op: F, reduce_op: RD) -> R
            where
                I: IntoIterator<IntoIter: Send, Item: Send> + Send,
                R: Send,
                ID: Fn() -> R + Send + Sync,
                F: Fn(R, I::Item) -> R + Send + Sync,
                RD: Fn(R, R) -> R + Send + Sync,
            {
                // Buffer the items so rayon can split them into indexed, contiguous partitions.
                let items: Vec<I::Item> = iter.into_iter().collect();
                trace!(
                    items = items.len(),
                    min_len = self.min_len,
                    threads = self.thread_pool.current_num_threads(),
                    "folding in parallel"
                );
                if items.is_empty() {
                    return identity();
                }

                self.thread_pool.install(|| {
                    items
                        .into_par_iter()
                        .with_min_len(self.min_len)
                        .fold(&identity, &fold_op)
                        .reduce(&identity, &reduce_op)
                })
            }
        }
    }
}
