//! Collect running totals over sequential and parallel reductions.
//!
//! [`CumulativeSum`] is a [`Collector`] that projects every input element to a number and
//! produces the ordered sequence of running (prefix) sums. It can be evaluated by any
//! [`Strategy`]: partial sequences computed over independent partitions are merged by offsetting
//! the right partition with the total of the left one, so the result never depends on how the
//! input was split.
//!
//! Three numeric domains are supported through [`Summand`]: `i32`, `i64` and `f64`.
//!
//! # Example
//!
//! ```
//! use combinate_collector::cumulatively_summing_int;
//! use combinate_parallel::{Sequential, Strategy};
//!
//! let totals = Sequential.collect(&[1, 2, -3], &cumulatively_summing_int(|i: &i32| *i));
//! assert_eq!(totals, vec![1, 3, 0]);
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

use alloc::vec::Vec;
pub use combinate_parallel::{Collector, Strategy};
use core::{fmt, marker::PhantomData};

mod private {
    pub trait Sealed {}
}

/// A numeric type that running totals can be computed in.
///
/// Integer summands wrap on overflow (two's complement), so a cumulative sum never panics.
/// Floating-point summands use IEEE-754 addition without compensation, so totals computed over
/// differently shaped merge trees may differ by rounding.
pub trait Summand: private::Sealed + Copy + PartialEq + Send + Sync + fmt::Debug + 'static {
    /// The additive identity.
    const ZERO: Self;

    /// Adds `other` to `self`.
    fn plus(self, other: Self) -> Self;
}

macro_rules! impl_summand {
    ($type:ty, $zero:expr, |$lhs:ident, $rhs:ident| $sum:expr) => {
        impl private::Sealed for $type {}

        impl Summand for $type {
            const ZERO: Self = $zero;

            #[inline]
            fn plus(self, other: Self) -> Self {
                let ($lhs, $rhs) = (self, other);
                $sum
            }
        }
    };
}

impl_summand!(i32, 0, |a, b| a.wrapping_add(b));
impl_summand!(i64, 0, |a, b| a.wrapping_add(b));
impl_summand!(f64, 0.0, |a, b| a + b);

/// A [`Collector`] producing the running sums of a numeric projection of its input.
///
/// The accumulator is the sequence of running totals seen so far; its last element (if any) is
/// the total of every item folded into it. The accumulator is also the output.
pub struct CumulativeSum<F, N> {
    mapper: F,
    _summand: PhantomData<fn() -> N>,
}

impl<F, N: Summand> CumulativeSum<F, N> {
    /// Creates a collector that cumulatively sums the values extracted by `mapper`.
    pub const fn new(mapper: F) -> Self {
        Self {
            mapper,
            _summand: PhantomData,
        }
    }
}

impl<F: Clone, N> Clone for CumulativeSum<F, N> {
    fn clone(&self) -> Self {
        Self {
            mapper: self.mapper.clone(),
            _summand: PhantomData,
        }
    }
}

impl<F, N> fmt::Debug for CumulativeSum<F, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CumulativeSum")
            .field("summand", &core::any::type_name::<N>())
            .finish_non_exhaustive()
    }
}

impl<T, F, N> Collector<T> for CumulativeSum<F, N>
where
    F: Fn(T) -> N + Send + Sync,
    N: Summand,
{
    type Accumulator = Vec<N>;
    type Output = Vec<N>;

    fn supply(&self) -> Vec<N> {
        Vec::new()
    }

    fn accumulate(&self, totals: &mut Vec<N>, item: T) {
        let previous = totals.last().copied().unwrap_or(N::ZERO);
        totals.push((self.mapper)(item).plus(previous));
    }

    fn combine(&self, mut left: Vec<N>, right: Vec<N>) -> Vec<N> {
        let Some(&offset) = left.last() else {
            return right;
        };
        left.reserve(right.len());
        left.extend(right.into_iter().map(|total| total.plus(offset)));
        left
    }

    fn finish(&self, totals: Vec<N>) -> Vec<N> {
        totals
    }
}

/// Returns a [`CumulativeSum`] over an `i32`-valued projection of the input elements.
///
/// If no elements are present, the result is empty.
///
/// ```
/// use combinate_collector::cumulatively_summing_int;
/// use combinate_parallel::{Sequential, Strategy};
///
/// let words = ["one", "three", "five"];
/// let lengths = cumulatively_summing_int(|w: &&str| w.len() as i32);
/// let offsets = Sequential.collect(&words, &lengths);
/// assert_eq!(offsets, vec![3, 8, 12]);
/// ```
pub const fn cumulatively_summing_int<F>(mapper: F) -> CumulativeSum<F, i32> {
    CumulativeSum::new(mapper)
}

/// Returns a [`CumulativeSum`] over an `i64`-valued projection of the input elements.
///
/// If no elements are present, the result is empty.
///
/// ```
/// use combinate_collector::cumulatively_summing_long;
/// use combinate_parallel::{Sequential, Strategy};
///
/// let totals = Sequential.collect(vec![1i64, 2, -3], &cumulatively_summing_long(|l: i64| l));
/// assert_eq!(totals, vec![1, 3, 0]);
/// ```
pub const fn cumulatively_summing_long<F>(mapper: F) -> CumulativeSum<F, i64> {
    CumulativeSum::new(mapper)
}

/// Returns a [`CumulativeSum`] over an `f64`-valued projection of the input elements.
///
/// If no elements are present, the result is empty.
///
/// ```
/// use combinate_collector::cumulatively_summing_double;
/// use combinate_parallel::{Sequential, Strategy};
///
/// let collector = cumulatively_summing_double(|d: &f64| *d);
/// let totals = Sequential.collect(&[1.0, 2.0, -3.0], &collector);
/// assert_eq!(totals, vec![1.0, 3.0, 0.0]);
/// ```
pub const fn cumulatively_summing_double<F>(mapper: F) -> CumulativeSum<F, f64> {
    CumulativeSum::new(mapper)
}

/// Computes the running sums of `mapper` over `items` with the given [`Strategy`].
pub fn cumulative_sum<S, I, F, N>(strategy: &S, items: I, mapper: F) -> Vec<N>
where
    S: Strategy,
    I: IntoIterator<IntoIter: Send, Item: Send> + Send,
    F: Fn(I::Item) -> N + Send + Sync,
    N: Summand,
{
    strategy.collect(items, &CumulativeSum::new(mapper))
}

#[cfg(test)]
mod tests {
    use super::*;
    use paste::paste;

    fn fold<T, F, N>(collector: &CumulativeSum<F, N>, items: impl IntoIterator<Item = T>) -> Vec<N>
    where
        F: Fn(T) -> N + Send + Sync,
        N: Summand,
    {
        let mut totals = <CumulativeSum<F, N> as Collector<T>>::supply(collector);
        for item in items {
            collector.accumulate(&mut totals, item);
        }
        totals
    }

    fn merge<T, F, N>(collector: &CumulativeSum<F, N>, left: Vec<N>, right: Vec<N>) -> Vec<N>
    where
        F: Fn(T) -> N + Send + Sync,
        N: Summand,
    {
        <CumulativeSum<F, N> as Collector<T>>::combine(collector, left, right)
    }

    #[test]
    fn test_accumulate_appends_running_total() {
        let collector = cumulatively_summing_int(|i: i32| i);
        let mut totals = Collector::<i32>::supply(&collector);
        assert!(totals.is_empty());

        collector.accumulate(&mut totals, 4);
        assert_eq!(totals, vec![4]);

        collector.accumulate(&mut totals, -6);
        assert_eq!(totals, vec![4, -2]);

        collector.accumulate(&mut totals, 0);
        assert_eq!(totals, vec![4, -2, -2]);
    }

    #[test]
    fn test_combine_offsets_right() {
        let collector = cumulatively_summing_int(|i: i32| i);
        let left = fold(&collector, [1, 2]);
        let right = fold(&collector, [3, 4]);
        assert_eq!(merge(&collector, left, right), vec![1, 3, 6, 10]);
    }

    #[test]
    fn test_combine_empty_left_returns_right() {
        let collector = cumulatively_summing_long(|l: i64| l);
        let right = fold(&collector, [5, -5, 7]);
        assert_eq!(merge(&collector, Vec::new(), right.clone()), right);
    }

    #[test]
    fn test_combine_empty_right_returns_left() {
        let collector = cumulatively_summing_double(|d: f64| d);
        let left = fold(&collector, [0.5, 0.25]);
        assert_eq!(merge(&collector, left.clone(), Vec::new()), left);
    }

    #[test]
    fn test_combine_negative_offset() {
        let collector = cumulatively_summing_int(|i: i32| i);
        let left = fold(&collector, [-1, -2]);
        let right = fold(&collector, [1, 1]);
        assert_eq!(merge(&collector, left, right), vec![-1, -3, -2, -1]);
    }

    #[test]
    fn test_finish_is_identity() {
        let collector = cumulatively_summing_int(|i: i32| i);
        assert_eq!(Collector::<i32>::finish(&collector, vec![1, 3, 6]), vec![1, 3, 6]);
    }

    #[test]
    fn test_integer_overflow_wraps() {
        let collector = cumulatively_summing_int(|i: i32| i);
        assert_eq!(fold(&collector, [i32::MAX, 1]), vec![i32::MAX, i32::MIN]);

        let left = fold(&collector, [i32::MAX]);
        let right = fold(&collector, [2]);
        assert_eq!(merge(&collector, left, right), vec![i32::MAX, i32::MIN + 1]);

        let collector = cumulatively_summing_long(|l: i64| l);
        assert_eq!(fold(&collector, [i64::MIN, -1]), vec![i64::MIN, i64::MAX]);
    }

    #[test]
    fn test_debug_names_summand() {
        let collector = cumulatively_summing_double(|d: f64| d);
        assert!(format!("{collector:?}").contains("f64"));
    }

    macro_rules! impl_summand_test {
        ($type:ty) => {
            paste! {
                #[test]
                fn [<test_split_matches_single_pass_ $type>]() {
                    let collector = CumulativeSum::<_, $type>::new(|v: $type| v);
                    let values: Vec<$type> = (1..=20).map(|v| v as $type).collect();
                    let expected = fold(&collector, values.iter().copied());
                    for split in 0..=values.len() {
                        let (head, tail) = values.split_at(split);
                        let left = fold(&collector, head.iter().copied());
                        let right = fold(&collector, tail.iter().copied());
                        assert_eq!(merge(&collector, left, right), expected);
                    }
                }

                #[test]
                fn [<test_zero_is_identity_ $type>]() {
                    let value = 7 as $type;
                    assert_eq!(<$type as Summand>::ZERO.plus(value), value);
                    assert_eq!(value.plus(<$type as Summand>::ZERO), value);
                }
            }
        };
    }
    impl_summand_test!(i32);
    impl_summand_test!(i64);
    impl_summand_test!(f64);
}
