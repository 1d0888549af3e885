//! Chain optional providers and adapt fallible ones.
//!
//! Providers come in three shapes, each with its own module:
//!
//! - [function]: `Fn(&T) -> ...`, applied to a shared argument
//! - [supplier]: `Fn() -> ...`, taking no argument
//! - [runnable]: `FnMut() -> Result<(), E>`, a side effect that may fail
//!
//! Two families of combinators are provided:
//!
//! - **Chaining** (`first_present*`): evaluate optional-valued providers in order and stop at
//!   the first one producing a value, optionally consulting a fallback.
//! - **Adapting** (`trying*`, `rethrowing*`): turn a provider returning [Result] into one that
//!   suppresses failures as [None], wraps them in [Error::Rethrown], or translates them with a
//!   caller-supplied mapper. The original error is always preserved as the cause.
//!
//! Panics raised by a provider are not intercepted.
//!
//! # Example
//!
//! ```
//! use combinate_function::function::{first_present_or, trying};
//!
//! let parse = first_present_or(|_: &str| 0, [trying(|s: &str| s.parse::<i64>())]);
//! assert_eq!(parse("42"), 42);
//! assert_eq!(parse("forty-two"), 0);
//! ```

pub mod function;
pub mod runnable;
pub mod supplier;

mod error;
pub use error::{BoxError, Error};
