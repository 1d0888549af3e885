//! Adapters for fallible side effects.
//!
//! A runnable is an `FnMut() -> Result<(), E>`: it produces no value, only success or failure.

use crate::{error, BoxError, Error};

/// Returns a runnable that delegates to `runnable` and reports whether it succeeded.
///
/// # Examples
///
/// ```
/// use combinate_function::runnable::trying;
///
/// let mut log = Vec::new();
/// let mut record = trying(|| -> Result<(), String> {
///     if log.len() == 2 {
///         return Err("log full".into());
///     }
///     log.push("entry");
///     Ok(())
/// });
/// assert!(record());
/// assert!(record());
/// assert!(!record());
/// ```
pub fn trying<E, F>(mut runnable: F) -> impl FnMut() -> bool
where
    F: FnMut() -> Result<(), E>,
{
    move || runnable().is_ok()
}

/// Returns a runnable that delegates to `runnable` and wraps any failure in
/// [Error::Rethrown], keeping the original error as its source.
pub fn rethrowing<E, F>(mut runnable: F) -> impl FnMut() -> Result<(), Error>
where
    E: Into<BoxError>,
    F: FnMut() -> Result<(), E>,
{
    move || runnable().map_err(error::rethrown)
}

/// Returns a runnable that delegates to `runnable` and translates any failure with `mapper`.
pub fn rethrowing_with<E, X, F, M>(mut runnable: F, mapper: M) -> impl FnMut() -> Result<(), X>
where
    F: FnMut() -> Result<(), E>,
    M: Fn(E) -> X,
{
    move || runnable().map_err(|err| error::translated(err, &mapper))
}
