//! Combinators over functions of a shared argument.
//!
//! Every combinator takes its providers by value and returns a new function borrowing the
//! argument, so the result can be applied any number of times.

use crate::{error, BoxError, Error};

/// Returns a function yielding the first present value produced by `functions` when applied to
/// the same argument in order, or [None] if none of them produces a value.
///
/// Functions after the first one producing a value are not evaluated.
///
/// # Examples
///
/// ```
/// use combinate_function::function::first_present;
///
/// let parse = first_present([
///     (|s: &str| s.strip_prefix("0x").and_then(|hex| u32::from_str_radix(hex, 16).ok()))
///         as fn(&str) -> Option<u32>,
///     |s: &str| s.parse().ok(),
/// ]);
/// assert_eq!(parse("0xff"), Some(255));
/// assert_eq!(parse("255"), Some(255));
/// assert_eq!(parse("ff"), None);
/// ```
pub fn first_present<T, R, F, I>(functions: I) -> impl Fn(&T) -> Option<R>
where
    T: ?Sized,
    F: Fn(&T) -> Option<R>,
    I: IntoIterator<Item = F>,
{
    let functions: Vec<F> = functions.into_iter().collect();
    move |arg: &T| functions.iter().find_map(|function| function(arg))
}

/// Returns a function yielding the first present value produced by `functions` when applied to
/// the same argument in order, or the value produced by `fallback` if none of them does.
///
/// Functions after the first one producing a value are not evaluated, and `fallback` is only
/// evaluated when all of them come up empty.
///
/// # Examples
///
/// ```
/// use combinate_function::function::first_present_or;
///
/// let port = first_present_or(
///     |_: &str| 80,
///     [|s: &str| s.rsplit_once(':').and_then(|(_, port)| port.parse().ok())],
/// );
/// assert_eq!(port("localhost:8080"), 8080);
/// assert_eq!(port("localhost"), 80);
/// ```
pub fn first_present_or<T, R, FB, F, I>(fallback: FB, functions: I) -> impl Fn(&T) -> R
where
    T: ?Sized,
    FB: Fn(&T) -> R,
    F: Fn(&T) -> Option<R>,
    I: IntoIterator<Item = F>,
{
    let first = first_present(functions);
    move |arg: &T| first(arg).unwrap_or_else(|| fallback(arg))
}

/// Returns a function yielding the first present value produced by `functions` when applied to
/// the same argument in order, or the value produced by `fallback` if none of them does.
///
/// The fallback is expected to always produce a value: if it does not, the returned function
/// fails with [Error::FallbackAbsent].
pub fn first_present_or_else<T, R, FB, F, I>(
    fallback: FB,
    functions: I,
) -> impl Fn(&T) -> Result<R, Error>
where
    T: ?Sized,
    FB: Fn(&T) -> Option<R>,
    F: Fn(&T) -> Option<R>,
    I: IntoIterator<Item = F>,
{
    let first = first_present(functions);
    move |arg: &T| match first(arg) {
        Some(value) => Ok(value),
        None => fallback(arg).ok_or(Error::FallbackAbsent),
    }
}

/// Returns a function that delegates to `function` and yields its result, or [None] if it
/// failed.
///
/// # Examples
///
/// ```
/// use combinate_function::function::trying;
///
/// let parse = trying(|s: &str| s.parse::<u8>());
/// assert_eq!(parse("42"), Some(42));
/// assert_eq!(parse("256"), None);
/// ```
pub fn trying<T, R, E, F>(function: F) -> impl Fn(&T) -> Option<R>
where
    T: ?Sized,
    F: Fn(&T) -> Result<R, E>,
{
    move |arg: &T| function(arg).ok()
}

/// Returns a function that delegates to `function` and yields its result, or [None] if it
/// failed or produced no value.
pub fn trying_optional<T, R, E, F>(function: F) -> impl Fn(&T) -> Option<R>
where
    T: ?Sized,
    F: Fn(&T) -> Result<Option<R>, E>,
{
    move |arg: &T| function(arg).ok().flatten()
}

/// Returns a function that delegates to `function` and wraps any failure in
/// [Error::Rethrown], keeping the original error as its source.
///
/// # Examples
///
/// ```
/// use combinate_function::{function::rethrowing, Error};
/// use std::{error::Error as _, num::ParseIntError};
///
/// let parse = rethrowing(|s: &str| s.parse::<u8>());
/// assert_eq!(parse("42").unwrap(), 42);
///
/// let err = parse("x").unwrap_err();
/// assert!(matches!(err, Error::Rethrown(_)));
/// assert!(err.source().unwrap().is::<ParseIntError>());
/// ```
pub fn rethrowing<T, R, E, F>(function: F) -> impl Fn(&T) -> Result<R, Error>
where
    T: ?Sized,
    E: Into<BoxError>,
    F: Fn(&T) -> Result<R, E>,
{
    move |arg: &T| function(arg).map_err(error::rethrown)
}

/// Returns a function that delegates to `function` and translates any failure with `mapper`.
///
/// The original error is passed to `mapper` by value.
pub fn rethrowing_with<T, R, E, X, F, M>(function: F, mapper: M) -> impl Fn(&T) -> Result<R, X>
where
    T: ?Sized,
    F: Fn(&T) -> Result<R, E>,
    M: Fn(E) -> X,
{
    move |arg: &T| function(arg).map_err(|err| error::translated(err, &mapper))
}
