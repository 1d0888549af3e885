//! Combinators over suppliers (functions taking no argument).

use crate::{error, BoxError, Error};

/// Returns a supplier yielding the first present value produced by `suppliers` in order, or
/// [None] if none of them produces a value.
///
/// Suppliers after the first one producing a value are not evaluated.
///
/// # Examples
///
/// ```
/// use combinate_function::supplier::first_present;
/// use std::env;
///
/// let home = first_present([
///     (|| env::var("APP_HOME").ok()) as fn() -> Option<String>,
///     || env::var("HOME").ok(),
///     || Some("/".to_string()),
/// ]);
/// assert!(home().is_some());
/// ```
pub fn first_present<R, S, I>(suppliers: I) -> impl Fn() -> Option<R>
where
    S: Fn() -> Option<R>,
    I: IntoIterator<Item = S>,
{
    let suppliers: Vec<S> = suppliers.into_iter().collect();
    move || suppliers.iter().find_map(|supplier| supplier())
}

/// Returns a supplier yielding the first present value produced by `suppliers` in order, or
/// the value produced by `fallback` if none of them does.
pub fn first_present_or<R, FB, S, I>(fallback: FB, suppliers: I) -> impl Fn() -> R
where
    FB: Fn() -> R,
    S: Fn() -> Option<R>,
    I: IntoIterator<Item = S>,
{
    let first = first_present(suppliers);
    move || first().unwrap_or_else(&fallback)
}

/// Returns a supplier yielding the first present value produced by `suppliers` in order, or
/// the value produced by `fallback` if none of them does.
///
/// The fallback is expected to always produce a value: if it does not, the returned supplier
/// fails with [Error::FallbackAbsent].
pub fn first_present_or_else<R, FB, S, I>(
    fallback: FB,
    suppliers: I,
) -> impl Fn() -> Result<R, Error>
where
    FB: Fn() -> Option<R>,
    S: Fn() -> Option<R>,
    I: IntoIterator<Item = S>,
{
    let first = first_present(suppliers);
    move || match first() {
        Some(value) => Ok(value),
        None => fallback().ok_or(Error::FallbackAbsent),
    }
}

/// Returns a supplier that delegates to `supplier` and yields its result, or [None] if it
/// failed.
pub fn trying<R, E, S>(supplier: S) -> impl Fn() -> Option<R>
where
    S: Fn() -> Result<R, E>,
{
    move || supplier().ok()
}

/// Returns a supplier that delegates to `supplier` and yields its result, or [None] if it
/// failed or produced no value.
pub fn trying_optional<R, E, S>(supplier: S) -> impl Fn() -> Option<R>
where
    S: Fn() -> Result<Option<R>, E>,
{
    move || supplier().ok().flatten()
}

/// Returns a supplier that delegates to `supplier` and wraps any failure in
/// [Error::Rethrown], keeping the original error as its source.
///
/// Any failure convertible into a [BoxError] is accepted, including boxed errors and plain
/// messages.
pub fn rethrowing<R, E, S>(supplier: S) -> impl Fn() -> Result<R, Error>
where
    E: Into<BoxError>,
    S: Fn() -> Result<R, E>,
{
    move || supplier().map_err(error::rethrown)
}

/// Returns a supplier that delegates to `supplier` and translates any failure with `mapper`.
///
/// # Examples
///
/// ```
/// use combinate_function::supplier::rethrowing_with;
/// use std::io;
///
/// let read = rethrowing_with(
///     || "8080".parse::<u16>(),
///     |err| io::Error::new(io::ErrorKind::InvalidData, err),
/// );
/// assert_eq!(read().unwrap(), 8080);
/// ```
pub fn rethrowing_with<R, E, X, S, M>(supplier: S, mapper: M) -> impl Fn() -> Result<R, X>
where
    S: Fn() -> Result<R, E>,
    M: Fn(E) -> X,
{
    move || supplier().map_err(|err| error::translated(err, &mapper))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::Cell, error::Error as _, io, num::ParseIntError};
    use test_case::test_case;

    type Supplier<'a> = Box<dyn Fn() -> Option<&'static str> + 'a>;

    fn counting<'a>(calls: &'a Cell<usize>, result: Option<&'static str>) -> Supplier<'a> {
        Box::new(move || {
            calls.set(calls.get() + 1);
            result
        })
    }

    #[test_case(&[None, Some("b"), Some("c")], Some("b"), &[1, 1, 0]; "second present")]
    #[test_case(&[Some("a"), Some("b")], Some("a"), &[1, 0]; "first present")]
    #[test_case(&[None, None, Some("c")], Some("c"), &[1, 1, 1]; "last present")]
    #[test_case(&[None, None], None, &[1, 1]; "all absent")]
    #[test_case(&[], None, &[]; "no suppliers")]
    fn test_first_present(
        results: &[Option<&'static str>],
        expected: Option<&'static str>,
        evaluations: &[usize],
    ) {
        let calls: Vec<Cell<usize>> = results.iter().map(|_| Cell::new(0)).collect();
        let first = first_present(
            results
                .iter()
                .zip(&calls)
                .map(|(result, calls)| counting(calls, *result)),
        );

        assert_eq!(first(), expected);
        let counts: Vec<usize> = calls.iter().map(Cell::get).collect();
        assert_eq!(counts, evaluations);
    }

    #[test]
    fn test_first_present_reevaluates_on_each_call() {
        let calls = Cell::new(0);
        let first = first_present([counting(&calls, Some("a"))]);
        assert_eq!(first(), Some("a"));
        assert_eq!(first(), Some("a"));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_first_present_or() {
        let calls = Cell::new(0);
        let first = first_present_or(|| "fallback", [counting(&calls, None)]);
        assert_eq!(first(), "fallback");

        let first = first_present_or(|| "fallback", [counting(&calls, Some("found"))]);
        assert_eq!(first(), "found");
    }

    #[test]
    fn test_first_present_or_else() {
        let calls = Cell::new(0);
        let first = first_present_or_else(|| Some("fallback"), [counting(&calls, None)]);
        assert_eq!(first().unwrap(), "fallback");

        let first = first_present_or_else(|| None, [counting(&calls, None)]);
        assert!(matches!(first(), Err(Error::FallbackAbsent)));
    }

    #[test]
    fn test_first_present_or_else_skips_fallback() {
        let fallback_calls = Cell::new(0);
        let fallback = || {
            fallback_calls.set(fallback_calls.get() + 1);
            None
        };
        let calls = Cell::new(0);
        let first = first_present_or_else(fallback, [counting(&calls, Some("found"))]);
        assert_eq!(first().unwrap(), "found");
        assert_eq!(fallback_calls.get(), 0);
    }

    #[test]
    fn test_trying() {
        assert_eq!(trying(|| "7".parse::<i32>())(), Some(7));
        assert_eq!(trying(|| "seven".parse::<i32>())(), None);
    }

    #[test]
    fn test_trying_optional() {
        let present = trying_optional(|| "7".parse::<i32>().map(Some));
        assert_eq!(present(), Some(7));

        let absent = trying_optional(|| Ok::<Option<i32>, ParseIntError>(None));
        assert_eq!(absent(), None);

        let failed = trying_optional(|| "x".parse::<i32>().map(Some));
        assert_eq!(failed(), None);
    }

    #[test]
    fn test_rethrowing() {
        assert_eq!(rethrowing(|| "7".parse::<i32>())().unwrap(), 7);

        let expected = "seven".parse::<i32>().unwrap_err();
        let err = rethrowing(|| "seven".parse::<i32>())().unwrap_err();
        let source = err.source().unwrap().downcast_ref::<ParseIntError>();
        assert_eq!(source, Some(&expected));
    }

    #[test]
    fn test_rethrowing_boxed_error() {
        let connect = rethrowing(|| -> Result<u8, BoxError> {
            Err(Box::new(io::Error::new(io::ErrorKind::TimedOut, "timed out")))
        });
        let err = connect().unwrap_err();
        let source = err.source().unwrap().downcast_ref::<io::Error>().unwrap();
        assert_eq!(source.kind(), io::ErrorKind::TimedOut);

        let connect = rethrowing(|| -> Result<u8, BoxError> { Err("boom".into()) });
        assert_eq!(connect().unwrap_err().source().unwrap().to_string(), "boom");
    }

    #[test]
    fn test_rethrowing_message_error() {
        let owned = rethrowing(|| Err::<u8, _>(String::from("no route")));
        let err = owned().unwrap_err();
        assert_eq!(err.to_string(), "rethrown: no route");
        assert_eq!(err.source().unwrap().to_string(), "no route");

        let borrowed = rethrowing(|| Err::<u8, _>("no route"));
        assert_eq!(borrowed().unwrap_err().to_string(), "rethrown: no route");
    }

    #[test]
    fn test_rethrowing_with() {
        #[derive(Debug, PartialEq)]
        struct Wrapped(ParseIntError);

        let expected = "seven".parse::<i32>().unwrap_err();
        let err = rethrowing_with(|| "seven".parse::<i32>(), Wrapped)().unwrap_err();
        assert_eq!(err, Wrapped(expected));
    }
}
