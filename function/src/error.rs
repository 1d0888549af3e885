//! Error types for combinator evaluation.

use thiserror::Error;
use tracing::debug;

/// Error type for combinator evaluation.
#[derive(Error, Debug)]
pub enum Error {
    /// No provider produced a value and the fallback did not either.
    #[error("fallback produced no value")]
    FallbackAbsent,
    /// A wrapped computation failed; the original error is the [source](std::error::Error::source).
    #[error("rethrown: {0}")]
    Rethrown(#[source] BoxError),
}

/// Boxed failure of any kind, as accepted by [Error::Rethrown].
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Wraps a failure of a wrapped computation in [Error::Rethrown].
pub(crate) fn rethrown<E: Into<BoxError>>(err: E) -> Error {
    let err = err.into();
    debug!(error = %err, "rethrowing failure");
    Error::Rethrown(err)
}

/// Translates a failure of a wrapped computation with a caller-supplied `mapper`.
pub(crate) fn translated<E, X>(err: E, mapper: impl FnOnce(E) -> X) -> X {
    debug!(kind = std::any::type_name::<E>(), "translating failure");
    mapper(err)
}
