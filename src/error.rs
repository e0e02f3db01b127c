use thiserror::Error;

/// Errors raised by the indexing and text tree types.
///
/// Both kinds are synchronous, local contract violations; there is no retry,
/// no partial success and no internal recovery. Callers either validate
/// inputs up front or handle the error at the call site.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextError {
    /// Malformed construction or call arguments.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A well-formed request that exceeds known or total bounds.
    #[error("out of range: {0}")]
    OutOfRange(String),
}
