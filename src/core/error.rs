use thiserror::Error;

/// Errors raised by the scoring engine
///
/// An empty candidate set is not an error: every computation degrades to
/// empty results instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("No transit stops available for proximity calculation")]
    NoStopsAvailable,
}

pub type EngineResult<T> = Result<T, EngineError>;
