//! Scrolly: driver error types.

use scrolly_core::error::ScrollyError;
use thiserror::Error;

/// Startup and runtime errors for the driver.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Reading commands or writing output failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The narrative reported an error it cannot recover from.
    #[error("narrative error: {0}")]
    Scrolly(#[from] ScrollyError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrolly_errors_convert_with_context() {
        let err: AppError = ScrollyError::CounterUnderflow.into();

        assert!(matches!(err, AppError::Scrolly(ScrollyError::CounterUnderflow)));
        assert!(err.to_string().starts_with("narrative error: "));
    }
}
