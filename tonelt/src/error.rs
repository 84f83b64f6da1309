//! Error handling for the `tonelt` CLI.

use thiserror::Error;

/// Errors the CLI itself can raise, distinct from a Tonel validation
/// failure (which is reported as ordinary program output, not an `Err`).
#[derive(Error, Debug)]
pub enum TonelCliError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TonelCliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = TonelCliError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "configuration error: missing field");
    }

    #[test]
    fn io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TonelCliError = io_err.into();
        assert!(matches!(err, TonelCliError::Io(_)));
    }
}
