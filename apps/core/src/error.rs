use std::io;
use thiserror::Error;

/// Crate-wide error type.
///
/// Classification itself never fails; only loading the pattern bank and
/// decoding input files can produce one of these.
#[derive(Debug, Error)]
pub enum AppError {
    /// Represents standard input/output errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The pattern and lexicon bank could not be loaded (missing, corrupt or invalid data).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents rejected input (unsupported file type, binary payload, malformed CSV).
    #[error("Validation error: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl Clone for AppError {
    fn clone(&self) -> Self {
        match self {
            AppError::Io(e) => AppError::Io(io::Error::new(e.kind(), e.to_string())),
            AppError::Config(s) => AppError::Config(s.clone()),
            AppError::Validation(s) => AppError::Validation(s.clone()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Config(format!("JSON error: {}", err))
    }
}

impl From<regex::Error> for AppError {
    fn from(err: regex::Error) -> Self {
        AppError::Config(format!("Invalid pattern: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Config(format!("Validation errors: {}", err))
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::Validation(format!("CSV error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regex_error_is_config() {
        let err: AppError = regex::Regex::new("(unclosed").unwrap_err().into();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().starts_with("Configuration error"));
    }

    #[test]
    fn test_clone_preserves_io_kind() {
        let err = AppError::Io(io::Error::new(io::ErrorKind::NotFound, "bank.json"));
        match err.clone() {
            AppError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::NotFound),
            other => panic!("unexpected variant: {:?}", other),
        }
    }
}
