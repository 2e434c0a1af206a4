//! Error types for branchgen-core
//!
//! Fatal errors only. Recoverable conditions (unusable files, exhausted
//! searches) travel as [`crate::shared::models::Diagnostic`] values next to
//! the result they qualify.

use thiserror::Error;

use crate::config::ConfigError;
use crate::features::emission::EmissionError;

/// Main error type for branchgen-core operations
#[derive(Debug, Error)]
pub enum BranchgenError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error in {file}: {reason}")]
    Parse { file: String, reason: String },

    /// Analysis error
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Emission error (writing test suites)
    #[error("Emission error: {0}")]
    Emission(#[from] EmissionError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Worker pool could not be started
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl BranchgenError {
    /// Create a parse error
    pub fn parse_error(file: impl Into<String>, reason: impl Into<String>) -> Self {
        BranchgenError::Parse {
            file: file.into(),
            reason: reason.into(),
        }
    }

    /// Create an analysis error
    pub fn analysis(msg: impl Into<String>) -> Self {
        BranchgenError::Analysis(msg.into())
    }

    /// Whether the error leaves the produced output incomplete on disk
    pub fn is_output_failure(&self) -> bool {
        matches!(self, BranchgenError::Io(_) | BranchgenError::Emission(_))
    }
}

/// Result type alias for branchgen operations
pub type Result<T> = std::result::Result<T, BranchgenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = BranchgenError::parse_error("Foo.kt", "unexpected token");
        assert_eq!(err.to_string(), "Parse error in Foo.kt: unexpected token");
    }

    #[test]
    fn test_io_error_is_output_failure() {
        let err: BranchgenError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(err.is_output_failure());
        assert!(!BranchgenError::analysis("x").is_output_failure());
    }
}
