//! Emission errors

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmissionError {
    /// Creating a directory or writing a suite file failed
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("suite '{0}' has no test cases")]
    EmptySuite(String),
}

impl EmissionError {
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EmissionError::Write {
            path: path.into(),
            source,
        }
    }
}

pub type EmissionResult<T> = std::result::Result<T, EmissionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_error_names_path() {
        let err = EmissionError::write(
            "out/demo/CalcTest.kt",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "failed to write out/demo/CalcTest.kt: denied");
    }
}
