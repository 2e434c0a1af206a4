//! Non-fatal diagnostics
//!
//! Every recoverable condition in the pipeline is recorded as a
//! [`Diagnostic`] and returned next to the value it qualifies. Nothing in the
//! core panics or unwinds for these.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A file's tree was unusable; the file was skipped
    ParseError,
    /// A derived record referenced something missing; the record was omitted
    AnalysisInconsistency,
    /// Outcome search did not reach both TRUE and FALSE within budget
    CoverageSearchExhausted,
    /// No unused else-literal found within the retry bound
    UniquenessRetryExhausted,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::ParseError => "parse-error",
            DiagnosticKind::AnalysisInconsistency => "analysis-inconsistency",
            DiagnosticKind::CoverageSearchExhausted => "coverage-search-exhausted",
            DiagnosticKind::UniquenessRetryExhausted => "uniqueness-retry-exhausted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub file: Option<String>,
    pub line: Option<u32>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            file: None,
            line: None,
        }
    }

    pub fn parse_error(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::ParseError, message).in_file(file)
    }

    pub fn inconsistency(message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::AnalysisInconsistency, message)
    }

    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn at_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    /// Emit through tracing at warn level
    pub fn log(&self) {
        tracing::warn!(kind = self.kind.as_str(), "{}", self);
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.file, self.line) {
            (Some(file), Some(line)) => write!(f, "{}:{}: {}", file, line, self.message),
            (Some(file), None) => write!(f, "{}: {}", file, self.message),
            _ => write!(f, "{}", self.message),
        }
    }
}
