//! Data flow anomalies

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AnomalyKind {
    UndefinedUse,
    UnusedDefinition,
    RedundantDefinition,
    UninitializedUse,
}

impl AnomalyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalyKind::UndefinedUse => "undefined-use",
            AnomalyKind::UnusedDefinition => "unused-definition",
            AnomalyKind::RedundantDefinition => "redundant-definition",
            AnomalyKind::UninitializedUse => "uninitialized-use",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataFlowAnomaly {
    pub kind: AnomalyKind,
    pub variable: String,
    pub file: String,
    pub line: u32,
    pub description: String,
}

impl DataFlowAnomaly {
    pub fn undefined_use(variable: &str, file: &str, line: u32) -> Self {
        Self::new(
            AnomalyKind::UndefinedUse,
            variable,
            file,
            line,
            format!("Variable '{}' is used before definition", variable),
        )
    }

    pub fn unused_definition(variable: &str, file: &str, line: u32) -> Self {
        Self::new(
            AnomalyKind::UnusedDefinition,
            variable,
            file,
            line,
            format!("Variable '{}' is defined but never used", variable),
        )
    }

    pub fn redundant_definition(variable: &str, file: &str, line: u32, count: usize) -> Self {
        Self::new(
            AnomalyKind::RedundantDefinition,
            variable,
            file,
            line,
            format!(
                "Variable '{}' has {} definitions before this use",
                variable, count
            ),
        )
    }

    pub fn uninitialized_use(variable: &str, file: &str, line: u32) -> Self {
        Self::new(
            AnomalyKind::UninitializedUse,
            variable,
            file,
            line,
            format!("Variable '{}' might be used uninitialized", variable),
        )
    }

    fn new(kind: AnomalyKind, variable: &str, file: &str, line: u32, description: String) -> Self {
        Self {
            kind,
            variable: variable.to_string(),
            file: file.to_string(),
            line,
            description,
        }
    }
}

impl fmt::Display for DataFlowAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: [{}] {}",
            self.file,
            self.line,
            self.kind.as_str(),
            self.description
        )
    }
}
