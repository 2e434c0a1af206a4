//! Per-line context

use serde::Serialize;

use super::declarations::Variable;
use crate::shared::models::ScopeId;

/// Everything known about one physical source line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineContext {
    pub file: String,
    /// 1-based
    pub line: u32,
    pub scope: ScopeId,
    pub code: String,
    /// Variables that become visible on this line (parameters included)
    pub variables: Vec<Variable>,
    /// Indexes into [`super::ProgramModel::references`]
    pub references: Vec<usize>,
    /// Indexes into [`super::ProgramModel::calls`]
    pub calls: Vec<usize>,
    /// `if (..)`, `when (..)`, `for (.. in ..)`, ...
    pub control_flow: Option<String>,
    pub class_name: Option<String>,
    pub function_name: Option<String>,
}

impl LineContext {
    pub fn new(file: impl Into<String>, line: u32, code: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line,
            scope: ScopeId::Global,
            code: code.into(),
            variables: Vec::new(),
            references: Vec::new(),
            calls: Vec::new(),
            control_flow: None,
            class_name: None,
            function_name: None,
        }
    }

    pub fn is_return(&self) -> bool {
        self.code.trim_start().starts_with("return")
    }

    pub fn header_mentions(&self, name: &str) -> bool {
        self.control_flow
            .as_deref()
            .map(|h| h.contains(name))
            .unwrap_or(false)
    }
}
