//! Symbol references and call sites

use serde::Serialize;

use super::declarations::FunctionId;
use crate::shared::models::ScopeId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    pub name: String,
    pub file: String,
    pub line: u32,
    pub scope: ScopeId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionCall {
    /// Textual callee name (last segment of a qualified call)
    pub callee: String,
    /// Simple name of the nearest enclosing function
    pub caller: Option<String>,
    pub caller_id: Option<FunctionId>,
    /// Raw argument texts, in order
    pub arguments: Vec<String>,
    pub file: String,
    pub line: u32,
    pub scope: ScopeId,
}

impl FunctionCall {
    /// Does any argument text mention `name`?
    pub fn mentions(&self, name: &str) -> bool {
        self.arguments.iter().any(|a| a.contains(name))
    }
}
