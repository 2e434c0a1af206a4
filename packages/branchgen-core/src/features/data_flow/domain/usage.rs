//! Variable uses

use serde::Serialize;

use crate::shared::models::ScopeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct UseId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UseKind {
    Computation,
    Condition,
    Return,
    FunctionArg,
    ArrayIndex,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Use {
    pub id: UseId,
    pub variable: String,
    pub file: String,
    pub line: u32,
    pub scope: ScopeId,
    pub kind: UseKind,
}

impl Use {
    /// Value identity, ignoring the arena id
    pub fn key(&self) -> (&str, &str, u32, &ScopeId, UseKind) {
        (&self.variable, &self.file, self.line, &self.scope, self.kind)
    }

    /// Identity used for de-duplication (kind ignored)
    pub fn location_key(&self) -> (&str, &str, u32, &ScopeId) {
        (&self.variable, &self.file, self.line, &self.scope)
    }
}
