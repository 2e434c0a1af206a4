//! Variable definitions

use serde::Serialize;

use crate::shared::models::ScopeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DefId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DefinitionKind {
    Declaration,
    Assignment,
    Parameter,
    LoopVariable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Definition {
    pub id: DefId,
    pub variable: String,
    pub file: String,
    pub line: u32,
    pub scope: ScopeId,
    pub kind: DefinitionKind,
    /// Index of the originating model variable, if any
    pub origin: Option<usize>,
}

impl Definition {
    /// Value identity, ignoring the arena id
    pub fn key(&self) -> (&str, &str, u32, &ScopeId, DefinitionKind) {
        (&self.variable, &self.file, self.line, &self.scope, self.kind)
    }
}
