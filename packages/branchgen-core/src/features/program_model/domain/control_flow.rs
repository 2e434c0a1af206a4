//! Conditional branches and loops

use std::fmt;

use serde::Serialize;

use super::declarations::FunctionId;
use crate::shared::models::ScopeId;

/// Index of a branch in [`super::ProgramModel::branches`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BranchId(pub usize);

impl fmt::Display for BranchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "branch#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BranchKind {
    If,
    When,
    WhenEntry,
}

impl BranchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BranchKind::If => "if",
            BranchKind::When => "when",
            BranchKind::WhenEntry => "when-entry",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConditionalBranch {
    pub id: BranchId,
    pub kind: BranchKind,
    /// Condition text (`if`), subject text (`when`, `unconditional` without
    /// one) or the joined case conditions (entry)
    pub condition: String,
    /// Simple name of the owning function
    pub function: String,
    pub function_id: Option<FunctionId>,
    pub file: String,
    pub line: u32,
    /// Enclosing `when` of an entry
    pub parent: Option<BranchId>,
    /// `else ->` entry
    pub is_catch_all: bool,
    /// Single value expression of the guarded arm
    pub body_value: Option<String>,
}

impl ConditionalBranch {
    pub fn is_when_entry(&self) -> bool {
        self.kind == BranchKind::WhenEntry
    }

    /// Subject text of a `when`, `None` for subject-less ones
    pub fn subject(&self) -> Option<&str> {
        match self.kind {
            BranchKind::When if self.condition != "unconditional" => Some(&self.condition),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LoopKind {
    For,
    While,
    DoWhile,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Loop {
    pub kind: LoopKind,
    /// Induction variable (`for`)
    pub variable: Option<String>,
    /// Iterated expression (`for`)
    pub iterable: Option<String>,
    /// Loop condition (`while`, `do-while`)
    pub condition: Option<String>,
    pub file: String,
    pub line: u32,
    pub scope: ScopeId,
}

impl Loop {
    pub fn header(&self) -> String {
        match self.kind {
            LoopKind::For => format!(
                "for ({} in {})",
                self.variable.as_deref().unwrap_or(""),
                self.iterable.as_deref().unwrap_or("")
            ),
            LoopKind::While => format!("while ({})", self.condition.as_deref().unwrap_or("")),
            LoopKind::DoWhile => {
                format!("do-while ({})", self.condition.as_deref().unwrap_or(""))
            }
        }
    }
}
