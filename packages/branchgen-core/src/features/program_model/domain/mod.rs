//! Program model domain

mod control_flow;
mod declarations;
mod line_context;
mod model;
mod occurrences;

pub use control_flow::{BranchId, BranchKind, ConditionalBranch, Loop, LoopKind};
pub use declarations::{
    ClassDecl, FunctionDecl, FunctionId, Parameter, Property, SourceFile, Variable,
};
pub use line_context::LineContext;
pub use model::{ModelStatistics, ProgramModel};
pub use occurrences::{FunctionCall, Reference};

// Declaration kinds come straight from the parsed tree
pub use crate::features::parsing::domain::ClassKind;

#[cfg(test)]
pub(crate) mod fixture;
