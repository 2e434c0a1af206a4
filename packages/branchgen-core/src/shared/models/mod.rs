//! Shared models

mod diagnostic;
mod scope;
mod span;

pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use scope::ScopeId;
pub use span::{LineIndex, LineSpan};
