//! Parsing domain models

mod source_tree;
mod syntax_node;

pub use source_tree::{SourceTree, SyntaxError};
pub use syntax_node::{ClassKind, ParameterDecl, PropertyDecl, SyntaxKind, SyntaxNode};
