//! Parsing Feature
//!
//! The input boundary of the pipeline: a front end turns one source file
//! into a language-neutral [`SourceTree`].
//!
//! ## Structure
//! - `domain/` - SourceTree, SyntaxNode models
//! - `ports/` - SourceFrontEnd trait
//! - `application/` - ParseSourcesUseCase (parallel batch)
//! - `infrastructure/` - KotlinFrontEnd (tree-sitter-kotlin)

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

// Re-exports
pub use application::{ParseSourcesUseCase, SourceInput};
pub use domain::{
    ClassKind, ParameterDecl, PropertyDecl, SourceTree, SyntaxError, SyntaxKind, SyntaxNode,
};
pub use infrastructure::KotlinFrontEnd;
pub use ports::SourceFrontEnd;
