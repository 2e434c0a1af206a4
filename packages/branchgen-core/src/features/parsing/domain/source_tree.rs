//! Parsed file representation
//!
//! What a front end hands to the program model builder.

use serde::Serialize;

use super::syntax_node::SyntaxNode;

/// Recoverable syntax problem inside an otherwise usable tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxError {
    pub start_byte: usize,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceTree {
    pub path: String,
    pub source: String,
    pub package: Option<String>,
    pub imports: Vec<String>,
    /// Top-level items
    pub items: Vec<SyntaxNode>,
    /// Subtrees the front end dropped
    pub errors: Vec<SyntaxError>,
    /// Set when nothing in the file can be trusted
    pub unusable: Option<String>,
}

impl SourceTree {
    pub fn new(path: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            source: source.into(),
            package: None,
            imports: Vec::new(),
            items: Vec::new(),
            errors: Vec::new(),
            unusable: None,
        }
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    pub fn with_imports(mut self, imports: Vec<String>) -> Self {
        self.imports = imports;
        self
    }

    pub fn with_items(mut self, items: Vec<SyntaxNode>) -> Self {
        self.items = items;
        self
    }

    /// Mark the whole file as unusable
    pub fn unusable(mut self, reason: impl Into<String>) -> Self {
        self.unusable = Some(reason.into());
        self
    }

    pub fn is_usable(&self) -> bool {
        self.unusable.is_none()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Byte offset of the first occurrence of `needle` (test fixtures and
    /// hand-built trees use this to place nodes)
    pub fn offset_of(&self, needle: &str) -> Option<usize> {
        self.source.find(needle)
    }
}
