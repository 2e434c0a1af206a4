//! Declaration records: files, classes, functions, variables

use serde::Serialize;

use crate::features::parsing::domain::{ClassKind, ParameterDecl, PropertyDecl};
use crate::shared::models::{LineSpan, ScopeId};

/// Index of a function in [`super::ProgramModel::functions`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FunctionId(pub usize);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFile {
    pub path: String,
    pub package: Option<String>,
    pub imports: Vec<String>,
    pub line_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
    pub type_name: String,
    pub default_value: Option<String>,
    pub is_variadic: bool,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            default_value: None,
            is_variadic: false,
        }
    }
}

impl From<&ParameterDecl> for Parameter {
    fn from(decl: &ParameterDecl) -> Self {
        Self {
            name: decl.name.clone(),
            type_name: decl.type_name.clone(),
            default_value: decl.default_value.clone(),
            is_variadic: decl.is_variadic,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Property {
    pub name: String,
    pub type_name: Option<String>,
    pub mutable: bool,
    pub initializer: Option<String>,
}

impl From<&PropertyDecl> for Property {
    fn from(decl: &PropertyDecl) -> Self {
        Self {
            name: decl.name.clone(),
            type_name: decl.type_name.clone(),
            mutable: decl.mutable,
            initializer: decl.initializer.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassDecl {
    pub name: String,
    /// Package-qualified, nested classes dotted
    pub qualified_name: String,
    pub file: String,
    pub span: LineSpan,
    pub kind: ClassKind,
    pub properties: Vec<Property>,
    /// Primary constructor parameters
    pub constructor: Vec<Parameter>,
}

impl ClassDecl {
    pub fn line(&self) -> u32 {
        self.span.start_line
    }

    pub fn is_instantiable(&self) -> bool {
        self.kind.is_instantiable()
    }

    pub fn is_object(&self) -> bool {
        self.kind == ClassKind::Object
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionDecl {
    pub name: String,
    pub qualified_name: String,
    /// Qualified name of the owning class
    pub owner: Option<String>,
    pub file: String,
    pub span: LineSpan,
    pub return_type: String,
    pub parameters: Vec<Parameter>,
    pub scope: ScopeId,
    pub is_private: bool,
    pub is_suspend: bool,
    /// Declared inside another function body
    pub is_local: bool,
    /// Extension receiver type
    pub receiver: Option<String>,
}

impl FunctionDecl {
    pub fn line(&self) -> u32 {
        self.span.start_line
    }

    pub fn end_line(&self) -> u32 {
        self.span.end_line
    }

    /// Simple name of the owning class
    pub fn owner_simple_name(&self) -> Option<&str> {
        self.owner
            .as_deref()
            .map(|q| q.rsplit('.').next().unwrap_or(q))
    }

    pub fn is_void(&self) -> bool {
        matches!(self.return_type.as_str(), "Unit" | "Nothing" | "")
    }

    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Can a generated test call this function directly?
    pub fn is_callable_from_test(&self) -> bool {
        !self.is_private && !self.is_suspend && !self.is_local && self.receiver.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variable {
    pub name: String,
    pub type_name: Option<String>,
    pub file: String,
    pub line: u32,
    pub scope: ScopeId,
    pub initializer: Option<String>,
    pub is_parameter: bool,
}
