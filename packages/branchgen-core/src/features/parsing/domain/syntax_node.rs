//! Language-neutral syntax node representation
//!
//! Only the constructs the program model cares about get a kind of their
//! own. Everything else is flattened away by the front end, so a node's
//! children are the interesting descendants, not the raw grammar children.

use serde::Serialize;

/// Function parameter as written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterDecl {
    pub name: String,
    pub type_name: String,
    pub default_value: Option<String>,
    pub is_variadic: bool,
}

impl ParameterDecl {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            default_value: None,
            is_variadic: false,
        }
    }

    pub fn variadic(mut self) -> Self {
        self.is_variadic = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }
}

/// Property or local variable declaration as written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyDecl {
    pub name: String,
    pub type_name: Option<String>,
    pub mutable: bool,
    pub initializer: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ClassKind {
    Class,
    /// `object` declarations and companions: members are called on the type
    Object,
    Interface,
    Abstract,
    Enum,
}

impl ClassKind {
    /// Can a test construct an instance with a constructor call?
    pub fn is_instantiable(&self) -> bool {
        matches!(self, ClassKind::Class)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SyntaxKind {
    Class {
        name: String,
        kind: ClassKind,
        /// Primary constructor parameters, in order
        constructor: Vec<ParameterDecl>,
        /// `val`/`var` primary constructor parameters
        constructor_properties: Vec<PropertyDecl>,
    },
    Function {
        name: String,
        /// Declared return type; `None` means Unit (or an inferred expression body)
        return_type: Option<String>,
        parameters: Vec<ParameterDecl>,
        is_private: bool,
        is_suspend: bool,
        /// Extension receiver type
        receiver: Option<String>,
        /// Single-expression body (`= expr`), used as the return type hint
        expression_body: Option<String>,
    },
    Property(PropertyDecl),
    Destructuring {
        names: Vec<String>,
        initializer: Option<String>,
    },
    If {
        condition: String,
        /// Value of the then-arm when it is a single expression or `return expr`
        then_value: Option<String>,
    },
    When {
        subject: Option<String>,
    },
    WhenEntry {
        conditions: Vec<String>,
        is_else: bool,
        value: Option<String>,
    },
    For {
        variable: String,
        iterable: String,
    },
    While {
        condition: String,
    },
    DoWhile {
        condition: String,
    },
    Call {
        callee: String,
        arguments: Vec<String>,
    },
    Reference {
        name: String,
    },
    Block,
}

impl SyntaxKind {
    pub fn is_declaration(&self) -> bool {
        matches!(
            self,
            SyntaxKind::Class { .. }
                | SyntaxKind::Function { .. }
                | SyntaxKind::Property(_)
                | SyntaxKind::Destructuring { .. }
        )
    }

    pub fn is_control_flow(&self) -> bool {
        matches!(
            self,
            SyntaxKind::If { .. }
                | SyntaxKind::When { .. }
                | SyntaxKind::WhenEntry { .. }
                | SyntaxKind::For { .. }
                | SyntaxKind::While { .. }
                | SyntaxKind::DoWhile { .. }
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            SyntaxKind::Class { .. } => "class",
            SyntaxKind::Function { .. } => "function",
            SyntaxKind::Property(_) => "property",
            SyntaxKind::Destructuring { .. } => "destructuring",
            SyntaxKind::If { .. } => "if",
            SyntaxKind::When { .. } => "when",
            SyntaxKind::WhenEntry { .. } => "when-entry",
            SyntaxKind::For { .. } => "for",
            SyntaxKind::While { .. } => "while",
            SyntaxKind::DoWhile { .. } => "do-while",
            SyntaxKind::Call { .. } => "call",
            SyntaxKind::Reference { .. } => "reference",
            SyntaxKind::Block => "block",
        }
    }
}

/// Syntax node with byte offsets into the file source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxNode {
    pub kind: SyntaxKind,
    pub start_byte: usize,
    pub end_byte: usize,
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    pub fn new(kind: SyntaxKind, start_byte: usize, end_byte: usize) -> Self {
        Self {
            kind,
            start_byte,
            end_byte,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<SyntaxNode>) -> Self {
        self.children = children;
        self
    }

    pub fn add_child(&mut self, child: SyntaxNode) {
        self.children.push(child);
    }

    /// Pre-order traversal including self
    pub fn walk(&self) -> Vec<&SyntaxNode> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            for child in node.children.iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    /// Count nodes in subtree
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(|c| c.node_count()).sum::<usize>()
    }
}
