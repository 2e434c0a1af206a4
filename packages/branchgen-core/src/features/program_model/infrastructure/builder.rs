//! Program model builder
//!
//! Single pass over one [`SourceTree`]. Declarations push a scope frame and
//! stamp every line they span, so the innermost declaration wins. Control
//! flow writes a header on its first line; branches are only recorded
//! inside a function body.

use tracing::debug;

use crate::features::parsing::domain::{
    ClassKind, ParameterDecl, PropertyDecl, SourceTree, SyntaxKind, SyntaxNode,
};
use crate::features::program_model::domain::{
    BranchId, BranchKind, ClassDecl, ConditionalBranch, FunctionCall, FunctionDecl, FunctionId,
    LineContext, Loop, LoopKind, Parameter, ProgramModel, Property, Reference, SourceFile,
    Variable,
};
use crate::features::program_model::ports::{ModelExtractor, ModelFragment};
use crate::shared::models::{Diagnostic, LineIndex, LineSpan, ScopeId};
use crate::shared::utils::ScopeStack;

/// Subject text recorded for a `when` without a subject
pub const UNCONDITIONAL_SUBJECT: &str = "unconditional";

/// Condition text recorded for an `else ->` entry
pub const CATCH_ALL_CONDITION: &str = "else";

#[derive(Debug, Default, Clone, Copy)]
pub struct ModelBuilder;

impl ModelBuilder {
    pub fn new() -> Self {
        Self
    }
}

impl ModelExtractor for ModelBuilder {
    fn extract(&self, tree: &SourceTree) -> ModelFragment {
        if let Some(reason) = &tree.unusable {
            return ModelFragment {
                model: ProgramModel::new(),
                diagnostics: vec![Diagnostic::parse_error(
                    &tree.path,
                    format!("skipped unusable file: {}", reason),
                )],
            };
        }

        let mut visitor = FileVisitor::new(tree);
        visitor.run();
        debug!(
            file = %tree.path,
            functions = visitor.model.functions.len(),
            branches = visitor.model.branches.len(),
            "Built file model"
        );
        ModelFragment {
            model: visitor.model,
            diagnostics: visitor.diagnostics,
        }
    }
}

struct FileVisitor<'t> {
    tree: &'t SourceTree,
    index: LineIndex,
    scopes: ScopeStack,
    model: ProgramModel,
    diagnostics: Vec<Diagnostic>,
    /// Enclosing functions, innermost last
    functions: Vec<FunctionId>,
    /// Enclosing classes (index into `model.classes`), innermost last
    classes: Vec<usize>,
    /// Enclosing `when`s; `None` when the `when` itself was not recorded
    whens: Vec<Option<BranchId>>,
}

impl<'t> FileVisitor<'t> {
    fn new(tree: &'t SourceTree) -> Self {
        Self {
            tree,
            index: LineIndex::new(&tree.source),
            scopes: ScopeStack::with_package(tree.package.clone()),
            model: ProgramModel::new(),
            diagnostics: Vec::new(),
            functions: Vec::new(),
            classes: Vec::new(),
            whens: Vec::new(),
        }
    }

    fn path(&self) -> &'t str {
        &self.tree.path
    }

    fn run(&mut self) {
        let tree = self.tree;
        let path = self.path();
        self.model.files.push(SourceFile {
            path: path.to_string(),
            package: tree.package.clone(),
            imports: tree.imports.clone(),
            line_count: self.index.line_count(),
        });

        for (i, code) in tree.source.lines().enumerate() {
            self.model
                .push_line(LineContext::new(path, i as u32 + 1, code));
        }

        for error in &tree.errors {
            self.diagnostics.push(
                Diagnostic::parse_error(
                    path,
                    format!("skipped unparsable fragment: {}", error.message),
                )
                .at_line(self.index.line_of(error.start_byte)),
            );
        }

        for item in &tree.items {
            self.visit(item);
        }
    }

    fn line_of(&self, node: &SyntaxNode) -> u32 {
        self.index.line_of(node.start_byte)
    }

    fn span_of(&self, node: &SyntaxNode) -> LineSpan {
        self.index.span_of(node.start_byte, node.end_byte)
    }

    fn current_function(&self) -> Option<FunctionId> {
        self.functions.last().copied()
    }

    fn current_function_name(&self) -> Option<String> {
        self.current_function()
            .and_then(|id| self.model.function(id))
            .map(|f| f.name.clone())
    }

    fn visit_children(&mut self, node: &SyntaxNode) {
        for child in &node.children {
            self.visit(child);
        }
    }

    fn visit(&mut self, node: &SyntaxNode) {
        match &node.kind {
            SyntaxKind::Class {
                name,
                kind,
                constructor,
                constructor_properties,
            } => self.visit_class(node, name, *kind, constructor, constructor_properties),
            SyntaxKind::Function {
                name,
                return_type,
                parameters,
                is_private,
                is_suspend,
                receiver,
                expression_body,
            } => {
                let return_type = return_type
                    .clone()
                    .unwrap_or_else(|| infer_return_type(expression_body.as_deref()));
                let function = FunctionShape {
                    name,
                    return_type,
                    parameters,
                    is_private: *is_private,
                    is_suspend: *is_suspend,
                    receiver: receiver.clone(),
                };
                self.visit_function(node, function);
            }
            SyntaxKind::Property(decl) => {
                self.declare_property(node, decl);
                self.visit_children(node);
            }
            SyntaxKind::Destructuring { names, initializer } => {
                let line = self.line_of(node);
                for name in names.iter().filter(|n| !n.is_empty() && n.as_str() != "_") {
                    self.declare_variable(Variable {
                        name: name.clone(),
                        type_name: None,
                        file: self.path().to_string(),
                        line,
                        scope: self.scopes.current(),
                        initializer: initializer.clone(),
                        is_parameter: false,
                    });
                }
                self.visit_children(node);
            }
            SyntaxKind::If {
                condition,
                then_value,
            } => {
                self.set_header(node, format!("if ({})", condition));
                self.record_branch(node, BranchKind::If, condition.clone(), then_value.clone());
                self.visit_children(node);
            }
            SyntaxKind::When { subject } => {
                let subject_text = subject
                    .clone()
                    .unwrap_or_else(|| UNCONDITIONAL_SUBJECT.to_string());
                self.set_header(node, format!("when ({})", subject_text));
                let id = self.record_branch(node, BranchKind::When, subject_text, None);
                self.whens.push(id);
                self.visit_children(node);
                self.whens.pop();
            }
            SyntaxKind::WhenEntry {
                conditions,
                is_else,
                value,
            } => {
                let condition = if *is_else {
                    CATCH_ALL_CONDITION.to_string()
                } else {
                    conditions.join(", ")
                };
                self.set_header(node, format!("when-entry ({})", condition));
                self.record_entry(node, condition, *is_else, value.clone());
                self.visit_children(node);
            }
            SyntaxKind::For { variable, iterable } => {
                self.record_loop(
                    node,
                    LoopKind::For,
                    Some(variable.clone()),
                    Some(iterable.clone()),
                    None,
                );
                self.visit_children(node);
            }
            SyntaxKind::While { condition } => {
                self.record_loop(node, LoopKind::While, None, None, Some(condition.clone()));
                self.visit_children(node);
            }
            SyntaxKind::DoWhile { condition } => {
                self.record_loop(node, LoopKind::DoWhile, None, None, Some(condition.clone()));
                self.visit_children(node);
            }
            SyntaxKind::Call { callee, arguments } => {
                self.record_call(node, callee, arguments);
                self.visit_children(node);
            }
            SyntaxKind::Reference { name } => self.record_reference(node, name),
            SyntaxKind::Block => self.visit_children(node),
        }
    }

    // ───────────────────────────────────────────────────────────────────────
    // Declarations
    // ───────────────────────────────────────────────────────────────────────

    fn stamp(&mut self, span: LineSpan, scope: &ScopeId) {
        let path = self.path();
        let class_name = self.scopes.current_class().map(str::to_string);
        let function_name = self.scopes.current_function().map(str::to_string);
        for line in span.lines() {
            if let Some(context) = self.model.line_context_mut(path, line) {
                context.scope = scope.clone();
                context.class_name = class_name.clone();
                context.function_name = function_name.clone();
            }
        }
    }

    fn visit_class(
        &mut self,
        node: &SyntaxNode,
        name: &str,
        kind: ClassKind,
        constructor: &[ParameterDecl],
        constructor_properties: &[PropertyDecl],
    ) {
        let span = self.span_of(node);
        let scope = self.scopes.push_class(name);
        self.stamp(span, &scope);

        self.model.classes.push(ClassDecl {
            name: name.to_string(),
            qualified_name: scope.path().to_string(),
            file: self.path().to_string(),
            span,
            kind,
            properties: Vec::new(),
            constructor: constructor.iter().map(Parameter::from).collect(),
        });
        self.classes.push(self.model.classes.len() - 1);

        for decl in constructor_properties {
            self.declare_property(node, decl);
        }

        self.visit_children(node);

        self.classes.pop();
        self.scopes.pop();
    }

    fn visit_function(&mut self, node: &SyntaxNode, shape: FunctionShape<'_>) {
        let span = self.span_of(node);
        let owner = self.scopes.current_class().map(str::to_string);
        let is_local = !self.functions.is_empty();
        let scope = self.scopes.push_function(shape.name);
        self.stamp(span, &scope);

        let qualified_name = match (&owner, &self.tree.package) {
            (Some(class), _) => format!("{}.{}", class, shape.name),
            (None, Some(package)) if !package.is_empty() => {
                format!("{}.{}", package, shape.name)
            }
            _ => shape.name.to_string(),
        };
        let parameters: Vec<Parameter> = shape.parameters.iter().map(Parameter::from).collect();

        // Parameters become visible on the declaration line only
        let path = self.path();
        let line = span.start_line;
        let visible: Vec<Variable> = parameters
            .iter()
            .map(|p| Variable {
                name: p.name.clone(),
                type_name: Some(p.type_name.clone()),
                file: path.to_string(),
                line,
                scope: scope.clone(),
                initializer: p.default_value.clone(),
                is_parameter: true,
            })
            .collect();
        if let Some(context) = self.model.line_context_mut(path, line) {
            context.variables.extend(visible);
        }

        let id = self.model.push_function(FunctionDecl {
            name: shape.name.to_string(),
            qualified_name,
            owner,
            file: path.to_string(),
            span,
            return_type: shape.return_type,
            parameters,
            scope,
            is_private: shape.is_private,
            is_suspend: shape.is_suspend,
            is_local,
            receiver: shape.receiver,
        });

        self.functions.push(id);
        self.visit_children(node);
        self.functions.pop();
        self.scopes.pop();
    }

    fn declare_property(&mut self, node: &SyntaxNode, decl: &PropertyDecl) {
        if decl.name.is_empty() {
            return;
        }
        if self.scopes.in_class_body() {
            if let Some(&class) = self.classes.last() {
                self.model.classes[class].properties.push(Property::from(decl));
            }
        }
        self.declare_variable(Variable {
            name: decl.name.clone(),
            type_name: decl.type_name.clone(),
            file: self.path().to_string(),
            line: self.line_of(node),
            scope: self.scopes.current(),
            initializer: decl.initializer.clone(),
            is_parameter: false,
        });
    }

    fn declare_variable(&mut self, variable: Variable) {
        if let Some(context) = self.model.line_context_mut(&variable.file, variable.line) {
            context.variables.push(variable.clone());
        }
        self.model.variables.push(variable);
    }

    // ───────────────────────────────────────────────────────────────────────
    // Control flow
    // ───────────────────────────────────────────────────────────────────────

    fn set_header(&mut self, node: &SyntaxNode, header: String) {
        let line = self.line_of(node);
        let path = self.path();
        if let Some(context) = self.model.line_context_mut(path, line) {
            context.control_flow = Some(header);
        }
    }

    fn new_branch(
        &self,
        node: &SyntaxNode,
        kind: BranchKind,
        condition: String,
        function: FunctionId,
    ) -> ConditionalBranch {
        ConditionalBranch {
            id: BranchId(0),
            kind,
            condition,
            function: self.current_function_name().unwrap_or_default(),
            function_id: Some(function),
            file: self.path().to_string(),
            line: self.line_of(node),
            parent: None,
            is_catch_all: false,
            body_value: None,
        }
    }

    fn record_branch(
        &mut self,
        node: &SyntaxNode,
        kind: BranchKind,
        condition: String,
        body_value: Option<String>,
    ) -> Option<BranchId> {
        let function = self.current_function()?;
        let mut branch = self.new_branch(node, kind, condition, function);
        branch.body_value = body_value;
        Some(self.model.push_branch(branch))
    }

    fn record_entry(
        &mut self,
        node: &SyntaxNode,
        condition: String,
        is_catch_all: bool,
        body_value: Option<String>,
    ) {
        let parent = match self.whens.last().copied() {
            Some(Some(parent)) => parent,
            // enclosing `when` lies outside a function body
            Some(None) => return,
            None => {
                self.diagnostics.push(
                    Diagnostic::inconsistency(format!(
                        "when entry '{}' has no enclosing when; entry omitted",
                        condition
                    ))
                    .in_file(self.path())
                    .at_line(self.line_of(node)),
                );
                return;
            }
        };
        let Some(function) = self.current_function() else {
            return;
        };
        let mut branch = self.new_branch(node, BranchKind::WhenEntry, condition, function);
        branch.parent = Some(parent);
        branch.is_catch_all = is_catch_all;
        branch.body_value = body_value;
        self.model.push_branch(branch);
    }

    fn record_loop(
        &mut self,
        node: &SyntaxNode,
        kind: LoopKind,
        variable: Option<String>,
        iterable: Option<String>,
        condition: Option<String>,
    ) {
        let record = Loop {
            kind,
            variable,
            iterable,
            condition,
            file: self.path().to_string(),
            line: self.line_of(node),
            scope: self.scopes.current(),
        };
        self.set_header(node, record.header());
        self.model.loops.push(record);
    }

    // ───────────────────────────────────────────────────────────────────────
    // Occurrences
    // ───────────────────────────────────────────────────────────────────────

    fn record_call(&mut self, node: &SyntaxNode, callee: &str, arguments: &[String]) {
        let line = self.line_of(node);
        let call = FunctionCall {
            callee: callee.to_string(),
            caller: self.current_function_name(),
            caller_id: self.current_function(),
            arguments: arguments.to_vec(),
            file: self.path().to_string(),
            line,
            scope: self.scopes.current(),
        };
        let index = self.model.push_call(call);
        let path = self.path();
        if let Some(context) = self.model.line_context_mut(path, line) {
            context.calls.push(index);
        }
    }

    fn record_reference(&mut self, node: &SyntaxNode, name: &str) {
        let line = self.line_of(node);
        let index = self.model.push_reference(Reference {
            name: name.to_string(),
            file: self.path().to_string(),
            line,
            scope: self.scopes.current(),
        });
        let path = self.path();
        if let Some(context) = self.model.line_context_mut(path, line) {
            context.references.push(index);
        }
    }
}

/// Function data pulled out of the syntax node
struct FunctionShape<'a> {
    name: &'a str,
    return_type: String,
    parameters: &'a [ParameterDecl],
    is_private: bool,
    is_suspend: bool,
    receiver: Option<String>,
}

/// Return type of a function without a declared one
fn infer_return_type(expression_body: Option<&str>) -> String {
    let Some(body) = expression_body.map(str::trim) else {
        return "Unit".to_string();
    };
    let inferred = if body.starts_with('"') {
        "String"
    } else if body == "true" || body == "false" {
        "Boolean"
    } else if body.ends_with('L') && body[..body.len() - 1].parse::<i64>().is_ok() {
        "Long"
    } else if body.parse::<i64>().is_ok() {
        "Int"
    } else if body.parse::<f64>().is_ok() {
        "Double"
    } else {
        "Any"
    };
    inferred.to_string()
}
