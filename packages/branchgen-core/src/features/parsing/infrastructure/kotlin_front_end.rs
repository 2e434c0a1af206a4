//! Kotlin front end
//!
//! Lowers a tree-sitter-kotlin concrete syntax tree into the
//! language-neutral [`SyntaxNode`] tree. Only declarations, control flow,
//! calls and identifier references survive the lowering; everything else is
//! flattened into its parent.
//!
//! Supports: classes, objects, companions, interfaces, enums, extension and
//! suspend functions, local functions, destructuring declarations.

use tree_sitter::{Node, Parser};

use super::ts_utils::{
    children, find_child_by_kind, find_children_by_kind, has_token, is_comment,
    is_declaration_only, is_type_node, named_children, node_text,
};
use crate::errors::{BranchgenError, Result};
use crate::features::parsing::domain::{
    ClassKind, ParameterDecl, PropertyDecl, SourceTree, SyntaxError, SyntaxKind, SyntaxNode,
};
use crate::features::parsing::ports::SourceFrontEnd;

/// Kotlin front end backed by tree-sitter-kotlin
#[derive(Debug, Default, Clone, Copy)]
pub struct KotlinFrontEnd;

impl KotlinFrontEnd {
    pub fn new() -> Self {
        Self
    }
}

impl SourceFrontEnd for KotlinFrontEnd {
    fn parse(&self, path: &str, source: &str) -> Result<SourceTree> {
        // Parser is not Sync; one per call keeps the front end shareable
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_kotlin::language())
            .map_err(|e| {
                BranchgenError::parse_error(path, format!("failed to load Kotlin grammar: {}", e))
            })?;

        let Some(tree) = parser.parse(source, None) else {
            return Ok(SourceTree::new(path, source).unusable("parser produced no tree"));
        };

        let root = tree.root_node();
        let mut lowering = Lowering::new(source);
        let mut out = SourceTree::new(path, source);

        for child in children(&root) {
            match child.kind() {
                "package_header" => out.package = lowering.package_name(&child),
                "import_list" => {
                    for header in find_children_by_kind(&child, "import_header") {
                        out.imports.extend(lowering.import_path(&header));
                    }
                }
                "import_header" => out.imports.extend(lowering.import_path(&child)),
                _ => out.items.extend(lowering.lower(&child)),
            }
        }

        out.errors = lowering.errors;

        if root.is_error() {
            return Ok(out.unusable("file does not parse as Kotlin"));
        }
        if out.items.is_empty() && out.has_errors() && !source.trim().is_empty() {
            return Ok(out.unusable("no recognizable declarations"));
        }
        Ok(out)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext, "kt" | "kts")
    }

    fn language_name(&self) -> &'static str {
        "kotlin"
    }
}

/// One lowering pass over a single file
struct Lowering<'s> {
    source: &'s str,
    errors: Vec<SyntaxError>,
}

impl<'s> Lowering<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            source,
            errors: Vec::new(),
        }
    }

    fn text(&self, node: &Node) -> &'s str {
        node_text(node, self.source)
    }

    fn package_name(&self, node: &Node) -> Option<String> {
        let name = match find_child_by_kind(node, "identifier") {
            Some(identifier) => self.text(&identifier).trim().to_string(),
            None => self
                .text(node)
                .lines()
                .next()
                .unwrap_or("")
                .trim_start_matches("package")
                .trim()
                .to_string(),
        };
        (!name.is_empty()).then_some(name)
    }

    fn import_path(&self, node: &Node) -> Option<String> {
        let identifier = find_child_by_kind(node, "identifier")?;
        let mut path = self.text(&identifier).trim().to_string();
        let wildcard = find_child_by_kind(node, "wildcard_import").is_some()
            || self.text(node).trim_end().ends_with(".*");
        if wildcard {
            path.push_str(".*");
        }
        (!path.is_empty()).then_some(path)
    }

    fn record_error(&mut self, node: &Node) {
        let snippet: String = self.text(node).chars().take(40).collect();
        let message = if node.is_missing() {
            format!("missing `{}`", node.kind())
        } else {
            format!("unexpected syntax `{}`", snippet.trim())
        };
        self.errors.push(SyntaxError {
            start_byte: node.start_byte(),
            message,
        });
    }

    /// Lower one CST node into zero or more syntax nodes
    fn lower(&mut self, node: &Node) -> Vec<SyntaxNode> {
        if node.is_error() || node.is_missing() {
            self.record_error(node);
            return Vec::new();
        }

        match node.kind() {
            "class_declaration" | "object_declaration" | "companion_object" => {
                vec![self.class(node)]
            }
            "function_declaration" => vec![self.function(node)],
            "property_declaration" => vec![self.property(node)],
            "if_expression" => vec![self.if_expression(node)],
            "when_expression" => vec![self.when_expression(node)],
            "for_statement" => vec![self.for_statement(node)],
            "while_statement" => vec![self.while_statement(node)],
            "do_while_statement" => vec![self.do_while_statement(node)],
            "call_expression" => vec![self.call(node)],
            "simple_identifier" | "interpolated_identifier" => vec![SyntaxNode::new(
                SyntaxKind::Reference {
                    name: self.text(node).to_string(),
                },
                node.start_byte(),
                node.end_byte(),
            )],
            "value_argument" => self.value_argument(node).1,
            "catch_block" => self.lower_all(&find_children_by_kind(node, "block")),
            "anonymous_initializer" => vec![SyntaxNode::new(
                SyntaxKind::Block,
                node.start_byte(),
                node.end_byte(),
            )
            .with_children(self.lower_children(node))],
            kind if is_declaration_only(kind) => Vec::new(),
            _ => self.lower_children(node),
        }
    }

    fn lower_children(&mut self, node: &Node) -> Vec<SyntaxNode> {
        self.lower_all(&children(node))
    }

    fn lower_all(&mut self, nodes: &[Node]) -> Vec<SyntaxNode> {
        nodes.iter().flat_map(|n| self.lower(n)).collect()
    }

    // ───────────────────────────────────────────────────────────────────────
    // Declarations
    // ───────────────────────────────────────────────────────────────────────

    fn class(&mut self, node: &Node) -> SyntaxNode {
        let is_companion = node.kind() == "companion_object";
        let name = children(node)
            .into_iter()
            .find(|c| matches!(c.kind(), "type_identifier" | "simple_identifier"))
            .map(|c| self.text(&c).to_string())
            .unwrap_or_else(|| "Companion".to_string());

        let kind = if is_companion || node.kind() == "object_declaration" {
            ClassKind::Object
        } else {
            self.class_kind(node)
        };

        let mut constructor = Vec::new();
        let mut constructor_properties = Vec::new();
        if let Some(primary) = find_child_by_kind(node, "primary_constructor") {
            let mut params = find_children_by_kind(&primary, "class_parameter");
            if let Some(list) = find_child_by_kind(&primary, "class_parameters") {
                params.extend(find_children_by_kind(&list, "class_parameter"));
            }
            for param in params {
                let (decl, property) = self.class_parameter(&param);
                constructor.push(decl);
                constructor_properties.extend(property);
            }
        }

        let body: Vec<Node> = children(node)
            .into_iter()
            .filter(|c| matches!(c.kind(), "class_body" | "enum_class_body"))
            .collect();
        let members = self.lower_all(&body);

        SyntaxNode::new(
            SyntaxKind::Class {
                name,
                kind,
                constructor,
                constructor_properties,
            },
            node.start_byte(),
            node.end_byte(),
        )
        .with_children(members)
    }

    fn class_kind(&self, node: &Node) -> ClassKind {
        if find_child_by_kind(node, "interface").is_some() {
            return ClassKind::Interface;
        }
        let Some(modifiers) = find_child_by_kind(node, "modifiers") else {
            return ClassKind::Class;
        };
        if has_token(&modifiers, "enum", self.source) {
            ClassKind::Enum
        } else if has_token(&modifiers, "abstract", self.source)
            || has_token(&modifiers, "sealed", self.source)
            || has_token(&modifiers, "annotation", self.source)
        {
            ClassKind::Abstract
        } else {
            ClassKind::Class
        }
    }

    fn class_parameter(&self, node: &Node) -> (ParameterDecl, Option<PropertyDecl>) {
        let mut name = String::new();
        let mut type_name = String::new();
        let mut binding: Option<bool> = None;
        let mut default_value = None;
        let mut after_equals = false;

        for child in children(node) {
            match child.kind() {
                "simple_identifier" if name.is_empty() => name = self.text(&child).to_string(),
                kind if is_type_node(kind) && type_name.is_empty() => {
                    type_name = self.text(&child).to_string()
                }
                "val" => binding = Some(false),
                "var" => binding = Some(true),
                "binding_pattern_kind" => binding = Some(self.text(&child) == "var"),
                "=" => after_equals = true,
                _ if after_equals && child.is_named() => {
                    default_value = Some(self.text(&child).to_string());
                    after_equals = false;
                }
                _ => {}
            }
        }

        let mut decl = ParameterDecl::new(name.clone(), type_name.clone());
        decl.default_value = default_value.clone();
        let property = binding.map(|mutable| PropertyDecl {
            name,
            type_name: Some(type_name),
            mutable,
            initializer: default_value,
        });
        (decl, property)
    }

    fn function(&mut self, node: &Node) -> SyntaxNode {
        let mut name = String::new();
        let mut receiver = None;
        let mut return_type = None;
        let mut parameters = Vec::new();
        let mut is_private = false;
        let mut is_suspend = false;
        let mut expression_body = None;
        let mut body = Vec::new();
        let mut seen_parameters = false;

        for child in children(node) {
            match child.kind() {
                "modifiers" => {
                    is_private = has_token(&child, "private", self.source);
                    is_suspend = has_token(&child, "suspend", self.source);
                }
                "simple_identifier" if name.is_empty() => name = self.text(&child).to_string(),
                kind if is_type_node(kind) => {
                    if name.is_empty() {
                        receiver = Some(self.text(&child).to_string());
                    } else if seen_parameters {
                        return_type = Some(self.text(&child).to_string());
                    }
                }
                "function_value_parameters" => {
                    parameters = self.parameters(&child);
                    seen_parameters = true;
                }
                "function_body" => {
                    expression_body = self.expression_body(&child);
                    body = self.lower_children(&child);
                }
                _ => {}
            }
        }

        SyntaxNode::new(
            SyntaxKind::Function {
                name,
                return_type,
                parameters,
                is_private,
                is_suspend,
                receiver,
                expression_body,
            },
            node.start_byte(),
            node.end_byte(),
        )
        .with_children(body)
    }

    fn parameters(&self, node: &Node) -> Vec<ParameterDecl> {
        let mut out: Vec<ParameterDecl> = Vec::new();
        let mut pending_vararg = false;
        let mut after_equals = false;

        for child in children(node) {
            match child.kind() {
                "parameter_modifiers" => {
                    pending_vararg = has_token(&child, "vararg", self.source);
                }
                "parameter" => {
                    let name = find_child_by_kind(&child, "simple_identifier")
                        .map(|n| self.text(&n).to_string())
                        .unwrap_or_default();
                    let type_name = children(&child)
                        .into_iter()
                        .find(|c| is_type_node(c.kind()))
                        .map(|c| self.text(&c).to_string())
                        .unwrap_or_default();
                    let mut decl = ParameterDecl::new(name, type_name);
                    decl.is_variadic = pending_vararg;
                    out.push(decl);
                    pending_vararg = false;
                }
                "=" => after_equals = true,
                _ if after_equals && child.is_named() => {
                    if let Some(last) = out.last_mut() {
                        last.default_value = Some(self.text(&child).to_string());
                    }
                    after_equals = false;
                }
                _ => {}
            }
        }
        out
    }

    fn expression_body(&self, node: &Node) -> Option<String> {
        let parts = children(node);
        let equals = parts.iter().position(|c| c.kind() == "=")?;
        parts[equals + 1..]
            .iter()
            .find(|c| c.is_named() && !is_comment(c.kind()))
            .map(|c| self.text(c).to_string())
    }

    fn property(&mut self, node: &Node) -> SyntaxNode {
        let mut mutable = false;
        let mut single: Option<(String, Option<String>)> = None;
        let mut names: Vec<String> = Vec::new();
        let mut initializer = None;
        let mut nested = Vec::new();
        let mut after_equals = false;

        for child in children(node) {
            match child.kind() {
                "var" => mutable = true,
                "binding_pattern_kind" => mutable = self.text(&child) == "var",
                "variable_declaration" => single = Some(self.variable_declaration(&child)),
                "multi_variable_declaration" => {
                    names = find_children_by_kind(&child, "variable_declaration")
                        .iter()
                        .map(|v| self.variable_declaration(v).0)
                        .collect();
                }
                "=" => after_equals = true,
                "property_delegate" | "getter" | "setter" => {
                    nested.extend(self.lower_children(&child))
                }
                _ if after_equals && child.is_named() && !is_comment(child.kind()) => {
                    initializer = Some(self.text(&child).to_string());
                    nested.extend(self.lower(&child));
                    after_equals = false;
                }
                _ => {}
            }
        }

        let kind = match single {
            Some((name, type_name)) => SyntaxKind::Property(PropertyDecl {
                name,
                type_name,
                mutable,
                initializer,
            }),
            None => SyntaxKind::Destructuring { names, initializer },
        };
        SyntaxNode::new(kind, node.start_byte(), node.end_byte()).with_children(nested)
    }

    fn variable_declaration(&self, node: &Node) -> (String, Option<String>) {
        let name = find_child_by_kind(node, "simple_identifier")
            .map(|n| self.text(&n).to_string())
            .unwrap_or_default();
        let type_name = children(node)
            .into_iter()
            .find(|c| is_type_node(c.kind()))
            .map(|c| self.text(&c).to_string());
        (name, type_name)
    }

    // ───────────────────────────────────────────────────────────────────────
    // Control flow
    // ───────────────────────────────────────────────────────────────────────

    /// Value of a body that is exactly one expression or one `return expr`
    fn single_value(&self, node: &Node) -> Option<String> {
        match node.kind() {
            "control_structure_body" | "block" | "statements" | "function_body" => {
                let inner = named_children(node);
                match inner.as_slice() {
                    [only] => self.single_value(only),
                    _ => None,
                }
            }
            "jump_expression" => {
                if !self.text(node).trim_start().starts_with("return") {
                    return None;
                }
                let inner = named_children(node);
                match inner.as_slice() {
                    [only] if only.kind() != "label" => Some(self.text(only).trim().to_string()),
                    _ => None,
                }
            }
            "if_expression" | "when_expression" | "for_statement" | "while_statement"
            | "do_while_statement" | "assignment" | "property_declaration"
            | "function_declaration" | "class_declaration" | "try_expression" => None,
            _ => Some(self.text(node).trim().to_string()),
        }
    }

    /// Split a `keyword ( cond ) body...` node into (condition, rest)
    fn parenthesized<'t>(&self, node: &Node<'t>) -> (Option<Node<'t>>, Vec<Node<'t>>) {
        let mut condition = None;
        let mut rest = Vec::new();
        let mut depth_state = 0; // 0 before "(", 1 inside, 2 after ")"
        for child in children(node) {
            match (depth_state, child.kind()) {
                (0, "(") => depth_state = 1,
                (1, ")") => depth_state = 2,
                (1, _) if child.is_named() && condition.is_none() => condition = Some(child),
                (2, _) | (0, _) => rest.push(child),
                _ => {}
            }
        }
        (condition, rest)
    }

    fn if_expression(&mut self, node: &Node) -> SyntaxNode {
        let (condition, rest) = self.parenthesized(node);
        let condition_text = condition
            .map(|c| self.text(&c).trim().to_string())
            .unwrap_or_default();

        let then_body = rest
            .iter()
            .take_while(|c| c.kind() != "else")
            .find(|c| c.kind() == "control_structure_body");
        let then_value = then_body.and_then(|b| self.single_value(b));

        let mut nested = Vec::new();
        if let Some(c) = condition {
            nested.extend(self.lower(&c));
        }
        nested.extend(self.lower_all(&rest));

        SyntaxNode::new(
            SyntaxKind::If {
                condition: condition_text,
                then_value,
            },
            node.start_byte(),
            node.end_byte(),
        )
        .with_children(nested)
    }

    fn when_expression(&mut self, node: &Node) -> SyntaxNode {
        let mut subject = None;
        let mut nested = Vec::new();

        for child in children(node) {
            match child.kind() {
                "when_subject" => {
                    let expressions: Vec<Node> = named_children(&child)
                        .into_iter()
                        .filter(|c| !matches!(c.kind(), "variable_declaration" | "annotation"))
                        .collect();
                    if let Some(expr) = expressions.last() {
                        subject = Some(self.text(expr).trim().to_string());
                        nested.extend(self.lower(expr));
                    }
                }
                "when_entry" => nested.push(self.when_entry(&child)),
                _ => {}
            }
        }

        SyntaxNode::new(
            SyntaxKind::When { subject },
            node.start_byte(),
            node.end_byte(),
        )
        .with_children(nested)
    }

    fn when_entry(&mut self, node: &Node) -> SyntaxNode {
        let mut conditions = Vec::new();
        let mut is_else = false;
        let mut value = None;
        let mut nested = Vec::new();

        for child in children(node) {
            match child.kind() {
                "when_condition" => {
                    conditions.push(self.text(&child).trim().to_string());
                    nested.extend(self.lower_children(&child));
                }
                "else" => is_else = true,
                "control_structure_body" => {
                    value = self.single_value(&child);
                    nested.extend(self.lower_children(&child));
                }
                _ => {}
            }
        }

        SyntaxNode::new(
            SyntaxKind::WhenEntry {
                conditions,
                is_else,
                value,
            },
            node.start_byte(),
            node.end_byte(),
        )
        .with_children(nested)
    }

    fn for_statement(&mut self, node: &Node) -> SyntaxNode {
        let mut variable = String::new();
        let mut iterable = None;
        let mut nested = Vec::new();
        let mut after_in = false;

        for child in children(node) {
            match child.kind() {
                "variable_declaration" => variable = self.variable_declaration(&child).0,
                "multi_variable_declaration" => variable = self.text(&child).to_string(),
                "in" => after_in = true,
                "control_structure_body" => nested.extend(self.lower_children(&child)),
                _ if after_in && child.is_named() && iterable.is_none() => {
                    iterable = Some(self.text(&child).trim().to_string());
                    nested.extend(self.lower(&child));
                }
                _ => {}
            }
        }

        SyntaxNode::new(
            SyntaxKind::For {
                variable,
                iterable: iterable.unwrap_or_default(),
            },
            node.start_byte(),
            node.end_byte(),
        )
        .with_children(nested)
    }

    fn while_statement(&mut self, node: &Node) -> SyntaxNode {
        let (condition, rest) = self.parenthesized(node);
        let condition_text = condition
            .map(|c| self.text(&c).trim().to_string())
            .unwrap_or_default();
        let mut nested = Vec::new();
        if let Some(c) = condition {
            nested.extend(self.lower(&c));
        }
        nested.extend(self.lower_all(&rest));

        SyntaxNode::new(
            SyntaxKind::While {
                condition: condition_text,
            },
            node.start_byte(),
            node.end_byte(),
        )
        .with_children(nested)
    }

    fn do_while_statement(&mut self, node: &Node) -> SyntaxNode {
        // do body while ( cond ): the body comes before the parenthesis
        let (condition, rest) = self.parenthesized(node);
        let condition_text = condition
            .map(|c| self.text(&c).trim().to_string())
            .unwrap_or_default();
        let mut nested = self.lower_all(&rest);
        if let Some(c) = condition {
            nested.extend(self.lower(&c));
        }

        SyntaxNode::new(
            SyntaxKind::DoWhile {
                condition: condition_text,
            },
            node.start_byte(),
            node.end_byte(),
        )
        .with_children(nested)
    }

    // ───────────────────────────────────────────────────────────────────────
    // Calls
    // ───────────────────────────────────────────────────────────────────────

    fn call(&mut self, node: &Node) -> SyntaxNode {
        let parts = children(node);
        let mut callee = String::new();
        let mut arguments = Vec::new();
        let mut nested = Vec::new();

        if let Some(target) = parts.first() {
            match target.kind() {
                "simple_identifier" => callee = self.text(target).to_string(),
                "navigation_expression" => {
                    let segments = children(target);
                    callee = segments
                        .iter()
                        .rev()
                        .find(|c| c.kind() == "navigation_suffix")
                        .and_then(|s| find_child_by_kind(s, "simple_identifier"))
                        .map(|n| self.text(&n).to_string())
                        .unwrap_or_else(|| self.text(target).to_string());
                    // receiver side still reads variables
                    if let Some(receiver) = segments.first() {
                        nested.extend(self.lower(receiver));
                    }
                }
                _ => {
                    callee = self.text(target).to_string();
                    nested.extend(self.lower(target));
                }
            }
        }

        for suffix in parts.iter().skip(1) {
            if suffix.kind() != "call_suffix" {
                continue;
            }
            for piece in children(suffix) {
                match piece.kind() {
                    "value_arguments" => {
                        for argument in find_children_by_kind(&piece, "value_argument") {
                            let (text, lowered) = self.value_argument(&argument);
                            arguments.extend(text);
                            nested.extend(lowered);
                        }
                    }
                    "annotated_lambda" | "lambda_literal" => {
                        arguments.push(self.text(&piece).trim().to_string());
                        nested.extend(self.lower_children(&piece));
                    }
                    _ => {}
                }
            }
        }

        SyntaxNode::new(
            SyntaxKind::Call { callee, arguments },
            node.start_byte(),
            node.end_byte(),
        )
        .with_children(nested)
    }

    /// Argument expression text and its lowering; named-argument labels are
    /// not references
    fn value_argument(&mut self, node: &Node) -> (Option<String>, Vec<SyntaxNode>) {
        let expression = named_children(node)
            .into_iter()
            .filter(|c| c.kind() != "annotation")
            .last();
        let Some(expression) = expression else {
            return (None, Vec::new());
        };
        let is_label = expression.kind() == "simple_identifier"
            && expression
                .next_sibling()
                .map(|s| s.kind() == "=")
                .unwrap_or(false);
        if is_label {
            return (None, Vec::new());
        }
        let text = self.text(&expression).trim().to_string();
        (Some(text), self.lower(&expression))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> SourceTree {
        KotlinFrontEnd::new().parse("/src/Sample.kt", source).unwrap()
    }

    fn all_nodes(tree: &SourceTree) -> Vec<&SyntaxNode> {
        tree.items.iter().flat_map(|i| i.walk()).collect()
    }

    #[test]
    fn test_package_and_imports() {
        let tree = parse(
            "package com.example.calc\n\nimport kotlin.math.abs\nimport java.util.*\n\nfun f() {}\n",
        );
        assert_eq!(tree.package.as_deref(), Some("com.example.calc"));
        assert_eq!(tree.imports, vec!["kotlin.math.abs", "java.util.*"]);
        assert!(tree.is_usable());
    }

    #[test]
    fn test_class_with_method_and_branch() {
        let tree = parse(
            r#"
package demo

class Calculator(private val base: Int) {
    fun doWork(a: Int, b: Int): Int {
        if (a > 19) {
            return a + b
        } else if (b == 0) {
            return 0
        }
        return a - b
    }
}
"#,
        );

        let class = &tree.items[0];
        match &class.kind {
            SyntaxKind::Class {
                name,
                kind,
                constructor,
                constructor_properties,
            } => {
                assert_eq!(name, "Calculator");
                assert_eq!(*kind, ClassKind::Class);
                assert_eq!(constructor.len(), 1);
                assert_eq!(constructor[0].name, "base");
                assert_eq!(constructor[0].type_name, "Int");
                assert_eq!(constructor_properties.len(), 1);
            }
            other => panic!("expected class, got {:?}", other),
        }

        let nodes = all_nodes(&tree);
        let function = nodes
            .iter()
            .find_map(|n| match &n.kind {
                SyntaxKind::Function {
                    name, parameters, return_type, ..
                } => Some((name.clone(), parameters.clone(), return_type.clone())),
                _ => None,
            })
            .unwrap();
        assert_eq!(function.0, "doWork");
        assert_eq!(function.1.len(), 2);
        assert_eq!(function.1[1].name, "b");
        assert_eq!(function.2.as_deref(), Some("Int"));

        let ifs: Vec<(String, Option<String>)> = nodes
            .iter()
            .filter_map(|n| match &n.kind {
                SyntaxKind::If {
                    condition,
                    then_value,
                } => Some((condition.clone(), then_value.clone())),
                _ => None,
            })
            .collect();
        assert_eq!(ifs.len(), 2);
        assert_eq!(ifs[0].0, "a > 19");
        assert_eq!(ifs[0].1.as_deref(), Some("a + b"));
        assert_eq!(ifs[1].0, "b == 0");
        assert_eq!(ifs[1].1.as_deref(), Some("0"));
    }

    #[test]
    fn test_when_entries() {
        let tree = parse(
            r#"
fun label(x: Int): String {
    return when (x) {
        1 -> "one"
        2, 3 -> "few"
        else -> "many"
    }
}
"#,
        );
        let nodes = all_nodes(&tree);
        let subject = nodes.iter().find_map(|n| match &n.kind {
            SyntaxKind::When { subject } => Some(subject.clone()),
            _ => None,
        });
        assert_eq!(subject, Some(Some("x".to_string())));

        let entries: Vec<(Vec<String>, bool)> = nodes
            .iter()
            .filter_map(|n| match &n.kind {
                SyntaxKind::WhenEntry {
                    conditions,
                    is_else,
                    ..
                } => Some((conditions.clone(), *is_else)),
                _ => None,
            })
            .collect();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].0, vec!["1"]);
        assert_eq!(entries[1].0, vec!["2", "3"]);
        assert!(entries[2].1);
    }

    #[test]
    fn test_calls_and_vararg() {
        let tree = parse(
            r#"
fun sum(vararg xs: Int): Int = xs.sum()

fun main() {
    val total = sum(1, 2, 3, 4, 5)
    println(total)
}
"#,
        );
        let nodes = all_nodes(&tree);
        let sum = nodes
            .iter()
            .find_map(|n| match &n.kind {
                SyntaxKind::Function {
                    name, parameters, ..
                } if name == "sum" => Some(parameters.clone()),
                _ => None,
            })
            .unwrap();
        assert!(sum[0].is_variadic);

        let call = nodes
            .iter()
            .find_map(|n| match &n.kind {
                SyntaxKind::Call { callee, arguments } if callee == "sum" => {
                    Some(arguments.clone())
                }
                _ => None,
            })
            .unwrap();
        assert_eq!(call, vec!["1", "2", "3", "4", "5"]);

        let references: Vec<&str> = nodes
            .iter()
            .filter_map(|n| match &n.kind {
                SyntaxKind::Reference { name } => Some(name.as_str()),
                _ => None,
            })
            .collect();
        assert!(references.contains(&"total"));
        assert!(references.contains(&"xs"));
    }

    #[test]
    fn test_object_and_interface_kinds() {
        let tree = parse(
            r#"
object Registry {
    fun lookup(key: String): String? = null
}

interface Shape {
    fun area(): Double
}
"#,
        );
        let kinds: Vec<ClassKind> = tree
            .items
            .iter()
            .filter_map(|n| match &n.kind {
                SyntaxKind::Class { kind, .. } => Some(*kind),
                _ => None,
            })
            .collect();
        assert_eq!(kinds, vec![ClassKind::Object, ClassKind::Interface]);
    }

    #[test]
    fn test_private_and_suspend_flags() {
        let tree = parse(
            r#"
private fun hidden(x: Int): Int = x

suspend fun load(id: Int): String = "item"
"#,
        );
        let flags: Vec<(String, bool, bool)> = tree
            .items
            .iter()
            .filter_map(|n| match &n.kind {
                SyntaxKind::Function {
                    name,
                    is_private,
                    is_suspend,
                    ..
                } => Some((name.clone(), *is_private, *is_suspend)),
                _ => None,
            })
            .collect();
        assert_eq!(
            flags,
            vec![
                ("hidden".to_string(), true, false),
                ("load".to_string(), false, true)
            ]
        );
    }

    #[test]
    #[ignore]
    fn test_extension_receiver() {
        let tree = parse("fun String.shout(): String = this + \"!\"\n");
        let receiver = tree.items.iter().find_map(|n| match &n.kind {
            SyntaxKind::Function { receiver, .. } => receiver.clone(),
            _ => None,
        });
        assert_eq!(receiver.as_deref(), Some("String"));
    }

    #[test]
    fn test_garbage_is_reported() {
        // EDGE CASE: nothing recognizable means an unusable tree, not an Err
        let tree = parse("}}}} ))) val = = =");
        assert!(!tree.is_usable() || tree.has_errors());
    }

    #[test]
    fn test_supports_extension() {
        let front_end = KotlinFrontEnd::new();
        assert!(front_end.supports_extension("kt"));
        assert!(!front_end.supports_extension("java"));
        assert_eq!(front_end.language_name(), "kotlin");
    }
}
