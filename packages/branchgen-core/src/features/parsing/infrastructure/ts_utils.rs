//! Tree-sitter node helpers
//!
//! Small traversal and text helpers shared by the front end. Node kinds are
//! matched by string because the Kotlin grammar exposes few field names.

use tree_sitter::Node;

/// All children, named and anonymous, in source order
pub(crate) fn children<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

/// Named children, skipping comments
pub(crate) fn named_children<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|c| !is_comment(c.kind()))
        .collect()
}

#[inline]
pub(crate) fn find_child_by_kind<'t>(node: &Node<'t>, kind: &str) -> Option<Node<'t>> {
    children(node).into_iter().find(|c| c.kind() == kind)
}

#[inline]
pub(crate) fn find_children_by_kind<'t>(node: &Node<'t>, kind: &str) -> Vec<Node<'t>> {
    children(node)
        .into_iter()
        .filter(|c| c.kind() == kind)
        .collect()
}

/// Does any descendant (or the node itself) have this exact text and kind?
pub(crate) fn has_token(node: &Node, kind: &str, source: &str) -> bool {
    let mut stack = vec![*node];
    while let Some(current) = stack.pop() {
        if current.kind() == kind && node_text(&current, source) == kind {
            return true;
        }
        stack.extend(children(&current));
    }
    false
}

/// Source text of a node; empty when the offsets do not fall on the source
#[inline]
pub(crate) fn node_text<'s>(node: &Node, source: &'s str) -> &'s str {
    source.get(node.start_byte()..node.end_byte()).unwrap_or("")
}

#[inline]
pub(crate) fn is_comment(kind: &str) -> bool {
    matches!(kind, "line_comment" | "multiline_comment" | "comment")
}

#[inline]
pub(crate) fn is_type_node(kind: &str) -> bool {
    matches!(
        kind,
        "user_type" | "nullable_type" | "function_type" | "parenthesized_type" | "non_nullable_type"
    )
}

/// Kinds whose subtrees only declare names or types
#[inline]
pub(crate) fn is_declaration_only(kind: &str) -> bool {
    matches!(
        kind,
        "modifiers"
            | "function_value_parameters"
            | "lambda_parameters"
            | "type_parameters"
            | "type_constraints"
            | "parameter"
            | "class_parameter"
            | "parameter_with_optional_type"
            | "variable_declaration"
            | "multi_variable_declaration"
            | "enum_entry"
            | "label"
            | "annotation"
            | "file_annotation"
            | "package_header"
            | "import_list"
            | "import_header"
            | "shebang_line"
            | "delegation_specifier"
            | "type_arguments"
    ) || is_type_node(kind)
        || is_comment(kind)
}
