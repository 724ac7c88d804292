use std::path::Path;

use log::trace;
use tree_sitter::{Node, Parser};

use crate::code::DeclarationKind;
use crate::code::members::Visibility;
use crate::error::ParseError;
use crate::parser::syntax::{
    ConstantNode, DeclarationNode, MemberNode, MethodNode, ParameterNode, PropertyNode,
};

// ---------------------------------------------------------------------------
// Helper utilities
// ---------------------------------------------------------------------------

/// Extract the UTF-8 text of a node from the original source bytes.
fn node_text<'a>(node: Node<'a>, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

fn first_child_of_kind<'a>(node: Node<'a>, kind: &str) -> Option<Node<'a>> {
    named_children(node).into_iter().find(|c| c.kind() == kind)
}

/// Names listed in a `base_clause`, `class_interface_clause` or `use_declaration`.
fn type_names(node: Node, source: &[u8]) -> Vec<String> {
    named_children(node)
        .into_iter()
        .filter(|c| matches!(c.kind(), "name" | "qualified_name"))
        .map(|c| node_text(c, source).to_owned())
        .collect()
}

/// Modifiers written directly on a member or declaration node.
#[derive(Debug, Default)]
struct ModifierFlags {
    visibility: Option<Visibility>,
    is_static: bool,
    is_abstract: bool,
}

fn modifier_flags(node: Node, source: &[u8]) -> ModifierFlags {
    let mut flags = ModifierFlags::default();
    for child in named_children(node) {
        match child.kind() {
            "visibility_modifier" => flags.visibility = parse_visibility(node_text(child, source)),
            "var_modifier" => flags.visibility = Some(Visibility::Public),
            "static_modifier" => flags.is_static = true,
            "abstract_modifier" => flags.is_abstract = true,
            _ => {}
        }
    }
    flags
}

fn parse_visibility(text: &str) -> Option<Visibility> {
    match text.trim().to_ascii_lowercase().as_str() {
        "public" => Some(Visibility::Public),
        "protected" => Some(Visibility::Protected),
        "private" => Some(Visibility::Private),
        _ => None,
    }
}

fn field_text(node: Node, field: &str, source: &[u8]) -> Option<String> {
    node.child_by_field_name(field)
        .map(|n| node_text(n, source).to_owned())
}

/// Row (1-based) of the first error or missing node in the tree.
fn first_error_line(node: Node) -> Option<usize> {
    if node.is_error() || node.is_missing() {
        return Some(node.start_position().row + 1);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error()
            && let Some(line) = first_error_line(child)
        {
            return Some(line);
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Members
// ---------------------------------------------------------------------------

fn extract_properties(node: Node, source: &[u8], doc: Option<String>) -> Vec<MemberNode> {
    let flags = modifier_flags(node, source);
    let type_hint = field_text(node, "type", source);
    named_children(node)
        .into_iter()
        .filter(|c| c.kind() == "property_element")
        .filter_map(|element| {
            let name = element
                .child_by_field_name("name")
                .or_else(|| first_child_of_kind(element, "variable_name"))?;
            Some(MemberNode::Property(PropertyNode {
                name: node_text(name, source).to_owned(),
                visibility: flags.visibility,
                is_static: flags.is_static,
                type_hint: type_hint.clone(),
                doc: doc.clone(),
            }))
        })
        .collect()
}

fn extract_parameter(node: Node, source: &[u8]) -> Option<ParameterNode> {
    let name = node
        .child_by_field_name("name")
        .or_else(|| first_child_of_kind(node, "variable_name"))?;
    let promoted_visibility = match node.kind() {
        "property_promotion_parameter" => first_child_of_kind(node, "visibility_modifier")
            .and_then(|v| parse_visibility(node_text(v, source)))
            .or(Some(Visibility::Public)),
        _ => None,
    };
    Some(ParameterNode {
        name: node_text(name, source).to_owned(),
        type_hint: field_text(node, "type", source),
        promoted_visibility,
    })
}

fn extract_method(node: Node, source: &[u8], doc: Option<String>) -> Option<MemberNode> {
    let name = field_text(node, "name", source)?;
    let flags = modifier_flags(node, source);
    let parameters = node
        .child_by_field_name("parameters")
        .map(|params| {
            named_children(params)
                .into_iter()
                .filter(|p| {
                    matches!(
                        p.kind(),
                        "simple_parameter" | "variadic_parameter" | "property_promotion_parameter"
                    )
                })
                .filter_map(|p| extract_parameter(p, source))
                .collect()
        })
        .unwrap_or_default();
    Some(MemberNode::Method(MethodNode {
        name,
        visibility: flags.visibility,
        is_static: flags.is_static,
        is_abstract: flags.is_abstract,
        parameters,
        return_type: field_text(node, "return_type", source),
        doc,
    }))
}

fn extract_constants(node: Node, source: &[u8]) -> Vec<MemberNode> {
    let flags = modifier_flags(node, source);
    let type_hint = field_text(node, "type", source);
    named_children(node)
        .into_iter()
        .filter(|c| c.kind() == "const_element")
        .filter_map(|element| first_child_of_kind(element, "name"))
        .map(|name| {
            MemberNode::Constant(ConstantNode {
                name: node_text(name, source).to_owned(),
                visibility: flags.visibility,
                type_hint: type_hint.clone(),
            })
        })
        .collect()
}

/// Walk a `declaration_list`, attaching `/** ... */` comments to the member that follows.
fn extract_body(body: Node, source: &[u8], declaration: &mut DeclarationNode) {
    let mut pending_doc: Option<String> = None;
    for child in named_children(body) {
        match child.kind() {
            "comment" => {
                let text = node_text(child, source);
                if text.starts_with("/**") {
                    pending_doc = Some(text.to_owned());
                }
            }
            "property_declaration" => {
                let members = extract_properties(child, source, pending_doc.take());
                declaration.members.extend(members);
            }
            "method_declaration" => {
                if let Some(method) = extract_method(child, source, pending_doc.take()) {
                    declaration.members.push(method);
                }
            }
            "const_declaration" => {
                pending_doc = None;
                declaration.members.extend(extract_constants(child, source));
            }
            "use_declaration" => {
                pending_doc = None;
                declaration.traits.extend(type_names(child, source));
            }
            other => {
                pending_doc = None;
                trace!(kind = other; "skipping unmodelled member node");
                declaration.members.push(MemberNode::Unknown {
                    kind: other.to_owned(),
                });
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Declarations
// ---------------------------------------------------------------------------

fn declaration_kind(node_kind: &str) -> Option<DeclarationKind> {
    match node_kind {
        "class_declaration" => Some(DeclarationKind::Class),
        "interface_declaration" => Some(DeclarationKind::Interface),
        "trait_declaration" => Some(DeclarationKind::Trait),
        _ => None,
    }
}

fn extract_declaration(
    node: Node,
    kind: DeclarationKind,
    source: &[u8],
) -> Option<DeclarationNode> {
    let name = field_text(node, "name", source)?;
    let mut declaration = DeclarationNode::new(kind, name);
    for child in named_children(node) {
        match child.kind() {
            "abstract_modifier" => declaration.is_abstract = true,
            "base_clause" => declaration.extends = type_names(child, source),
            "class_interface_clause" => declaration.implements = type_names(child, source),
            "declaration_list" => extract_body(child, source, &mut declaration),
            _ => {}
        }
    }
    Some(declaration)
}

/// Collect declarations anywhere in the tree: top level, namespace bodies, conditional blocks.
fn collect_declarations(node: Node, source: &[u8], out: &mut Vec<DeclarationNode>) {
    if let Some(kind) = declaration_kind(node.kind()) {
        if let Some(declaration) = extract_declaration(node, kind, source) {
            out.push(declaration);
        }
        return;
    }
    for child in named_children(node) {
        collect_declarations(child, source, out);
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Parse a PHP source file and extract its class, interface and trait declarations.
///
/// # Errors
/// Returns an error if:
/// - the PHP grammar cannot be loaded
/// - `tree-sitter` returns `None`
/// - the tree contains a syntax error (the model of a broken file cannot be trusted)
pub fn parse_php(path: &Path, source: &[u8]) -> Result<Vec<DeclarationNode>, ParseError> {
    let mut parser = Parser::new();
    parser.set_language(&tree_sitter_php::LANGUAGE_PHP.into())?;
    let tree = parser.parse(source, None).ok_or_else(|| ParseError::NoTree {
        path: path.to_path_buf(),
    })?;

    let root = tree.root_node();
    if root.has_error() {
        return Err(ParseError::Syntax {
            path: path.to_path_buf(),
            line: first_error_line(root).unwrap_or(1),
        });
    }

    let mut declarations = Vec::new();
    collect_declarations(root, source, &mut declarations);
    Ok(declarations)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
