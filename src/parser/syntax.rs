//! Raw declaration nodes handed from a syntax front end to the model builders.
//!
//! The PHP front end in [`super::php`] produces these from a tree-sitter tree. The types also
//! deserialize from JSON, so another front end can feed the builders without going through
//! tree-sitter.

use serde::Deserialize;

use crate::code::DeclarationKind;
use crate::code::members::Visibility;

/// A class, interface, or trait as it appears in source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeclarationNode {
    pub kind: DeclarationKind,
    pub name: String,
    /// `extends` clause. Classes use the first entry; interfaces may list several.
    #[serde(default)]
    pub extends: Vec<String>,
    #[serde(default)]
    pub implements: Vec<String>,
    /// Traits pulled in with `use` inside the body.
    #[serde(default)]
    pub traits: Vec<String>,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub members: Vec<MemberNode>,
}

impl DeclarationNode {
    pub fn new(kind: DeclarationKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            extends: Vec::new(),
            implements: Vec::new(),
            traits: Vec::new(),
            is_abstract: false,
            members: Vec::new(),
        }
    }
}

/// A member node inside a declaration body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "member", rename_all = "lowercase")]
pub enum MemberNode {
    Property(PropertyNode),
    Method(MethodNode),
    Constant(ConstantNode),
    /// A node kind the builders do not model (enum cases, future syntax, ...).
    Unknown { kind: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct PropertyNode {
    pub name: String,
    #[serde(default)]
    pub visibility: Option<Visibility>,
    #[serde(default)]
    pub is_static: bool,
    /// Inline type annotation.
    #[serde(default)]
    pub type_hint: Option<String>,
    /// Doc comment attached to the declaration, verbatim.
    #[serde(default)]
    pub doc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct MethodNode {
    pub name: String,
    #[serde(default)]
    pub visibility: Option<Visibility>,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub parameters: Vec<ParameterNode>,
    #[serde(default)]
    pub return_type: Option<String>,
    #[serde(default)]
    pub doc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ParameterNode {
    pub name: String,
    #[serde(default)]
    pub type_hint: Option<String>,
    /// Set for constructor-promoted properties (`public function __construct(private Foo $foo)`).
    #[serde(default)]
    pub promoted_visibility: Option<Visibility>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ConstantNode {
    pub name: String,
    #[serde(default)]
    pub visibility: Option<Visibility>,
    #[serde(default)]
    pub type_hint: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_declaration_from_json() {
        let json = r#"{
            "kind": "class",
            "name": "Invoice",
            "extends": ["Document"],
            "members": [
                {"member": "property", "name": "$total", "visibility": "private", "type_hint": "Money"},
                {"member": "method", "name": "pay", "parameters": [{"name": "$gateway", "type_hint": "Gateway"}]},
                {"member": "unknown", "kind": "enum_case"}
            ]
        }"#;
        let node: DeclarationNode = serde_json::from_str(json).expect("valid node json");
        assert_eq!(node.kind, DeclarationKind::Class);
        assert_eq!(node.extends, vec!["Document".to_string()]);
        assert_eq!(node.members.len(), 3);
        match &node.members[0] {
            MemberNode::Property(p) => {
                assert_eq!(p.visibility, Some(Visibility::Private));
                assert_eq!(p.type_hint.as_deref(), Some("Money"));
            }
            other => panic!("expected property, got {other:?}"),
        }
        assert!(matches!(&node.members[2], MemberNode::Unknown { kind } if kind == "enum_case"));
    }
}
