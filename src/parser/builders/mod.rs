pub mod filters;
pub mod members;
pub mod types;

use crate::code::{
    ClassDefinition, Declaration, DeclarationKind, InterfaceDefinition, Name, TraitDefinition,
};
use crate::parser::syntax::DeclarationNode;

use members::MembersBuilder;

fn names(raw: &[String]) -> Vec<Name> {
    raw.iter().map(Name::new).collect()
}

/// Turns declaration nodes into code-model declarations.
#[derive(Debug, Clone, Default)]
pub struct DefinitionBuilder {
    members: MembersBuilder,
}

impl DefinitionBuilder {
    pub fn new(members: MembersBuilder) -> Self {
        Self { members }
    }

    pub fn build(&self, node: &DeclarationNode) -> Declaration {
        match node.kind {
            DeclarationKind::Class => self.build_class(node).into(),
            DeclarationKind::Interface => self.build_interface(node).into(),
            DeclarationKind::Trait => self.build_trait(node).into(),
        }
    }

    pub fn build_class(&self, node: &DeclarationNode) -> ClassDefinition {
        ClassDefinition {
            name: Name::new(&node.name),
            attributes: self.members.build_attributes(&node.members),
            methods: self.members.build_methods(&node.members),
            constants: self.members.build_constants(&node.members),
            interfaces: names(&node.implements),
            traits: names(&node.traits),
            parent: node.extends.first().map(Name::new),
            is_abstract: node.is_abstract,
            is_external: false,
        }
    }

    pub fn build_interface(&self, node: &DeclarationNode) -> InterfaceDefinition {
        InterfaceDefinition {
            name: Name::new(&node.name),
            methods: self.members.build_methods(&node.members),
            constants: self.members.build_constants(&node.members),
            parents: names(&node.extends),
            is_external: false,
        }
    }

    pub fn build_trait(&self, node: &DeclarationNode) -> TraitDefinition {
        TraitDefinition {
            name: Name::new(&node.name),
            attributes: self.members.build_attributes(&node.members),
            methods: self.members.build_methods(&node.members),
            constants: self.members.build_constants(&node.members),
            traits: names(&node.traits),
            is_external: false,
        }
    }
}
