use std::collections::HashSet;

use log::{debug, info};

use crate::code::members::Variable;
use crate::code::{Codebase, Declaration, Name};
use crate::error::CodebaseError;

use super::{Edge, GraphConfig, GraphElement};

/// Produces the ordered diagram elements for one declaration.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassGraphBuilder {
    config: GraphConfig,
}

impl ClassGraphBuilder {
    pub fn new(config: GraphConfig) -> Self {
        Self { config }
    }

    /// Association edges, then the node, then inheritance and implementation edges.
    ///
    /// Associations are only drawn to registered names and each referenced type yields at most
    /// one edge per call. A parent or interface missing from `codebase` is reported as
    /// [`CodebaseError::NotFound`].
    pub fn extract_from(
        &self,
        declaration: &Declaration,
        codebase: &Codebase,
    ) -> Result<Vec<GraphElement>, CodebaseError> {
        let mut elements: Vec<GraphElement> = Vec::new();
        if self.config.associations {
            elements.extend(
                self.associations(declaration, codebase)
                    .into_iter()
                    .map(GraphElement::from),
            );
        }

        elements.push(GraphElement::node(declaration));

        let this = declaration.name();
        match declaration {
            Declaration::Class(class) => {
                if let Some(parent) = &class.parent {
                    let parent = codebase.get(parent)?.name().clone();
                    elements.push(Edge::inheritance(parent, this.clone()).into());
                }
                for interface in &class.interfaces {
                    let interface = codebase.get(interface)?.name().clone();
                    elements.push(Edge::implementation(interface, this.clone()).into());
                }
            }
            Declaration::Interface(iface) => {
                for parent in &iface.parents {
                    let parent = codebase.get(parent)?.name().clone();
                    elements.push(Edge::inheritance(parent, this.clone()).into());
                }
            }
            Declaration::Trait(_) => {}
        }

        debug!(name:% = this, elements = elements.len(); "extracted declaration");
        Ok(elements)
    }

    fn associations(&self, declaration: &Declaration, codebase: &Codebase) -> Vec<Edge> {
        let constructor_types = declaration
            .constructor()
            .into_iter()
            .flat_map(|m| m.parameters.iter().filter_map(Variable::reference));
        let method_types = declaration
            .methods()
            .iter()
            .filter(|m| self.config.method_associations && !m.is_constructor())
            .flat_map(|m| m.references());
        let attribute_types = declaration
            .attributes()
            .iter()
            .filter_map(|a| a.variable.reference());

        let this = declaration.name();
        let mut seen: HashSet<Name> = HashSet::new();
        constructor_types
            .chain(method_types)
            .chain(attribute_types)
            .filter(|name| codebase.has(name))
            .filter(|name| seen.insert(name.clone()))
            .map(|name| Edge::association(name, this.clone()))
            .collect()
    }
}

/// Extracts the elements of every declaration in a codebase.
#[derive(Debug, Clone, Copy, Default)]
pub struct DigraphBuilder {
    builder: ClassGraphBuilder,
}

impl DigraphBuilder {
    pub fn new(config: GraphConfig) -> Self {
        Self {
            builder: ClassGraphBuilder::new(config),
        }
    }

    /// Elements of each definition concatenated in registry order. External stubs yield a
    /// bare node.
    pub fn extract(&self, codebase: &Codebase) -> Result<Vec<GraphElement>, CodebaseError> {
        let mut elements = Vec::new();
        for declaration in codebase.definitions() {
            elements.extend(self.builder.extract_from(declaration, codebase)?);
        }
        info!(declarations = codebase.len(), elements = elements.len(); "built class graph");
        Ok(elements)
    }
}
