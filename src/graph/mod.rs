pub mod builder;

use serde::Serialize;

use crate::code::{Declaration, Name};

/// The kind of directed edge between two declarations in the diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Parent -> child: a class extends a class, or an interface extends an interface.
    Inheritance,
    /// Interface -> class: the class implements the interface.
    Implementation,
    /// Referenced type -> declaration: the declaration holds or receives the type.
    Association,
}

/// A directed edge between two registered names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    pub kind: EdgeKind,
    pub from: Name,
    pub to: Name,
}

impl Edge {
    pub fn inheritance(parent: Name, child: Name) -> Self {
        Self {
            kind: EdgeKind::Inheritance,
            from: parent,
            to: child,
        }
    }

    pub fn implementation(interface: Name, class: Name) -> Self {
        Self {
            kind: EdgeKind::Implementation,
            from: interface,
            to: class,
        }
    }

    pub fn association(referenced: Name, declaration: Name) -> Self {
        Self {
            kind: EdgeKind::Association,
            from: referenced,
            to: declaration,
        }
    }
}

/// A declaration rendered as a diagram node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub declaration: Declaration,
}

impl From<&Declaration> for Node {
    fn from(declaration: &Declaration) -> Self {
        Self {
            declaration: declaration.clone(),
        }
    }
}

/// One element of the ordered diagram description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "element", rename_all = "lowercase")]
pub enum GraphElement {
    Node(Node),
    Edge(Edge),
}

impl GraphElement {
    pub fn node(declaration: &Declaration) -> Self {
        GraphElement::Node(Node::from(declaration))
    }
}

impl From<Edge> for GraphElement {
    fn from(edge: Edge) -> Self {
        GraphElement::Edge(edge)
    }
}

/// Which relations the graph builder draws. Assembled once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphConfig {
    /// Draw association edges at all.
    pub associations: bool,
    /// Also scan the signatures of methods other than the constructor.
    pub method_associations: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            associations: true,
            method_associations: false,
        }
    }
}
