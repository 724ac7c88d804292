use std::fmt::Write;

use crate::code::members::Member;
use crate::code::{Declaration, DeclarationKind};
use crate::graph::{Edge, EdgeKind, GraphElement};

/// Quote a name as a DOT ID. Distinct names always give distinct IDs.
pub fn quote_dot_id(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        if matches!(c, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Escape the characters that are structural inside a record label.
fn escape_record(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '{' | '}' | '|' | '<' | '>' | '"' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn fillcolor(kind: DeclarationKind) -> &'static str {
    match kind {
        DeclarationKind::Class => "#A9DFBF",
        DeclarationKind::Interface => "#F9E79F",
        DeclarationKind::Trait => "#D7BDE2",
    }
}

fn stereotype(declaration: &Declaration) -> Option<&'static str> {
    match declaration {
        Declaration::Interface(_) => Some("«interface»"),
        Declaration::Trait(_) => Some("«trait»"),
        Declaration::Class(class) if class.is_abstract => Some("«abstract»"),
        Declaration::Class(_) => None,
    }
}

/// DOT edge attributes for a given EdgeKind.
fn edge_style(kind: EdgeKind) -> &'static str {
    match kind {
        EdgeKind::Inheritance => "arrowhead=empty style=solid",
        EdgeKind::Implementation => "arrowhead=empty style=dashed",
        EdgeKind::Association => "arrowhead=none dir=back arrowtail=none style=solid",
    }
}

/// Record label: a title compartment, then constants and attributes, then methods.
fn record_label(declaration: &Declaration) -> String {
    let mut label = String::from("{");
    if let Some(stereotype) = stereotype(declaration) {
        label.push_str(stereotype);
        label.push_str("\\n");
    }
    label.push_str(&escape_record(declaration.name().as_str()));

    let mut fields = String::new();
    let mut methods = String::new();
    for member in declaration.members() {
        let compartment = match member {
            Member::Method(_) => &mut methods,
            Member::Attribute(_) | Member::Constant(_) => &mut fields,
        };
        compartment.push_str(&escape_record(&member.to_string()));
        compartment.push_str("\\l");
    }

    label.push('|');
    label.push_str(&fields);
    label.push('|');
    label.push_str(&methods);
    label.push('}');
    label
}

fn render_node(declaration: &Declaration, out: &mut String) {
    let style = if declaration.is_external() {
        "\"filled,dashed\""
    } else {
        "filled"
    };
    writeln!(
        out,
        "    {} [label=\"{}\" fillcolor=\"{}\" style={}];",
        quote_dot_id(declaration.name().as_str()),
        record_label(declaration),
        fillcolor(declaration.kind()),
        style,
    )
    .unwrap();
}

fn render_edge(edge: &Edge, out: &mut String) {
    writeln!(
        out,
        "    {} -> {} [{}];",
        quote_dot_id(edge.from.as_str()),
        quote_dot_id(edge.to.as_str()),
        edge_style(edge.kind)
    )
    .unwrap();
}

/// Render the element sequence as a Graphviz digraph, one statement per element, in order.
pub fn render_dot(elements: &[GraphElement]) -> String {
    let mut out = String::new();
    writeln!(out, "digraph class_graph {{").unwrap();
    writeln!(out, "    rankdir=BT;").unwrap();
    writeln!(out, "    node [shape=record fontname=monospace fontsize=10];").unwrap();

    for element in elements {
        match element {
            GraphElement::Node(node) => render_node(&node.declaration, &mut out),
            GraphElement::Edge(edge) => render_edge(edge, &mut out),
        }
    }

    writeln!(out, "}}").unwrap();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::members::{Attribute, Constant, Method, Variable, Visibility};
    use crate::code::{ClassDefinition, InterfaceDefinition, Name};

    #[test]
    fn test_quote_dot_id() {
        assert_eq!(quote_dot_id("User"), "\"User\"");
        assert_eq!(quote_dot_id("2fa"), "\"2fa\"");
        assert_eq!(quote_dot_id("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_ne!(quote_dot_id("App\\User"), quote_dot_id("App_User"));
    }

    #[test]
    fn test_record_label_lists_members_by_compartment() {
        let mut class = ClassDefinition::named("Account");
        class.constants.push(Constant::new("LIMIT", Visibility::Public, None));
        class
            .attributes
            .push(Attribute::private(Variable::typed("$owner", "?User")));
        class.methods.push(Method::public("close", vec![]));
        let label = record_label(&class.into());
        assert_eq!(label, "{Account|+LIMIT\\l-?User $owner\\l|+close()\\l}");
    }

    #[test]
    fn test_interface_label_has_stereotype() {
        let iface: Declaration = InterfaceDefinition::named("Contract").into();
        assert_eq!(record_label(&iface), "{«interface»\\nContract||}");
    }

    #[test]
    fn test_render_dot_shape() {
        let mut class = ClassDefinition::named("User");
        class.interfaces = vec![Name::new("Countable")];
        let class: Declaration = class.into();
        let iface: Declaration = InterfaceDefinition::external(Name::new("Countable")).into();
        let elements = vec![
            Edge::association(Name::new("Profile"), Name::new("User")).into(),
            GraphElement::node(&class),
            Edge::implementation(Name::new("Countable"), Name::new("User")).into(),
            GraphElement::node(&iface),
        ];

        let dot = render_dot(&elements);
        let lines: Vec<&str> = dot.lines().collect();
        assert_eq!(lines[0], "digraph class_graph {");
        assert_eq!(
            lines[3],
            "    \"Profile\" -> \"User\" [arrowhead=none dir=back arrowtail=none style=solid];"
        );
        assert!(lines[4].starts_with("    \"User\" [label=\"{User||}\""));
        assert_eq!(
            lines[5],
            "    \"Countable\" -> \"User\" [arrowhead=empty style=dashed];"
        );
        assert!(lines[6].ends_with("style=\"filled,dashed\"];"));
        assert_eq!(*lines.last().unwrap(), "}");
    }
}
