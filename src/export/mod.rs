pub mod dot;
pub mod model;

use anyhow::Context;
use log::info;

use crate::graph::GraphElement;

use model::{ExportFormat, ExportResult};

/// Render the element sequence in the requested format.
///
/// Elements are written in the order given, which is the order consumers expect.
pub fn export_elements(
    elements: &[GraphElement],
    format: ExportFormat,
) -> anyhow::Result<ExportResult> {
    let node_count = elements
        .iter()
        .filter(|e| matches!(e, GraphElement::Node(_)))
        .count();
    let edge_count = elements.len() - node_count;

    let content = match format {
        ExportFormat::Dot => dot::render_dot(elements),
        ExportFormat::Json => serde_json::to_string_pretty(elements)
            .context("failed to serialize graph elements")?,
    };

    info!(output:? = format, nodes = node_count, edges = edge_count; "exported diagram");
    Ok(ExportResult {
        content,
        node_count,
        edge_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{ClassDefinition, Declaration, Name};
    use crate::graph::Edge;

    fn sample() -> Vec<GraphElement> {
        let base: Declaration = ClassDefinition::named("Base").into();
        let mut child = ClassDefinition::named("Child");
        child.parent = Some(Name::new("Base"));
        let child: Declaration = child.into();
        vec![
            GraphElement::node(&child),
            Edge::inheritance(Name::new("Base"), Name::new("Child")).into(),
            GraphElement::node(&base),
        ]
    }

    #[test]
    fn test_counts_nodes_and_edges() {
        let result = export_elements(&sample(), ExportFormat::Dot).unwrap();
        assert_eq!(result.node_count, 2);
        assert_eq!(result.edge_count, 1);
        assert!(result.content.starts_with("digraph"));
    }

    #[test]
    fn test_json_keeps_element_order() {
        let result = export_elements(&sample(), ExportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&result.content).unwrap();
        let elements = value.as_array().unwrap();
        assert_eq!(elements.len(), 3);
        assert_eq!(elements[0]["element"], "node");
        assert_eq!(elements[0]["declaration"]["kind"], "class");
        assert_eq!(elements[0]["declaration"]["name"], "Child");
        assert_eq!(elements[1]["element"], "edge");
        assert_eq!(elements[1]["kind"], "inheritance");
        assert_eq!(elements[1]["from"], "Base");
        assert_eq!(elements[1]["to"], "Child");
    }
}
