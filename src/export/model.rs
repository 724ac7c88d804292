/// Output format for the class diagram.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Graphviz DOT (default). Pipe it into `dot -Tpng` to get an image.
    #[default]
    Dot,
    /// The ordered element sequence as JSON.
    Json,
}

/// Result of an export.
#[derive(Debug)]
pub struct ExportResult {
    /// The rendered diagram.
    pub content: String,
    pub node_count: usize,
    pub edge_count: usize,
}
