use std::path::Path;

use log::warn;
use serde::Deserialize;

use crate::graph::GraphConfig;
use crate::parser::ParserConfig;

pub const CONFIG_FILE: &str = "class-graph.toml";

/// Configuration loaded from `class-graph.toml` at the scanned root.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(default)]
pub struct ClassGraphConfig {
    /// Additional path patterns to exclude from discovery (beyond .gitignore).
    pub exclude: Option<Vec<String>>,
    /// Defaults for the `diagram` command.
    pub diagram: DiagramOptions,
}

/// What the diagram shows. Booleans from the file are OR-ed with the CLI flags.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct DiagramOptions {
    pub hide_private: bool,
    pub hide_protected: bool,
    pub hide_attributes: bool,
    pub hide_methods: bool,
    pub hide_constants: bool,
    pub associations: bool,
    pub method_associations: bool,
}

impl Default for DiagramOptions {
    fn default() -> Self {
        Self {
            hide_private: false,
            hide_protected: false,
            hide_attributes: false,
            hide_methods: false,
            hide_constants: false,
            associations: true,
            method_associations: false,
        }
    }
}

impl DiagramOptions {
    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig {
            hide_private: self.hide_private,
            hide_protected: self.hide_protected,
            hide_attributes: self.hide_attributes,
            hide_methods: self.hide_methods,
            hide_constants: self.hide_constants,
        }
    }

    pub fn graph_config(&self) -> GraphConfig {
        GraphConfig {
            associations: self.associations,
            method_associations: self.method_associations,
        }
    }
}

impl ClassGraphConfig {
    /// Load configuration from `class-graph.toml` in the given root directory.
    ///
    /// Returns a default configuration if the file does not exist or cannot be parsed.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE);

        if !config_path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match toml::from_str::<Self>(&contents) {
                Ok(config) => config,
                Err(err) => {
                    warn!(path:% = config_path.display(), error:% = err; "failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(err) => {
                warn!(path:% = config_path.display(), error:% = err; "failed to read config, using defaults");
                Self::default()
            }
        }
    }

    pub fn exclude_patterns(&self) -> &[String] {
        self.exclude.as_deref().unwrap_or_default()
    }
}
