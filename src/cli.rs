use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::DiagramOptions;
use crate::export::model::ExportFormat;

/// Class diagrams and code statistics for PHP codebases.
///
/// class-graph parses the classes, interfaces and traits of a directory and
/// emits their inheritance, implementation and association relations as a
/// Graphviz digraph.
#[derive(Parser, Debug)]
#[command(
    name = "class-graph",
    version,
    about,
    long_about = None,
    propagate_version = true,
)]
pub struct Cli {
    /// Log verbosity (off, error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags that shape the diagram. Each one switches its config file setting on, never off,
/// except `--no-associations`.
#[derive(Args, Debug, Default, Clone)]
pub struct DiagramArgs {
    /// Leave private members out of the diagram.
    #[arg(long)]
    pub hide_private: bool,

    /// Leave protected members out of the diagram.
    #[arg(long)]
    pub hide_protected: bool,

    /// Leave every attribute out of the diagram.
    #[arg(long)]
    pub hide_attributes: bool,

    /// Leave every method out of the diagram.
    #[arg(long)]
    pub hide_methods: bool,

    /// Leave every constant out of the diagram.
    #[arg(long)]
    pub hide_constants: bool,

    /// Do not draw association edges.
    #[arg(long)]
    pub no_associations: bool,

    /// Also draw associations for types in non-constructor method signatures.
    #[arg(long)]
    pub method_associations: bool,
}

impl DiagramArgs {
    /// Layer these flags over the options read from the config file.
    pub fn merge_into(&self, options: DiagramOptions) -> DiagramOptions {
        DiagramOptions {
            hide_private: options.hide_private || self.hide_private,
            hide_protected: options.hide_protected || self.hide_protected,
            hide_attributes: options.hide_attributes || self.hide_attributes,
            hide_methods: options.hide_methods || self.hide_methods,
            hide_constants: options.hide_constants || self.hide_constants,
            associations: options.associations && !self.no_associations,
            method_associations: options.method_associations || self.method_associations,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a class diagram for the PHP files in a directory.
    Diagram {
        /// Directory containing the PHP sources.
        path: PathBuf,

        /// Descend into sub-directories.
        #[arg(short, long)]
        recursive: bool,

        #[command(flatten)]
        options: DiagramArgs,

        /// Output format.
        #[arg(long, value_enum, default_value_t = ExportFormat::Dot)]
        format: ExportFormat,

        /// Write the diagram to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print class, method and attribute statistics for a directory.
    Statistics {
        /// Directory containing the PHP sources.
        path: PathBuf,

        /// Descend into sub-directories.
        #[arg(short, long)]
        recursive: bool,

        /// Output results as JSON instead of human-readable text.
        #[arg(long)]
        json: bool,
    },
}
