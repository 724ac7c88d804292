mod cli;
mod code;
mod config;
mod error;
mod export;
mod graph;
mod output;
mod parser;
mod summary;
mod walker;

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, debug, info};

use cli::{Cli, Commands, DiagramArgs};
use code::Codebase;
use config::ClassGraphConfig;
use export::export_elements;
use export::model::ExportFormat;
use graph::builder::DigraphBuilder;
use parser::{CodeParser, ParserConfig};
use summary::Summary;
use walker::walk_project;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = LevelFilter::from_str(&cli.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            cli.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting class-graph");
    debug!(command:? = cli.command; "Parsed arguments");

    match cli.command {
        Commands::Diagram {
            path,
            recursive,
            options,
            format,
            output,
        } => diagram(&path, recursive, &options, format, output.as_deref())?,
        Commands::Statistics {
            path,
            recursive,
            json,
        } => statistics(&path, recursive, json)?,
    }

    Ok(())
}

/// Discover, parse and resolve the sources under `root`.
fn load_codebase(
    root: &Path,
    config: &ClassGraphConfig,
    recursive: bool,
    parser_config: &ParserConfig,
) -> Result<Codebase> {
    let files: Vec<PathBuf> = walk_project(root, config, recursive)?;
    CodeParser::from_config(parser_config).parse(&files)
}

fn diagram(
    root: &Path,
    recursive: bool,
    args: &DiagramArgs,
    format: ExportFormat,
    output: Option<&Path>,
) -> Result<()> {
    let config = ClassGraphConfig::load(root);
    let options = args.merge_into(config.diagram);
    debug!(options:?; "Diagram options");

    let codebase = load_codebase(root, &config, recursive, &options.parser_config())?;
    let elements = DigraphBuilder::new(options.graph_config())
        .extract(&codebase)
        .context("class graph references an unregistered definition")?;
    let result = export_elements(&elements, format)?;

    match output {
        Some(path) => {
            std::fs::write(path, &result.content)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path:% = path.display(), nodes = result.node_count, edges = result.edge_count; "Wrote diagram");
        }
        None => print!("{}", result.content),
    }
    Ok(())
}

fn statistics(root: &Path, recursive: bool, json: bool) -> Result<()> {
    let config = ClassGraphConfig::load(root);
    let codebase = load_codebase(root, &config, recursive, &ParserConfig::default())?;
    output::print_summary(&Summary::from_codebase(&codebase), json)
}
