pub mod builders;
pub mod php;
pub mod resolver;
pub mod syntax;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info, warn};

use crate::code::Codebase;
use crate::error::CodebaseError;

use builders::DefinitionBuilder;
use builders::members::MembersBuilder;
use php::parse_php;
use resolver::resolve_external_definitions;
use syntax::DeclarationNode;

/// Which members the model builders keep. Assembled once per run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserConfig {
    pub hide_private: bool,
    pub hide_protected: bool,
    pub hide_attributes: bool,
    pub hide_methods: bool,
    pub hide_constants: bool,
}

/// Builds a resolved [`Codebase`] from PHP files or from ready-made declaration nodes.
#[derive(Debug, Clone, Default)]
pub struct CodeParser {
    builder: DefinitionBuilder,
}

impl CodeParser {
    pub fn from_config(config: &ParserConfig) -> Self {
        Self {
            builder: DefinitionBuilder::new(MembersBuilder::from_config(config)),
        }
    }

    /// Parse every file in order, register its declarations, then add external stubs.
    ///
    /// Files are processed one at a time. The first unreadable file, syntax error or
    /// duplicate declaration aborts the whole run.
    pub fn parse(&self, files: &[PathBuf]) -> Result<Codebase> {
        let mut codebase = Codebase::new();
        for path in files {
            let nodes = parse_file(path)?;
            debug!(path:% = path.display(), declarations = nodes.len(); "parsed file");
            self.register(nodes, &mut codebase)
                .with_context(|| format!("while registering declarations from {}", path.display()))?;
        }
        if codebase.is_empty() {
            warn!(files = files.len(); "no class, interface or trait declarations found");
        }
        let scanned = codebase.len();
        let stubs = resolve_external_definitions(&mut codebase);
        info!(scanned, stubs; "built codebase");
        Ok(codebase)
    }

    /// Build and register declaration nodes produced by any front end. Does not resolve.
    pub fn register(
        &self,
        nodes: impl IntoIterator<Item = DeclarationNode>,
        codebase: &mut Codebase,
    ) -> Result<(), CodebaseError> {
        for node in nodes {
            codebase.add(self.builder.build(&node))?;
        }
        Ok(())
    }
}

fn parse_file(path: &Path) -> Result<Vec<DeclarationNode>> {
    let source =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let nodes = parse_php(path, &source)?;
    Ok(nodes)
}
