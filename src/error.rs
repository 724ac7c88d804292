use std::path::PathBuf;

use thiserror::Error;

use crate::code::Name;

/// Faults raised by the [`Codebase`](crate::code::Codebase) registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodebaseError {
    /// A lookup for a name that was never registered. After resolution this means the
    /// resolver left a reference dangling.
    #[error("no definition registered for `{0}`")]
    NotFound(Name),

    /// A different declaration was registered under a name that was already taken.
    /// The later declaration replaced the earlier one.
    #[error("`{0}` is declared more than once")]
    DuplicateDefinition(Name),
}

/// Faults raised while turning source text into declaration nodes.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("syntax error in {path} near line {line}")]
    Syntax { path: PathBuf, line: usize },

    #[error("tree-sitter produced no tree for {path}")]
    NoTree { path: PathBuf },

    #[error("failed to load the PHP grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
}
