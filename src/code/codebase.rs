use indexmap::IndexMap;
use log::warn;

use crate::code::{Declaration, Name};
use crate::error::CodebaseError;

/// Name-keyed registry of every known declaration, scanned or external.
///
/// Enumeration follows insertion order. Lookups are by exact name.
#[derive(Debug, Default, Clone)]
pub struct Codebase {
    definitions: IndexMap<Name, Declaration>,
}

impl Codebase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `declaration` under its name.
    ///
    /// Adding an identical declaration again is a no-op. Adding a different declaration under
    /// a taken name replaces the previous one and reports
    /// [`CodebaseError::DuplicateDefinition`]; member lists are never merged.
    pub fn add(&mut self, declaration: Declaration) -> Result<(), CodebaseError> {
        let name = declaration.name().clone();
        match self.definitions.get_mut(&name) {
            Some(existing) if *existing == declaration => Ok(()),
            Some(existing) => {
                warn!(name:% = name; "replacing a previously registered definition");
                *existing = declaration;
                Err(CodebaseError::DuplicateDefinition(name))
            }
            None => {
                self.definitions.insert(name, declaration);
                Ok(())
            }
        }
    }

    /// Register `declaration` only if its name is unknown. Returns whether it was inserted.
    pub fn add_if_absent(&mut self, declaration: Declaration) -> bool {
        if self.definitions.contains_key(declaration.name()) {
            return false;
        }
        self.definitions
            .insert(declaration.name().clone(), declaration);
        true
    }

    pub fn has(&self, name: &Name) -> bool {
        self.definitions.contains_key(name)
    }

    pub fn get(&self, name: &Name) -> Result<&Declaration, CodebaseError> {
        self.definitions
            .get(name)
            .ok_or_else(|| CodebaseError::NotFound(name.clone()))
    }

    /// Every registered declaration, in insertion order.
    pub fn definitions(&self) -> impl Iterator<Item = &Declaration> {
        self.definitions.values()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
