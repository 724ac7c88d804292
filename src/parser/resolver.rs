//! Closes the codebase over names that are referenced but never declared in the scanned files.
//!
//! An external definition is a class, interface or trait from a third-party library or the
//! language runtime. It gets a member-less stub so every relation has a node to point at.

use log::{debug, info};

use crate::code::{ClassDefinition, Codebase, Declaration, InterfaceDefinition, TraitDefinition};

/// Stub candidates for everything `declaration` extends, implements or uses.
fn external_candidates(declaration: &Declaration) -> Vec<Declaration> {
    match declaration {
        Declaration::Class(class) => {
            let interfaces = class
                .interfaces
                .iter()
                .cloned()
                .map(|name| Declaration::from(InterfaceDefinition::external(name)));
            let traits = class
                .traits
                .iter()
                .cloned()
                .map(|name| Declaration::from(TraitDefinition::external(name)));
            let parent = class
                .parent
                .iter()
                .cloned()
                .map(|name| Declaration::from(ClassDefinition::external(name)));
            interfaces.chain(traits).chain(parent).collect()
        }
        Declaration::Interface(iface) => iface
            .parents
            .iter()
            .cloned()
            .map(|name| Declaration::from(InterfaceDefinition::external(name)))
            .collect(),
        Declaration::Trait(t) => t
            .traits
            .iter()
            .cloned()
            .map(|name| Declaration::from(TraitDefinition::external(name)))
            .collect(),
    }
}

/// Add a stub for every parent, interface and trait name missing from `codebase`.
///
/// Only the declarations present when the call starts are inspected; stubs have no relations
/// of their own. Names already registered, real or stub, are left untouched, so running this
/// twice adds nothing the second time. Returns the number of stubs added.
pub fn resolve_external_definitions(codebase: &mut Codebase) -> usize {
    let candidates: Vec<Declaration> = codebase
        .definitions()
        .flat_map(external_candidates)
        .collect();

    let mut added = 0;
    for stub in candidates {
        let name = stub.name().clone();
        let kind = stub.kind();
        if codebase.add_if_absent(stub) {
            debug!(name:% = name, kind = kind.label(); "added external definition");
            added += 1;
        }
    }
    info!(added; "resolved external definitions");
    added
}
