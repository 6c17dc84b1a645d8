//! Shape registry: the per-run table of emitted declarations.
//!
//! Two lookups live here:
//! - shared schema key -> the type reference it was registered under
//! - declaration name -> the emitted declaration
//!
//! The second one keeps names unique. Emitting a declaration under a name
//! that already holds an identical body returns the existing name; a
//! different body gets the next free numbered name.
//!
//! Names can also be reserved up front. A reserved name is skipped by
//! [`ShapeRegistry::emit`] and only handed out by
//! [`ShapeRegistry::emit_reserved`].

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::types::{Declaration, TypeRef};
use super::utils::numbered_name;

/// Declarations and shared-schema registrations for one generation run.
#[derive(Debug, Default)]
pub struct ShapeRegistry {
    shared: HashMap<String, TypeRef>,
    declarations: Vec<Declaration>,
    by_name: HashMap<String, usize>,
    reserved: HashSet<String>,
}

impl ShapeRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Type reference a shared schema was registered under.
    pub fn shared(&self, key: &str) -> Option<&TypeRef> {
        self.shared.get(key)
    }

    /// Record the type reference for a shared schema key.
    pub fn register_shared(&mut self, key: &str, ty: TypeRef) {
        self.shared.insert(key.to_string(), ty);
    }

    /// Hold `name` back for a later [`ShapeRegistry::emit_reserved`].
    pub fn reserve(&mut self, name: &str) {
        self.reserved.insert(name.to_string());
    }

    /// Emit a declaration and return the name it ended up under.
    ///
    /// Reserved names are treated as taken.
    pub fn emit(&mut self, declaration: Declaration) -> String {
        self.place(declaration)
    }

    /// Emit a declaration under its reserved name, releasing the reservation.
    ///
    /// Falls back to [`ShapeRegistry::emit`] numbering when the name is
    /// already held by a different body.
    pub fn emit_reserved(&mut self, declaration: Declaration) -> String {
        self.reserved.remove(declaration.name());
        self.place(declaration)
    }

    fn place(&mut self, declaration: Declaration) -> String {
        let base = declaration.name().to_string();
        let mut candidate = base.clone();
        let mut n = 1;

        loop {
            match self.by_name.get(&candidate) {
                Some(&index) if self.declarations[index].same_body(&declaration) => {
                    debug!(name = %candidate, "Reusing identical declaration.");
                    return candidate;
                }
                None if !self.reserved.contains(&candidate) => break,
                _ => {}
            }
            n += 1;
            candidate = numbered_name(&base, n);
        }

        if candidate != base {
            debug!(proposed = %base, name = %candidate, "Declaration name taken, using numbered name.");
        }

        let declaration = if candidate == base {
            declaration
        } else {
            declaration.renamed(candidate.clone())
        };
        self.by_name
            .insert(candidate.clone(), self.declarations.len());
        self.declarations.push(declaration);
        candidate
    }

    /// Look up an emitted declaration by name.
    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.by_name.get(name).map(|&index| &self.declarations[index])
    }

    /// Emitted declarations, in emission order.
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// Consume the registry, keeping the declarations in emission order.
    pub fn into_declarations(self) -> Vec<Declaration> {
        self.declarations
    }
}
