//! Kind registry: `kind → descriptor` lookup.
//!
//! Populated once at startup from the catalog's static rows; read-only
//! afterwards. The iterator exists for diagnostics (`list_kinds`).

use crate::descriptor::ResourceDescriptor;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    /// No descriptor is registered under this kind name.
    #[error("unknown resource kind: {0}")]
    UnknownResourceKind(String),
}

/// Immutable lookup table over the registered descriptor rows.
pub struct Registry {
    by_kind: HashMap<&'static str, &'static ResourceDescriptor>,
}

impl Registry {
    /// Build a registry from static rows. Duplicate kind names are a defect
    /// in the generated table, caught at startup.
    pub fn from_rows(rows: &[&'static ResourceDescriptor]) -> Self {
        let mut by_kind = HashMap::with_capacity(rows.len());
        for rd in rows {
            let prev = by_kind.insert(rd.kind, *rd);
            assert!(prev.is_none(), "duplicate descriptor for kind {}", rd.kind);
        }
        Self { by_kind }
    }

    pub fn get(&self, kind: &str) -> Result<&'static ResourceDescriptor, RegistryError> {
        self.by_kind
            .get(kind)
            .copied()
            .ok_or_else(|| RegistryError::UnknownResourceKind(kind.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static ResourceDescriptor> + '_ {
        self.by_kind.values().copied()
    }

    pub fn kinds(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.by_kind.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.by_kind.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_kind.is_empty()
    }
}
