//! One registry per assembly.
//!
//! Generated tables are emitted per assembly (`corlib`, and any other
//! assembly that declares internal calls); a call site knows which assembly
//! its method came from and resolves within that table.

use std::collections::HashMap;

use tracing::info;

use crate::{
    error::{RegistryError, RegistryResult},
    native::CallId,
    registry::{Registry, Resolution},
};

/// Built registries keyed by assembly name. Immutable once handed out.
#[derive(Debug, Clone, Default)]
pub struct TableSet {
    tables: HashMap<String, Registry>,
}

impl TableSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, registry: Registry) -> RegistryResult<()> {
        if self.tables.contains_key(registry.name()) {
            return Err(RegistryError::DuplicateTable(registry.name().to_string()));
        }
        info!(table = %registry.name(), len = registry.len(), "Native call table added to set");
        self.tables.insert(registry.name().to_string(), registry);
        Ok(())
    }

    pub fn with(mut self, registry: Registry) -> RegistryResult<Self> {
        self.insert(registry)?;
        Ok(self)
    }

    pub fn get(&self, assembly: &str) -> Option<&Registry> {
        self.tables.get(assembly)
    }

    pub fn lookup(&self, assembly: &str, id: impl Into<CallId>) -> RegistryResult<Resolution> {
        self.tables
            .get(assembly)
            .ok_or_else(|| RegistryError::UnknownTable(assembly.to_string()))?
            .lookup(id)
    }

    /// Assembly names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
