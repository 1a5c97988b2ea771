//! JSON form of a generated native call table.
//!
//! The build step that assigns ids emits one manifest per assembly:
//!
//! ```json
//! {
//!   "assembly": "corlib",
//!   "entries": [
//!     { "id": 186, "symbol": "ves_icall_System_Array_InternalCreate", "flags": 0 },
//!     { "id": 200, "symbol": "ves_icall_System_Array_GetLengthInternal_raw", "flags": 4 }
//!   ]
//! }
//! ```
//!
//! A manifest can be checked on its own ([`TableManifest::validate`]) and is
//! turned into a [`Registry`] by resolving every symbol against the host's
//! [`SymbolTable`].

use std::{path::Path, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    config::{self, ConfigError, RegistryConfig},
    error::{RegistryError, RegistryResult},
    flags::CallFlags,
    native::CallId,
    registry::{CallEntry, Registry, RegistryBuilder, check_order},
    symbols::SymbolTable,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub id: CallId,
    pub symbol: String,
    #[serde(default)]
    pub flags: u8,
}

impl ManifestEntry {
    pub fn call_flags(&self) -> CallFlags {
        CallFlags::from_raw(self.flags)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableManifest {
    pub assembly: String,
    #[serde(default)]
    pub entries: Vec<ManifestEntry>,
}

impl TableManifest {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        config::from_file(path)
    }

    /// Checks id ordering without touching any native symbol.
    pub fn validate(&self) -> RegistryResult<()> {
        check_order(&self.assembly, self.entries.iter().map(|entry| entry.id))
    }

    /// Finds the row for `id`. Assumes a validated manifest.
    pub fn entry(&self, id: impl Into<CallId>) -> RegistryResult<&ManifestEntry> {
        let id = id.into();
        self.entries
            .binary_search_by_key(&id, |entry| entry.id)
            .ok()
            .and_then(|position| self.entries.get(position))
            .ok_or_else(|| RegistryError::UnknownCallId {
                table: self.assembly.clone(),
                id,
            })
    }

    pub fn ids(&self) -> Vec<CallId> {
        self.entries.iter().map(|entry| entry.id).collect()
    }

    pub fn flagged(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.call_flags().contains(CallFlags::ALT_CONVENTION))
            .count()
    }

    /// Maps every row to a [`CallEntry`], failing on the first unknown symbol.
    pub fn resolve(&self, symbols: &SymbolTable) -> RegistryResult<Vec<CallEntry>> {
        self.entries
            .iter()
            .map(|entry| {
                let (symbol, target) =
                    symbols
                        .get(&entry.symbol)
                        .ok_or_else(|| RegistryError::UnresolvedSymbol {
                            id: entry.id,
                            symbol: entry.symbol.clone(),
                        })?;
                Ok(CallEntry::new(entry.id.get(), target, entry.call_flags()).with_symbol(symbol))
            })
            .collect()
    }

    #[tracing::instrument(skip(self, symbols, config), fields(assembly = %self.assembly), level = "debug")]
    pub fn build(&self, symbols: &SymbolTable, config: RegistryConfig) -> RegistryResult<Registry> {
        self.validate()?;
        let entries = self.resolve(symbols)?;
        debug!(resolved = entries.len(), "Resolved manifest symbols");
        RegistryBuilder::new(self.assembly.clone())
            .config(config)
            .entries(entries)
            .build()
    }
}

impl FromStr for TableManifest {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        config::from_str(s)
    }
}
