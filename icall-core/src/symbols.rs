//! Host-provided native symbols.
//!
//! A manifest names its targets by symbol; the host that links the native
//! functions provides the name → address map used to resolve them.

use std::collections::HashMap;

use crate::{
    error::{RegistryError, RegistryResult},
    native::NativeFn,
};

#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: HashMap<&'static str, NativeFn>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: &[(&'static str, NativeFn)]) -> RegistryResult<Self> {
        let mut table = Self::new();
        for &(name, target) in pairs {
            table.insert(name, target)?;
        }
        Ok(table)
    }

    pub fn insert(&mut self, name: &'static str, target: NativeFn) -> RegistryResult<()> {
        if self.symbols.contains_key(name) {
            return Err(RegistryError::DuplicateSymbol(name.to_string()));
        }
        self.symbols.insert(name, target);
        Ok(())
    }

    /// Returns the interned name together with its address.
    pub fn get(&self, name: &str) -> Option<(&'static str, NativeFn)> {
        self.symbols
            .get_key_value(name)
            .map(|(&name, &target)| (name, target))
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Builds `[(name, NativeFn); N]` pairs from function paths.
///
/// ```
/// use icall_core::{native_symbols, SymbolTable};
///
/// extern "C" fn gc_get_max_generation() -> i32 { 2 }
///
/// let symbols = SymbolTable::from_pairs(&native_symbols![gc_get_max_generation]).unwrap();
/// assert!(symbols.get("gc_get_max_generation").is_some());
/// ```
#[macro_export]
macro_rules! native_symbols {
    ($($func:path),* $(,)?) => {
        [ $( (stringify!($func), $crate::NativeFn::new($func as *const ())) ),* ]
    };
}
