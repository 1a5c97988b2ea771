//! # icall-core: Native Call Registry
//!
//! A managed runtime implements some of its methods natively ("internal
//! calls"). Generated code refers to those methods by a stable integer id;
//! this crate resolves the id to the native function and the calling
//! convention flags the runtime needs to invoke it, without any string
//! lookup on the call path.
//!
//! ## Building tables
//!
//! Tables come from the build step in one of two forms:
//!
//! - Compiled in, declared with [`icall_table!`] and loaded with
//!   [`Registry::from_static`].
//! - As a JSON [`manifest::TableManifest`] of `(id, symbol, flags)` rows,
//!   resolved against a host [`symbols::SymbolTable`].
//!
//! Either way the rows go through [`RegistryBuilder::build`] (or
//! [`register_table`]), which rejects tables whose ids are not strictly
//! increasing.
//!
//! ## Resolving calls
//!
//! A built [`Registry`] is immutable. Wrap it (or a [`tables::TableSet`]
//! holding one registry per assembly) in an `Arc` and hand it to every
//! component that dispatches native calls; [`Registry::lookup`] needs no
//! locking.
//!
//! ## Modules
//!
//! - [`registry`]: entries, builder, registry and lookup
//! - [`index`]: interchangeable lookup strategies
//! - [`flags`]: calling-convention bitset
//! - [`native`]: ids and erased function addresses
//! - [`manifest`], [`symbols`]: table manifests and symbol resolution
//! - [`tables`]: per-assembly table sets
//! - [`config`]: registry configuration
//! - [`error`]: error types

pub mod config;
pub mod error;
pub mod flags;
pub mod index;
pub mod manifest;
pub mod native;
pub mod registry;
pub mod symbols;
pub mod table;
pub mod tables;

// Re-exports
pub use config::{MissPolicy, RegistryConfig};
pub use error::*;
pub use flags::{CallFlags, flag_set};
pub use index::{DIRECT_SPAN_CEILING, LookupStrategy, TableStats};
pub use manifest::{ManifestEntry, TableManifest};
pub use native::{CallId, NativeFn};
pub use registry::{CallEntry, DEFAULT_TABLE, Registry, RegistryBuilder, Resolution, register_table};
pub use symbols::SymbolTable;
pub use tables::TableSet;
