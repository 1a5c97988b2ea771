use thiserror::Error;

use crate::config::ConfigError;
use crate::native::CallId;

/// What is wrong with a rejected table row.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableDefect {
    #[error("duplicate id")]
    Duplicate,
    #[error("id out of order (previous id {previous})")]
    OutOfOrder { previous: CallId },
    #[error("null native target")]
    NullTarget,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The source table is malformed. Raised only while building, never while serving lookups.
    #[error("Invalid table {table}: {defect} at position {position} (id {id})")]
    InvalidTable {
        table: String,
        position: usize,
        id: CallId,
        defect: TableDefect,
    },
    /// No entry for the requested id: the generated code and the table disagree.
    #[error("Unknown call id {id} in table {table}")]
    UnknownCallId { table: String, id: CallId },
    #[error("Unknown table: {0}")]
    UnknownTable(String),
    #[error("Table already registered: {0}")]
    DuplicateTable(String),
    #[error("Unresolved native symbol {symbol} for id {id}")]
    UnresolvedSymbol { id: CallId, symbol: String },
    #[error("Native symbol registered twice: {0}")]
    DuplicateSymbol(String),
    #[error("Direct index span {span} exceeds maximum {max}")]
    DirectSpanTooLarge { span: u64, max: u64 },
}

impl RegistryError {
    pub fn is_invalid_table(&self) -> bool {
        matches!(self, RegistryError::InvalidTable { .. })
    }

    pub fn is_unknown_call_id(&self) -> bool {
        matches!(self, RegistryError::UnknownCallId { .. })
    }
}

pub type RegistryResult<T> = Result<T, RegistryError>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

pub type InternalResult<T> = Result<T, Error>;
