//! # Native Call Registry
//!
//! Resolves a stable integer [`CallId`] to the native function implementing an
//! internal call and the [`CallFlags`] describing how the runtime must call it.
//!
//! ## Lifecycle
//!
//! A registry has two states. [`RegistryBuilder`] collects entries (unbuilt);
//! [`RegistryBuilder::build`] validates them once and produces an immutable
//! [`Registry`] (built). There is no way back: a built registry is never
//! mutated, so it can be shared behind an `Arc` and read from any number of
//! threads without locking.
//!
//! ## Failure semantics
//!
//! * A table whose ids are not strictly increasing, or that carries a null
//!   target, is rejected with [`RegistryError::InvalidTable`]. This is a
//!   build defect and should stop startup.
//! * A lookup for an id with no entry fails with
//!   [`RegistryError::UnknownCallId`]. The registry never substitutes a
//!   default target; the caller decides whether to trap, raise or abort, or
//!   delegates that decision to the configured [`MissPolicy`] through
//!   [`Registry::resolve`].

use tracing::{debug, error, info, warn};

use crate::{
    config::{MissPolicy, RegistryConfig},
    error::{RegistryError, RegistryResult, TableDefect},
    flags::CallFlags,
    index::{LookupIndex, LookupStrategy, TableStats},
    native::{CallId, NativeFn},
};

/// Table name used by [`register_table`].
pub const DEFAULT_TABLE: &str = "default";

/// One native call: id, target and flags, plus the native symbol name when known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallEntry {
    pub id: CallId,
    pub target: NativeFn,
    pub flags: CallFlags,
    pub symbol: Option<&'static str>,
}

impl CallEntry {
    pub const fn new(id: u32, target: NativeFn, flags: CallFlags) -> Self {
        Self {
            id: CallId::new(id),
            target,
            flags,
            symbol: None,
        }
    }

    pub const fn with_symbol(mut self, symbol: &'static str) -> Self {
        self.symbol = Some(symbol);
        self
    }

    pub const fn resolution(&self) -> Resolution {
        Resolution {
            target: self.target,
            flags: self.flags,
        }
    }
}

/// Result of a successful lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub target: NativeFn,
    pub flags: CallFlags,
}

/// Checks that ids are strictly increasing, reporting the first violation.
pub(crate) fn check_order<I>(table: &str, ids: I) -> RegistryResult<()>
where
    I: IntoIterator<Item = CallId>,
{
    let mut previous: Option<CallId> = None;
    for (position, id) in ids.into_iter().enumerate() {
        if let Some(previous) = previous {
            let defect = if id == previous {
                Some(TableDefect::Duplicate)
            } else if id < previous {
                Some(TableDefect::OutOfOrder { previous })
            } else {
                None
            };
            if let Some(defect) = defect {
                return Err(RegistryError::InvalidTable {
                    table: table.to_string(),
                    position,
                    id,
                    defect,
                });
            }
        }
        previous = Some(id);
    }
    Ok(())
}

/// Builds a registry named [`DEFAULT_TABLE`] with the default configuration.
pub fn register_table<I>(entries: I) -> RegistryResult<Registry>
where
    I: IntoIterator<Item = CallEntry>,
{
    RegistryBuilder::new(DEFAULT_TABLE).entries(entries).build()
}

#[derive(Debug, Clone)]
pub struct RegistryBuilder {
    name: String,
    config: RegistryConfig,
    entries: Vec<CallEntry>,
}

impl RegistryBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: RegistryConfig::default(),
            entries: Vec::new(),
        }
    }

    pub fn config(mut self, config: RegistryConfig) -> Self {
        self.config = config;
        self
    }

    pub fn entry(mut self, entry: CallEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn entries<I>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = CallEntry>,
    {
        self.entries.extend(entries);
        self
    }

    /// Validates the collected entries and freezes them into a [`Registry`].
    ///
    /// Entries are not sorted here: they must already arrive in strictly
    /// increasing id order, as a generated table does.
    #[tracing::instrument(skip(self), fields(table = %self.name, len = self.entries.len()), level = "debug")]
    pub fn build(self) -> RegistryResult<Registry> {
        let RegistryBuilder {
            name,
            config,
            entries,
        } = self;

        let validated = check_order(&name, entries.iter().map(|entry| entry.id)).and_then(|()| {
            match entries.iter().position(|entry| entry.target.is_null()) {
                Some(position) => Err(RegistryError::InvalidTable {
                    table: name.clone(),
                    position,
                    id: entries[position].id,
                    defect: TableDefect::NullTarget,
                }),
                None => Ok(()),
            }
        });
        if let Err(e) = validated {
            error!("Rejecting native call table: {}", e);
            return Err(e);
        }

        let stats = TableStats::from_entries(&entries);
        let strategy = config.strategy.select(&stats, &config)?;
        let index = LookupIndex::build(strategy, &entries);
        info!(
            table = %name,
            len = stats.len,
            span = stats.span,
            strategy = %strategy,
            "Native call table built"
        );

        Ok(Registry {
            name,
            entries: entries.into_boxed_slice(),
            index,
            miss_policy: config.miss_policy,
        })
    }
}

/// Immutable, validated table of native calls.
#[derive(Debug, Clone)]
pub struct Registry {
    name: String,
    entries: Box<[CallEntry]>,
    index: LookupIndex,
    miss_policy: MissPolicy,
}

impl Registry {
    pub fn builder(name: impl Into<String>) -> RegistryBuilder {
        RegistryBuilder::new(name)
    }

    /// Builds a registry over a compiled-in table declared with [`icall_table!`](crate::icall_table).
    pub fn from_static(
        name: impl Into<String>,
        table: &'static [CallEntry],
        config: RegistryConfig,
    ) -> RegistryResult<Self> {
        RegistryBuilder::new(name)
            .config(config)
            .entries(table.iter().copied())
            .build()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn strategy(&self) -> LookupStrategy {
        self.index.strategy()
    }

    pub fn miss_policy(&self) -> MissPolicy {
        self.miss_policy
    }

    /// Entries in ascending id order.
    pub fn entries(&self) -> &[CallEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &CallEntry> {
        self.entries.iter()
    }

    #[inline]
    pub fn get(&self, id: impl Into<CallId>) -> Option<&CallEntry> {
        let id = id.into();
        self.index
            .position(&self.entries, id)
            .and_then(|position| self.entries.get(position))
    }

    pub fn contains(&self, id: impl Into<CallId>) -> bool {
        self.get(id).is_some()
    }

    /// Returns the target and flags registered for `id`.
    #[inline]
    pub fn lookup(&self, id: impl Into<CallId>) -> RegistryResult<Resolution> {
        let id = id.into();
        match self.get(id) {
            Some(entry) => Ok(entry.resolution()),
            None => Err(RegistryError::UnknownCallId {
                table: self.name.clone(),
                id,
            }),
        }
    }

    /// [`lookup`](Self::lookup), with misses handled by the configured [`MissPolicy`].
    ///
    /// Under [`MissPolicy::Abort`] an unknown id terminates the process after
    /// logging it; under [`MissPolicy::Report`] the error is returned.
    pub fn resolve(&self, id: impl Into<CallId>) -> RegistryResult<Resolution> {
        let id = id.into();
        self.lookup(id).map_err(|e| match self.miss_policy {
            MissPolicy::Abort => {
                error!(table = %self.name, id = %id, "Unknown native call id, aborting");
                std::process::abort()
            }
            MissPolicy::Report => {
                warn!(table = %self.name, id = %id, "Unknown native call id");
                e
            }
        })
    }

    pub fn symbol_of(&self, id: impl Into<CallId>) -> Option<&'static str> {
        self.get(id).and_then(|entry| entry.symbol)
    }

    /// Finds the entry whose target is `target`. Linear; meant for diagnostics.
    pub fn find_by_target(&self, target: NativeFn) -> Option<&CallEntry> {
        let found = self.entries.iter().find(|entry| entry.target == target);
        if found.is_none() {
            debug!(table = %self.name, ?target, "No entry for native target");
        }
        found
    }

    pub fn stats(&self) -> TableStats {
        TableStats::from_entries(&self.entries)
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a CallEntry;
    type IntoIter = std::slice::Iter<'a, CallEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
