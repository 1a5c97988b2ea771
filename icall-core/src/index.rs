//! Lookup strategies behind [`Registry::lookup`](crate::Registry::lookup).
//!
//! Every strategy answers the same question (the position of an id in the
//! sorted entry slice) and must agree with plain binary search for every id.
//! Binary search is the default: tables hold a few hundred entries and are
//! probed on every managed-to-native transition, so a compact sorted slice
//! wins. Near-contiguous tables can trade memory for a direct slot array.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    config::RegistryConfig,
    error::{RegistryError, RegistryResult},
    flags::CallFlags,
    native::CallId,
    registry::CallEntry,
};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LookupStrategy {
    /// Direct when the table is dense enough, binary otherwise.
    #[default]
    Auto,
    Binary,
    Direct,
    Hashed,
}

/// Hard limit on direct index slots (64 MiB of `u32`), whatever the config asks for.
pub const DIRECT_SPAN_CEILING: u64 = 1 << 24;

impl LookupStrategy {
    /// Resolves `Auto` to a concrete strategy for a table with these stats.
    pub fn select(self, stats: &TableStats, config: &RegistryConfig) -> RegistryResult<Self> {
        let max_span = config.max_direct_span.min(DIRECT_SPAN_CEILING);
        match self {
            LookupStrategy::Auto => {
                let fits = stats.span > 0 && stats.span <= max_span;
                if fits && stats.density >= config.direct_density_threshold {
                    Ok(LookupStrategy::Direct)
                } else {
                    Ok(LookupStrategy::Binary)
                }
            }
            LookupStrategy::Direct if stats.span > max_span => {
                Err(RegistryError::DirectSpanTooLarge {
                    span: stats.span,
                    max: max_span,
                })
            }
            other => Ok(other),
        }
    }
}

/// Shape of a validated table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TableStats {
    pub len: usize,
    pub min_id: Option<CallId>,
    pub max_id: Option<CallId>,
    /// Number of ids between `min_id` and `max_id` inclusive.
    pub span: u64,
    pub density: f64,
    /// Entries carrying [`CallFlags::ALT_CONVENTION`].
    pub flagged: usize,
}

impl TableStats {
    /// `ids` must already be strictly increasing.
    pub fn from_ids(ids: &[CallId], flagged: usize) -> Self {
        let min_id = ids.first().copied();
        let max_id = ids.last().copied();
        let span = match (min_id, max_id) {
            (Some(min), Some(max)) => u64::from(max.get()) - u64::from(min.get()) + 1,
            _ => 0,
        };
        let density = if span == 0 {
            0.0
        } else {
            ids.len() as f64 / span as f64
        };
        Self {
            len: ids.len(),
            min_id,
            max_id,
            span,
            density,
            flagged,
        }
    }

    pub fn from_entries(entries: &[CallEntry]) -> Self {
        let ids: Vec<CallId> = entries.iter().map(|entry| entry.id).collect();
        let flagged = entries
            .iter()
            .filter(|entry| entry.flags.contains(CallFlags::ALT_CONVENTION))
            .count();
        Self::from_ids(&ids, flagged)
    }
}

const EMPTY_SLOT: u32 = u32::MAX;

#[derive(Debug, Clone)]
pub(crate) enum LookupIndex {
    Binary,
    Direct { base: u32, slots: Box<[u32]> },
    Hashed(HashMap<CallId, u32>),
}

impl LookupIndex {
    /// `strategy` must already be resolved by [`LookupStrategy::select`].
    pub(crate) fn build(strategy: LookupStrategy, entries: &[CallEntry]) -> Self {
        match strategy {
            LookupStrategy::Auto | LookupStrategy::Binary => LookupIndex::Binary,
            LookupStrategy::Direct => {
                let base = entries.first().map_or(0, |entry| entry.id.get());
                let span = entries
                    .last()
                    .map_or(0, |entry| (entry.id.get() - base) as usize + 1);
                let mut slots = vec![EMPTY_SLOT; span].into_boxed_slice();
                // positions are below len, which is bounded by the u32 id space
                for (position, entry) in entries.iter().enumerate() {
                    slots[(entry.id.get() - base) as usize] = position as u32;
                }
                LookupIndex::Direct { base, slots }
            }
            LookupStrategy::Hashed => LookupIndex::Hashed(
                entries
                    .iter()
                    .enumerate()
                    .map(|(position, entry)| (entry.id, position as u32))
                    .collect(),
            ),
        }
    }

    pub(crate) fn strategy(&self) -> LookupStrategy {
        match self {
            LookupIndex::Binary => LookupStrategy::Binary,
            LookupIndex::Direct { .. } => LookupStrategy::Direct,
            LookupIndex::Hashed(_) => LookupStrategy::Hashed,
        }
    }

    #[inline]
    pub(crate) fn position(&self, entries: &[CallEntry], id: CallId) -> Option<usize> {
        match self {
            LookupIndex::Binary => entries.binary_search_by_key(&id, |entry| entry.id).ok(),
            LookupIndex::Direct { base, slots } => {
                let offset = id.get().checked_sub(*base)?;
                match slots.get(offset as usize) {
                    Some(&slot) if slot != EMPTY_SLOT => Some(slot as usize),
                    _ => None,
                }
            }
            LookupIndex::Hashed(positions) => positions.get(&id).map(|&slot| slot as usize),
        }
    }
}
