use serde::{Deserialize, Serialize};
use std::{fs::File, io, io::BufReader, path::Path};
use thiserror::Error;

use crate::index::LookupStrategy;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// What the registry does when a call site asks for an id it does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum::EnumString, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MissPolicy {
    /// Log the id and abort the process.
    #[default]
    Abort,
    /// Hand the error back to the caller.
    Report,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub strategy: LookupStrategy,

    /// Minimum `len / span` ratio for `auto` to pick the direct index.
    #[serde(default = "default_direct_density_threshold")]
    pub direct_density_threshold: f64,

    /// Largest id span the direct index may allocate slots for. Values above
    /// [`DIRECT_SPAN_CEILING`](crate::index::DIRECT_SPAN_CEILING) are clamped to it.
    #[serde(default = "default_max_direct_span")]
    pub max_direct_span: u64,

    #[serde(default)]
    pub miss_policy: MissPolicy,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            strategy: LookupStrategy::default(),
            direct_density_threshold: default_direct_density_threshold(),
            max_direct_span: default_max_direct_span(),
            miss_policy: MissPolicy::default(),
        }
    }
}

impl RegistryConfig {
    pub fn with_strategy(mut self, strategy: LookupStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_miss_policy(mut self, miss_policy: MissPolicy) -> Self {
        self.miss_policy = miss_policy;
        self
    }
}

fn default_direct_density_threshold() -> f64 {
    0.5
}

fn default_max_direct_span() -> u64 {
    65_536
}

pub fn from_file<T: for<'de> Deserialize<'de>, P: AsRef<Path>>(path: P) -> ConfigResult<T> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)?;
    Ok(config)
}

pub fn from_str<T: for<'de> Deserialize<'de>>(s: &str) -> ConfigResult<T> {
    let config = serde_json::from_str(s)?;
    Ok(config)
}
