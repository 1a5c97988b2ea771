use icall_core::{LookupStrategy, ManifestEntry, TableStats};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] icall_core::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<icall_core::RegistryError> for CliError {
    fn from(e: icall_core::RegistryError) -> Self {
        CliError::Core(e.into())
    }
}

impl From<icall_core::config::ConfigError> for CliError {
    fn from(e: icall_core::config::ConfigError) -> Self {
        CliError::Core(e.into())
    }
}

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct StatsReport<'a> {
    assembly: &'a str,
    #[serde(flatten)]
    stats: &'a TableStats,
    strategy: LookupStrategy,
}

pub fn render_entries(entries: &[&ManifestEntry], format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(entries)?),
        OutputFormat::Text => Ok(entries
            .iter()
            .map(|entry| format!("{:>8}  {:#04x}  {}\n", entry.id, entry.flags, entry.symbol))
            .collect()),
    }
}

pub fn render_stats(
    assembly: &str,
    stats: &TableStats,
    strategy: LookupStrategy,
    format: OutputFormat,
) -> CliResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&StatsReport {
            assembly,
            stats,
            strategy,
        })?),
        OutputFormat::Text => {
            let ids = match (stats.min_id, stats.max_id) {
                (Some(min), Some(max)) => format!("{}..={}", min, max),
                _ => "-".to_string(),
            };
            Ok(format!(
                "assembly: {}\nentries:  {}\nids:      {}\nspan:     {}\ndensity:  {:.3}\nflagged:  {}\nstrategy: {}\n",
                assembly, stats.len, ids, stats.span, stats.density, stats.flagged, strategy
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use icall_core::CallId;

    fn entry(id: u32, symbol: &str, flags: u8) -> ManifestEntry {
        ManifestEntry {
            id: CallId::new(id),
            symbol: symbol.to_string(),
            flags,
        }
    }

    #[test]
    fn text_entries_are_aligned_rows() {
        let a = entry(186, "ves_icall_System_Array_InternalCreate", 0);
        let b = entry(200, "ves_icall_System_Array_GetLengthInternal_raw", 4);
        let out = render_entries(&[&a, &b], OutputFormat::Text).unwrap();
        assert_eq!(
            out,
            "     186  0x00  ves_icall_System_Array_InternalCreate\n     200  0x04  ves_icall_System_Array_GetLengthInternal_raw\n"
        );
    }

    #[test]
    fn json_stats_flatten_the_table_stats() {
        let stats = TableStats::from_ids(&[CallId::new(10), CallId::new(11)], 1);
        let out = render_stats("corlib", &stats, LookupStrategy::Direct, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["assembly"], "corlib");
        assert_eq!(value["len"], 2);
        assert_eq!(value["min_id"], 10);
        assert_eq!(value["strategy"], "direct");
    }

    #[test]
    fn text_stats_of_empty_table() {
        let stats = TableStats::from_ids(&[], 0);
        let out = render_stats("empty", &stats, LookupStrategy::Binary, OutputFormat::Text).unwrap();
        assert!(out.contains("ids:      -"));
        assert!(out.contains("strategy: binary"));
    }
}
