use clap::{Parser, Subcommand};
use icall_cli::report::{self, CliResult, OutputFormat};
use icall_core::{
    CallId, RegistryConfig, RegistryError, TableManifest, TableStats, config,
};
use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a registry config file (JSON)
    #[arg(short, long, env = "ICALL_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    output: OutputFormat,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate one or more table manifests
    Check {
        /// Manifest files
        #[arg(required = true)]
        manifests: Vec<PathBuf>,
    },

    /// Print the rows of a manifest
    Show {
        /// Manifest file
        manifest: PathBuf,

        /// Only print the row for this id
        #[arg(long)]
        id: Option<u32>,
    },

    /// Print table shape and the lookup strategy the registry would use
    Stats {
        /// Manifest file
        manifest: PathBuf,
    },
}

fn load_manifest(path: &Path) -> CliResult<TableManifest> {
    debug!("Loading manifest: {:?}", path);
    let manifest = TableManifest::from_file(path)?;
    manifest.validate()?;
    Ok(manifest)
}

fn load_config(path: Option<&Path>) -> CliResult<RegistryConfig> {
    match path {
        Some(path) => Ok(config::from_file(path)?),
        None => Ok(RegistryConfig::default()),
    }
}

fn check(manifests: &[PathBuf]) -> CliResult<()> {
    let mut assemblies = HashSet::new();
    for path in manifests {
        let manifest = load_manifest(path)?;
        if !assemblies.insert(manifest.assembly.clone()) {
            return Err(RegistryError::DuplicateTable(manifest.assembly).into());
        }
        info!(assembly = %manifest.assembly, "Manifest is valid");
        println!("ok: {} ({} entries)", manifest.assembly, manifest.entries.len());
    }
    Ok(())
}

fn show(path: &Path, id: Option<u32>, output: OutputFormat) -> CliResult<()> {
    let manifest = load_manifest(path)?;
    let rows = match id {
        Some(id) => vec![manifest.entry(CallId::new(id))?],
        None => manifest.entries.iter().collect(),
    };
    print!("{}", report::render_entries(&rows, output)?);
    Ok(())
}

fn stats(path: &Path, config: &RegistryConfig, output: OutputFormat) -> CliResult<()> {
    let manifest = load_manifest(path)?;
    let stats = TableStats::from_ids(&manifest.ids(), manifest.flagged());
    let strategy = config.strategy.select(&stats, config)?;
    print!(
        "{}",
        report::render_stats(&manifest.assembly, &stats, strategy, output)?
    );
    Ok(())
}

fn run(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Commands::Check { manifests } => check(manifests),
        Commands::Show { manifest, id } => show(manifest, *id, cli.output),
        Commands::Stats { manifest } => {
            let config = load_config(cli.config.as_deref())?;
            stats(manifest, &config, cli.output)
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
