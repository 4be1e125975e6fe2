use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use netvendor::config::Config;
use netvendor::input::{self, InputFormat};
use netvendor::report;
use netvendor::vendor::{refresh_seed, OuiResolver, SEED_FILE};

#[derive(Parser)]
#[command(name = "netvendor")]
#[command(about = "Resolve hardware vendors for MAC/ARP table dumps")]
struct Cli {
    /// Path to a config file (defaults to netvendor.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a MAC/ARP dump and write vendor reports
    Analyze {
        /// Input file: a MAC list, ARP table, or MAC address table dump
        input: PathBuf,

        /// Resolve from local data only, without network lookups
        #[arg(long)]
        offline: bool,

        /// Directory for resolver state (cache, seed, failed lookups)
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Directory for generated reports
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Download the Wireshark manufacturers database into the local seed
    UpdateSeed {
        /// Directory for resolver state
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref());

    match cli.command {
        Command::Analyze {
            input,
            offline,
            data_dir,
            output_dir,
        } => {
            let data_dir = data_dir.unwrap_or(config.data_dir);
            let output_dir = output_dir.unwrap_or(config.output_dir);
            analyze(&input, &data_dir, &output_dir, offline || config.offline)
        }
        Command::UpdateSeed { data_dir } => {
            let data_dir = data_dir.unwrap_or(config.data_dir);
            std::fs::create_dir_all(&data_dir)
                .with_context(|| format!("creating {}", data_dir.display()))?;
            let path = data_dir.join(SEED_FILE);
            let entries = refresh_seed(&path)
                .with_context(|| format!("refreshing seed at {}", path.display()))?;
            info!(entries, path = %path.display(), "seed database updated");
            Ok(())
        }
    }
}

fn analyze(input: &Path, data_dir: &Path, output_dir: &Path, offline: bool) -> Result<()> {
    if !input.is_file() {
        bail!("input file not found: {}", input.display());
    }
    let (format, devices) = input::parse_file_detailed(input);
    if devices.is_empty() {
        bail!("no devices parsed from {}", input.display());
    }
    info!(
        format = ?format,
        devices = devices.len(),
        offline,
        "parsed input"
    );

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("creating {}", output_dir.display()))?;
    let mut resolver = OuiResolver::new(data_dir, offline);

    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "input".to_string());

    let devices_csv = output_dir.join(format!("{stem}-Devices.csv"));
    report::write_device_csv(&devices_csv, &devices, &mut resolver)
        .with_context(|| format!("writing {}", devices_csv.display()))?;

    // Port data only exists in MAC address table dumps.
    if format == InputFormat::MacTable {
        let ports_csv = output_dir.join(format!("{stem}-Ports.csv"));
        report::write_port_csv(&ports_csv, &devices, &mut resolver)
            .with_context(|| format!("writing {}", ports_csv.display()))?;
    }

    let summary = output_dir.join("vendor_summary.txt");
    report::write_vendor_summary(&summary, &devices, &mut resolver)
        .with_context(|| format!("writing {}", summary.display()))?;

    info!(
        cached = resolver.cache_len(),
        failed = resolver.failed_len(),
        "analysis complete"
    );
    Ok(())
}
