#![forbid(unsafe_code)]

mod cmd;
mod input;
mod output;

use clap::{Parser, Subcommand};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use roadnet_core::RoadnetError;
use roadnet_core::config::load_config;
use std::env;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Config file looked up in the working directory when `--config` is absent.
const DEFAULT_CONFIG_FILE: &str = "roadnet.toml";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "roadnet: topological connectivity for road networks",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Output format (defaults to pretty on a TTY, text when piped).
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// TOML config file (defaults to ./roadnet.toml when present).
    #[arg(long, global = true, env = "ROADNET_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Score node connectivity",
        long_about = "Snap line endpoints into nodes, build the road topology, and score every node by hop-count connectivity.",
        after_help = "EXAMPLES:\n    # Print a summary and keep the scored nodes\n    roadnet score roads.geojson --output nodes.geojson\n\n    # Emit the summary and node FeatureCollection as JSON\n    roadnet score roads.geojson --format json"
    )]
    Score(cmd::score::ScoreArgs),

    #[command(
        about = "Show road graph statistics",
        long_about = "Build the road topology and report its size, components, and content hash without scoring.",
        after_help = "EXAMPLES:\n    # Inspect a layer before scoring\n    roadnet stats roads.geojson"
    )]
    Stats(cmd::stats::StatsArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("ROADNET_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "roadnet=debug,info"
        } else {
            "roadnet=info,warn"
        })
    });

    let format = env::var("ROADNET_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so stdout stays parseable in JSON mode.
    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn load_effective_config(cli: &Cli) -> anyhow::Result<roadnet_core::RoadnetConfig> {
    match &cli.config {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("config file {} does not exist", path.display());
            }
            load_config(path)
        }
        None => load_config(&env::current_dir()?.join(DEFAULT_CONFIG_FILE)),
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let output = resolve_output_mode(cli.format, cli.json);

    let command_result = load_effective_config(&cli).and_then(|config| {
        debug!(?config, "effective config");
        match &cli.command {
            Commands::Score(args) => cmd::score::run_score(args, &config, output),
            Commands::Stats(args) => cmd::stats::run_stats(args, &config, output),
        }
    });

    if let Err(err) = &command_result {
        if let Some(domain) = err.downcast_ref::<RoadnetError>() {
            render_error(output, &CliError::from(domain))?;
        }
    }

    command_result
}
