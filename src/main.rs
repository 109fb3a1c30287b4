//! WBE Dashboard server
//!
//! Run with: cargo run -- serve --data samples.csv
//!
//! # Configuration
//!
//! Settings are layered: defaults, then a TOML file (`--config`, or the first of
//! `~/.config/wbe-dashboard/config.toml` and `./wbe-dashboard.toml`), then
//! environment variables, then command-line flags.
//!
//! Environment variables:
//! - `WBE_DATA_PATH`: Sample CSV path
//! - `WBE_HOST`: Host to bind to (default: 127.0.0.1)
//! - `WBE_PORT`: Port to listen on (default: 8051)
//! - `WBE_LOG_LEVEL`: Log level (default: info)
//! - `WBE_LOG_FORMAT`: pretty or json
//! - `RUST_LOG`: Full filter directive, overrides `WBE_LOG_LEVEL`

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use wbe_dashboard::api::{serve, AppState};
use wbe_dashboard::config::{generate_default_config, Config, ConfigError, LoggingConfig};
use wbe_dashboard::data::load_csv;

#[derive(Parser)]
#[command(name = "wbe-dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Wastewater surveillance dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load the dataset and serve the dashboard (default)
    Serve(ServeArgs),

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Default)]
pub struct ServeArgs {
    /// Sample CSV path
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default()?,
    };

    match cli.command.unwrap_or_else(|| Commands::Serve(ServeArgs::default())) {
        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Config written to {}", path.display());
                }
                None => print!("{}", content),
            }
            Ok(())
        }
        Commands::Serve(args) => {
            if let Some(data) = args.data {
                config.data.path = Some(data);
            }
            if let Some(host) = args.host {
                config.server.host = host;
            }
            if let Some(port) = args.port {
                config.server.port = port;
            }

            init_logging(&config.logging);
            run(config).await
        }
    }
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "wbe_dashboard={},tower_http=debug",
            logging.level
        ))
    });

    if logging.is_json() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn run(config: Config) -> anyhow::Result<()> {
    tracing::info!("Starting WBE dashboard v{}", env!("CARGO_PKG_VERSION"));

    let data_path = config.data.path.clone().ok_or(ConfigError::MissingDataPath)?;
    tracing::info!("Data file: {:?}", data_path);

    let dataset = load_csv(&data_path)
        .with_context(|| format!("loading dataset from {}", data_path.display()))?;

    let bounds = dataset.date_bounds();
    tracing::info!(
        samples = dataset.len(),
        locations = dataset.locations().len(),
        first = %bounds.min,
        last = %bounds.max,
        "Dataset ready"
    );

    let api_config = config.server.api_config();
    let state = AppState::new(dataset, config.dashboard.title.clone(), api_config.clone());

    serve(state, &api_config).await?;

    tracing::info!("WBE dashboard stopped");
    Ok(())
}
