//! Glint CLI
//!
//! Replay scenes and interaction scripts against the Glint engine headlessly.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod scene;
mod script;
mod simulate;

use glint_effects::EngineConfig;
use scene::Scene;
use script::Script;

#[derive(Parser)]
#[command(name = "glint")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Glint animation engine CLI", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the engine over a scene and print the resulting element state
    Simulate {
        /// Scene file (TOML)
        scene: PathBuf,

        /// Interaction script (TOML)
        #[arg(short, long)]
        script: Option<PathBuf>,

        /// Engine configuration (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Simulated milliseconds per frame
        #[arg(long, default_value = "16")]
        frame_ms: f64,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective engine configuration as TOML
    Config {
        /// Configuration file to validate and print instead of the defaults
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Simulate {
            scene,
            script,
            config,
            frame_ms,
            json,
        } => cmd_simulate(&scene, script.as_deref(), config.as_deref(), frame_ms, json),

        Commands::Config { config } => cmd_config(config.as_deref()),
    }
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

fn cmd_simulate(
    scene: &Path,
    script: Option<&Path>,
    config: Option<&Path>,
    frame_ms: f64,
    json: bool,
) -> Result<()> {
    let config = load_config(config)?;
    let scene = Scene::load(scene)?;
    let script = match script {
        Some(path) => Script::load(path)?,
        None => Script::default(),
    };

    let report = simulate::run(&scene, &script, config, frame_ms)?;
    info!("simulation finished after {} frame(s)", report.frames);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report);
    }
    Ok(())
}

fn cmd_config(path: Option<&Path>) -> Result<()> {
    let config = load_config(path)?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}
