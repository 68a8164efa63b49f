use std::io::Read;
use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::Parser;
use stylomark_lib::api::{self, AppState};
use stylomark_lib::models::DetectRequest;
use stylomark_lib::services::config_store::{ConfigStore, ModelBackend};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "stylomark",
    about = "Score Portuguese prose for machine-generated style and annotate the phrases behind the score",
    version
)]
struct Cli {
    /// File paths to analyze (reads stdin if none provided)
    files: Vec<PathBuf>,

    /// Config file (default: <config dir>/stylomark/config.json)
    #[arg(long, env = "STYLOMARK_CONFIG")]
    config: Option<PathBuf>,

    /// Persisted model file, overriding the config
    #[arg(long)]
    model: Option<PathBuf>,

    /// Classifier backend: logistic or gbdt
    #[arg(long, value_parser = parse_backend)]
    backend: Option<ModelBackend>,

    /// Ignore any persisted model and train from the seed corpus
    #[arg(long)]
    retrain: bool,

    /// Overlapping spans get a single markup tag
    #[arg(long)]
    resolve_overlaps: bool,

    /// Single-line JSON output
    #[arg(long)]
    compact: bool,

    /// Write the effective configuration to the config file and exit
    #[arg(long)]
    write_config: bool,
}

fn parse_backend(value: &str) -> Result<ModelBackend, String> {
    ModelBackend::from_str(value).ok_or_else(|| format!("unknown backend `{}` (expected logistic or gbdt)", value))
}

fn config_store(cli: &Cli) -> anyhow::Result<ConfigStore> {
    match &cli.config {
        Some(path) => Ok(ConfigStore::from_file(path.clone())),
        None => ConfigStore::default_config_dir()
            .map(ConfigStore::new)
            .ok_or_else(|| anyhow!("no config directory available; pass --config")),
    }
}

fn print_json<T: serde::Serialize>(value: &T, compact: bool) -> anyhow::Result<()> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{}", json);
    Ok(())
}

/// Returns false when the input was rejected.
fn analyze(state: &AppState, label: &str, text: String, compact: bool) -> anyhow::Result<bool> {
    match api::detect_text(state, DetectRequest { text }) {
        Ok(response) => {
            print_json(&response, compact)?;
            Ok(true)
        }
        Err(message) => {
            eprintln!("{}: {}", label, message);
            Ok(false)
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    stylomark_lib::init_logging();

    let store = config_store(&cli)?;
    let mut config = store
        .load()
        .map_err(|e| anyhow!(e))
        .with_context(|| format!("loading {}", store.config_file().display()))?;

    if let Some(path) = &cli.model {
        config.model.path = Some(path.clone());
    }
    if let Some(backend) = cli.backend {
        config.model.backend = backend;
    }
    if cli.retrain {
        config.model.retrain = true;
    }
    if cli.resolve_overlaps {
        config.annotation.resolve_overlaps = true;
    }

    if cli.write_config {
        if config.version.is_empty() {
            config.version = env!("CARGO_PKG_VERSION").to_string();
        }
        store.save(&config).map_err(|e| anyhow!(e))?;
        println!("Wrote config: {}", store.config_file().display());
        return Ok(());
    }

    let state = api::bootstrap(config).map_err(|e| anyhow!(e))?;
    let health = api::health(&state);
    info!(model = %health.model, backend = %health.backend, "stylomark.ready");

    let mut rejected = 0usize;
    if cli.files.is_empty() {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("reading stdin")?;
        if !analyze(&state, "<stdin>", input, cli.compact)? {
            rejected += 1;
        }
    } else {
        for path in &cli.files {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            if !analyze(&state, &path.display().to_string(), text, cli.compact)? {
                rejected += 1;
            }
        }
    }

    if rejected > 0 {
        std::process::exit(2);
    }
    Ok(())
}
