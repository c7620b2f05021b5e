#![forbid(unsafe_code)]

mod config;
mod constants;
mod gui;
mod palette;
mod persistence;
mod timer;
mod types;
mod widget;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{Level as TraceLevel, info};
use tracing_subscriber::FmtSubscriber;

use config::Config;
use persistence::{FileStore, WidgetStore};

#[derive(Parser, Debug)]
#[command(name = "miso-bot", version, about = "Desktop mascot widget")]
struct Cli {
    /// Config file (defaults to the user config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Store file holding the persisted widget state
    #[arg(long)]
    store: Option<PathBuf>,

    /// trace, debug, info, warn or error
    #[arg(long)]
    log_level: Option<String>,

    /// Discard the saved widget state before starting
    #[arg(long)]
    reset: bool,
}

fn parse_level(value: &str) -> TraceLevel {
    match value.to_lowercase().as_str() {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config comes first so its log_level can act as the last fallback
    let config_path = cli.config.clone().unwrap_or_else(Config::path);
    let config_result = Config::load_from(&config_path);

    let level = cli
        .log_level
        .clone()
        .or_else(|| std::env::var("LOG_LEVEL").ok())
        .or_else(|| config_result.as_ref().ok().map(|config| config.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());

    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_level(&level))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = config_result?;
    info!(path = %config_path.display(), "Using config");

    let store_path = cli.store.unwrap_or_else(FileStore::default_path);
    let file_store = FileStore::open(store_path);
    info!(path = %file_store.path().display(), "Using store");
    let mut store = WidgetStore::new(file_store);
    if cli.reset {
        store.clear()?;
        info!("Saved widget state cleared");
    }

    gui::run_gui(config, store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level_falls_back_to_info() {
        assert_eq!(parse_level("DEBUG"), TraceLevel::DEBUG);
        assert_eq!(parse_level("warn"), TraceLevel::WARN);
        assert_eq!(parse_level("verbose"), TraceLevel::INFO);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from(["miso-bot", "--reset", "--log-level", "debug", "--store", "/tmp/s.json"]);
        assert!(cli.reset);
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert_eq!(cli.store, Some(PathBuf::from("/tmp/s.json")));
        assert!(cli.config.is_none());
    }
}
