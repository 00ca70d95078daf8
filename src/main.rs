use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

mod cli;
mod config;
mod media;
mod search;
mod session;
mod utils;

use config::Config;
use media::MediaDownloader;
use search::{VideoSearch, YouTubeSearch};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the config file
    #[arg(short, long)]
    config: Option<String>,

    /// File holding the YouTube Data API key
    #[arg(short, long)]
    token_file: Option<PathBuf>,

    /// Directory downloads are written to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

fn get_config_path(args: &Args) -> Option<String> {
    if let Some(path) = &args.config {
        return Some(path.clone());
    }

    if let Ok(path) = std::env::var("TUBEGRAB_CONFIG") {
        return Some(path);
    }

    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
        let config_path = format!("{}/tubegrab/config.toml", xdg_config_home);
        if std::path::Path::new(&config_path).exists() {
            return Some(config_path);
        }
    }

    if let Some(home) = dirs::home_dir() {
        let config_path = format!("{}/.config/tubegrab/config.toml", home.display());
        if std::path::Path::new(&config_path).exists() {
            return Some(config_path);
        }
    }

    None
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::builder()
        .with_default_directive(
            config
                .logging
                .level
                .parse()
                .unwrap_or_else(|_| LevelFilter::WARN.into()),
        )
        .from_env_lossy();

    // Logs go to stderr so they never interleave with prompts on stdout.
    if config.get_logging_format() == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match get_config_path(&args) {
        Some(config_path) => Config::from_file(&config_path)
            .with_context(|| format!("Failed to load config from {}", config_path))?,
        None => Config::default(),
    };

    init_logging(&config);
    info!("Starting tubegrab...");

    let api_key = config.load_api_key(args.token_file.as_deref())?;
    let settings = config.search_settings(api_key);

    let backend = YouTubeSearch::new(&settings).context("Failed to create search client")?;
    let search = VideoSearch::new(Box::new(backend), &settings);
    search
        .verify_credentials()
        .await
        .context("API key check failed")?;

    let downloader = MediaDownloader::new(&config.download, args.output_dir);
    if let Err(e) = downloader.test_setup().await {
        warn!("Media downloader test failed: {}", e);
    }

    let session = cli::run(&search, &downloader).await?;
    if !session.is_empty() {
        info!("Downloaded {} videos this session", session.len());
    }

    Ok(())
}
