mod downloader;
mod types;
mod ytdlp;

pub use downloader::Downloader;
pub use types::{DownloadError, DownloadFormat};
pub use ytdlp::YtDlpDownloader;

use crate::config::DownloadConfig;
use anyhow::Result;
use std::{path::PathBuf, time::Duration};
use tracing::{info, warn};

pub struct MediaDownloader {
    downloader: Box<dyn Downloader>,
}

impl MediaDownloader {
    pub fn new(config: &DownloadConfig, output_dir_override: Option<PathBuf>) -> Self {
        let output_dir = output_dir_override.or_else(|| config.output_dir.clone());
        info!(
            "Media downloader initialized - yt-dlp at {}, output to {}",
            config.ytdlp_path,
            output_dir
                .as_ref()
                .map(|dir| dir.display().to_string())
                .unwrap_or_else(|| "the working directory".to_string())
        );

        let downloader = YtDlpDownloader::new(config.ytdlp_path.clone())
            .with_output_dir(output_dir)
            .with_timeout(config.timeout_secs.map(Duration::from_secs));

        Self::with_backend(Box::new(downloader))
    }

    pub fn with_backend(downloader: Box<dyn Downloader>) -> Self {
        Self { downloader }
    }

    pub async fn download(&self, url: &str, format: DownloadFormat) -> Result<(), DownloadError> {
        info!("Starting {} download for URL: {}", format, url);

        match self.downloader.download(url, format).await {
            Ok(()) => {
                info!("Successfully downloaded with {}", self.downloader.name());
                Ok(())
            }
            Err(e) => {
                warn!("{} failed: {}", self.downloader.name(), e);
                Err(e)
            }
        }
    }

    pub async fn test_setup(&self) -> Result<()> {
        info!("Testing media downloader setup...");

        if self.downloader.test_availability().await {
            info!("✅ {} is available", self.downloader.name());
            Ok(())
        } else {
            Err(anyhow::anyhow!(
                "{} is not available. Please install yt-dlp.",
                self.downloader.name()
            ))
        }
    }
}
