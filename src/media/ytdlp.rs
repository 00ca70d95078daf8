use super::{
    downloader::Downloader,
    types::{DownloadError, DownloadFormat},
};
use async_trait::async_trait;
use std::{io::ErrorKind, path::PathBuf, time::Duration};
use tokio::process::Command;
use tracing::{debug, info, warn};

pub struct YtDlpDownloader {
    binary: String,
    output_dir: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl YtDlpDownloader {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            output_dir: None,
            timeout: None,
        }
    }

    pub fn with_output_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.output_dir = dir;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn build_args(url: &str, format: DownloadFormat) -> Vec<String> {
        let mut args: Vec<String> = match format {
            DownloadFormat::Video => vec!["-f".into(), "bestvideo+bestaudio/best".into()],
            DownloadFormat::Audio => {
                vec!["-x".into(), "--audio-format".into(), "mp3".into()]
            }
        };
        args.push(url.to_string());
        args
    }

    fn command(&self, url: &str, format: DownloadFormat) -> Command {
        let mut command = Command::new(&self.binary);
        command.args(Self::build_args(url, format)).kill_on_drop(true);
        if let Some(dir) = &self.output_dir {
            command.current_dir(dir);
        }
        command
    }

    async fn probe(program: &str, version_flag: &str) -> Option<String> {
        match Command::new(program).arg(version_flag).output().await {
            Ok(output) if output.status.success() => Some(
                String::from_utf8_lossy(&output.stdout)
                    .lines()
                    .next()
                    .unwrap_or("unknown")
                    .trim()
                    .to_string(),
            ),
            Ok(_) => {
                warn!("❌ {} command failed", program);
                None
            }
            Err(e) => {
                warn!("❌ {} not found: {}", program, e);
                None
            }
        }
    }
}

#[async_trait]
impl Downloader for YtDlpDownloader {
    fn name(&self) -> &'static str {
        "yt-dlp"
    }

    async fn download(&self, url: &str, format: DownloadFormat) -> Result<(), DownloadError> {
        info!("Downloading {} as {} with {}", url, format, self.binary);
        debug!("yt-dlp args: {:?}", Self::build_args(url, format));

        let status = {
            let mut command = self.command(url, format);
            let running = command.status();
            match self.timeout {
                Some(limit) => tokio::time::timeout(limit, running)
                    .await
                    .map_err(|_| DownloadError::TimedOut(limit.as_secs()))?,
                None => running.await,
            }
        };

        let status = status.map_err(|source| match source.kind() {
            ErrorKind::NotFound => DownloadError::ToolNotFound(self.binary.clone()),
            _ => DownloadError::Spawn {
                tool: self.binary.clone(),
                source,
            },
        })?;

        if !status.success() {
            return Err(DownloadError::Failed {
                tool: self.binary.clone(),
                status: status.to_string(),
            });
        }

        info!("Finished downloading {}", url);
        Ok(())
    }

    async fn test_availability(&self) -> bool {
        let yt_dlp_available = match Self::probe(&self.binary, "--version").await {
            Some(version) => {
                info!("✅ yt-dlp is available, version: {}", version);
                true
            }
            None => false,
        };

        // ffmpeg is required for merging streams and extracting audio
        let ffmpeg_available = match Self::probe("ffmpeg", "-version").await {
            Some(version_line) => {
                info!("✅ ffmpeg is available: {}", version_line);
                true
            }
            None => false,
        };

        if yt_dlp_available && !ffmpeg_available {
            warn!("⚠️  yt-dlp will work but merged video and audio extraction need ffmpeg");
        }

        yt_dlp_available
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_args() {
        assert_eq!(
            YtDlpDownloader::build_args("https://youtu.be/x", DownloadFormat::Video),
            vec!["-f", "bestvideo+bestaudio/best", "https://youtu.be/x"]
        );
    }

    #[test]
    fn test_audio_args() {
        assert_eq!(
            YtDlpDownloader::build_args("https://youtu.be/x", DownloadFormat::Audio),
            vec!["-x", "--audio-format", "mp3", "https://youtu.be/x"]
        );
    }

    #[tokio::test]
    async fn test_missing_binary_is_tool_not_found() {
        let downloader = YtDlpDownloader::new("tubegrab-no-such-binary");
        let err = downloader
            .download("https://youtu.be/x", DownloadFormat::Video)
            .await
            .unwrap_err();
        assert!(matches!(err, DownloadError::ToolNotFound(_)));
        assert!(!downloader.test_availability().await);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_is_failure() {
        let downloader = YtDlpDownloader::new("false");
        let err = downloader
            .download("https://youtu.be/x", DownloadFormat::Audio)
            .await
            .unwrap_err();
        assert!(matches!(err, DownloadError::Failed { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_zero_exit_is_success_in_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let downloader = YtDlpDownloader::new("true").with_output_dir(Some(dir.path().into()));
        assert!(downloader
            .download("https://youtu.be/x", DownloadFormat::Video)
            .await
            .is_ok());
    }
}
