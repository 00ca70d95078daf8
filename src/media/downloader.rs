use super::types::{DownloadError, DownloadFormat};
use async_trait::async_trait;

#[async_trait]
pub trait Downloader: Send + Sync {
    /// Human-readable name of the downloader
    fn name(&self) -> &'static str;

    /// Download media from the given URL into the output directory
    async fn download(&self, url: &str, format: DownloadFormat) -> Result<(), DownloadError>;

    /// Test if this downloader is available on the system
    async fn test_availability(&self) -> bool;
}
