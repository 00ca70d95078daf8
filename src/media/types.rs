use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadFormat {
    /// Best video and audio streams merged
    Video,
    /// Audio track extracted to mp3
    Audio,
}

impl FromStr for DownloadFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "video" => Ok(Self::Video),
            "audio" => Ok(Self::Audio),
            _ => Err(UnknownFormat(s.trim().to_string())),
        }
    }
}

impl fmt::Display for DownloadFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Video => write!(f, "video"),
            Self::Audio => write!(f, "audio"),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("unknown download format {0:?}, expected video or audio")]
pub struct UnknownFormat(pub String);

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("{0} not found, is it installed and on PATH?")]
    ToolNotFound(String),

    #[error("Failed to run {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with {status}")]
    Failed { tool: String, status: String },

    #[error("Download timed out after {0} seconds")]
    TimedOut(u64),
}
