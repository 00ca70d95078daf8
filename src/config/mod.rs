use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Upper bound on search results requested per query.
pub const MAX_SEARCH_RESULTS: u32 = 20;

const DEFAULT_TOKEN_FILE: &str = "token.txt";
const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub search: SearchConfig,
    pub download: DownloadConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// "text" or "json"
    pub format: String,
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
            level: "warn".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub api_key: Option<SecretString>,
    pub token_file: Option<PathBuf>,
    pub max_results: u32,
    pub default_max_duration_minutes: Option<f64>,
    pub api_base_url: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            token_file: None,
            max_results: MAX_SEARCH_RESULTS,
            default_max_duration_minutes: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    pub ytdlp_path: String,
    pub output_dir: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            ytdlp_path: "yt-dlp".to_string(),
            output_dir: None,
            timeout_secs: None,
        }
    }
}

/// Settings handed to the search client, built once at startup.
#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub api_key: SecretString,
    pub api_base_url: String,
    pub max_results: u32,
    pub default_max_duration_minutes: Option<f64>,
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    pub fn get_logging_format(&self) -> &str {
        &self.logging.format
    }

    /// Resolves the API key: inline config value first, then the token file.
    pub fn load_api_key(&self, token_file_override: Option<&Path>) -> Result<SecretString> {
        if let Some(key) = &self.search.api_key {
            if !key.expose_secret().trim().is_empty() {
                return Ok(key.clone());
            }
        }

        let token_file = token_file_override
            .map(Path::to_path_buf)
            .or_else(|| self.search.token_file.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TOKEN_FILE));

        let token = std::fs::read_to_string(&token_file).with_context(|| {
            format!(
                "API key file {} not found. An API key is required",
                token_file.display()
            )
        })?;
        let token = token.trim();
        if token.is_empty() {
            anyhow::bail!("API key file {} is empty", token_file.display());
        }

        Ok(SecretString::from(token.to_string()))
    }

    pub fn search_settings(&self, api_key: SecretString) -> SearchSettings {
        SearchSettings {
            api_key,
            api_base_url: self.search.api_base_url.trim_end_matches('/').to_string(),
            max_results: self.search.max_results.clamp(1, MAX_SEARCH_RESULTS),
            default_max_duration_minutes: self.search.default_max_duration_minutes,
        }
    }
}
