use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::blacklist::Blacklist;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("feed list not found: {0}")]
    FeedListMissing(PathBuf),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Plain-text feed list, one URL per line
    #[serde(default = "default_feeds_file")]
    pub feeds_file: PathBuf,
    /// Root for index.html and the stories/ directory
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Domains whose stories are excluded from the output
    #[serde(default = "default_blacklist")]
    pub blacklist: Vec<String>,
}

fn default_feeds_file() -> PathBuf {
    PathBuf::from("rss_feeds.txt")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    // Some feed hosts refuse obviously non-browser clients
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.36"
        .to_string()
}

fn default_blacklist() -> Vec<String> {
    vec!["fool.com".to_string(), "lendingtree.com".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feeds_file: default_feeds_file(),
            output_dir: default_output_dir(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            blacklist: default_blacklist(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(&content)
    }

    /// Load the config file if it exists, falling back to built-in defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if path.as_ref().is_file() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config from a TOML string (useful for testing)
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}

/// Read the ordered feed URL list. Blank lines and `#` comments are skipped,
/// as are lines containing a blacklisted domain substring; the finer
/// hostname check runs later against each story link.
pub fn read_feed_urls(path: &Path, blacklist: &Blacklist) -> Result<Vec<String>, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::FeedListMissing(path.to_path_buf()));
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut urls = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if blacklist.matches_url(line) {
            warn!("skipping blacklisted feed URL: {line}");
            continue;
        }
        urls.push(line.to_string());
    }
    Ok(urls)
}
