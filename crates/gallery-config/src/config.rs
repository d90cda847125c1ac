use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::Path, str::FromStr, time::Duration};
use thiserror::Error;

pub const DEFAULT_FEED: &str = "data/pictures.json";
pub const DEFAULT_PAGE_SIZE: usize = 12;
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Unknown filter: {0}")]
    UnknownFilter(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    /// Feed order.
    #[default]
    #[serde(alias = "filter-popular")]
    Popular,
    /// Published in the last three months, newest first.
    #[serde(alias = "filter-new")]
    New,
    /// Most commented first.
    #[serde(alias = "filter-discussed")]
    Discussed,
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterKind::Popular => write!(f, "Popular"),
            FilterKind::New => write!(f, "New"),
            FilterKind::Discussed => write!(f, "Discussed"),
        }
    }
}

impl FromStr for FilterKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        match name.strip_prefix("filter-").unwrap_or(&name) {
            "popular" => Ok(FilterKind::Popular),
            "new" => Ok(FilterKind::New),
            "discussed" => Ok(FilterKind::Discussed),
            _ => Err(ConfigError::UnknownFilter(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Path or `http(s)://` url of the picture feed.
    pub feed: String,
    /// Directory picture urls are resolved against when loading thumbnails.
    pub image_base_dir: Option<String>,
    pub page_size: usize,
    pub image_timeout_ms: u64,
    pub fetch_timeout_ms: u64,
    pub default_filter: FilterKind,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            feed: DEFAULT_FEED.to_string(),
            image_base_dir: None,
            page_size: DEFAULT_PAGE_SIZE,
            image_timeout_ms: DEFAULT_TIMEOUT_MS,
            fetch_timeout_ms: DEFAULT_TIMEOUT_MS,
            default_filter: FilterKind::default(),
        }
    }
}

impl GalleryConfig {
    pub fn from_toml_str(raw: &str) -> ConfigResult<Self> {
        let config: GalleryConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> ConfigResult<Self> {
        let raw = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&raw)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Falls back to defaults when no path is given.
    pub fn load_or_default(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be at least 1".to_string()));
        }

        if self.image_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "image_timeout_ms must be greater than 0".to_string(),
            ));
        }

        if self.fetch_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "fetch_timeout_ms must be greater than 0".to_string(),
            ));
        }

        if self.feed.trim().is_empty() {
            return Err(ConfigError::Invalid("feed cannot be empty".to_string()));
        }

        Ok(())
    }

    pub fn image_timeout(&self) -> Duration {
        Duration::from_millis(self.image_timeout_ms)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}
