pub mod config;

pub use config::{
    ConfigError, ConfigResult, DEFAULT_FEED, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_MS, FilterKind,
    GalleryConfig,
};
