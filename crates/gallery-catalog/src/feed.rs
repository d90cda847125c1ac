use shared::PictureRecord;
use std::{fmt, path::PathBuf, time::Duration};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Feed request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Feed server answered with HTTP status {0}")]
    Status(u16),

    #[error("Malformed picture feed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Feed request timed out after {0:?}")]
    Timeout(Duration),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Where the picture list comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    File(PathBuf),
    Http(String),
}

impl FeedSource {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            FeedSource::Http(raw.to_string())
        } else {
            FeedSource::File(PathBuf::from(raw))
        }
    }
}

impl fmt::Display for FeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedSource::File(path) => write!(f, "{}", path.display()),
            FeedSource::Http(url) => write!(f, "{url}"),
        }
    }
}

pub fn parse_feed(raw: &str) -> CatalogResult<Vec<PictureRecord>> {
    Ok(serde_json::from_str(raw)?)
}

/// Reads and decodes the feed, giving up once `timeout` has elapsed.
pub async fn fetch_pictures(
    source: &FeedSource,
    timeout: Duration,
) -> CatalogResult<Vec<PictureRecord>> {
    debug!("Fetching picture feed from {source}");

    let pictures = tokio::time::timeout(timeout, read_feed(source))
        .await
        .map_err(|_| CatalogError::Timeout(timeout))??;

    info!("Fetched {} pictures from {source}", pictures.len());
    Ok(pictures)
}

async fn read_feed(source: &FeedSource) -> CatalogResult<Vec<PictureRecord>> {
    let body = match source {
        FeedSource::File(path) => tokio::fs::read_to_string(path).await?,
        FeedSource::Http(url) => fetch_http(url).await?,
    };

    parse_feed(&body)
}

async fn fetch_http(url: &str) -> CatalogResult<String> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::limited(10))
        .user_agent(concat!("photo-gallery/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(CatalogError::Status(response.status().as_u16()));
    }

    Ok(response.text().await?)
}
