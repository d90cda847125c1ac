use std::{future::Future, io, path::PathBuf, time::Duration};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageLoadError {
    #[error("Image not found: {0}")]
    NotFound(String),

    #[error("Failed to load {url}: {reason}")]
    Decode { url: String, reason: String },

    #[error("Image load timed out after {0:?}")]
    Timeout(Duration),

    #[error("Image loader panicked while loading {0}")]
    Panicked(String),
}

pub type ImageLoadResult<T> = Result<T, ImageLoadError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
}

/// Fetches the picture behind a feed url.
pub trait ImageLoader: Send + Sync + 'static {
    fn load(&self, url: String) -> impl Future<Output = ImageLoadResult<LoadedImage>> + Send;
}

/// Resolves feed urls against a local directory and probes the image header.
#[derive(Debug, Clone)]
pub struct FileImageLoader {
    base_dir: PathBuf,
}

impl FileImageLoader {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn resolve(&self, url: &str) -> PathBuf {
        self.base_dir.join(url.trim_start_matches('/'))
    }
}

impl ImageLoader for FileImageLoader {
    fn load(&self, url: String) -> impl Future<Output = ImageLoadResult<LoadedImage>> + Send {
        let path = self.resolve(&url);

        async move {
            debug!("Loading {}", path.display());

            let dimensions = tokio::task::spawn_blocking(move || image::image_dimensions(&path))
                .await
                .map_err(|e| ImageLoadError::Decode {
                    url: url.clone(),
                    reason: e.to_string(),
                })?;

            match dimensions {
                Ok((width, height)) => Ok(LoadedImage { width, height }),
                Err(image::ImageError::IoError(e)) if e.kind() == io::ErrorKind::NotFound => {
                    Err(ImageLoadError::NotFound(url))
                }
                Err(e) => Err(ImageLoadError::Decode {
                    url,
                    reason: e.to_string(),
                }),
            }
        }
    }
}
