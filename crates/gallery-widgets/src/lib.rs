pub mod loader;
pub mod thumbnail;

pub use loader::{FileImageLoader, ImageLoadError, ImageLoadResult, ImageLoader, LoadedImage};
pub use thumbnail::{
    IMAGE_TIMEOUT, ThumbnailClick, ThumbnailHandle, ThumbnailRenderer, ThumbnailState,
    ThumbnailUpdate,
};
