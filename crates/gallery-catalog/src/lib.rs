pub mod catalog;
pub mod feed;

pub use catalog::{PictureCatalog, should_load_more};
pub use feed::{CatalogError, CatalogResult, FeedSource, fetch_pictures, parse_feed};
