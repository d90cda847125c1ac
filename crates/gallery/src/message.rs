use gallery_config::FilterKind;
use gallery_nav::OverlayEvent;
use gallery_widgets::ThumbnailUpdate;

#[derive(Debug, Clone)]
pub enum Message {
    Overlay(OverlayEvent),
    /// The location hash was changed from outside, e.g. back/forward navigation.
    Location(String),
    Nav(NavMessage),
    Catalog(CatalogMessage),
    Thumbnail(ThumbnailUpdate),
    Status,
    Quit,
}

#[derive(Debug, Clone)]
pub enum NavMessage {
    /// Click on the grid thumbnail showing this catalog position.
    Open(usize),
    GoTo(i64),
    Identifier(String),
}

#[derive(Debug, Clone)]
pub enum CatalogMessage {
    Filter(FilterKind),
    LoadMore,
    Reload,
}
