use crate::{
    commands::{HELP, parse_command},
    message::{CatalogMessage, Message, NavMessage},
    surface::ConsoleSurface,
};
use gallery_catalog::{FeedSource, PictureCatalog};
use gallery_config::{ConfigError, GalleryConfig};
use gallery_nav::{GalleryOverlay, OverlayEvent};
use gallery_widgets::{FileImageLoader, ThumbnailHandle, ThumbnailRenderer, ThumbnailState};
use shared::PictureSequence;
use std::path::PathBuf;
use thiserror::Error;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    sync::watch,
};
use tracing::{debug, error, info, warn};

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The whole widget: catalog, thumbnail grid and overlay, wired together.
pub struct Gallery {
    config: GalleryConfig,
    source: FeedSource,
    catalog: PictureCatalog,
    changes: watch::Receiver<PictureSequence>,
    renderer: ThumbnailRenderer<FileImageLoader>,
    tiles: Vec<ThumbnailHandle>,
    overlay: GalleryOverlay<ConsoleSurface>,
}

impl Gallery {
    pub fn new(config: GalleryConfig, surface: ConsoleSurface) -> Self {
        let source = FeedSource::parse(&config.feed);
        let catalog = PictureCatalog::new(config.page_size, config.default_filter);
        let changes = catalog.subscribe();

        let base_dir = config
            .image_base_dir
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        let mut renderer =
            ThumbnailRenderer::with_timeout(FileImageLoader::new(base_dir), config.image_timeout());
        renderer.set_on_click(|click| debug!("thumbnail {} clicked", click.identifier));

        let mut overlay = GalleryOverlay::new(surface);
        overlay.initialize();

        Self {
            config,
            source,
            catalog,
            changes,
            renderer,
            tiles: Vec::new(),
            overlay,
        }
    }

    pub fn catalog(&self) -> &PictureCatalog {
        &self.catalog
    }

    pub fn overlay(&self) -> &GalleryOverlay<ConsoleSurface> {
        &self.overlay
    }

    pub fn renderer(&self) -> &ThumbnailRenderer<FileImageLoader> {
        &self.renderer
    }

    pub fn tiles(&self) -> &[ThumbnailHandle] {
        &self.tiles
    }

    /// Fetches the feed and renders the first page of thumbnails.
    ///
    /// A failed fetch leaves the catalog in its error state; the gallery keeps
    /// running so the user can `reload`.
    pub async fn load(&mut self) {
        info!("Loading pictures from {}", self.source);
        if self
            .catalog
            .load(&self.source, self.config.fetch_timeout())
            .await
            .is_err()
        {
            warn!("Gallery unavailable: {}", self.catalog.state());
        }

        self.after_update();
    }

    /// Applies one message. Returns `false` once the gallery should stop.
    pub async fn update(&mut self, message: Message) -> bool {
        match message {
            Message::Overlay(event) => {
                self.overlay.handle_event(event);
            }
            Message::Location(hash) => {
                self.overlay.surface_mut().navigate_to(&hash);
            }
            Message::Nav(nav_msg) => match nav_msg {
                NavMessage::Open(index) => self.open_thumbnail(index),
                NavMessage::GoTo(index) => {
                    if self.overlay.go_to_index(index).is_some() {
                        self.overlay.show();
                    }
                }
                NavMessage::Identifier(identifier) => {
                    if self.overlay.go_to_identifier(&identifier).is_some() {
                        self.overlay.show();
                    }
                }
            },
            Message::Catalog(catalog_msg) => match catalog_msg {
                CatalogMessage::Filter(filter) => {
                    if self.catalog.set_active_filter(filter, false) {
                        info!("Filter: {filter}");
                    }
                }
                CatalogMessage::LoadMore => self.render_next_page(),
                CatalogMessage::Reload => {
                    if self.catalog.request_retry() {
                        self.load().await;
                    } else {
                        info!("Nothing to reload: {}", self.catalog.state());
                    }
                }
            },
            Message::Thumbnail(update) => match update.state {
                ThumbnailState::Loaded(image) => {
                    debug!("thumbnail {} loaded ({}x{})", update.index, image.width, image.height)
                }
                ThumbnailState::Failed(err) => warn!("thumbnail {} failed: {err}", update.index),
                ThumbnailState::Loading => {}
            },
            Message::Status => self.report_status(),
            Message::Quit => return false,
        }

        self.after_update();
        true
    }

    /// Reads commands from `input` until it ends or `quit` is entered,
    /// applying thumbnail loads as they finish.
    pub async fn run<R>(&mut self, input: R) -> Result<(), AppError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        info!("{HELP}");

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        break;
                    };

                    match parse_command(&line) {
                        Ok(Some(message)) => {
                            if !self.update(message).await {
                                break;
                            }
                        }
                        Ok(None) => {}
                        Err(err) => warn!("{err}"),
                    }
                }
                Some(update) = self.renderer.next_outcome() => {
                    self.update(Message::Thumbnail(update)).await;
                }
            }
        }

        Ok(())
    }

    pub fn shutdown(&mut self) {
        self.overlay.teardown();
        self.renderer.clear();
        self.tiles.clear();
    }

    fn open_thumbnail(&mut self, index: usize) {
        let Some(click) = self
            .renderer
            .handle_for_index(index)
            .and_then(|handle| self.renderer.click(handle))
        else {
            warn!("No thumbnail rendered at position {index}");
            return;
        };

        if self.overlay.go_to_index(click.index as i64).is_some() {
            self.overlay.show();
        }
    }

    fn render_next_page(&mut self) {
        let Some(range) = self.catalog.next_page() else {
            debug!("All pages rendered");
            return;
        };

        let pictures = self.catalog.filtered();
        for index in range.clone() {
            let handle = self.renderer.render(index, &pictures[index]);
            self.tiles.push(handle);
        }

        info!(
            "Rendered pictures {}..{} of {}",
            range.start,
            range.end,
            pictures.len()
        );
    }

    /// Propagates catalog changes to the grid and the overlay, then delivers
    /// any hash change the update produced.
    fn after_update(&mut self) {
        if self.changes.has_changed().unwrap_or(false) {
            let pictures = self.changes.borrow_and_update().clone();

            self.renderer.clear();
            self.tiles.clear();
            self.render_next_page();

            self.overlay.set_pictures(pictures);
        }

        while let Some(hash) = self.overlay.surface_mut().take_hash_change() {
            self.overlay.handle_event(OverlayEvent::HashChanged(hash));
        }
    }

    fn report_status(&self) {
        let state = self.catalog.state();
        if let Some(message) = state.error_message() {
            error!("Feed unavailable: {message}");
        }

        info!(
            "feed: {state}, filter: {}, pictures: {}, pages: {}/{}, thumbnails loading: {}",
            self.catalog.active_filter(),
            self.catalog.len(),
            self.catalog.rendered_pages(),
            self.catalog.page_count(),
            self.renderer.pending()
        );

        match self.overlay.current() {
            Some(record) if self.overlay.is_visible() => info!(
                "overlay: {} ({} likes, {} comments)",
                record.url, record.likes, record.comments
            ),
            _ => info!("overlay: hidden"),
        }
    }
}
