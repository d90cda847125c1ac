use gallery_nav::{Listener, MemorySurface, OverlaySurface};
use tracing::{debug, info};

/// Overlay surface for the terminal: keeps state in a [`MemorySurface`] and
/// reports every visible change through the log.
#[derive(Debug, Clone, Default)]
pub struct ConsoleSurface {
    inner: MemorySurface,
}

impl ConsoleSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hash(hash: impl Into<String>) -> Self {
        Self {
            inner: MemorySurface::with_hash(hash),
        }
    }

    pub fn state(&self) -> &MemorySurface {
        &self.inner
    }

    pub fn navigate_to(&mut self, hash: &str) {
        info!("location -> {}", display_hash(hash));
        self.inner.navigate_to(hash);
    }

    pub fn take_hash_change(&mut self) -> Option<String> {
        self.inner.take_hash_change()
    }
}

impl OverlaySurface for ConsoleSurface {
    fn set_visible(&mut self, visible: bool) {
        if visible != self.inner.is_visible() {
            info!("overlay {}", if visible { "shown" } else { "hidden" });
        }
        self.inner.set_visible(visible);
    }

    fn set_image_source(&mut self, url: &str) {
        info!("image: {url}");
        self.inner.set_image_source(url);
    }

    fn set_likes(&mut self, likes: u32) {
        info!("likes: {likes}");
        self.inner.set_likes(likes);
    }

    fn set_comments(&mut self, comments: u32) {
        info!("comments: {comments}");
        self.inner.set_comments(comments);
    }

    fn hash(&self) -> &str {
        self.inner.hash()
    }

    fn set_hash(&mut self, hash: &str) {
        if hash != self.inner.hash() {
            info!("hash: {}", display_hash(hash));
        }
        self.inner.set_hash(hash);
    }

    fn add_listener(&mut self, listener: Listener) {
        debug!("listening for {listener:?}");
        self.inner.add_listener(listener);
    }

    fn remove_listener(&mut self, listener: Listener) {
        debug!("stopped listening for {listener:?}");
        self.inner.remove_listener(listener);
    }
}

fn display_hash(hash: &str) -> &str {
    if hash.is_empty() { "(empty)" } else { hash }
}
