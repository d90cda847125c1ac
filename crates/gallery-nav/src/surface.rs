use std::collections::BTreeSet;

/// Listener tokens the overlay registers on its surface.
///
/// Tokens compare by value, so removing a listener always targets the exact
/// registration made for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Listener {
    CloseClick,
    ImageClick,
    OverlayClick,
    KeyDown,
    HashChange,
}

impl Listener {
    /// Registered by `show()` and removed by `hide()`.
    pub const VISIBLE: &'static [Self] = &[
        Self::CloseClick,
        Self::ImageClick,
        Self::OverlayClick,
        Self::KeyDown,
    ];
}

/// What the overlay needs from the page it is drawn on.
pub trait OverlaySurface {
    fn set_visible(&mut self, visible: bool);
    fn set_image_source(&mut self, url: &str);
    fn set_likes(&mut self, likes: u32);
    fn set_comments(&mut self, comments: u32);
    fn hash(&self) -> &str;
    fn set_hash(&mut self, hash: &str);
    fn add_listener(&mut self, listener: Listener);
    fn remove_listener(&mut self, listener: Listener);
}

/// Headless surface that keeps every output in memory.
///
/// Hash writes behave like a browser location: a change raises a pending
/// hash-change notification that the owner delivers back to the overlay.
/// Several changes before delivery collapse into one carrying the latest hash.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    visible: bool,
    image_source: Option<String>,
    likes: Option<u32>,
    comments: Option<u32>,
    hash: String,
    listeners: BTreeSet<Listener>,
    listener_adds: usize,
    listener_removals: usize,
    hash_changed: bool,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface whose location already carries `hash`, as on a direct link load.
    pub fn with_hash(hash: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            ..Self::default()
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn image_source(&self) -> Option<&str> {
        self.image_source.as_deref()
    }

    pub fn likes(&self) -> Option<u32> {
        self.likes
    }

    pub fn comments(&self) -> Option<u32> {
        self.comments
    }

    pub fn listeners(&self) -> &BTreeSet<Listener> {
        &self.listeners
    }

    pub fn has_listener(&self, listener: Listener) -> bool {
        self.listeners.contains(&listener)
    }

    pub fn listener_adds(&self) -> usize {
        self.listener_adds
    }

    pub fn listener_removals(&self) -> usize {
        self.listener_removals
    }

    /// External navigation such as the back button or an edited address bar.
    pub fn navigate_to(&mut self, hash: &str) {
        self.set_hash(hash);
    }

    pub fn take_hash_change(&mut self) -> Option<String> {
        std::mem::take(&mut self.hash_changed).then(|| self.hash.clone())
    }
}

impl OverlaySurface for MemorySurface {
    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn set_image_source(&mut self, url: &str) {
        self.image_source = Some(url.to_string());
    }

    fn set_likes(&mut self, likes: u32) {
        self.likes = Some(likes);
    }

    fn set_comments(&mut self, comments: u32) {
        self.comments = Some(comments);
    }

    fn hash(&self) -> &str {
        &self.hash
    }

    fn set_hash(&mut self, hash: &str) {
        if self.hash != hash {
            self.hash = hash.to_string();
            self.hash_changed = true;
        }
    }

    fn add_listener(&mut self, listener: Listener) {
        if self.listeners.insert(listener) {
            self.listener_adds += 1;
        }
    }

    fn remove_listener(&mut self, listener: Listener) {
        if self.listeners.remove(&listener) {
            self.listener_removals += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_changes_collapse_to_latest() {
        let mut surface = MemorySurface::new();
        surface.set_hash("#photo/a");
        surface.set_hash("#photo/b");

        assert_eq!(surface.take_hash_change().as_deref(), Some("#photo/b"));
        assert_eq!(surface.take_hash_change(), None);
    }

    #[test]
    fn test_same_hash_is_not_a_change() {
        let mut surface = MemorySurface::with_hash("#photo/a");
        surface.set_hash("#photo/a");
        assert_eq!(surface.take_hash_change(), None);

        surface.navigate_to("");
        assert_eq!(surface.take_hash_change().as_deref(), Some(""));
    }

    #[test]
    fn test_initial_hash_is_not_a_change() {
        let mut surface = MemorySurface::with_hash("#photo/a");
        assert_eq!(surface.hash(), "#photo/a");
        assert_eq!(surface.take_hash_change(), None);
    }

    #[test]
    fn test_listener_bookkeeping() {
        let mut surface = MemorySurface::new();
        surface.add_listener(Listener::KeyDown);
        surface.add_listener(Listener::KeyDown);
        surface.remove_listener(Listener::KeyDown);
        surface.remove_listener(Listener::KeyDown);

        assert!(surface.listeners().is_empty());
        assert_eq!(surface.listener_adds(), 1);
        assert_eq!(surface.listener_removals(), 1);
    }
}
