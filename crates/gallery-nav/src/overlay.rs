use crate::{
    hash::{parse_photo_hash, photo_hash},
    nav::NavState,
    surface::{Listener, OverlaySurface},
};
use shared::{PictureRecord, PictureSequence};
use std::collections::BTreeSet;
use tracing::{debug, trace, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other(String),
}

impl Key {
    /// Maps DOM `KeyboardEvent.key` names, including the legacy short forms.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Escape" | "Esc" => Key::Escape,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            other => Key::Other(other.to_string()),
        }
    }

    pub fn from_code(code: u32) -> Self {
        match code {
            27 => Key::Escape,
            37 => Key::ArrowLeft,
            39 => Key::ArrowRight,
            other => Key::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayEvent {
    CloseClicked,
    ImageClicked,
    /// A click anywhere on the overlay that did not land on the image.
    BackgroundClicked,
    KeyDown(Key),
    HashChanged(String),
}

impl OverlayEvent {
    pub fn listener(&self) -> Listener {
        match self {
            OverlayEvent::CloseClicked => Listener::CloseClick,
            OverlayEvent::ImageClicked => Listener::ImageClick,
            OverlayEvent::BackgroundClicked => Listener::OverlayClick,
            OverlayEvent::KeyDown(_) => Listener::KeyDown,
            OverlayEvent::HashChanged(_) => Listener::HashChange,
        }
    }
}

/// The lightbox showing one enlarged photo.
///
/// Owns the current index over a shared picture sequence, the visibility
/// flag, and the listeners registered on its surface. Listener registration
/// follows visibility one to one: `show()` binds [`Listener::VISIBLE`] and
/// `hide()` unbinds exactly that set. The hash-change listener lives from
/// `initialize()` to `teardown()`.
#[derive(Debug)]
pub struct GalleryOverlay<S: OverlaySurface> {
    surface: S,
    nav: NavState,
    visible: bool,
    bound: BTreeSet<Listener>,
}

impl<S: OverlaySurface> GalleryOverlay<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            nav: NavState::new(),
            visible: false,
            bound: BTreeSet::new(),
        }
    }

    /// Starts listening for hash changes and honours a hash already present.
    pub fn initialize(&mut self) {
        self.bind(Listener::HashChange);
        let hash = self.surface.hash().to_string();
        self.apply_hash(&hash);
    }

    pub fn teardown(&mut self) {
        self.hide();
        self.unbind(Listener::HashChange);
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn index(&self) -> Option<usize> {
        self.nav.index()
    }

    pub fn current(&self) -> Option<&PictureRecord> {
        self.nav.current()
    }

    pub fn pictures(&self) -> PictureSequence {
        self.nav.pictures()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn is_bound(&self, listener: Listener) -> bool {
        self.bound.contains(&listener)
    }

    pub fn bound_listeners(&self) -> impl Iterator<Item = Listener> + '_ {
        self.bound.iter().copied()
    }

    /// Replaces the backing sequence.
    ///
    /// A photo hash already in the location is resolved against the new
    /// sequence and shown, which is how deep links survive the feed arriving
    /// after the page.
    pub fn set_pictures(&mut self, pictures: PictureSequence) {
        debug!("Overlay received {} pictures", pictures.len());
        self.nav.set_pictures(pictures);

        let hash = self.surface.hash().to_string();
        if let Some(identifier) = parse_photo_hash(&hash)
            && self.go_to_identifier(&identifier).is_some()
        {
            self.show();
            return;
        }

        if self.visible {
            if self.nav.is_empty() {
                self.hide();
            } else {
                self.render();
                self.sync_hash();
            }
        }
    }

    /// Jumps to `index`, wrapping out-of-range values around the sequence.
    pub fn go_to_index(&mut self, index: i64) -> Option<usize> {
        if self.nav.go_to(index).is_none() {
            debug!("Ignoring navigation to {index}: no pictures");
            return None;
        }

        self.render();
        self.sync_hash();
        self.nav.index()
    }

    /// Jumps to the first picture whose url equals `identifier`.
    ///
    /// An unknown identifier leaves the current picture in place.
    pub fn go_to_identifier(&mut self, identifier: &str) -> Option<usize> {
        if self.nav.is_empty() {
            debug!("Ignoring navigation to {identifier}: no pictures");
            return None;
        }

        if self.nav.go_to_identifier(identifier).is_none() {
            warn!("No picture matches identifier {identifier}");
            return None;
        }

        self.render();
        self.sync_hash();
        self.nav.index()
    }

    pub fn next(&mut self) -> Option<usize> {
        self.nav.go_next()?;
        self.render();
        self.sync_hash();
        self.nav.index()
    }

    pub fn prev(&mut self) -> Option<usize> {
        self.nav.go_prev()?;
        self.render();
        self.sync_hash();
        self.nav.index()
    }

    pub fn show(&mut self) {
        if self.visible {
            return;
        }

        if self.nav.is_empty() {
            debug!("Not showing overlay: no pictures");
            return;
        }

        self.visible = true;
        self.surface.set_visible(true);
        for listener in Listener::VISIBLE {
            self.bind(*listener);
        }

        self.render();
        self.sync_hash();
    }

    pub fn hide(&mut self) {
        if !self.visible {
            return;
        }

        self.visible = false;
        self.surface.set_visible(false);
        for listener in Listener::VISIBLE {
            self.unbind(*listener);
        }

        if !self.surface.hash().is_empty() {
            self.surface.set_hash("");
        }
    }

    /// Dispatches a surface event. Events whose listener is not bound are dropped.
    pub fn handle_event(&mut self, event: OverlayEvent) -> bool {
        if !self.is_bound(event.listener()) {
            trace!("Dropping {event:?}: listener not bound");
            return false;
        }

        match event {
            OverlayEvent::CloseClicked | OverlayEvent::BackgroundClicked => self.hide(),
            OverlayEvent::ImageClicked => {
                self.next();
            }
            OverlayEvent::KeyDown(key) => match key {
                Key::Escape => self.hide(),
                Key::ArrowLeft => {
                    self.prev();
                }
                Key::ArrowRight => {
                    self.next();
                }
                Key::Other(_) => return false,
            },
            OverlayEvent::HashChanged(hash) => self.apply_hash(&hash),
        }

        true
    }

    /// An unknown identifier while visible restores the hash of the photo on
    /// screen; while hidden it is ignored.
    fn apply_hash(&mut self, hash: &str) {
        match parse_photo_hash(hash) {
            Some(identifier) => {
                if self.go_to_identifier(&identifier).is_some() {
                    self.show();
                } else if self.visible {
                    self.sync_hash();
                }
            }
            None => self.hide(),
        }
    }

    fn render(&mut self) {
        if let Some(record) = self.nav.current() {
            self.surface.set_image_source(&record.url);
            self.surface.set_likes(record.likes);
            self.surface.set_comments(record.comments);
        }
    }

    fn sync_hash(&mut self) {
        if let Some(record) = self.nav.current() {
            let hash = photo_hash(record.identifier());
            if self.surface.hash() != hash {
                self.surface.set_hash(&hash);
            }
        }
    }

    fn bind(&mut self, listener: Listener) {
        if self.bound.insert(listener) {
            self.surface.add_listener(listener);
        }
    }

    fn unbind(&mut self, listener: Listener) {
        if self.bound.remove(&listener) {
            self.surface.remove_listener(listener);
        }
    }
}
