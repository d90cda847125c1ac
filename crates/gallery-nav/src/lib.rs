pub mod hash;
pub mod nav;
pub mod overlay;
pub mod surface;

pub use hash::{PHOTO_PREFIX, parse_photo_hash, photo_hash};
pub use nav::NavState;
pub use overlay::{GalleryOverlay, Key, OverlayEvent};
pub use surface::{Listener, MemorySurface, OverlaySurface};
