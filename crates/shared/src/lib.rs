pub mod loading_state;
pub mod picture;

pub use loading_state::{LoadingEvent, LoadingState};
pub use picture::{PictureRecord, PictureSequence, empty_sequence};
