pub mod app;
pub mod commands;
pub mod message;
pub mod surface;

pub use app::{AppError, Gallery};
