//! Playback module - time navigation, annotation pooling, and the
//! controller that feeds per-frame transforms to the external renderer.

mod annotation;
mod controller;
mod cursor;

pub use annotation::*;
pub use controller::*;
pub use cursor::*;
