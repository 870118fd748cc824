//! Replay Scope - playback engine for recorded physics-simulation sessions.
//!
//! This crate replays a sequence of recorded object poses and transient
//! debug annotations over time, feeding per-frame rigid-body transforms to
//! an external renderer.
//!
//! # Architecture
//!
//! The crate is split into three main modules:
//!
//! - `schema`: Recording document types and JSON loading
//! - `transform`: Pose and direction-vector to rigid-transform math
//! - `playback`: Cursor state machine, annotation pool, and controller
//!
//! # Example
//!
//! ```rust,no_run
//! use replay_scope::{PlaybackController, ReplayDocument};
//!
//! // Load a recorded session
//! let document = ReplayDocument::from_path("session.json").unwrap();
//!
//! let mut controller = PlaybackController::new();
//! controller.load(document);
//! controller.toggle_play();
//!
//! // Drive playback from a fixed-cadence tick (~60 Hz)
//! loop {
//!     let updates = controller.tick();
//!     for update in &updates {
//!         // Hand (id, transform, color, visibility) to the renderer
//!         println!("object {} visible={}", update.id, update.visible);
//!     }
//!     for slot in controller.annotations().iter().filter(|s| s.visible) {
//!         // Place a debug arrow at slot.transform
//!         let _ = slot.transform;
//!     }
//! }
//! ```

pub mod playback;
pub mod schema;
pub mod transform;

// WebAssembly bindings (only for wasm32 target)
#[cfg(target_arch = "wasm32")]
pub mod wasm;

// Re-export commonly used types
pub use playback::{
    PlayDirection, PlaybackController, PlaybackCursor, PlaybackState, RenderUpdate,
    VectorAnnotationPool,
};
pub use schema::{Frame, LoadError, ReplayDocument};
