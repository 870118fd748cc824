//! Playback controller - ties cursor ticks to renderer updates.

use std::collections::HashMap;

use glam::Mat4;
use log::debug;
use serde::Serialize;

use super::annotation::{VectorAnnotationPool, VectorSlot};
use super::cursor::{PlayDirection, PlaybackCursor, PlaybackState};
use crate::schema::ReplayDocument;
use crate::transform;

/// Latest render state of one recorded object, keyed by id in the
/// controller's record map.
#[derive(Debug, Clone)]
pub struct RenderRecord {
    pub color: [f32; 3],
    pub transform: Mat4,
    pub visible: bool,
}

/// One object update emitted toward the external renderer.
///
/// The renderer owns mesh creation and scene-graph placement; the engine
/// only reports where each object is and whether it is shown.
#[derive(Debug, Clone, Serialize)]
pub struct RenderUpdate {
    pub id: u32,
    pub transform: Mat4,
    pub color: [f32; 3],
    pub visible: bool,
}

/// Drives playback of a loaded recording for an external renderer.
///
/// Owns the [`PlaybackCursor`], the [`VectorAnnotationPool`], and an
/// explicit id-keyed map of [`RenderRecord`]s - the single mutable home of
/// per-object render state. A fixed-cadence external tick (the reference
/// front-end runs at ~60 Hz) calls [`tick`](Self::tick); every navigation
/// call reprocesses the current frame synchronously and returns the
/// resulting updates.
#[derive(Debug, Default)]
pub struct PlaybackController {
    cursor: PlaybackCursor,
    pool: VectorAnnotationPool,
    records: HashMap<u32, RenderRecord>,
}

impl PlaybackController {
    /// Create a controller with the default annotation pool capacity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a controller with an explicit annotation pool capacity.
    ///
    /// The pool is created once and survives document loads.
    pub fn with_pool_capacity(capacity: usize) -> Self {
        Self {
            cursor: PlaybackCursor::new(),
            pool: VectorAnnotationPool::new(capacity),
            records: HashMap::new(),
        }
    }

    /// Install a new document and rebuild the render-record map.
    ///
    /// Returns the updates for frame 0 so the renderer can place every
    /// object immediately.
    pub fn load(&mut self, document: ReplayDocument) -> Vec<RenderUpdate> {
        self.records = document
            .objects
            .iter()
            .map(|object| {
                (
                    object.id,
                    RenderRecord {
                        color: object.color,
                        transform: Mat4::IDENTITY,
                        visible: true,
                    },
                )
            })
            .collect();
        self.cursor.load(document);
        self.process_current_frame()
    }

    #[inline]
    pub fn document(&self) -> &ReplayDocument {
        self.cursor.document()
    }

    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.cursor.state()
    }

    #[inline]
    pub fn current_frame(&self) -> usize {
        self.cursor.current_frame()
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.cursor.is_playing()
    }

    #[inline]
    pub fn direction(&self) -> PlayDirection {
        self.cursor.direction()
    }

    /// Latest render state per object id.
    #[inline]
    pub fn records(&self) -> &HashMap<u32, RenderRecord> {
        &self.records
    }

    /// Annotation slots for the current frame.
    #[inline]
    pub fn annotations(&self) -> &[VectorSlot] {
        self.pool.slots()
    }

    /// Advance one tick of playback.
    ///
    /// A no-op returning no updates while paused; there is no in-flight
    /// work to cancel when playback stops.
    pub fn tick(&mut self) -> Vec<RenderUpdate> {
        if !self.cursor.is_playing() {
            return Vec::new();
        }
        self.cursor.tick();
        self.process_current_frame()
    }

    /// Step by `delta` frames and reprocess.
    pub fn step(&mut self, delta: i64) -> Vec<RenderUpdate> {
        self.cursor.step(delta);
        self.process_current_frame()
    }

    /// Seek to a frame index (clamped) and reprocess.
    pub fn seek(&mut self, index: usize) -> Vec<RenderUpdate> {
        self.cursor.seek(index);
        self.process_current_frame()
    }

    /// Flip play/pause. Returns the new playing flag.
    pub fn toggle_play(&mut self) -> bool {
        self.cursor.toggle_play()
    }

    pub fn pause(&mut self) {
        self.cursor.pause();
    }

    /// Toggle playback direction.
    pub fn reverse(&mut self) {
        self.cursor.reverse();
    }

    pub fn set_direction(&mut self, direction: PlayDirection) {
        self.cursor.set_direction(direction);
    }

    pub fn set_speed(&mut self, multiplier: f32) {
        self.cursor.set_speed(multiplier);
    }

    /// Status line for the front-end, e.g. `Frame: 12/300 | Time: 0.18s`.
    pub fn frame_label(&self) -> String {
        match self.cursor.current_frame_data() {
            Some(frame) => format!(
                "Frame: {}/{} | Time: {:.2}s",
                self.cursor.current_frame() + 1,
                self.cursor.frame_count(),
                frame.timestamp
            ),
            None => "Frame: 0/0 | Time: 0.00s".to_string(),
        }
    }

    /// Convert the current frame into renderer updates and annotations.
    ///
    /// Cost is O(states + commands of the current frame). State updates
    /// referencing unknown object ids are dropped.
    fn process_current_frame(&mut self) -> Vec<RenderUpdate> {
        let Some(frame) = self.cursor.current_frame_data() else {
            self.pool.begin_frame();
            return Vec::new();
        };

        let mut updates = Vec::with_capacity(frame.states.len());
        for state in &frame.states {
            let Some(record) = self.records.get_mut(&state.id) else {
                debug!("Dropping state update for unknown object id {}", state.id);
                continue;
            };
            record.transform = transform::from_pose(state.position, state.rotation);
            record.visible = state.visible;
            updates.push(RenderUpdate {
                id: state.id,
                transform: record.transform,
                color: record.color,
                visible: record.visible,
            });
        }

        self.pool.process_frame(&frame.commands);
        updates
    }
}
