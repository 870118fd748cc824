//! Frame-indexed playback cursor over a loaded recording.

use crate::schema::{Frame, ReplayDocument};

/// Playback direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayDirection {
    #[default]
    Forward,
    Reverse,
}

impl PlayDirection {
    /// Signed step multiplier: +1 forward, -1 reverse.
    #[inline]
    pub fn sign(self) -> i64 {
        match self {
            PlayDirection::Forward => 1,
            PlayDirection::Reverse => -1,
        }
    }

    /// The opposite direction.
    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            PlayDirection::Forward => PlayDirection::Reverse,
            PlayDirection::Reverse => PlayDirection::Forward,
        }
    }
}

/// Observable cursor state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// No frames loaded.
    Empty,
    /// Frames loaded, playback paused.
    Idle,
    /// Frames loaded, an external tick advances the cursor.
    Playing,
}

/// State machine driving time navigation through a [`ReplayDocument`].
///
/// The cursor owns the loaded document and keeps `current_frame` inside
/// `[0, frame_count - 1]` whenever the document is non-empty. Stepping wraps
/// modulo the frame count, so playback loops continuously in either
/// direction. The cursor never advances on its own; an external periodic
/// tick calls [`tick`](Self::tick) while playing.
#[derive(Debug)]
pub struct PlaybackCursor {
    document: ReplayDocument,
    current_frame: usize,
    direction: PlayDirection,
    speed: f32,
    playing: bool,
}

impl Default for PlaybackCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackCursor {
    /// Create a cursor with no document loaded.
    pub fn new() -> Self {
        Self {
            document: ReplayDocument::default(),
            current_frame: 0,
            direction: PlayDirection::Forward,
            speed: 1.0,
            playing: false,
        }
    }

    /// Install a new document, replacing any previous one wholesale.
    ///
    /// Resets to frame 0, forward direction, paused. An empty document is
    /// valid; navigation then degrades to no-ops.
    pub fn load(&mut self, document: ReplayDocument) {
        self.document = document;
        self.current_frame = 0;
        self.direction = PlayDirection::Forward;
        self.playing = false;
    }

    /// The loaded document.
    #[inline]
    pub fn document(&self) -> &ReplayDocument {
        &self.document
    }

    /// Number of frames in the loaded document.
    #[inline]
    pub fn frame_count(&self) -> usize {
        self.document.frame_count()
    }

    /// Index of the current frame. Meaningless while no frames are loaded.
    #[inline]
    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    /// The frame under the cursor, or `None` for an empty document.
    pub fn current_frame_data(&self) -> Option<&Frame> {
        self.document.frames.get(self.current_frame)
    }

    #[inline]
    pub fn direction(&self) -> PlayDirection {
        self.direction
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Derived state machine position.
    pub fn state(&self) -> PlaybackState {
        if self.document.is_empty() {
            PlaybackState::Empty
        } else if self.playing {
            PlaybackState::Playing
        } else {
            PlaybackState::Idle
        }
    }

    /// Move the cursor by `delta` frames in the current direction.
    ///
    /// Wraps modulo the frame count: stepping past the last frame continues
    /// at frame 0 and stepping before frame 0 continues at the last frame.
    /// No-op while the document is empty.
    pub fn step(&mut self, delta: i64) {
        let count = self.frame_count() as i64;
        if count == 0 {
            return;
        }
        let offset = delta * self.direction.sign();
        self.current_frame = (self.current_frame as i64 + offset).rem_euclid(count) as usize;
    }

    /// Jump directly to `index`, clamped to the last frame.
    ///
    /// No-op while the document is empty; never fails.
    pub fn seek(&mut self, index: usize) {
        let count = self.frame_count();
        if count == 0 {
            return;
        }
        self.current_frame = index.min(count - 1);
    }

    pub fn set_direction(&mut self, direction: PlayDirection) {
        self.direction = direction;
    }

    /// Toggle between forward and reverse playback.
    pub fn reverse(&mut self) {
        self.direction = self.direction.reversed();
    }

    /// Set the playback speed multiplier.
    ///
    /// The tick cadence is fixed; speed changes how many frames each tick
    /// advances (see [`frames_per_tick`](Self::frames_per_tick)). Zero,
    /// negative, and non-finite multipliers are ignored.
    pub fn set_speed(&mut self, multiplier: f32) {
        if multiplier.is_finite() && multiplier > 0.0 {
            self.speed = multiplier;
        }
    }

    /// Frames advanced per external tick: `max(1, floor(speed))`.
    pub fn frames_per_tick(&self) -> i64 {
        (self.speed.floor() as i64).max(1)
    }

    /// Flip the playing flag. Returns the new flag.
    ///
    /// An empty document cannot enter the playing state.
    pub fn toggle_play(&mut self) -> bool {
        if self.document.is_empty() {
            self.playing = false;
        } else {
            self.playing = !self.playing;
        }
        self.playing
    }

    /// Stop playback; the next tick becomes a no-op.
    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Advance one tick's worth of frames if playing.
    pub fn tick(&mut self) {
        if self.playing {
            self.step(self.frames_per_tick());
        }
    }
}
