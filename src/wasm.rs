//! WebAssembly bindings for Replay Scope.
//!
//! Provides a thin wrapper around `PlaybackController` for browser front-ends.

use wasm_bindgen::prelude::*;

use crate::playback::{PlayDirection, PlaybackController, PlaybackState};
use crate::schema::ReplayDocument;

/// Initialize WASM module with panic hook and logging.
#[wasm_bindgen(start)]
pub fn init() {
    // Set panic hook for better error messages in browser
    console_error_panic_hook::set_once();

    // Initialize WASM logger
    wasm_logger::init(wasm_logger::Config::default());
}

/// WebAssembly wrapper for the replay playback controller.
#[wasm_bindgen]
pub struct WasmPlayer {
    controller: PlaybackController,
}

#[wasm_bindgen]
impl WasmPlayer {
    /// Create a player from a JSON recording string.
    #[wasm_bindgen(constructor)]
    pub fn new(recording_json: &str) -> Result<WasmPlayer, JsValue> {
        let document = ReplayDocument::from_json_str(recording_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid recording: {e}")))?;

        let mut controller = PlaybackController::new();
        controller.load(document);

        Ok(WasmPlayer { controller })
    }

    /// Replace the loaded recording.
    #[wasm_bindgen]
    pub fn load(&mut self, recording_json: &str) -> Result<(), JsValue> {
        let document = ReplayDocument::from_json_str(recording_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid recording: {e}")))?;
        self.controller.load(document);
        Ok(())
    }

    /// Advance one playback tick and return the frame's render updates.
    #[wasm_bindgen]
    pub fn tick(&mut self) -> Result<JsValue, JsValue> {
        let updates = self.controller.tick();
        serde_wasm_bindgen::to_value(&updates)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// Step by a signed number of frames and return the render updates.
    #[wasm_bindgen]
    pub fn step(&mut self, delta: i32) -> Result<JsValue, JsValue> {
        let updates = self.controller.step(delta as i64);
        serde_wasm_bindgen::to_value(&updates)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// Seek to a frame index (clamped) and return the render updates.
    #[wasm_bindgen]
    pub fn seek(&mut self, index: u32) -> Result<JsValue, JsValue> {
        let updates = self.controller.seek(index as usize);
        serde_wasm_bindgen::to_value(&updates)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// Annotation slots for the current frame as
    /// `{ transform: number[16], visible: boolean }` objects.
    #[wasm_bindgen(js_name = getAnnotations)]
    pub fn get_annotations(&self) -> Result<JsValue, JsValue> {
        let slots: Vec<AnnotationSnapshot> = self
            .controller
            .annotations()
            .iter()
            .map(|slot| AnnotationSnapshot {
                transform: slot.transform.to_cols_array(),
                visible: slot.visible,
            })
            .collect();

        serde_wasm_bindgen::to_value(&slots)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// Flip play/pause. Returns the new playing flag.
    #[wasm_bindgen(js_name = togglePlay)]
    pub fn toggle_play(&mut self) -> bool {
        self.controller.toggle_play()
    }

    /// Toggle playback direction.
    #[wasm_bindgen]
    pub fn reverse(&mut self) {
        self.controller.reverse();
    }

    /// Set the playback speed multiplier.
    #[wasm_bindgen(js_name = setSpeed)]
    pub fn set_speed(&mut self, multiplier: f32) {
        self.controller.set_speed(multiplier);
    }

    /// Whether playback is currently running.
    #[wasm_bindgen(js_name = isPlaying)]
    pub fn is_playing(&self) -> bool {
        self.controller.is_playing()
    }

    /// Whether playback direction is reversed.
    #[wasm_bindgen(js_name = isReversed)]
    pub fn is_reversed(&self) -> bool {
        self.controller.direction() == PlayDirection::Reverse
    }

    /// Current frame index.
    #[wasm_bindgen(js_name = getFrame)]
    pub fn get_frame(&self) -> u32 {
        self.controller.current_frame() as u32
    }

    /// Total number of frames.
    #[wasm_bindgen(js_name = getFrameCount)]
    pub fn get_frame_count(&self) -> u32 {
        self.controller.document().frame_count() as u32
    }

    /// Status line, e.g. `Frame: 12/300 | Time: 0.18s`.
    #[wasm_bindgen(js_name = getFrameLabel)]
    pub fn get_frame_label(&self) -> String {
        self.controller.frame_label()
    }

    /// Whether a document with frames is loaded.
    #[wasm_bindgen(js_name = hasFrames)]
    pub fn has_frames(&self) -> bool {
        self.controller.state() != PlaybackState::Empty
    }
}

/// Serializable snapshot of one annotation slot.
#[derive(serde::Serialize)]
struct AnnotationSnapshot {
    transform: [f32; 16],
    visible: bool,
}
