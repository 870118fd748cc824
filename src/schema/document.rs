//! Recording document types - object descriptors, frames, states, commands.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Default color for objects that don't specify one (mid-gray).
fn default_color() -> [f32; 3] {
    [0.5, 0.5, 0.5]
}

fn default_rotation() -> Quat {
    Quat::IDENTITY
}

fn default_half_dimensions() -> Vec3 {
    Vec3::splat(0.5)
}

fn default_radius() -> f32 {
    0.5
}

fn default_half_height() -> f32 {
    0.5
}

fn default_visible() -> bool {
    true
}

/// Immutable in-memory representation of a loaded recording.
///
/// Owned exclusively by the session that loaded it and replaced wholesale
/// on a new load, never merged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplayDocument {
    /// Object descriptors, unique ids within the document.
    #[serde(default)]
    pub objects: Vec<ObjectDescriptor>,
    /// Recorded frames in playback order.
    #[serde(default)]
    pub frames: Vec<Frame>,
}

impl ReplayDocument {
    /// Number of recorded frames.
    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Number of object descriptors.
    #[inline]
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Check if the document contains no frames.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Timestamp of the last frame, or 0.0 for an empty document.
    pub fn duration(&self) -> f32 {
        self.frames.last().map_or(0.0, |frame| frame.timestamp)
    }

    /// Look up an object descriptor by id.
    pub fn descriptor(&self, id: u32) -> Option<&ObjectDescriptor> {
        self.objects.iter().find(|obj| obj.id == id)
    }
}

/// Static description of a recorded object: identity, shape, and color.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectDescriptor {
    /// Unique id within the document.
    pub id: u32,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Shape kind with its type-specific parameters.
    #[serde(flatten)]
    pub shape: Shape,
    /// RGB color, each component in [0, 1].
    #[serde(default = "default_color")]
    pub color: [f32; 3],
}

/// Collision shape of a recorded object.
///
/// Shape parameters describe the base mesh; per-frame poses never rescale
/// it, so extents are baked in here once.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    /// Axis-aligned box given by its half-extents.
    Box {
        #[serde(default = "default_half_dimensions")]
        half_dimensions: Vec3,
    },
    /// Sphere given by its radius.
    Sphere {
        #[serde(default = "default_radius")]
        radius: f32,
    },
    /// Capsule along the local Y axis.
    Capsule {
        #[serde(default = "default_radius")]
        radius: f32,
        #[serde(default = "default_half_height")]
        half_height: f32,
    },
    /// Convex hull given by its vertex cloud.
    Convex { vertices: Vec<Vec3> },
}

/// A single recorded frame: timestamp, object poses, and debug commands.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Frame {
    /// Simulation time in seconds.
    #[serde(rename = "t", default)]
    pub timestamp: f32,
    /// Object state updates. Ids need not cover every descriptor.
    #[serde(default)]
    pub states: Vec<ObjectState>,
    /// Transient debug commands for this frame.
    #[serde(rename = "cmd", default)]
    pub commands: Vec<Command>,
}

/// Pose update for one object in one frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectState {
    /// Referenced object descriptor id. Updates for unknown ids are dropped.
    pub id: u32,
    /// World position.
    #[serde(rename = "p", default)]
    pub position: Vec3,
    /// Orientation quaternion (x, y, z, w). Assumed unit-length, not verified.
    #[serde(rename = "r", default = "default_rotation")]
    pub rotation: Quat,
    /// Whether the object is shown this frame. The wire marker "i" hides it.
    #[serde(
        rename = "i",
        default = "default_visible",
        deserialize_with = "deserialize_visibility",
        serialize_with = "serialize_visibility",
        skip_serializing_if = "is_visible"
    )]
    pub visible: bool,
    /// Opaque annotation attached by the recorder.
    #[serde(rename = "m", default, skip_serializing_if = "serde_json::Value::is_null")]
    pub metadata: serde_json::Value,
}

fn is_visible(visible: &bool) -> bool {
    *visible
}

fn deserialize_visibility<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let marker: Option<String> = Option::deserialize(deserializer)?;
    Ok(marker.as_deref() != Some("i"))
}

fn serialize_visibility<S>(visible: &bool, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    if *visible {
        serializer.serialize_none()
    } else {
        serializer.serialize_some("i")
    }
}

/// Kind tag of a debug command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandKind {
    /// Debug vector annotation (wire tag "v").
    Vector,
    /// Unrecognized tag, preserved verbatim and ignored by the pipeline.
    Other(String),
}

impl From<String> for CommandKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "v" => CommandKind::Vector,
            _ => CommandKind::Other(tag),
        }
    }
}

impl CommandKind {
    fn as_wire(&self) -> &str {
        match self {
            CommandKind::Vector => "v",
            CommandKind::Other(tag) => tag,
        }
    }
}

/// Transient per-frame debug command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CommandWire", into = "CommandWire")]
pub struct Command {
    pub kind: CommandKind,
    /// Annotated direction; magnitude is meaningful.
    pub direction: Vec3,
    /// World-space anchor of the annotation.
    pub origin: Vec3,
}

/// Flat wire form of [`Command`] with per-component defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CommandWire {
    #[serde(rename = "t")]
    tag: String,
    #[serde(default)]
    vx: f32,
    #[serde(default = "default_one")]
    vy: f32,
    #[serde(default)]
    vz: f32,
    #[serde(default)]
    ox: f32,
    #[serde(default)]
    oy: f32,
    #[serde(default)]
    oz: f32,
}

fn default_one() -> f32 {
    1.0
}

impl From<CommandWire> for Command {
    fn from(wire: CommandWire) -> Self {
        Self {
            kind: CommandKind::from(wire.tag),
            direction: Vec3::new(wire.vx, wire.vy, wire.vz),
            origin: Vec3::new(wire.ox, wire.oy, wire.oz),
        }
    }
}

impl From<Command> for CommandWire {
    fn from(command: Command) -> Self {
        Self {
            tag: command.kind.as_wire().to_string(),
            vx: command.direction.x,
            vy: command.direction.y,
            vz: command.direction.z,
            ox: command.origin.x,
            oy: command.origin.y,
            oz: command.origin.z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_defaults() {
        let json = r#"{ "id": 3, "type": "sphere" }"#;
        let obj: ObjectDescriptor = serde_json::from_str(json).unwrap();

        assert_eq!(obj.id, 3);
        assert_eq!(obj.name, "");
        assert_eq!(obj.color, [0.5, 0.5, 0.5]);
        match obj.shape {
            Shape::Sphere { radius } => assert_eq!(radius, 0.5),
            other => panic!("Expected sphere, got {:?}", other),
        }
    }

    #[test]
    fn test_descriptor_box() {
        let json = r#"{
            "id": 0, "name": "crate", "type": "box",
            "half_dimensions": [1.0, 2.0, 3.0], "color": [1.0, 0.0, 0.0]
        }"#;
        let obj: ObjectDescriptor = serde_json::from_str(json).unwrap();

        assert_eq!(obj.name, "crate");
        match obj.shape {
            Shape::Box { half_dimensions } => {
                assert_eq!(half_dimensions, Vec3::new(1.0, 2.0, 3.0));
            }
            other => panic!("Expected box, got {:?}", other),
        }
    }

    #[test]
    fn test_state_defaults() {
        let json = r#"{ "id": 7 }"#;
        let state: ObjectState = serde_json::from_str(json).unwrap();

        assert_eq!(state.position, Vec3::ZERO);
        assert_eq!(state.rotation, Quat::IDENTITY);
        assert!(state.visible);
        assert!(state.metadata.is_null());
    }

    #[test]
    fn test_state_invisible_marker() {
        let json = r#"{ "id": 7, "i": "i" }"#;
        let state: ObjectState = serde_json::from_str(json).unwrap();
        assert!(!state.visible);

        // Any other marker means visible.
        let json = r#"{ "id": 7, "i": "x" }"#;
        let state: ObjectState = serde_json::from_str(json).unwrap();
        assert!(state.visible);
    }

    #[test]
    fn test_state_wire_fields() {
        let json = r#"{ "id": 1, "p": [1.0, 2.0, 3.0], "r": [0.0, 0.0, 0.7071, 0.7071] }"#;
        let state: ObjectState = serde_json::from_str(json).unwrap();

        assert_eq!(state.position, Vec3::new(1.0, 2.0, 3.0));
        assert!((state.rotation.z - 0.7071).abs() < 1e-6);
        assert!((state.rotation.w - 0.7071).abs() < 1e-6);
    }

    #[test]
    fn test_command_defaults() {
        let json = r#"{ "t": "v" }"#;
        let command: Command = serde_json::from_str(json).unwrap();

        assert_eq!(command.kind, CommandKind::Vector);
        assert_eq!(command.direction, Vec3::Y);
        assert_eq!(command.origin, Vec3::ZERO);
    }

    #[test]
    fn test_command_components() {
        let json = r#"{ "t": "v", "vx": 1.0, "vy": 0.0, "vz": 0.0, "ox": 5.0 }"#;
        let command: Command = serde_json::from_str(json).unwrap();

        assert_eq!(command.direction, Vec3::X);
        assert_eq!(command.origin, Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_command_unknown_tag_preserved() {
        let json = r#"{ "t": "text", "ox": 1.0 }"#;
        let command: Command = serde_json::from_str(json).unwrap();

        assert_eq!(command.kind, CommandKind::Other("text".to_string()));

        let back = serde_json::to_value(&command).unwrap();
        assert_eq!(back["t"], "text");
    }

    #[test]
    fn test_frame_defaults() {
        let frame: Frame = serde_json::from_str("{}").unwrap();
        assert_eq!(frame.timestamp, 0.0);
        assert!(frame.states.is_empty());
        assert!(frame.commands.is_empty());
    }

    #[test]
    fn test_document_accessors() {
        let json = r#"{
            "objects": [{ "id": 0, "type": "sphere" }, { "id": 1, "type": "box" }],
            "frames": [
                { "t": 0.0 },
                { "t": 0.016 },
                { "t": 0.032 }
            ]
        }"#;
        let doc: ReplayDocument = serde_json::from_str(json).unwrap();

        assert_eq!(doc.frame_count(), 3);
        assert_eq!(doc.object_count(), 2);
        assert!(!doc.is_empty());
        assert!((doc.duration() - 0.032).abs() < 1e-6);
        assert!(doc.descriptor(1).is_some());
        assert!(doc.descriptor(42).is_none());
    }

    #[test]
    fn test_empty_document() {
        let doc: ReplayDocument = serde_json::from_str("{}").unwrap();
        assert!(doc.is_empty());
        assert_eq!(doc.frame_count(), 0);
        assert_eq!(doc.duration(), 0.0);
    }
}
