//! # meshwire-ir
//!
//! The Meshwire command IR: scene objects, keyframe animation and the typed
//! command set that lowers scene mutations into wire-ready JSON structures.
//!
//! Every scene update (object placement, transform, property, animation,
//! capture) is built as a command, lowered, and handed to a [`Transport`].

pub mod animation;
pub mod command;
pub mod geometry;
pub mod lower;
pub mod material;
pub mod object;
pub mod transport;
pub mod visualizer;

pub use animation::{Animation, AnimationClip, AnimationFrameVisualizer, AnimationTrack, ClipDefaults};
pub use command::{
    CaptureImage, Command, Delete, SceneObjectInput, SetAnimation, SetObject, SetProperty,
    SetTransform,
};
pub use geometry::{Geometry, GeometryKind};
pub use lower::Lower;
pub use material::{Material, MaterialKind, MeshMaterial};
pub use object::{Camera, CameraKind, Object, ObjectKind, SceneObject};
pub use transport::{JsonLinesTransport, RecordingTransport, Transport};
pub use visualizer::Visualizer;
