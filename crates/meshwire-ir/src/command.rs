use meshwire_core::math::DMat4;
use meshwire_core::{MeshwireError, MeshwireResult, Path, PlaybackConfig};
use serde_json::{json, Value};

use crate::animation::Animation;
use crate::geometry::Geometry;
use crate::lower::Lower;
use crate::material::Material;
use crate::object::{Camera, Object, SceneObject};

/// What the caller hands to `set_object`.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneObjectInput {
    /// A fully assembled render object, used as-is.
    Object(Object),
    Camera(Camera),
    /// Raw geometry, wrapped according to its material.
    Geometry(Geometry),
}

impl From<Object> for SceneObjectInput {
    fn from(o: Object) -> Self {
        SceneObjectInput::Object(o)
    }
}

impl From<Camera> for SceneObjectInput {
    fn from(c: Camera) -> Self {
        SceneObjectInput::Camera(c)
    }
}

impl From<Geometry> for SceneObjectInput {
    fn from(g: Geometry) -> Self {
        SceneObjectInput::Geometry(g)
    }
}

/// Place an object at a path, replacing whatever was there.
#[derive(Debug, Clone, PartialEq)]
pub struct SetObject {
    pub object: SceneObject,
    pub path: Path,
}

impl SetObject {
    /// Resolve `input` (plus an optional material) into a scene object.
    ///
    /// A material may only accompany raw geometry. Geometry without a material
    /// gets the default opaque lit material; a points material wraps it as a
    /// point cloud, any other material as a mesh. `path` defaults to the root.
    pub fn new(
        input: impl Into<SceneObjectInput>,
        material: Option<Material>,
        path: Option<Path>,
    ) -> MeshwireResult<Self> {
        let path = path.unwrap_or_default();
        match (input.into(), material) {
            (SceneObjectInput::Object(_), Some(_)) => Err(MeshwireError::ConflictingArguments(
                "supply either an Object or a Geometry and a Material, not an Object and a Material"
                    .into(),
            )),
            (SceneObjectInput::Camera(_), Some(_)) => Err(MeshwireError::ConflictingArguments(
                "a camera cannot be given a material".into(),
            )),
            (SceneObjectInput::Object(object), None) => Ok(Self::with_object(object, path)),
            (SceneObjectInput::Camera(camera), None) => Ok(Self::with_object(camera, path)),
            (SceneObjectInput::Geometry(geometry), material) => {
                Ok(Self::with_geometry(geometry, material, path))
            }
        }
    }

    pub fn with_object(object: impl Into<SceneObject>, path: Path) -> Self {
        Self {
            object: object.into(),
            path,
        }
    }

    pub fn with_geometry(geometry: Geometry, material: Option<Material>, path: Path) -> Self {
        let material = material.unwrap_or_default();
        let object = if material.is_points() {
            Object::points(geometry, material)
        } else {
            Object::mesh(geometry, material)
        };
        Self::with_object(object, path)
    }
}

impl Lower for SetObject {
    fn lower(&self) -> Value {
        json!({
            "type": "set_object",
            "object": self.object.lower(),
            "path": self.path.lower(),
        })
    }
}

/// Set the local transform of the node at `path`.
#[derive(Debug, Clone, PartialEq)]
pub struct SetTransform {
    pub matrix: DMat4,
    pub path: Path,
}

impl SetTransform {
    pub fn new(matrix: DMat4, path: Path) -> Self {
        Self { matrix, path }
    }
}

impl Lower for SetTransform {
    fn lower(&self) -> Value {
        // wire order is column-major: the flattened transpose of the row-major matrix
        json!({
            "type": "set_transform",
            "path": self.path.lower(),
            "matrix": self.matrix.to_cols_array(),
        })
    }
}

/// Set a named property on the node at `path`.
#[derive(Debug, Clone, PartialEq)]
pub struct SetProperty {
    pub path: Path,
    pub key: String,
    pub value: Value,
}

impl SetProperty {
    pub fn new(key: impl Into<String>, value: impl Into<Value>, path: Path) -> Self {
        Self {
            path,
            key: key.into(),
            value: value.into(),
        }
    }
}

impl Lower for SetProperty {
    fn lower(&self) -> Value {
        json!({
            "type": "set_property",
            "path": self.path.lower(),
            "property": self.key.to_lowercase(),
            "value": self.value,
        })
    }
}

/// Publish an [`Animation`]. Always addressed at the protocol root; each clip
/// carries its own target path.
///
/// The animation is borrowed, so lowering reflects its state at lowering time.
#[derive(Debug, Clone, PartialEq)]
pub struct SetAnimation<'a> {
    pub animation: &'a Animation,
    pub play: bool,
    pub repetitions: u32,
}

impl<'a> SetAnimation<'a> {
    pub fn new(animation: &'a Animation) -> Self {
        Self {
            animation,
            play: true,
            repetitions: 1,
        }
    }

    pub fn from_config(animation: &'a Animation, playback: &PlaybackConfig) -> Self {
        Self::new(animation)
            .play(playback.play)
            .repetitions(playback.repetitions)
    }

    pub fn play(mut self, play: bool) -> Self {
        self.play = play;
        self
    }

    pub fn repetitions(mut self, repetitions: u32) -> Self {
        self.repetitions = repetitions;
        self
    }
}

impl Lower for SetAnimation<'_> {
    fn lower(&self) -> Value {
        json!({
            "type": "set_animation",
            "animations": self.animation.lower(),
            "options": {
                "play": self.play,
                "repetitions": self.repetitions,
            },
            "path": "",
        })
    }
}

/// Remove the node at `path` and everything below it.
#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub path: Path,
}

impl Delete {
    pub fn new(path: Path) -> Self {
        Self { path }
    }
}

impl Lower for Delete {
    fn lower(&self) -> Value {
        json!({
            "type": "delete",
            "path": self.path.lower(),
        })
    }
}

/// Ask the viewer for a screenshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CaptureImage;

impl Lower for CaptureImage {
    fn lower(&self) -> Value {
        json!({ "type": "capture_image" })
    }
}

/// Any viewer command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command<'a> {
    SetObject(SetObject),
    SetTransform(SetTransform),
    SetProperty(SetProperty),
    SetAnimation(SetAnimation<'a>),
    Delete(Delete),
    CaptureImage(CaptureImage),
}

impl Command<'_> {
    /// Wire discriminator of this command.
    pub fn kind(&self) -> &'static str {
        match self {
            Command::SetObject(_) => "set_object",
            Command::SetTransform(_) => "set_transform",
            Command::SetProperty(_) => "set_property",
            Command::SetAnimation(_) => "set_animation",
            Command::Delete(_) => "delete",
            Command::CaptureImage(_) => "capture_image",
        }
    }
}

impl Lower for Command<'_> {
    fn lower(&self) -> Value {
        match self {
            Command::SetObject(c) => c.lower(),
            Command::SetTransform(c) => c.lower(),
            Command::SetProperty(c) => c.lower(),
            Command::SetAnimation(c) => c.lower(),
            Command::Delete(c) => c.lower(),
            Command::CaptureImage(c) => c.lower(),
        }
    }
}

impl From<SetObject> for Command<'_> {
    fn from(c: SetObject) -> Self {
        Command::SetObject(c)
    }
}

impl From<SetTransform> for Command<'_> {
    fn from(c: SetTransform) -> Self {
        Command::SetTransform(c)
    }
}

impl From<SetProperty> for Command<'_> {
    fn from(c: SetProperty) -> Self {
        Command::SetProperty(c)
    }
}

impl<'a> From<SetAnimation<'a>> for Command<'a> {
    fn from(c: SetAnimation<'a>) -> Self {
        Command::SetAnimation(c)
    }
}

impl From<Delete> for Command<'_> {
    fn from(c: Delete) -> Self {
        Command::Delete(c)
    }
}

impl From<CaptureImage> for Command<'_> {
    fn from(c: CaptureImage) -> Self {
        Command::CaptureImage(c)
    }
}
