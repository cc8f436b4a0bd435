use indexmap::IndexMap;
use meshwire_core::math::{js_position, js_quaternion, DMat4};
use meshwire_core::{AnimationConfig, MeshwireResult, Path};
use serde_json::{json, Value};

use crate::lower::Lower;

/// Keyframes for one property of one scene node.
///
/// `frames` and `values` are index-aligned and `frames` is kept
/// non-decreasing. A frame equal to existing entries is inserted after them.
/// Frames are always finite.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationTrack {
    /// Property name, without the leading `.` used on the wire.
    pub name: String,
    /// Renderer value type (`vector3`, `quaternion`, `number`, `color`, ...).
    pub jstype: String,
    frames: Vec<f64>,
    values: Vec<Value>,
}

impl AnimationTrack {
    pub fn new(name: impl Into<String>, jstype: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            jstype: jstype.into(),
            frames: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Record `value` at `frame`. Non-finite frames have no place on the
    /// timeline and are dropped with a warning.
    pub fn set_property(&mut self, frame: f64, value: Value) {
        if !frame.is_finite() {
            tracing::warn!(track = %self.name, frame, "ignoring keyframe at non-finite frame");
            return;
        }
        // fold -0.0 into 0.0 so signed zeros tie
        let frame = frame + 0.0;
        let i = self
            .frames
            .partition_point(|f| f.total_cmp(&frame).is_le());
        self.frames.insert(i, frame);
        self.values.insert(i, value);
    }

    pub fn frames(&self) -> &[f64] {
        &self.frames
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl Lower for AnimationTrack {
    fn lower(&self) -> Value {
        let keys: Vec<Value> = self
            .frames
            .iter()
            .zip(&self.values)
            .map(|(time, value)| json!({ "time": time, "value": value }))
            .collect();
        json!({
            "name": format!(".{}", self.name),
            "type": self.jstype,
            "keys": keys,
        })
    }
}

/// Tracks of one scene node, sharing a frame rate.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    pub tracks: IndexMap<String, AnimationTrack>,
    pub fps: u32,
    pub name: String,
}

impl Default for AnimationClip {
    fn default() -> Self {
        Self::new(30, "default")
    }
}

impl AnimationClip {
    pub fn new(fps: u32, name: impl Into<String>) -> Self {
        Self {
            tracks: IndexMap::new(),
            fps,
            name: name.into(),
        }
    }

    /// Record `value` for `property` at `frame`, creating the track on first
    /// use. The `jstype` of the first write sticks.
    pub fn set_property(&mut self, frame: f64, property: &str, jstype: &str, value: Value) {
        self.tracks
            .entry(property.to_string())
            .or_insert_with(|| AnimationTrack::new(property, jstype))
            .set_property(frame, value);
    }

    pub fn track(&self, property: &str) -> Option<&AnimationTrack> {
        self.tracks.get(property)
    }
}

impl Lower for AnimationClip {
    fn lower(&self) -> Value {
        let tracks: Vec<Value> = self.tracks.values().map(Lower::lower).collect();
        json!({
            "fps": self.fps,
            "name": self.name,
            "tracks": tracks,
        })
    }
}

/// Parameters used when a clip is created lazily by a frame cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipDefaults {
    pub fps: u32,
    pub name: String,
}

impl Default for ClipDefaults {
    fn default() -> Self {
        Self {
            fps: 30,
            name: "default".to_string(),
        }
    }
}

impl From<&AnimationConfig> for ClipDefaults {
    fn from(config: &AnimationConfig) -> Self {
        Self {
            fps: config.default_framerate,
            name: config.clip_name.clone(),
        }
    }
}

/// The whole timeline of a scene: one clip per animated path.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Animation {
    pub clips: IndexMap<Path, AnimationClip>,
    pub defaults: ClipDefaults,
}

impl Animation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_framerate(default_framerate: u32) -> Self {
        Self {
            clips: IndexMap::new(),
            defaults: ClipDefaults {
                fps: default_framerate,
                ..ClipDefaults::default()
            },
        }
    }

    pub fn from_config(config: &AnimationConfig) -> Self {
        Self {
            clips: IndexMap::new(),
            defaults: ClipDefaults::from(config),
        }
    }

    pub fn default_framerate(&self) -> u32 {
        self.defaults.fps
    }

    /// Open a cursor at `frame` rooted at `root`. Nothing is recorded until a
    /// property is written through the cursor.
    pub fn at_frame(&mut self, root: &Path, frame: f64) -> AnimationFrameVisualizer<'_> {
        let defaults = self.defaults.clone();
        AnimationFrameVisualizer::new(self, root.clone(), frame, defaults)
    }

    pub fn clip(&self, path: &Path) -> Option<&AnimationClip> {
        self.clips.get(path)
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

impl Lower for Animation {
    fn lower(&self) -> Value {
        Value::Array(
            self.clips
                .iter()
                .map(|(path, clip)| json!({ "path": path.lower(), "clip": clip.lower() }))
                .collect(),
        )
    }
}

/// A cursor bound to one instant and one scene path of an [`Animation`].
///
/// The cursor borrows the animation, so it cannot outlive it. Child cursors
/// reborrow the same animation; the parent is usable again once they drop.
#[derive(Debug)]
pub struct AnimationFrameVisualizer<'a> {
    animation: &'a mut Animation,
    path: Path,
    current_frame: f64,
    defaults: ClipDefaults,
}

impl<'a> AnimationFrameVisualizer<'a> {
    pub fn new(
        animation: &'a mut Animation,
        path: Path,
        current_frame: f64,
        defaults: ClipDefaults,
    ) -> Self {
        Self {
            animation,
            path,
            current_frame,
            defaults,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn current_frame(&self) -> f64 {
        self.current_frame
    }

    /// The clip for this cursor's path, created with the cursor's defaults if
    /// missing.
    pub fn get_clip(&mut self) -> &mut AnimationClip {
        let defaults = &self.defaults;
        self.animation
            .clips
            .entry(self.path.clone())
            .or_insert_with(|| AnimationClip::new(defaults.fps, defaults.name.clone()))
    }

    /// Record a homogeneous transform as `position` and `quaternion` keys.
    pub fn set_transform(&mut self, matrix: &DMat4) {
        let frame = self.current_frame;
        let position = js_position(matrix);
        let quaternion = js_quaternion(matrix);
        let clip = self.get_clip();
        clip.set_property(frame, "position", "vector3", json!(position));
        clip.set_property(frame, "quaternion", "quaternion", json!(quaternion));
    }

    pub fn set_property(&mut self, name: &str, jstype: &str, value: impl Into<Value>) {
        let frame = self.current_frame;
        self.get_clip().set_property(frame, name, jstype, value.into());
    }

    /// Cursor for the child `segment`, same animation and frame.
    pub fn at(&mut self, segment: &str) -> MeshwireResult<AnimationFrameVisualizer<'_>> {
        let path = self.path.append(segment)?;
        Ok(AnimationFrameVisualizer::new(
            &mut *self.animation,
            path,
            self.current_frame,
            self.defaults.clone(),
        ))
    }

    /// Cursor for the same path at another frame.
    pub fn at_frame(&mut self, frame: f64) -> AnimationFrameVisualizer<'_> {
        AnimationFrameVisualizer::new(
            &mut *self.animation,
            self.path.clone(),
            frame,
            self.defaults.clone(),
        )
    }

    /// Run `f` against the child cursor for `segment`.
    pub fn scope<R>(
        &mut self,
        segment: &str,
        f: impl FnOnce(&mut AnimationFrameVisualizer<'_>) -> R,
    ) -> MeshwireResult<R> {
        let mut child = self.at(segment)?;
        Ok(f(&mut child))
    }
}
