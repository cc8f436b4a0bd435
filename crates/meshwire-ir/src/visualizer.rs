use meshwire_core::math::DMat4;
use meshwire_core::{MeshwireResult, Path};
use serde_json::Value;

use crate::animation::Animation;
use crate::command::{
    CaptureImage, Command, Delete, SceneObjectInput, SetAnimation, SetObject, SetProperty,
    SetTransform,
};
use crate::lower::Lower;
use crate::material::Material;
use crate::transport::Transport;

/// Path-scoped handle that builds commands and sends them immediately.
///
/// Child handles (`vis.at("robot/arm")`) share the parent's transport.
pub struct Visualizer<'t> {
    transport: &'t mut dyn Transport,
    path: Path,
}

impl<'t> Visualizer<'t> {
    pub fn new(transport: &'t mut dyn Transport) -> Self {
        Self {
            transport,
            path: Path::root(),
        }
    }

    pub fn with_path(transport: &'t mut dyn Transport, path: Path) -> Self {
        Self { transport, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Handle for `target` resolved against this handle's path. A leading `/`
    /// resolves from the root.
    pub fn at(&mut self, target: &str) -> MeshwireResult<Visualizer<'_>> {
        let path = self.path.resolve(target)?;
        Ok(Visualizer {
            transport: &mut *self.transport,
            path,
        })
    }

    /// Lower `command` now and hand it to the transport.
    pub fn send<'c>(&mut self, command: impl Into<Command<'c>>) -> MeshwireResult<()> {
        let command = command.into();
        tracing::debug!(command = command.kind(), path = %self.path, "sending command");
        self.transport.send(&command.lower())
    }

    pub fn set_object(
        &mut self,
        input: impl Into<SceneObjectInput>,
        material: Option<Material>,
    ) -> MeshwireResult<()> {
        let command = SetObject::new(input, material, Some(self.path.clone()))?;
        self.send(command)
    }

    pub fn set_transform(&mut self, matrix: DMat4) -> MeshwireResult<()> {
        let command = SetTransform::new(matrix, self.path.clone());
        self.send(command)
    }

    pub fn set_property(&mut self, key: &str, value: impl Into<Value>) -> MeshwireResult<()> {
        let command = SetProperty::new(key, value, self.path.clone());
        self.send(command)
    }

    pub fn set_animation(
        &mut self,
        animation: &Animation,
        play: bool,
        repetitions: u32,
    ) -> MeshwireResult<()> {
        let command = SetAnimation::new(animation)
            .play(play)
            .repetitions(repetitions);
        self.send(command)
    }

    pub fn delete(&mut self) -> MeshwireResult<()> {
        let command = Delete::new(self.path.clone());
        self.send(command)
    }

    pub fn capture_image(&mut self) -> MeshwireResult<()> {
        self.send(CaptureImage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Geometry;
    use crate::object::Object;
    use crate::transport::RecordingTransport;
    use meshwire_core::MeshwireError;
    use serde_json::json;

    #[test]
    fn test_child_handles_share_transport() {
        let mut transport = RecordingTransport::new();
        {
            let mut vis = Visualizer::new(&mut transport);
            vis.set_object(Geometry::cuboid([0.5; 3]), None).unwrap();
            vis.at("/Background")
                .unwrap()
                .set_property("top_color", json!([1, 0, 0]))
                .unwrap();
            vis.at("robot/arm").unwrap().delete().unwrap();
            vis.capture_image().unwrap();
        }
        assert_eq!(
            transport.kinds(),
            vec!["set_object", "set_property", "delete", "capture_image"]
        );
        assert_eq!(transport.sent[1]["path"], "Background");
        assert_eq!(transport.sent[2]["path"], "robot/arm");
    }

    #[test]
    fn test_nested_at_resolves_relative() {
        let mut transport = RecordingTransport::new();
        let mut vis = Visualizer::with_path(&mut transport, "scene".parse().unwrap());
        let mut robot = vis.at("robot").unwrap();
        robot.at("arm").unwrap().set_transform(DMat4::IDENTITY).unwrap();
        drop(vis);
        assert_eq!(transport.sent[0]["path"], "scene/robot/arm");
    }

    #[test]
    fn test_conflicting_set_object_sends_nothing() {
        let mut transport = RecordingTransport::new();
        let mut vis = Visualizer::new(&mut transport);
        let object = Object::mesh(Geometry::sphere(1.0), Material::default());
        let err = vis.set_object(object, Some(Material::default())).unwrap_err();
        assert!(matches!(err, MeshwireError::ConflictingArguments(_)));
        drop(vis);
        assert!(transport.sent.is_empty());
    }

    #[test]
    fn test_set_animation_through_visualizer() {
        let mut anim = Animation::new();
        anim.at_frame(&"box".parse().unwrap(), 0.0)
            .set_property("visible", "boolean", true);

        let mut transport = RecordingTransport::new();
        Visualizer::new(&mut transport)
            .set_animation(&anim, false, 3)
            .unwrap();
        assert_eq!(transport.sent[0]["options"]["repetitions"], 3);
        assert_eq!(transport.sent[0]["options"]["play"], false);
    }
}
