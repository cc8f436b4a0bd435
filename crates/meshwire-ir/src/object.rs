use serde_json::{json, Value};
use uuid::Uuid;

use crate::geometry::Geometry;
use crate::lower::Lower;
use crate::material::Material;

/// three.js object JSON format version emitted in `metadata`.
pub const OBJECT_FORMAT_VERSION: f64 = 4.5;

/// Render object type wrapping a geometry and a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Mesh,
    Points,
    Line,
    LineSegments,
    LineLoop,
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectKind::Mesh => write!(f, "Mesh"),
            ObjectKind::Points => write!(f, "Points"),
            ObjectKind::Line => write!(f, "Line"),
            ObjectKind::LineSegments => write!(f, "LineSegments"),
            ObjectKind::LineLoop => write!(f, "LineLoop"),
        }
    }
}

/// A geometry paired with a material, ready to be placed in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    uuid: Uuid,
    pub kind: ObjectKind,
    pub geometry: Geometry,
    pub material: Material,
}

impl Object {
    pub fn new(kind: ObjectKind, geometry: Geometry, material: Material) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            kind,
            geometry,
            material,
        }
    }

    pub fn mesh(geometry: Geometry, material: Material) -> Self {
        Self::new(ObjectKind::Mesh, geometry, material)
    }

    pub fn points(geometry: Geometry, material: Material) -> Self {
        Self::new(ObjectKind::Points, geometry, material)
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }
}

impl Lower for Object {
    fn lower(&self) -> Value {
        json!({
            "metadata": { "version": OBJECT_FORMAT_VERSION, "type": "Object" },
            "geometries": [self.geometry.lower()],
            "materials": [self.material.lower()],
            "object": {
                "uuid": self.uuid.to_string(),
                "type": self.kind.to_string(),
                "geometry": self.geometry.uuid().to_string(),
                "material": self.material.uuid().to_string(),
                "matrix": self.geometry.intrinsic_transform().to_cols_array(),
            },
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CameraKind {
    Orthographic {
        left: f64,
        right: f64,
        top: f64,
        bottom: f64,
        near: f64,
        far: f64,
        zoom: f64,
    },
    Perspective {
        fov: f64,
        aspect: f64,
        near: f64,
        far: f64,
        zoom: f64,
        film_gauge: f64,
        film_offset: f64,
        focus: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    uuid: Uuid,
    pub kind: CameraKind,
}

impl Camera {
    pub fn new(kind: CameraKind) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            kind,
        }
    }

    pub fn orthographic(left: f64, right: f64, top: f64, bottom: f64, near: f64, far: f64) -> Self {
        Self::new(CameraKind::Orthographic {
            left,
            right,
            top,
            bottom,
            near,
            far,
            zoom: 1.0,
        })
    }

    /// Perspective camera with three.js defaults apart from the field of view.
    pub fn perspective(fov: f64, aspect: f64) -> Self {
        Self::new(CameraKind::Perspective {
            fov,
            aspect,
            near: 0.1,
            far: 2000.0,
            zoom: 1.0,
            film_gauge: 35.0,
            film_offset: 0.0,
            focus: 10.0,
        })
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }
}

impl Lower for Camera {
    fn lower(&self) -> Value {
        let uuid = self.uuid.to_string();
        let object = match &self.kind {
            CameraKind::Orthographic {
                left,
                right,
                top,
                bottom,
                near,
                far,
                zoom,
            } => json!({
                "uuid": uuid,
                "type": "OrthographicCamera",
                "left": left,
                "right": right,
                "top": top,
                "bottom": bottom,
                "near": near,
                "far": far,
                "zoom": zoom,
            }),
            CameraKind::Perspective {
                fov,
                aspect,
                near,
                far,
                zoom,
                film_gauge,
                film_offset,
                focus,
            } => json!({
                "uuid": uuid,
                "type": "PerspectiveCamera",
                "aspect": aspect,
                "far": far,
                "filmGauge": film_gauge,
                "filmOffset": film_offset,
                "focus": focus,
                "fov": fov,
                "near": near,
                "zoom": zoom,
            }),
        };
        json!({ "object": object })
    }
}

/// Anything that can be placed at a scene path by `set_object`.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneObject {
    Object(Object),
    Camera(Camera),
}

impl Lower for SceneObject {
    fn lower(&self) -> Value {
        match self {
            SceneObject::Object(o) => o.lower(),
            SceneObject::Camera(c) => c.lower(),
        }
    }
}

impl From<Object> for SceneObject {
    fn from(o: Object) -> Self {
        SceneObject::Object(o)
    }
}

impl From<Camera> for SceneObject {
    fn from(c: Camera) -> Self {
        SceneObject::Camera(c)
    }
}
