use meshwire_core::math::{rotation_matrix, DMat4, DVec3};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::lower::Lower;

/// The shape carried by a [`Geometry`].
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryKind {
    /// Axis-aligned box with the given (x, y, z) edge lengths.
    Box { lengths: [f64; 3] },
    Sphere { radius: f64 },
    /// Cylinder along the y axis in three.js; re-oriented along z by its
    /// intrinsic transform.
    Cylinder {
        height: f64,
        radius_top: f64,
        radius_bottom: f64,
        radial_segments: u32,
    },
    /// Raw point cloud. Colors, when present, are aligned with positions.
    Points {
        positions: Vec<[f32; 3]>,
        colors: Option<Vec<[f32; 3]>>,
    },
}

/// A geometry record with a stable identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    uuid: Uuid,
    pub kind: GeometryKind,
}

impl Geometry {
    pub fn new(kind: GeometryKind) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            kind,
        }
    }

    pub fn cuboid(lengths: [f64; 3]) -> Self {
        Self::new(GeometryKind::Box { lengths })
    }

    pub fn sphere(radius: f64) -> Self {
        Self::new(GeometryKind::Sphere { radius })
    }

    pub fn cylinder(height: f64, radius: f64) -> Self {
        Self::new(GeometryKind::Cylinder {
            height,
            radius_top: radius,
            radius_bottom: radius,
            radial_segments: 50,
        })
    }

    pub fn points(positions: Vec<[f32; 3]>, colors: Option<Vec<[f32; 3]>>) -> Self {
        Self::new(GeometryKind::Points { positions, colors })
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Transform applied to the geometry inside the object that wraps it.
    pub fn intrinsic_transform(&self) -> DMat4 {
        match self.kind {
            GeometryKind::Cylinder { .. } => {
                rotation_matrix(std::f64::consts::FRAC_PI_2, DVec3::X)
            }
            _ => DMat4::IDENTITY,
        }
    }
}

fn pack_vec3_array(values: &[[f32; 3]]) -> Value {
    json!({
        "itemSize": 3,
        "type": "Float32Array",
        "array": values.iter().flatten().copied().collect::<Vec<f32>>(),
        "normalized": false,
    })
}

impl Lower for Geometry {
    fn lower(&self) -> Value {
        let uuid = self.uuid.to_string();
        match &self.kind {
            GeometryKind::Box { lengths } => json!({
                "uuid": uuid,
                "type": "BoxGeometry",
                "width": lengths[0],
                "height": lengths[1],
                "depth": lengths[2],
            }),
            GeometryKind::Sphere { radius } => json!({
                "uuid": uuid,
                "type": "SphereGeometry",
                "radius": radius,
                "widthSegments": 20,
                "heightSegments": 20,
            }),
            GeometryKind::Cylinder {
                height,
                radius_top,
                radius_bottom,
                radial_segments,
            } => json!({
                "uuid": uuid,
                "type": "CylinderGeometry",
                "radiusTop": radius_top,
                "radiusBottom": radius_bottom,
                "height": height,
                "radialSegments": radial_segments,
            }),
            GeometryKind::Points { positions, colors } => {
                let mut attributes = serde_json::Map::new();
                attributes.insert("position".into(), pack_vec3_array(positions));
                if let Some(colors) = colors {
                    attributes.insert("color".into(), pack_vec3_array(colors));
                }
                json!({
                    "uuid": uuid,
                    "type": "BufferGeometry",
                    "data": { "attributes": attributes },
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_lowering() {
        let g = Geometry::cuboid([0.5, 1.0, 2.0]);
        let v = g.lower();
        assert_eq!(v["type"], "BoxGeometry");
        assert_eq!(v["width"], 0.5);
        assert_eq!(v["depth"], 2.0);
        assert_eq!(v["uuid"], g.uuid().to_string());
    }

    #[test]
    fn test_points_lowering_flattens_positions() {
        let g = Geometry::points(vec![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]], None);
        let v = g.lower();
        let position = &v["data"]["attributes"]["position"];
        assert_eq!(position["itemSize"], 3);
        assert_eq!(position["array"].as_array().unwrap().len(), 6);
        assert_eq!(position["array"][3], 4.0);
        assert!(v["data"]["attributes"].get("color").is_none());
    }

    #[test]
    fn test_points_lowering_with_colors() {
        let g = Geometry::points(vec![[0.0; 3]], Some(vec![[1.0, 0.0, 0.0]]));
        let v = g.lower();
        assert_eq!(v["data"]["attributes"]["color"]["array"][0], 1.0);
    }

    #[test]
    fn test_cylinder_intrinsic_transform_rotates_about_x() {
        let g = Geometry::cylinder(1.0, 0.2);
        let m = g.intrinsic_transform();
        // y axis maps onto z
        assert!((m.y_axis.z - 1.0).abs() < 1e-12);
        assert_eq!(Geometry::sphere(1.0).intrinsic_transform(), DMat4::IDENTITY);
    }
}
