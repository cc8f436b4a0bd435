use serde_json::{json, Value};
use uuid::Uuid;

use crate::lower::Lower;

/// Parameters shared by all lit/unlit surface materials.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshMaterial {
    /// 0xRRGGBB
    pub color: u32,
    pub reflectivity: f64,
    /// three.js side constant (0 front, 1 back, 2 double).
    pub side: u8,
    /// Explicit transparency flag; derived from `opacity` when unset.
    pub transparent: Option<bool>,
    pub opacity: f64,
    pub linewidth: f64,
    pub wireframe: bool,
    pub wireframe_linewidth: f64,
    pub vertex_colors: bool,
}

impl Default for MeshMaterial {
    fn default() -> Self {
        Self {
            color: 0xffffff,
            reflectivity: 0.5,
            side: 2,
            transparent: None,
            opacity: 1.0,
            linewidth: 1.0,
            wireframe: false,
            wireframe_linewidth: 1.0,
            vertex_colors: false,
        }
    }
}

impl MeshMaterial {
    pub fn with_color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_wireframe(mut self, wireframe: bool) -> Self {
        self.wireframe = wireframe;
        self
    }

    fn is_transparent(&self) -> bool {
        self.transparent.unwrap_or(self.opacity < 1.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MaterialKind {
    MeshPhong(MeshMaterial),
    MeshLambert(MeshMaterial),
    MeshBasic(MeshMaterial),
    MeshToon(MeshMaterial),
    /// Point-cloud material; `size` is in world units.
    Points { size: f64, color: u32 },
}

impl MaterialKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            MaterialKind::MeshPhong(_) => "MeshPhongMaterial",
            MaterialKind::MeshLambert(_) => "MeshLambertMaterial",
            MaterialKind::MeshBasic(_) => "MeshBasicMaterial",
            MaterialKind::MeshToon(_) => "MeshToonMaterial",
            MaterialKind::Points { .. } => "PointsMaterial",
        }
    }
}

/// A material record with a stable identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    uuid: Uuid,
    pub kind: MaterialKind,
}

impl Material {
    pub fn new(kind: MaterialKind) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            kind,
        }
    }

    pub fn phong(params: MeshMaterial) -> Self {
        Self::new(MaterialKind::MeshPhong(params))
    }

    pub fn lambert(params: MeshMaterial) -> Self {
        Self::new(MaterialKind::MeshLambert(params))
    }

    pub fn basic(params: MeshMaterial) -> Self {
        Self::new(MaterialKind::MeshBasic(params))
    }

    pub fn toon(params: MeshMaterial) -> Self {
        Self::new(MaterialKind::MeshToon(params))
    }

    pub fn points(size: f64, color: u32) -> Self {
        Self::new(MaterialKind::Points { size, color })
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    pub fn is_points(&self) -> bool {
        matches!(self.kind, MaterialKind::Points { .. })
    }
}

impl Default for Material {
    /// Opaque, lit surface material.
    fn default() -> Self {
        Self::phong(MeshMaterial::default())
    }
}

impl Lower for Material {
    fn lower(&self) -> Value {
        let uuid = self.uuid.to_string();
        let type_name = self.kind.type_name();
        match &self.kind {
            MaterialKind::Points { size, color } => json!({
                "uuid": uuid,
                "type": type_name,
                "color": color,
                "size": size,
                "vertexColors": 2,
            }),
            MaterialKind::MeshPhong(p)
            | MaterialKind::MeshLambert(p)
            | MaterialKind::MeshBasic(p)
            | MaterialKind::MeshToon(p) => json!({
                "uuid": uuid,
                "type": type_name,
                "color": p.color,
                "reflectivity": p.reflectivity,
                "side": p.side,
                "transparent": p.is_transparent(),
                "opacity": p.opacity,
                "linewidth": p.linewidth,
                "wireframe": p.wireframe,
                "wireframeLinewidth": p.wireframe_linewidth,
                "vertexColors": if p.vertex_colors { 2 } else { 0 },
            }),
        }
    }
}
