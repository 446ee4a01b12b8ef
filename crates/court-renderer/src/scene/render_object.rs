//! Render object definition.

use court_core::Material;
use glam::{Mat4, Vec3};
use uuid::Uuid;

use super::BoundingBox;
use crate::mesh::MeshHandle;

/// A draw-ready object: one mesh node of the court with its world transform.
#[derive(Debug, Clone)]
pub struct RenderObject {
    /// Unique identifier for this object.
    pub id: Uuid,

    /// Name of the scene node this object came from.
    pub name: String,

    /// Handle to the mesh data stored in the scene's mesh cache.
    pub mesh: MeshHandle,

    /// World transform matrix.
    pub transform: Mat4,

    pub material: Material,

    /// Whether this object is visible.
    pub visible: bool,

    pub cast_shadow: bool,
    pub receive_shadow: bool,

    /// Local bounding box (before transform).
    pub bounds: BoundingBox,

    /// Render layer for sorting and filtering.
    pub layer: RenderLayer,
}

impl RenderObject {
    /// Creates a new render object with default settings.
    pub fn new(name: impl Into<String>, mesh: MeshHandle, bounds: BoundingBox) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            mesh,
            transform: Mat4::IDENTITY,
            material: Material::default(),
            visible: true,
            cast_shadow: false,
            receive_shadow: false,
            bounds,
            layer: RenderLayer::Opaque,
        }
    }

    /// Sets the transform matrix.
    pub fn with_transform(mut self, transform: Mat4) -> Self {
        self.transform = transform;
        self
    }

    /// Sets the material and picks the matching layer.
    pub fn with_material(mut self, material: Material) -> Self {
        if material.transparent && self.layer == RenderLayer::Opaque {
            self.layer = RenderLayer::Transparent;
        }
        self.material = material;
        self
    }

    pub fn with_shadows(mut self, cast: bool, receive: bool) -> Self {
        self.cast_shadow = cast;
        self.receive_shadow = receive;
        self
    }

    /// Sets the visibility.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Sets the render layer.
    pub fn with_layer(mut self, layer: RenderLayer) -> Self {
        self.layer = layer;
        self
    }

    /// Returns the world-space bounding box.
    pub fn world_bounds(&self) -> BoundingBox {
        self.bounds.transform(&self.transform)
    }

    /// World-space origin of the object.
    pub fn world_position(&self) -> Vec3 {
        self.transform.transform_point3(Vec3::ZERO)
    }
}

/// Render layer for sorting and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RenderLayer {
    /// Opaque triangle geometry.
    #[default]
    Opaque,
    /// Line lists (net strands).
    Lines,
    /// Transparent geometry (rendered back-to-front).
    Transparent,
}

impl RenderLayer {
    /// Returns the sort order for this layer (lower = rendered first).
    pub fn sort_order(&self) -> i32 {
        match self {
            RenderLayer::Opaque => 0,
            RenderLayer::Lines => 50,
            RenderLayer::Transparent => 100,
        }
    }

    /// Returns true if this layer uses alpha blending.
    pub fn uses_blending(&self) -> bool {
        matches!(self, RenderLayer::Transparent)
    }
}
