//! Draw-ready scene.
//!
//! The composed court hierarchy is flattened once into render objects
//! with baked world transforms. The court never moves after composition,
//! so only the camera changes between frames.

mod bounds;
mod render_object;

pub use bounds::*;
pub use render_object::*;

use std::cmp::Ordering;

use court_core::{CourtScene, LightingRig, Node};
use glam::{Mat4, Vec3};
use uuid::Uuid;

use crate::mesh::{MeshCache, MeshData, MeshHandle};

/// Flattened court scene with its meshes and lights.
#[derive(Debug, Default)]
pub struct RenderScene {
    objects: Vec<RenderObject>,
    meshes: MeshCache,
    lighting: LightingRig,
}

impl RenderScene {
    /// Creates a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten a composed court scene.
    pub fn from_court(court: &CourtScene) -> Self {
        let mut scene = Self::from_node(&court.root);
        scene.lighting = court.lighting.clone();
        scene
    }

    /// Flatten every mesh node under `root`.
    pub fn from_node(root: &Node) -> Self {
        let mut scene = Self::new();
        root.visit_world(Mat4::IDENTITY, &mut |node, world| scene.add_node(node, world));
        tracing::debug!(
            objects = scene.objects.len(),
            meshes = scene.meshes.len(),
            "Flattened scene"
        );
        scene
    }

    fn add_node(&mut self, node: &Node, world: Mat4) {
        let Some(mesh) = &node.mesh else {
            return;
        };
        let handle = self.meshes.get_or_create(&mesh.primitive);
        let bounds = self
            .meshes
            .get(handle)
            .map(|data| data.bounds)
            .unwrap_or_default();

        let layer = if mesh.primitive.is_line() {
            RenderLayer::Lines
        } else {
            RenderLayer::Opaque
        };
        let object = RenderObject::new(node.name.clone(), handle, bounds)
            .with_transform(world)
            .with_layer(layer)
            .with_material(mesh.material.clone())
            .with_shadows(node.cast_shadow, node.receive_shadow);
        self.add_object(object);
    }

    /// Adds an object to the scene.
    pub fn add_object(&mut self, object: RenderObject) -> Uuid {
        let id = object.id;
        self.objects.push(object);
        id
    }

    /// Gets an object by ID.
    pub fn get_object(&self, id: Uuid) -> Option<&RenderObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// First object created from the node called `name`.
    pub fn find_by_name(&self, name: &str) -> Option<&RenderObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    /// Returns the number of objects in the scene.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns true if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Objects in hierarchy order.
    pub fn objects(&self) -> impl Iterator<Item = &RenderObject> {
        self.objects.iter()
    }

    pub fn meshes(&self) -> &MeshCache {
        &self.meshes
    }

    pub fn mesh(&self, handle: MeshHandle) -> Option<&MeshData> {
        self.meshes.get(handle)
    }

    pub fn lighting(&self) -> &LightingRig {
        &self.lighting
    }

    pub fn background(&self) -> [f32; 4] {
        self.lighting.background
    }

    /// Visible objects in draw order for a camera at `eye`.
    ///
    /// Layers draw in [`RenderLayer::sort_order`]; blended objects draw
    /// farthest first.
    pub fn draw_order(&self, eye: Vec3) -> Vec<&RenderObject> {
        let mut visible: Vec<&RenderObject> = self.objects.iter().filter(|o| o.visible).collect();
        visible.sort_by(|a, b| {
            a.layer
                .sort_order()
                .cmp(&b.layer.sort_order())
                .then_with(|| {
                    if a.layer.uses_blending() {
                        let da = a.world_position().distance_squared(eye);
                        let db = b.world_position().distance_squared(eye);
                        db.partial_cmp(&da).unwrap_or(Ordering::Equal)
                    } else {
                        Ordering::Equal
                    }
                })
        });
        visible
    }

    /// Computes the bounding box of all visible objects.
    pub fn compute_bounds(&self) -> Option<BoundingBox> {
        let mut result: Option<BoundingBox> = None;

        for obj in self.objects.iter().filter(|o| o.visible) {
            let transformed_bounds = obj.world_bounds();
            if transformed_bounds.is_empty() {
                continue;
            }

            result = Some(match result {
                Some(current) => current.union(&transformed_bounds),
                None => transformed_bounds,
            });
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use court_core::{CourtConfig, ImageProvider, TextureHandle, build_court_scene};

    use super::*;

    struct NullProvider;

    impl ImageProvider for NullProvider {
        fn request(&self, _name: &str) -> TextureHandle {
            TextureHandle::default()
        }
    }

    fn court() -> RenderScene {
        let scene = build_court_scene(&CourtConfig::default(), &NullProvider).unwrap();
        RenderScene::from_court(&scene)
    }

    #[test]
    fn test_flatten_court() {
        let scene = court();
        let root = build_court_scene(&CourtConfig::default(), &NullProvider).unwrap();
        assert_eq!(scene.len(), root.root.mesh_count());
        // Many painted lines share a mesh
        assert!(scene.meshes().len() < scene.len());
        assert_eq!(scene.lighting().directional.len(), 4);
    }

    #[test]
    fn test_layers() {
        let scene = court();
        assert_eq!(scene.find_by_name("strand_0").unwrap().layer, RenderLayer::Lines);
        assert_eq!(scene.find_by_name("backboard").unwrap().layer, RenderLayer::Transparent);
        assert_eq!(scene.find_by_name("floor").unwrap().layer, RenderLayer::Opaque);
    }

    #[test]
    fn test_bounds_cover_apron() {
        let bounds = court().compute_bounds().unwrap();
        assert_relative_eq!(bounds.min.x, -17.0, epsilon = 1e-3);
        assert_relative_eq!(bounds.max.x, 17.0, epsilon = 1e-3);
        assert!(bounds.max.y > 3.0);
    }

    #[test]
    fn test_added_object_found_by_id() {
        let mut scene = court();
        let before = scene.len();
        let floor = scene.find_by_name("floor").unwrap();
        let overlay = RenderObject::new("overlay", floor.mesh, floor.bounds)
            .with_transform(Mat4::from_translation(Vec3::new(0.0, 0.01, 0.0)));

        let id = scene.add_object(overlay);
        assert_eq!(scene.len(), before + 1);
        assert_eq!(scene.get_object(id).unwrap().name, "overlay");
        assert!(scene.get_object(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_draw_order_blends_last_far_first() {
        let scene = court();
        let eye = Vec3::new(20.0, 8.0, 0.0);
        let order = scene.draw_order(eye);
        assert_eq!(order.len(), scene.len());

        let first_blended = order
            .iter()
            .position(|o| o.layer.uses_blending())
            .unwrap();
        assert!(order[first_blended..].iter().all(|o| o.layer.uses_blending()));

        let distances: Vec<f32> = order[first_blended..]
            .iter()
            .map(|o| o.world_position().distance(eye))
            .collect();
        assert!(distances.windows(2).all(|d| d[0] >= d[1]));
    }
}
