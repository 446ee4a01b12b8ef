//! Transform nodes forming the court scene graph.
//!
//! Every node owns its children outright. The scene is static once built,
//! so world transforms are computed on demand by walking from the root.

use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::material::Material;
use crate::primitive::Primitive;

/// Local transform (translation, rotation, scale).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// Rotation from per-axis angles in radians, applied X then Y then Z.
    pub fn euler(x: f32, y: f32, z: f32) -> Quat {
        Quat::from_euler(EulerRot::XYZ, x, y, z)
    }

    /// Compose as `T * R * S`.
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

/// Geometry and material attached to a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub primitive: Primitive,
    pub material: Material,
}

/// A scene graph node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
    pub mesh: Option<Mesh>,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
    children: Vec<Node>,
}

impl Node {
    /// Create an empty group node.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::IDENTITY,
            mesh: None,
            cast_shadow: false,
            receive_shadow: false,
            children: Vec::new(),
        }
    }

    /// Create a node carrying geometry.
    pub fn mesh(name: impl Into<String>, primitive: Primitive, material: Material) -> Self {
        Self {
            mesh: Some(Mesh {
                primitive,
                material,
            }),
            ..Self::new(name)
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.translation = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.transform.rotation = rotation;
        self
    }

    /// Set the rotation from per-axis angles in radians.
    pub fn with_euler(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.rotation = Transform::euler(x, y, z);
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.transform.scale = scale;
        self
    }

    pub fn with_shadows(mut self, cast: bool, receive: bool) -> Self {
        self.cast_shadow = cast;
        self.receive_shadow = receive;
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// Append a child, taking ownership of it.
    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn local_matrix(&self) -> Mat4 {
        self.transform.to_mat4()
    }

    /// Find the first descendant (or self) with the given name, depth-first.
    pub fn find(&self, name: &str) -> Option<&Node> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(name))
    }

    /// Follow a path of child names starting below this node.
    pub fn find_path(&self, path: &[&str]) -> Option<&Node> {
        let mut current = self;
        for name in path {
            current = current.children.iter().find(|c| c.name == *name)?;
        }
        Some(current)
    }

    /// World transform of the node at `path`, treating this node as the root.
    pub fn world_transform_at(&self, path: &[&str]) -> Option<Mat4> {
        let mut current = self;
        let mut transform = self.local_matrix();
        for name in path {
            current = current.children.iter().find(|c| c.name == *name)?;
            transform *= current.local_matrix();
        }
        Some(transform)
    }

    /// Visit every node depth-first with its world transform.
    pub fn visit_world<'a>(&'a self, parent: Mat4, f: &mut impl FnMut(&'a Node, Mat4)) {
        let world = parent * self.local_matrix();
        f(self, world);
        for child in &self.children {
            child.visit_world(world, f);
        }
    }

    /// Flatten the tree into (node, world transform) pairs.
    pub fn world_transforms(&self) -> Vec<(&Node, Mat4)> {
        let mut out = Vec::new();
        self.visit_world(Mat4::IDENTITY, &mut |node, world| out.push((node, world)));
        out
    }

    /// Total number of nodes including self.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }

    /// Number of nodes carrying geometry.
    pub fn mesh_count(&self) -> usize {
        usize::from(self.mesh.is_some()) + self.children.iter().map(Node::mesh_count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    fn unit_box() -> Primitive {
        Primitive::Box {
            width: 1.0,
            height: 1.0,
            depth: 1.0,
        }
    }

    #[test]
    fn test_world_transform_composes_ancestors() {
        let root = Node::new("root")
            .with_position(Vec3::new(10.0, 0.0, 0.0))
            .with_child(
                Node::new("group")
                    .with_euler(0.0, FRAC_PI_2, 0.0)
                    .with_child(
                        Node::mesh("leaf", unit_box(), Material::default())
                            .with_position(Vec3::new(1.0, 2.0, 0.0)),
                    ),
            );

        let world = root.world_transform_at(&["group", "leaf"]).unwrap();
        let p = world.transform_point3(Vec3::ZERO);
        // (1, 2, 0) rotated 90 degrees about Y is (0, 2, -1)
        assert!((p - Vec3::new(10.0, 2.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_counts_and_find() {
        let mut root = Node::new("root");
        root.add_child(Node::mesh("a", unit_box(), Material::default()));
        root.add_child(Node::new("b").with_child(Node::mesh("c", unit_box(), Material::default())));

        assert_eq!(root.node_count(), 4);
        assert_eq!(root.mesh_count(), 2);
        assert!(root.find("c").is_some());
        assert!(root.find_path(&["b", "c"]).is_some());
        assert!(root.find_path(&["c"]).is_none());
    }

    #[test]
    fn test_world_transforms_visit_order() {
        let root = Node::new("root")
            .with_child(Node::new("a").with_child(Node::new("a1")))
            .with_child(Node::new("b"));

        let names: Vec<&str> = root
            .world_transforms()
            .iter()
            .map(|(n, _)| n.name.as_str())
            .collect();
        assert_eq!(names, vec!["root", "a", "a1", "b"]);
    }

    #[test]
    fn test_scale_applies_after_rotation() {
        let node = Node::new("n")
            .with_scale(Vec3::new(-1.0, -1.0, 1.0))
            .with_position(Vec3::new(0.0, 1.0, 0.0));
        let p = node.local_matrix().transform_point3(Vec3::new(1.0, 1.0, 1.0));
        assert!((p - Vec3::new(-1.0, 0.0, 1.0)).length() < 1e-6);
    }
}
