//! Geometric primitives carried by scene nodes.
//!
//! Primitives are described parametrically in node-local space; turning
//! them into triangles is the renderer's job.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Parametric geometry payload of a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    /// Axis-aligned box centered on the origin.
    Box { width: f32, height: f32, depth: f32 },
    /// Rectangle in the local XY plane facing +Z.
    Plane { width: f32, height: f32 },
    /// Flat annulus in the local XY plane.
    Ring { inner: f32, outer: f32, segments: u32 },
    /// Torus around the local Z axis.
    Torus {
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
    },
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    /// Circular tube swept along a polyline.
    Tube {
        path: Vec<Vec3>,
        radius: f32,
        tubular_segments: u32,
        radial_segments: u32,
    },
    /// Single line segment.
    Line { start: Vec3, end: Vec3 },
}

impl Primitive {
    /// Short type name for logging.
    pub fn type_name(&self) -> &'static str {
        match self {
            Primitive::Box { .. } => "Box",
            Primitive::Plane { .. } => "Plane",
            Primitive::Ring { .. } => "Ring",
            Primitive::Torus { .. } => "Torus",
            Primitive::Sphere { .. } => "Sphere",
            Primitive::Tube { .. } => "Tube",
            Primitive::Line { .. } => "Line",
        }
    }

    /// Check if the primitive renders as lines rather than triangles.
    pub fn is_line(&self) -> bool {
        matches!(self, Primitive::Line { .. })
    }

    /// Local-space axis-aligned bounds as (min, max).
    pub fn local_bounds(&self) -> (Vec3, Vec3) {
        match self {
            Primitive::Box {
                width,
                height,
                depth,
            } => {
                let half = Vec3::new(*width, *height, *depth) * 0.5;
                (-half, half)
            }
            Primitive::Plane { width, height } => {
                let half = Vec3::new(width * 0.5, height * 0.5, 0.0);
                (-half, half)
            }
            Primitive::Ring { outer, .. } => {
                let half = Vec3::new(*outer, *outer, 0.0);
                (-half, half)
            }
            Primitive::Torus { radius, tube, .. } => {
                let r = radius + tube;
                (Vec3::new(-r, -r, -tube), Vec3::new(r, r, *tube))
            }
            Primitive::Sphere { radius, .. } => (Vec3::splat(-radius), Vec3::splat(*radius)),
            Primitive::Tube { path, radius, .. } => {
                let mut min = Vec3::splat(f32::INFINITY);
                let mut max = Vec3::splat(f32::NEG_INFINITY);
                for p in path {
                    min = min.min(*p);
                    max = max.max(*p);
                }
                if path.is_empty() {
                    return (Vec3::ZERO, Vec3::ZERO);
                }
                (min - Vec3::splat(*radius), max + Vec3::splat(*radius))
            }
            Primitive::Line { start, end } => (start.min(*end), start.max(*end)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_bounds() {
        let primitive = Primitive::Box {
            width: 2.0,
            height: 0.1,
            depth: 4.0,
        };
        let (min, max) = primitive.local_bounds();
        assert_eq!(min, Vec3::new(-1.0, -0.05, -2.0));
        assert_eq!(max, Vec3::new(1.0, 0.05, 2.0));
    }

    #[test]
    fn test_tube_bounds_include_radius() {
        let primitive = Primitive::Tube {
            path: vec![Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0)],
            radius: 0.5,
            tubular_segments: 4,
            radial_segments: 4,
        };
        let (min, max) = primitive.local_bounds();
        assert_eq!(min, Vec3::new(-0.5, -0.5, -0.5));
        assert_eq!(max, Vec3::new(1.5, 0.5, 0.5));
    }

    #[test]
    fn test_line_primitive() {
        let line = Primitive::Line {
            start: Vec3::new(1.0, 0.0, 0.0),
            end: Vec3::new(0.0, -1.0, 0.0),
        };
        assert!(line.is_line());
        assert_eq!(line.type_name(), "Line");
        assert_eq!(line.local_bounds().0, Vec3::new(0.0, -1.0, 0.0));
    }
}
