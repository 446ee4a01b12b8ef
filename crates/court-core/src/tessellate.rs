//! Arc tessellation.
//!
//! Arcs are described in a local 2D plane and sampled at equal angular
//! increments. Two renderings are derived from the samples: a tube swept
//! along the points, and a chain of thin boxes laid along each chord.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, GeometryResult};
use crate::material::Material;
use crate::node::Node;
use crate::primitive::Primitive;

/// Chords shorter than this are dropped.
pub const DEGENERATE_EPSILON: f32 = 1e-6;

/// A circular arc in its local plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcSpec {
    pub center: Vec2,
    pub radius: f32,
    pub start_degrees: f32,
    pub end_degrees: f32,
    pub segments: u32,
}

impl ArcSpec {
    pub fn new(
        center: Vec2,
        radius: f32,
        start_degrees: f32,
        end_degrees: f32,
        segments: u32,
    ) -> GeometryResult<Self> {
        if segments == 0 {
            return Err(GeometryError::InvalidSegments(segments));
        }
        if radius.is_nan() || radius <= 0.0 {
            return Err(GeometryError::InvalidRadius(radius));
        }
        Ok(Self {
            center,
            radius,
            start_degrees,
            end_degrees,
            segments,
        })
    }

    /// Angle of sample `i` in radians.
    pub fn angle_at(&self, i: u32) -> f32 {
        let sweep = self.end_degrees - self.start_degrees;
        (self.start_degrees + sweep * i as f32 / self.segments as f32).to_radians()
    }

    /// `segments + 1` points along the arc in its local plane.
    pub fn sample_local(&self) -> Vec<Vec2> {
        (0..=self.segments)
            .map(|i| {
                let angle = self.angle_at(i);
                self.center + Vec2::new(angle.cos(), angle.sin()) * self.radius
            })
            .collect()
    }

    /// Samples mapped onto the court floor at `height`.
    pub fn sample_court(&self, height: f32) -> Vec<Vec3> {
        self.sample_local()
            .into_iter()
            .map(|p| to_court_plane(p, height))
            .collect()
    }

    /// Exact length of the arc.
    pub fn arc_length(&self) -> f32 {
        (self.end_degrees - self.start_degrees).to_radians().abs() * self.radius
    }
}

/// Map an arc-local point onto the court floor.
///
/// The local forward axis (y) becomes the court's long axis (X), and the
/// local x axis becomes -Z: a fixed 90 degree turn about the vertical.
pub fn to_court_plane(point: Vec2, height: f32) -> Vec3 {
    Vec3::new(point.y, height, -point.x)
}

/// A straight piece between two consecutive arc samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChordSegment {
    pub midpoint: Vec2,
    pub length: f32,
    /// Planar direction, `atan2(dy, dx)`.
    pub angle: f32,
}

/// Chords between consecutive points, skipping degenerate ones.
pub fn chord_segments(points: &[Vec2]) -> Vec<ChordSegment> {
    points
        .windows(2)
        .filter_map(|pair| {
            let delta = pair[1] - pair[0];
            let length = delta.length();
            if length.is_nan() || length < DEGENERATE_EPSILON {
                return None;
            }
            Some(ChordSegment {
                midpoint: (pair[0] + pair[1]) * 0.5,
                length,
                angle: delta.y.atan2(delta.x),
            })
        })
        .collect()
}

/// Style of a painted line drawn as a flat box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub width: f32,
    pub thickness: f32,
    pub height: f32,
}

/// Tube following the arc on the court floor.
pub fn arc_tube(
    spec: &ArcSpec,
    height: f32,
    radius: f32,
    tubular_segments: u32,
    radial_segments: u32,
) -> Primitive {
    Primitive::Tube {
        path: spec.sample_court(height),
        radius,
        tubular_segments,
        radial_segments,
    }
}

/// One thin box per chord, in a frame where local `y` of the arc is `Z`.
///
/// Each box runs along its chord: positioned at the chord midpoint and
/// turned by `-angle` about the vertical.
pub fn chord_boxes(
    name: &str,
    segments: &[ChordSegment],
    style: LineStyle,
    material: &Material,
) -> Vec<Node> {
    segments
        .iter()
        .enumerate()
        .map(|(i, seg)| {
            Node::mesh(
                format!("{name}_{i}"),
                Primitive::Box {
                    width: seg.length,
                    height: style.thickness,
                    depth: style.width,
                },
                material.clone(),
            )
            .with_position(Vec3::new(seg.midpoint.x, style.height, seg.midpoint.y))
            .with_euler(0.0, -seg.angle, 0.0)
        })
        .collect()
}
