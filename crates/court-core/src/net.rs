//! Shrinking-ring net.
//!
//! The net hangs below the rim as a cone-like lattice: a few horizontal
//! rings of geometrically decreasing radius, joined by straight strands at
//! evenly spaced angles around the rim.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, GeometryResult};
use crate::material::Material;
use crate::node::Node;
use crate::primitive::Primitive;

/// Net shape parameters that do not depend on the rim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NetConfig {
    /// Total draped length below the rim.
    pub length: f32,
    pub strand_count: u32,
    /// Number of intermediate rings.
    pub ring_count: u32,
    pub shrink_factor: f32,
    pub ring_thickness: f32,
    pub ring_radial_segments: u32,
    pub ring_tubular_segments: u32,
    pub color: u32,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self {
            length: 0.5,
            strand_count: 16,
            ring_count: 2,
            shrink_factor: 0.8,
            ring_thickness: 0.005,
            ring_radial_segments: 8,
            ring_tubular_segments: 32,
            color: 0xffffff,
        }
    }
}

/// Everything needed to generate one net.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetDescriptor {
    pub rim_radius: f32,
    pub strand_count: u32,
    pub ring_count: u32,
    pub shrink_factor: f32,
    pub length: f32,
}

impl NetDescriptor {
    /// Upper bound on intermediate rings.
    pub const MAX_RINGS: u32 = 64;
    /// Upper bound on strands around the rim.
    pub const MAX_STRANDS: u32 = 256;

    pub fn new(rim_radius: f32, config: &NetConfig) -> Self {
        Self {
            rim_radius,
            strand_count: config.strand_count,
            ring_count: config.ring_count,
            shrink_factor: config.shrink_factor,
            length: config.length,
        }
    }

    pub fn validate(&self) -> GeometryResult<()> {
        if !(self.shrink_factor > 0.0 && self.shrink_factor < 1.0) {
            return Err(GeometryError::InvalidNet(format!(
                "shrink factor must be in (0, 1), got {}",
                self.shrink_factor
            )));
        }
        if self.strand_count == 0 || self.strand_count > Self::MAX_STRANDS {
            return Err(GeometryError::InvalidNet(format!(
                "strand count must be in 1..={}, got {}",
                Self::MAX_STRANDS,
                self.strand_count
            )));
        }
        if self.ring_count > Self::MAX_RINGS {
            return Err(GeometryError::InvalidNet(format!(
                "ring count must be at most {}, got {}",
                Self::MAX_RINGS,
                self.ring_count
            )));
        }
        let positive = |v: f32| v > 0.0;
        if !positive(self.rim_radius) || !positive(self.length) {
            return Err(GeometryError::InvalidNet(format!(
                "rim radius and length must be positive, got {} and {}",
                self.rim_radius, self.length
            )));
        }
        Ok(())
    }

    /// Vertical distance between consecutive rings.
    pub fn vertical_spacing(&self) -> f32 {
        self.length / (self.ring_count as f32 + 1.0)
    }
}

/// A horizontal ring of the net, relative to the rim center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetRing {
    pub radius: f32,
    /// Offset below the rim (negative).
    pub depth: f32,
}

/// Straight strand piece, relative to the rim center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strand {
    pub start: Vec3,
    pub end: Vec3,
}

/// Generated rings and strands of one net.
#[derive(Debug, Clone, PartialEq)]
pub struct NetGeometry {
    /// Intermediate rings followed by the bottom ring.
    pub rings: Vec<NetRing>,
    pub strands: Vec<Strand>,
}

impl NetGeometry {
    pub fn generate(descriptor: &NetDescriptor) -> GeometryResult<Self> {
        descriptor.validate()?;

        let spacing = descriptor.vertical_spacing();
        let mut rings = Vec::with_capacity(descriptor.ring_count as usize + 1);
        let mut radius = descriptor.rim_radius;
        for i in 0..descriptor.ring_count {
            radius *= descriptor.shrink_factor;
            rings.push(NetRing {
                radius,
                depth: -spacing * (i + 1) as f32,
            });
        }
        // One more shrink than the last intermediate ring
        rings.push(NetRing {
            radius: radius * descriptor.shrink_factor,
            depth: -descriptor.length,
        });

        let mut strands =
            Vec::with_capacity(descriptor.strand_count as usize * rings.len());
        for k in 0..descriptor.strand_count {
            let angle = k as f32 / descriptor.strand_count as f32 * TAU;
            let (sin, cos) = angle.sin_cos();
            let point = |r: f32, y: f32| Vec3::new(cos * r, y, sin * r);

            let mut previous = point(descriptor.rim_radius, 0.0);
            for ring in &rings {
                let next = point(ring.radius, ring.depth);
                strands.push(Strand {
                    start: previous,
                    end: next,
                });
                previous = next;
            }
        }

        Ok(Self { rings, strands })
    }

    /// Bottom ring (always present).
    pub fn bottom_ring(&self) -> Option<&NetRing> {
        self.rings.last()
    }

    /// Scene node for the net, positioned at the rim center.
    pub fn into_node(self, anchor: Vec3, config: &NetConfig) -> Node {
        let ring_material = Material::standard(config.color);
        let strand_material = Material::line(config.color);

        let rings = self.rings.iter().enumerate().map(|(i, ring)| {
            Node::mesh(
                format!("ring_{i}"),
                Primitive::Torus {
                    radius: ring.radius,
                    tube: config.ring_thickness,
                    radial_segments: config.ring_radial_segments,
                    tubular_segments: config.ring_tubular_segments,
                },
                ring_material.clone(),
            )
            .with_position(Vec3::new(0.0, ring.depth, 0.0))
            .with_euler(FRAC_PI_2, 0.0, 0.0)
        });

        let strands = self.strands.iter().enumerate().map(|(i, strand)| {
            Node::mesh(
                format!("strand_{i}"),
                Primitive::Line {
                    start: strand.start,
                    end: strand.end,
                },
                strand_material.clone(),
            )
        });

        Node::new("net")
            .with_position(anchor)
            .with_children(rings)
            .with_children(strands)
    }
}
