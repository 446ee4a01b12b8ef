//! CPU mesh generation for scene primitives.
//!
//! Every primitive a court node can carry is triangulated here (or turned
//! into a line list). Meshes are shared through [`MeshCache`], which hands
//! out one handle per distinct primitive.

use std::collections::HashMap;
use std::f32::consts::{PI, TAU};

use court_core::Primitive;
use glam::{Quat, Vec3};

use crate::scene::BoundingBox;
use crate::vertex::MeshVertex;

/// Handle to a mesh stored in the [`MeshCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MeshHandle(u64);

impl MeshHandle {
    /// Returns the raw handle value.
    pub fn raw(&self) -> u64 {
        self.0
    }

    /// Creates a handle from a raw value.
    pub fn from_raw(value: u64) -> Self {
        Self(value)
    }
}

/// How indices are assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Topology {
    #[default]
    Triangles,
    Lines,
}

/// CPU mesh data, ready for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
    pub topology: Topology,
    pub bounds: BoundingBox,
}

impl MeshData {
    pub fn new(vertices: Vec<MeshVertex>, indices: Vec<u32>, topology: Topology) -> Self {
        let bounds = BoundingBox::from_points(vertices.iter().map(|v| Vec3::from(v.position)));
        Self {
            vertices,
            indices,
            topology,
            bounds,
        }
    }

    pub fn empty(topology: Topology) -> Self {
        Self::new(Vec::new(), Vec::new(), topology)
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        match self.topology {
            Topology::Triangles => self.indices.len() / 3,
            Topology::Lines => 0,
        }
    }

    pub fn line_count(&self) -> usize {
        match self.topology {
            Topology::Triangles => 0,
            Topology::Lines => self.indices.len() / 2,
        }
    }

    /// Triangulate (or line-list) a primitive.
    pub fn from_primitive(primitive: &Primitive) -> Self {
        match primitive {
            Primitive::Box {
                width,
                height,
                depth,
            } => generate_box(Vec3::new(*width, *height, *depth)),
            Primitive::Plane { width, height } => generate_plane(*width, *height),
            Primitive::Ring {
                inner,
                outer,
                segments,
            } => generate_ring(*inner, *outer, *segments),
            Primitive::Torus {
                radius,
                tube,
                radial_segments,
                tubular_segments,
            } => generate_torus(*radius, *tube, *radial_segments, *tubular_segments),
            Primitive::Sphere {
                radius,
                width_segments,
                height_segments,
            } => generate_sphere(*radius, *width_segments, *height_segments),
            Primitive::Tube {
                path,
                radius,
                tubular_segments,
                radial_segments,
            } => generate_tube(path, *radius, *tubular_segments, *radial_segments),
            Primitive::Line { start, end } => generate_line(*start, *end),
        }
    }
}

/// Axis-aligned box centered on the origin.
pub fn generate_box(size: Vec3) -> MeshData {
    let half = size * 0.5;
    // (normal, u, v) with u x v = normal
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, u, v) in faces {
        let base = vertices.len() as u32;
        for (su, sv) in [(-1.0_f32, -1.0_f32), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let position = (normal + u * su + v * sv) * half;
            vertices.push(MeshVertex::new(
                position.to_array(),
                normal.to_array(),
                [(su + 1.0) * 0.5, (1.0 - sv) * 0.5],
            ));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    MeshData::new(vertices, indices, Topology::Triangles)
}

/// Rectangle in the XY plane facing +Z.
pub fn generate_plane(width: f32, height: f32) -> MeshData {
    let (hw, hh) = (width * 0.5, height * 0.5);
    let vertices = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)]
        .into_iter()
        .map(|(su, sv): (f32, f32)| {
            MeshVertex::new(
                [su * hw, sv * hh, 0.0],
                [0.0, 0.0, 1.0],
                [(su + 1.0) * 0.5, (sv + 1.0) * 0.5],
            )
        })
        .collect();
    MeshData::new(vertices, vec![0, 1, 2, 0, 2, 3], Topology::Triangles)
}

/// Flat annulus in the XY plane facing +Z.
pub fn generate_ring(inner: f32, outer: f32, segments: u32) -> MeshData {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((segments as usize + 1) * 2);
    for i in 0..=segments {
        let (sin, cos) = (i as f32 / segments as f32 * TAU).sin_cos();
        for radius in [inner, outer] {
            let uv_scale = radius / outer.max(f32::EPSILON) * 0.5;
            vertices.push(MeshVertex::new(
                [cos * radius, sin * radius, 0.0],
                [0.0, 0.0, 1.0],
                [0.5 + cos * uv_scale, 0.5 + sin * uv_scale],
            ));
        }
    }

    let mut indices = Vec::with_capacity(segments as usize * 6);
    for i in 0..segments {
        let a = i * 2;
        let (b, c, d) = (a + 1, a + 3, a + 2);
        indices.extend_from_slice(&[a, b, c, a, c, d]);
    }
    MeshData::new(vertices, indices, Topology::Triangles)
}

/// Torus around the Z axis.
pub fn generate_torus(
    radius: f32,
    tube: f32,
    radial_segments: u32,
    tubular_segments: u32,
) -> MeshData {
    let radial = radial_segments.max(3);
    let tubular = tubular_segments.max(3);

    let mut vertices = Vec::with_capacity(((radial + 1) * (tubular + 1)) as usize);
    for j in 0..=radial {
        let v = j as f32 / radial as f32 * TAU;
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * TAU;
            let ring = radius + tube * v.cos();
            let position = Vec3::new(ring * u.cos(), ring * u.sin(), tube * v.sin());
            let center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            vertices.push(MeshVertex::new(
                position.to_array(),
                (position - center).normalize_or_zero().to_array(),
                [i as f32 / tubular as f32, j as f32 / radial as f32],
            ));
        }
    }

    let indices = grid_indices(radial, tubular);
    MeshData::new(vertices, indices, Topology::Triangles)
}

/// UV sphere centered on the origin.
pub fn generate_sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let width = width_segments.max(3);
    let height = height_segments.max(2);

    let mut vertices = Vec::with_capacity(((width + 1) * (height + 1)) as usize);
    for iy in 0..=height {
        let v = iy as f32 / height as f32;
        let (sin_theta, cos_theta) = (v * PI).sin_cos();
        for ix in 0..=width {
            let u = ix as f32 / width as f32;
            let (sin_phi, cos_phi) = (u * TAU).sin_cos();
            let normal = Vec3::new(-cos_phi * sin_theta, cos_theta, sin_phi * sin_theta);
            vertices.push(MeshVertex::new(
                (normal * radius).to_array(),
                normal.normalize_or_zero().to_array(),
                [u, 1.0 - v],
            ));
        }
    }

    let row = width + 1;
    let mut indices = Vec::with_capacity((width * height * 6) as usize);
    for iy in 0..height {
        for ix in 0..width {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            // Pole rows collapse to a single triangle
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    MeshData::new(vertices, indices, Topology::Triangles)
}

/// Circular tube swept along a polyline with parallel-transported frames.
pub fn generate_tube(
    path: &[Vec3],
    radius: f32,
    tubular_segments: u32,
    radial_segments: u32,
) -> MeshData {
    let Some(polyline) = Polyline::new(path) else {
        return MeshData::empty(Topology::Triangles);
    };
    let tubular = tubular_segments.max(1);
    let radial = radial_segments.max(3);

    let samples: Vec<(Vec3, Vec3)> = (0..=tubular)
        .map(|i| polyline.sample(i as f32 / tubular as f32))
        .collect();

    // Initial normal from the axis least aligned with the first tangent
    let first = samples[0].1;
    let abs = first.abs();
    let axis = if abs.x <= abs.y && abs.x <= abs.z {
        Vec3::X
    } else if abs.y <= abs.z {
        Vec3::Y
    } else {
        Vec3::Z
    };
    let mut normal = first.cross(first.cross(axis).normalize_or_zero());
    let mut previous_tangent = first;

    let mut vertices = Vec::with_capacity(((tubular + 1) * (radial + 1)) as usize);
    for (i, (point, tangent)) in samples.iter().enumerate() {
        let turn = previous_tangent.cross(*tangent);
        if turn.length() > f32::EPSILON {
            let angle = previous_tangent.dot(*tangent).clamp(-1.0, 1.0).acos();
            normal = Quat::from_axis_angle(turn.normalize(), angle) * normal;
        }
        previous_tangent = *tangent;
        let binormal = tangent.cross(normal);

        for j in 0..=radial {
            let (sin, cos) = (j as f32 / radial as f32 * TAU).sin_cos();
            let direction = (normal * cos + binormal * sin).normalize_or_zero();
            vertices.push(MeshVertex::new(
                (*point + direction * radius).to_array(),
                direction.to_array(),
                [i as f32 / tubular as f32, j as f32 / radial as f32],
            ));
        }
    }

    let indices = grid_indices(tubular, radial);
    MeshData::new(vertices, indices, Topology::Triangles)
}

/// Two-vertex line list.
pub fn generate_line(start: Vec3, end: Vec3) -> MeshData {
    let vertices = vec![
        MeshVertex::new(start.to_array(), [0.0, 1.0, 0.0], [0.0, 0.0]),
        MeshVertex::new(end.to_array(), [0.0, 1.0, 0.0], [1.0, 0.0]),
    ];
    MeshData::new(vertices, vec![0, 1], Topology::Lines)
}

/// Quad grid of `(rows + 1) x (columns + 1)` vertices.
fn grid_indices(rows: u32, columns: u32) -> Vec<u32> {
    let stride = columns + 1;
    let mut indices = Vec::with_capacity((rows * columns * 6) as usize);
    for j in 1..=rows {
        for i in 1..=columns {
            let a = stride * j + i - 1;
            let b = stride * (j - 1) + i - 1;
            let c = stride * (j - 1) + i;
            let d = stride * j + i;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    indices
}

/// Arc-length parameterized polyline.
struct Polyline<'a> {
    points: &'a [Vec3],
    /// Cumulative length at each point.
    distances: Vec<f32>,
}

impl<'a> Polyline<'a> {
    fn new(points: &'a [Vec3]) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        let mut distances = Vec::with_capacity(points.len());
        let mut total = 0.0;
        distances.push(total);
        for pair in points.windows(2) {
            total += pair[0].distance(pair[1]);
            distances.push(total);
        }
        (total > f32::EPSILON && total.is_finite()).then_some(Self { points, distances })
    }

    fn total(&self) -> f32 {
        self.distances.last().copied().unwrap_or(0.0)
    }

    /// Point and unit tangent at fraction `t` of the length.
    fn sample(&self, t: f32) -> (Vec3, Vec3) {
        let target = t.clamp(0.0, 1.0) * self.total();
        let last = self.points.len() - 2;
        let mut index = self
            .distances
            .partition_point(|d| *d <= target)
            .saturating_sub(1)
            .min(last);
        // Skip zero-length pieces so the tangent stays defined
        while index < last && self.distances[index + 1] - self.distances[index] <= f32::EPSILON {
            index += 1;
        }

        let (a, b) = (self.points[index], self.points[index + 1]);
        let span = self.distances[index + 1] - self.distances[index];
        let local = if span > f32::EPSILON {
            (target - self.distances[index]) / span
        } else {
            0.0
        };
        (a.lerp(b, local.clamp(0.0, 1.0)), (b - a).normalize_or_zero())
    }
}

/// Deduplicating store of generated meshes.
#[derive(Debug, Default)]
pub struct MeshCache {
    entries: Vec<(Primitive, MeshHandle)>,
    meshes: HashMap<MeshHandle, MeshData>,
    next_handle: u64,
}

impl MeshCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for `primitive`, generating the mesh on first use.
    pub fn get_or_create(&mut self, primitive: &Primitive) -> MeshHandle {
        if let Some((_, handle)) = self.entries.iter().find(|(p, _)| p == primitive) {
            return *handle;
        }

        self.next_handle += 1;
        let handle = MeshHandle(self.next_handle);
        let data = MeshData::from_primitive(primitive);
        tracing::trace!(
            handle = handle.raw(),
            kind = primitive.type_name(),
            vertices = data.vertices.len(),
            "Generated mesh"
        );
        self.entries.push((primitive.clone(), handle));
        self.meshes.insert(handle, data);
        handle
    }

    pub fn get(&self, handle: MeshHandle) -> Option<&MeshData> {
        self.meshes.get(&handle)
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}
