//! Court markings.
//!
//! Painted lines are thin boxes so they keep a visible width; the center
//! circle is a flat ring and the three-point arcs are tubes. Each key is
//! laid out along a canonical axis and the finished group is turned 90
//! degrees onto the court's long axis.

use std::f32::consts::FRAC_PI_2;

use glam::{Vec2, Vec3};

use crate::config::CourtConfig;
use crate::error::GeometryResult;
use crate::material::Material;
use crate::node::Node;
use crate::primitive::Primitive;
use crate::side::Side;
use crate::tessellate::{ArcSpec, LineStyle, arc_tube, chord_boxes, chord_segments};

/// Build every court marking under a single `markings` node.
pub fn build_markings(config: &CourtConfig) -> GeometryResult<Node> {
    let mut markings = Node::new("markings")
        .with_child(outline(config))
        .with_child(center_line(config))
        .with_child(center_circle(config));

    for side in Side::ALL {
        markings.add_child(three_point_arc(config, side)?);
    }
    for side in Side::ALL {
        markings.add_child(key_area(config, side)?);
    }

    tracing::debug!(nodes = markings.node_count(), "Built court markings");
    Ok(markings)
}

fn line_material(config: &CourtConfig) -> Material {
    Material::basic(config.markings.line_color)
}

/// Flat painted box spanning `x_size` by `z_size` centered at (x, z).
fn line_box(name: &str, config: &CourtConfig, x_size: f32, z_size: f32, x: f32, z: f32) -> Node {
    let m = &config.markings;
    Node::mesh(
        name,
        Primitive::Box {
            width: x_size,
            height: m.line_thickness,
            depth: z_size,
        },
        line_material(config),
    )
    .with_position(Vec3::new(x, m.height, z))
}

fn outline(config: &CourtConfig) -> Node {
    let length = config.surface.length;
    let width = config.surface.width;
    let line = config.markings.line_width;

    Node::new("outline").with_children([
        line_box("outline_near", config, length, line, 0.0, -width / 2.0),
        line_box("outline_far", config, length, line, 0.0, width / 2.0),
        line_box("outline_left", config, line, width, -length / 2.0, 0.0),
        line_box("outline_right", config, line, width, length / 2.0, 0.0),
    ])
}

fn center_line(config: &CourtConfig) -> Node {
    line_box(
        "center_line",
        config,
        config.markings.line_width,
        config.surface.width,
        0.0,
        0.0,
    )
}

fn center_circle(config: &CourtConfig) -> Node {
    let m = &config.markings;
    Node::mesh(
        "center_circle",
        Primitive::Ring {
            inner: m.center_circle_inner,
            outer: m.center_circle_outer,
            segments: m.center_circle_segments,
        },
        line_material(config).double_sided(),
    )
    .with_position(Vec3::new(0.0, m.height, 0.0))
    .with_euler(-FRAC_PI_2, 0.0, 0.0)
}

/// Angular range of the three-point arc at `side`, in degrees.
///
/// Both ranges open toward the baseline and bulge toward center court.
pub fn three_point_range(config: &CourtConfig, side: Side) -> (f32, f32) {
    let overshoot = config.markings.three_point_overshoot;
    match side {
        Side::Left => (-overshoot, 180.0 + overshoot),
        Side::Right => (-180.0 - overshoot, overshoot),
    }
}

fn three_point_arc(config: &CourtConfig, side: Side) -> GeometryResult<Node> {
    let m = &config.markings;
    let (start, end) = three_point_range(config, side);
    let spec = ArcSpec::new(
        Vec2::new(0.0, side.sign() * m.three_point_center),
        m.three_point_radius,
        start,
        end,
        m.three_point_segments,
    )?;

    Ok(Node::mesh(
        format!("three_point_{}", side.name()),
        arc_tube(
            &spec,
            m.three_point_height,
            m.tube_radius,
            m.tube_tubular_segments,
            m.tube_radial_segments,
        ),
        line_material(config),
    ))
}

/// Free-throw lane at `side`.
///
/// Built with the lane running along local Z at `sign * center`, then the
/// whole group is turned +90 degrees about Y so local Z lands on world X.
fn key_area(config: &CourtConfig, side: Side) -> GeometryResult<Node> {
    let k = &config.key;
    let line = config.markings.line_width;
    let center = side.sign() * k.center;
    // Free-throw end of the lane faces center court
    let free_throw_z = center - side.sign() * k.length / 2.0;

    let mut key = Node::new(format!("key_{}", side.name())).with_children([
        line_box("edge_baseline_near", config, k.width, line, 0.0, center - k.length / 2.0),
        line_box("edge_baseline_far", config, k.width, line, 0.0, center + k.length / 2.0),
        line_box("edge_side_a", config, line, k.length, -k.width / 2.0, center),
        line_box("edge_side_b", config, line, k.length, k.width / 2.0, center),
        line_box(
            "free_throw_line",
            config,
            k.width + k.free_throw_line_extension,
            line,
            0.0,
            free_throw_z,
        ),
    ]);

    // Half circle bulging away from the basket
    let (start, end) = match side {
        Side::Left => (0.0, 180.0),
        Side::Right => (180.0, 360.0),
    };
    let arc = ArcSpec::new(
        Vec2::new(0.0, free_throw_z),
        k.free_throw_radius,
        start,
        end,
        k.free_throw_segments,
    )?;
    let style = LineStyle {
        width: line,
        thickness: config.markings.line_thickness,
        height: config.markings.height,
    };
    key = key.with_children(chord_boxes(
        "free_throw_arc",
        &chord_segments(&arc.sample_local()),
        style,
        &line_material(config),
    ));

    let mark_x = k.width / 2.0 + k.hash_margin;
    for (i, offset) in k.hash_offsets.iter().enumerate() {
        // Offsets are measured toward center court, so they flip per end
        let z = center - side.sign() * offset;
        for (j, sign) in [-1.0, 1.0].into_iter().enumerate() {
            key.add_child(line_box(
                &format!("hash_{i}_{j}"),
                config,
                k.hash_length,
                k.hash_width,
                sign * mark_x,
                z,
            ));
        }
    }

    Ok(key.with_euler(0.0, FRAC_PI_2, 0.0))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn world_position(root: &Node, path: &[&str]) -> Vec3 {
        root.world_transform_at(path)
            .unwrap()
            .transform_point3(Vec3::ZERO)
    }

    #[test]
    fn test_marking_structure() {
        let markings = build_markings(&CourtConfig::default()).unwrap();
        let names: Vec<&str> = markings.children().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "outline",
                "center_line",
                "center_circle",
                "three_point_left",
                "three_point_right",
                "key_left",
                "key_right",
            ]
        );
        assert_eq!(markings.find("outline").unwrap().children().len(), 4);
    }

    #[test]
    fn test_key_contents() {
        let markings = build_markings(&CourtConfig::default()).unwrap();
        let key = markings.find("key_left").unwrap();
        let arcs = key
            .children()
            .iter()
            .filter(|c| c.name.starts_with("free_throw_arc"))
            .count();
        let hashes = key
            .children()
            .iter()
            .filter(|c| c.name.starts_with("hash_"))
            .count();
        assert_eq!(arcs, 64);
        assert_eq!(hashes, 8);
    }

    #[test]
    fn test_keys_align_with_long_axis() {
        let markings = build_markings(&CourtConfig::default()).unwrap();

        let left = world_position(&markings, &["key_left", "free_throw_line"]);
        let right = world_position(&markings, &["key_right", "free_throw_line"]);
        assert_relative_eq!(left.x, -9.1, epsilon = 1e-4);
        assert_relative_eq!(right.x, 9.1, epsilon = 1e-4);
        assert_relative_eq!(left.z, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_free_throw_arcs_face_center_court() {
        let markings = build_markings(&CourtConfig::default()).unwrap();
        for (side, sign) in [("key_left", -1.0), ("key_right", 1.0)] {
            let key = markings.find(side).unwrap();
            let rotation = key.local_matrix();
            for arc in key
                .children()
                .iter()
                .filter(|c| c.name.starts_with("free_throw_arc"))
            {
                let p = rotation.transform_point3(arc.transform.translation);
                // Every chord sits between the free-throw line and center court
                assert!(sign * p.x <= 9.1 + 1e-4);
                assert!(sign * p.x >= 9.1 - 1.8 - 1e-4);
            }
        }
    }

    #[test]
    fn test_hash_marks_mirror() {
        let markings = build_markings(&CourtConfig::default()).unwrap();
        let left = world_position(&markings, &["key_left", "hash_3_1"]);
        let right = world_position(&markings, &["key_right", "hash_3_1"]);
        assert_relative_eq!(left.x, -right.x, epsilon = 1e-4);
        assert_relative_eq!(left.z, right.z, epsilon = 1e-4);
    }

    #[test]
    fn test_three_point_arcs_mirror() {
        let config = CourtConfig::default();
        let markings = build_markings(&config).unwrap();
        let path = |name: &str| match &markings.find(name).unwrap().mesh {
            Some(mesh) => match &mesh.primitive {
                Primitive::Tube { path, .. } => path.clone(),
                other => panic!("unexpected primitive {}", other.type_name()),
            },
            None => panic!("arc has no mesh"),
        };

        let left = path("three_point_left");
        let right = path("three_point_right");
        assert_eq!(left.len(), 65);

        // The left apex reaches 6.75 m in from the left arc center
        let max_left = left.iter().map(|p| p.x).fold(f32::MIN, f32::max);
        assert_relative_eq!(max_left, -13.5 + 6.75, epsilon = 1e-3);
        let min_right = right.iter().map(|p| p.x).fold(f32::MAX, f32::min);
        assert_relative_eq!(min_right, 13.5 - 6.75, epsilon = 1e-3);
        assert!(left.iter().all(|p| p.y == config.markings.three_point_height));
    }
}
