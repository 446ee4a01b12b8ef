//! Goal assemblies.
//!
//! A goal is a base platform plus a support structure (pole, angled arm,
//! backboard, frame, rim and net). The support structure is always laid out
//! for the left end, with the backboard toward local +X. The right end
//! reuses the same layout turned a half revolution about the vertical axis.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec3;

use crate::config::{CourtConfig, HoopConfig};
use crate::error::GeometryResult;
use crate::material::Material;
use crate::net::{NetDescriptor, NetGeometry};
use crate::node::Node;
use crate::primitive::Primitive;
use crate::side::Side;

/// Derived positions of the support structure parts, in support-local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupportLayout {
    pub pole_center: Vec3,
    /// Arm tilt from the horizontal, radians.
    pub arm_angle: f32,
    pub arm_center: Vec3,
    /// Far end of the arm.
    pub arm_tip: Vec3,
    pub backboard_center: Vec3,
    pub connector_center: Vec3,
    pub connector_length: f32,
    pub frame_center: Vec3,
    pub rim_center: Vec3,
}

impl SupportLayout {
    pub fn from_config(hoop: &HoopConfig) -> Self {
        let base_height = hoop.base_size[1];
        let pole_top = base_height + hoop.pole_height;
        let arm_angle = hoop.arm_angle.to_radians();
        let half_arm = hoop.arm_length / 2.0;
        let (sin, cos) = arm_angle.sin_cos();

        let arm_center = Vec3::new(
            cos * half_arm - hoop.arm_inset,
            pole_top + sin * half_arm - hoop.arm_drop,
            0.0,
        );
        let arm_tip = arm_center + Vec3::new(cos * half_arm, sin * half_arm, 0.0);

        // Fixed gap so the board never touches the arm
        let backboard_center = arm_tip + Vec3::new(hoop.backboard_offset, 0.0, 0.0);

        let connector_length = hoop.backboard_offset + hoop.connector_overlap;
        let connector_center = Vec3::new(
            arm_tip.x + connector_length / 2.0 - hoop.connector_inset,
            arm_tip.y - hoop.connector_drop,
            0.0,
        );

        let frame_center = backboard_center - Vec3::new(hoop.frame_thickness / 2.0, 0.0, 0.0);

        // Rim height follows the board: centered under the shooter's square
        let rim_center = Vec3::new(
            backboard_center.x + hoop.rim_offset,
            backboard_center.y - hoop.square_vertical_offset - hoop.square_height / 2.0,
            backboard_center.z,
        );

        Self {
            pole_center: Vec3::new(0.0, base_height + hoop.pole_height / 2.0, 0.0),
            arm_angle,
            arm_center,
            arm_tip,
            backboard_center,
            connector_center,
            connector_length,
            frame_center,
            rim_center,
        }
    }
}

/// Rotation about Y that carries the left-end layout to `side`.
pub fn mirror_angle(side: Side) -> f32 {
    match side {
        Side::Left => 0.0,
        Side::Right => PI,
    }
}

/// Build the goal assembly at one end of the court.
pub fn build_hoop_assembly(config: &CourtConfig, side: Side) -> GeometryResult<Node> {
    let hoop = &config.hoop;
    let layout = SupportLayout::from_config(hoop);

    let support = build_support(config, &layout)?
        .with_position(Vec3::new(side.sign() * hoop.support_offset, 0.0, 0.0))
        .with_euler(0.0, mirror_angle(side), 0.0);

    let assembly = Node::new(format!("hoop_{}", side.name()))
        .with_child(build_base(hoop, side))
        .with_child(support);

    tracing::debug!(
        side = side.name(),
        nodes = assembly.node_count(),
        "Built hoop assembly"
    );
    Ok(assembly)
}

/// Base platform beyond the end line.
///
/// The base sits on the canonical depth axis; its group is turned 90
/// degrees onto the long axis and another half turn for the right end.
fn build_base(hoop: &HoopConfig, side: Side) -> Node {
    let [width, height, depth] = hoop.base_size;
    let base = Node::mesh(
        "base",
        Primitive::Box {
            width,
            height,
            depth,
        },
        Material::phong(hoop.base_color),
    )
    .with_position(Vec3::new(0.0, height / 2.0 + hoop.base_lift, -hoop.base_offset))
    .with_shadows(true, true);

    Node::new("base_group")
        .with_euler(0.0, FRAC_PI_2 + mirror_angle(side), 0.0)
        .with_child(base)
}

fn build_support(config: &CourtConfig, layout: &SupportLayout) -> GeometryResult<Node> {
    let hoop = &config.hoop;
    let steel = Material::standard(hoop.steel_color);

    let pole = Node::mesh(
        "pole",
        Primitive::Box {
            width: hoop.pole_width,
            height: hoop.pole_height,
            depth: hoop.pole_width,
        },
        steel.clone(),
    )
    .with_position(layout.pole_center)
    .with_shadows(true, false);

    let arm = Node::mesh(
        "arm",
        Primitive::Box {
            width: hoop.arm_length,
            height: hoop.arm_thickness,
            depth: hoop.pole_width,
        },
        steel.clone(),
    )
    .with_position(layout.arm_center)
    .with_euler(0.0, 0.0, layout.arm_angle)
    .with_shadows(true, false);

    let backboard = Node::mesh(
        "backboard",
        Primitive::Plane {
            width: hoop.backboard_width,
            height: hoop.backboard_height,
        },
        Material::phong(hoop.backboard_color)
            .with_opacity(hoop.backboard_opacity)
            .with_shininess(hoop.backboard_shininess)
            .double_sided(),
    )
    .with_position(layout.backboard_center)
    .with_euler(0.0, FRAC_PI_2, 0.0)
    .with_shadows(true, false);

    // Bridges the gap between the arm tip and the board, parallel to the floor
    let connector = Node::mesh(
        "connector",
        Primitive::Box {
            width: layout.connector_length,
            height: hoop.arm_thickness,
            depth: hoop.pole_width,
        },
        steel,
    )
    .with_position(layout.connector_center)
    .with_shadows(true, false);

    let rim = Node::mesh(
        "rim",
        Primitive::Torus {
            radius: hoop.rim_radius,
            tube: hoop.rim_tube,
            radial_segments: 16,
            tubular_segments: 60,
        },
        Material::phong(hoop.rim_color).with_shininess(hoop.rim_shininess),
    )
    .with_position(layout.rim_center)
    .with_euler(FRAC_PI_2, 0.0, 0.0)
    .with_shadows(true, false);

    let net = NetGeometry::generate(&NetDescriptor::new(hoop.rim_radius, &config.net))?
        .into_node(layout.rim_center, &config.net);

    Ok(Node::new("support").with_children([
        pole,
        arm,
        backboard,
        connector,
        build_frame(hoop, layout),
        rim,
        net,
    ]))
}

/// Border around the backboard plus the shooter's square.
///
/// Bars are laid out in the board's plane (local XY) and the group is
/// turned to match the board, shifted half a bar off the glass.
fn build_frame(hoop: &HoopConfig, layout: &SupportLayout) -> Node {
    let t = hoop.frame_thickness;
    let overhang = hoop.frame_overhang;
    let material = Material::phong(hoop.frame_color);
    let bar = |name: &str, width: f32, height: f32, x: f32, y: f32| {
        Node::mesh(
            name,
            Primitive::Box {
                width,
                height,
                depth: t,
            },
            material.clone(),
        )
        .with_position(Vec3::new(x, y, 0.0))
    };

    let (bw, bh) = (hoop.backboard_width, hoop.backboard_height);
    let (sw, sh) = (hoop.square_width, hoop.square_height);
    let drop = hoop.square_vertical_offset;

    Node::new("frame")
        .with_position(layout.frame_center)
        .with_euler(0.0, FRAC_PI_2, 0.0)
        .with_children([
            bar("border_top", bw + overhang, t, 0.0, bh / 2.0 + t / 2.0),
            bar("border_bottom", bw + overhang, t, 0.0, -bh / 2.0 - t / 2.0),
            bar("border_left", t, bh + overhang, -bw / 2.0 - t / 2.0, 0.0),
            bar("border_right", t, bh + overhang, bw / 2.0 + t / 2.0, 0.0),
            bar("square_top", sw + overhang, t, 0.0, sh / 2.0 + t / 2.0 - drop),
            bar("square_bottom", sw + overhang, t, 0.0, -sh / 2.0 - t / 2.0 - drop),
            bar("square_left", t, sh + overhang, -sw / 2.0 - t / 2.0, -drop),
            bar("square_right", t, sh + overhang, sw / 2.0 + t / 2.0, -drop),
        ])
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn world_point(assembly: &Node, path: &[&str]) -> Vec3 {
        assembly
            .world_transform_at(path)
            .unwrap()
            .transform_point3(Vec3::ZERO)
    }

    #[test]
    fn test_layout_derivations() {
        let hoop = HoopConfig::default();
        let layout = SupportLayout::from_config(&hoop);

        assert_relative_eq!(layout.backboard_center.x - layout.arm_tip.x, hoop.backboard_offset);
        assert_relative_eq!(layout.backboard_center.y, layout.arm_tip.y);
        assert_relative_eq!(
            layout.rim_center.y,
            layout.backboard_center.y - 0.2 - 0.45 / 2.0,
            epsilon = 1e-6
        );
        assert!(layout.rim_center.x > layout.backboard_center.x);
        assert_relative_eq!(layout.arm_tip.x, 1.481354, epsilon = 1e-4);
        assert_relative_eq!(layout.arm_tip.y, 3.120712, epsilon = 1e-4);
    }

    #[test]
    fn test_rim_follows_backboard() {
        let mut hoop = HoopConfig::default();
        let before = SupportLayout::from_config(&hoop);
        hoop.pole_height += 0.5;
        let after = SupportLayout::from_config(&hoop);
        assert_relative_eq!(after.rim_center.y - before.rim_center.y, 0.5, epsilon = 1e-5);
    }

    #[test]
    fn test_rims_mirror_across_center() {
        let config = CourtConfig::default();
        let left = build_hoop_assembly(&config, Side::Left).unwrap();
        let right = build_hoop_assembly(&config, Side::Right).unwrap();

        let left_rim = world_point(&left, &["support", "rim"]);
        let right_rim = world_point(&right, &["support", "rim"]);

        assert_relative_eq!(left_rim.x, -15.5 + 1.881354, epsilon = 1e-4);
        assert_relative_eq!(right_rim.x, -left_rim.x, epsilon = 1e-5);
        assert_relative_eq!(right_rim.y, left_rim.y, epsilon = 1e-6);
        assert_relative_eq!(right_rim.z, left_rim.z, epsilon = 1e-5);
    }

    #[test]
    fn test_assemblies_related_by_half_turn() {
        let config = CourtConfig::default();
        let left = build_hoop_assembly(&config, Side::Left).unwrap();
        let right = build_hoop_assembly(&config, Side::Right).unwrap();

        // Local sub-hierarchies are identical; only the support transform differs
        let left_support = left.find("support").unwrap();
        let right_support = right.find("support").unwrap();
        assert_eq!(left_support.children(), right_support.children());

        for path in [
            &["support", "pole"][..],
            &["support", "arm"],
            &["support", "backboard"],
            &["support", "frame", "square_left"],
            &["support", "net", "ring_2"],
            &["base_group", "base"],
        ] {
            let l = world_point(&left, path);
            let r = world_point(&right, path);
            assert_relative_eq!(r.x, -l.x, epsilon = 1e-4);
            assert_relative_eq!(r.y, l.y, epsilon = 1e-5);
            assert_relative_eq!(r.z, -l.z, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_base_beyond_end_line() {
        let config = CourtConfig::default();
        let left = build_hoop_assembly(&config, Side::Left).unwrap();
        let base = world_point(&left, &["base_group", "base"]);
        assert_relative_eq!(base.x, -16.0, epsilon = 1e-4);
        assert!(base.x < -config.surface.length / 2.0);
    }

    #[test]
    fn test_net_hangs_from_rim() {
        let config = CourtConfig::default();
        let left = build_hoop_assembly(&config, Side::Left).unwrap();
        let rim = world_point(&left, &["support", "rim"]);
        let net = world_point(&left, &["support", "net"]);
        let bottom = world_point(&left, &["support", "net", "ring_2"]);
        assert_eq!(rim, net);
        assert_relative_eq!(rim.y - bottom.y, config.net.length, epsilon = 1e-5);
    }
}
