//! Scene composition.
//!
//! Assembles the floor, markings, both goals, the ball and the floor logos
//! into one root node, and resolves the lighting rig.

use std::f32::consts::FRAC_PI_2;

use glam::Vec3;

use crate::config::CourtConfig;
use crate::equipment::build_hoop_assembly;
use crate::error::GeometryResult;
use crate::lighting::LightingRig;
use crate::markings::build_markings;
use crate::material::Material;
use crate::node::Node;
use crate::primitive::Primitive;
use crate::resource::{ImageProvider, TextureHandle, TextureRef};
use crate::side::Side;

/// Textures requested while composing the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourtTextures {
    pub floor: TextureHandle,
    pub logo: TextureHandle,
    pub ball_diffuse: TextureHandle,
    pub ball_bump: TextureHandle,
}

impl CourtTextures {
    /// Request every texture the court needs. Returns immediately.
    pub fn request(config: &CourtConfig, provider: &dyn ImageProvider) -> Self {
        Self {
            floor: provider.request(&config.surface.floor_texture),
            logo: provider.request(&config.logos.texture),
            ball_diffuse: provider.request(&config.ball.diffuse_texture),
            ball_bump: provider.request(&config.ball.bump_texture),
        }
    }
}

/// The fully composed, static court scene.
#[derive(Debug, Clone)]
pub struct CourtScene {
    pub root: Node,
    pub lighting: LightingRig,
    pub textures: CourtTextures,
}

impl CourtScene {
    pub fn background(&self) -> [f32; 4] {
        self.lighting.background
    }
}

/// Build the whole court scene in one synchronous pass.
pub fn build_court_scene(
    config: &CourtConfig,
    provider: &dyn ImageProvider,
) -> GeometryResult<CourtScene> {
    let textures = CourtTextures::request(config, provider);

    let mut court = Node::new("court")
        .with_child(apron(config))
        .with_child(floor(config, &textures))
        .with_child(build_markings(config)?);

    for side in Side::ALL {
        court.add_child(build_hoop_assembly(config, side)?);
    }

    court.add_child(ball(config, &textures));
    court = court.with_children(floor_logos(config, &textures));

    tracing::info!(
        nodes = court.node_count(),
        meshes = court.mesh_count(),
        "Composed court scene"
    );

    Ok(CourtScene {
        root: Node::new("scene").with_child(court),
        lighting: LightingRig::from_config(&config.lighting),
        textures,
    })
}

/// Out-of-bounds area around the court, just below the wood.
fn apron(config: &CourtConfig) -> Node {
    let s = &config.surface;
    Node::mesh(
        "apron",
        Primitive::Box {
            width: s.apron_length,
            height: s.thickness,
            depth: s.apron_width,
        },
        Material::phong(s.apron_color),
    )
    .with_position(Vec3::new(0.0, -s.thickness / 2.0, 0.0))
    .with_shadows(false, true)
}

fn floor(config: &CourtConfig, textures: &CourtTextures) -> Node {
    let s = &config.surface;
    let [u, v] = s.floor_repeat;
    Node::mesh(
        "floor",
        Primitive::Box {
            width: s.length,
            height: s.thickness,
            depth: s.width,
        },
        Material::phong(0xffffff)
            .with_map(TextureRef::repeating(textures.floor, u, v))
            .with_shininess(s.floor_shininess),
    )
    .with_shadows(false, true)
}

fn ball(config: &CourtConfig, textures: &CourtTextures) -> Node {
    let b = &config.ball;
    Node::mesh(
        "ball",
        Primitive::Sphere {
            radius: b.radius,
            width_segments: b.segments,
            height_segments: b.segments,
        },
        Material::phong(0xffffff)
            .with_map(TextureRef::new(textures.ball_diffuse))
            .with_bump(textures.ball_bump, b.bump_scale)
            .with_shininess(b.shininess),
    )
    .with_position(Vec3::new(0.0, b.radius + b.lift, 0.0))
    .with_shadows(true, true)
}

/// Two logos laid flat on opposite halves.
///
/// The left one is flipped in its own plane so each reads upright from
/// the nearer sideline.
fn floor_logos(config: &CourtConfig, textures: &CourtTextures) -> Vec<Node> {
    let l = &config.logos;
    let material = Material::phong(0xffffff)
        .with_map(TextureRef::new(textures.logo))
        .transparent()
        .double_sided();

    [(Side::Left, true), (Side::Right, false)]
        .into_iter()
        .map(|(side, flip)| {
            let scale = if flip {
                Vec3::new(-1.0, -1.0, 1.0)
            } else {
                Vec3::ONE
            };
            Node::mesh(
                format!("logo_{}", side.name()),
                Primitive::Plane {
                    width: l.width,
                    height: l.height,
                },
                material.clone(),
            )
            .with_position(Vec3::new(
                side.sign() * l.offset_x,
                l.elevation,
                side.sign() * l.offset_z,
            ))
            .with_euler(-FRAC_PI_2, 0.0, 0.0)
            .with_scale(scale)
            .with_shadows(false, true)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use approx::assert_relative_eq;

    use super::*;

    /// Hands out sequential handles and remembers what was asked for.
    #[derive(Default)]
    struct RecordingProvider {
        requested: RefCell<Vec<String>>,
    }

    impl ImageProvider for RecordingProvider {
        fn request(&self, name: &str) -> TextureHandle {
            let mut requested = self.requested.borrow_mut();
            requested.push(name.to_string());
            TextureHandle::from_raw(requested.len() as u64)
        }
    }

    fn build() -> (CourtScene, RecordingProvider) {
        let provider = RecordingProvider::default();
        let scene = build_court_scene(&CourtConfig::default(), &provider).unwrap();
        (scene, provider)
    }

    #[test]
    fn test_scene_structure() {
        let (scene, _) = build();
        let court = scene.root.find("court").unwrap();
        let names: Vec<&str> = court.children().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "apron",
                "floor",
                "markings",
                "hoop_left",
                "hoop_right",
                "ball",
                "logo_left",
                "logo_right",
            ]
        );
    }

    #[test]
    fn test_textures_requested_once_each() {
        let (scene, provider) = build();
        assert_eq!(
            *provider.requested.borrow(),
            vec!["wood.jpg", "Laker.PNG", "basketball.png", "basketballBump.png"]
        );
        let floor = scene.root.find("floor").unwrap().mesh.as_ref().unwrap();
        let map = floor.material.map.unwrap();
        assert_eq!(map.handle, scene.textures.floor);
        assert_eq!(map.repeat, [14.0, 7.0]);
    }

    #[test]
    fn test_ball_rests_at_center() {
        let (scene, _) = build();
        let ball = scene
            .root
            .world_transform_at(&["court", "ball"])
            .unwrap()
            .transform_point3(Vec3::ZERO);
        assert_relative_eq!(ball.y, 0.29, epsilon = 1e-6);
        assert_eq!(ball.x, 0.0);
    }

    #[test]
    fn test_example_court_rims() {
        let (scene, _) = build();
        let rim = |side: &str| {
            scene
                .root
                .world_transform_at(&["court", side, "support", "rim"])
                .unwrap()
                .transform_point3(Vec3::ZERO)
        };
        let left = rim("hoop_left");
        let right = rim("hoop_right");
        assert_relative_eq!(right.x, -left.x, epsilon = 1e-5);
        assert_relative_eq!(right.y, left.y, epsilon = 1e-6);
        assert_relative_eq!(right.z, left.z, epsilon = 1e-5);
    }

    #[test]
    fn test_logos_lie_flat() {
        let (scene, _) = build();
        for name in ["logo_left", "logo_right"] {
            let normal = scene
                .root
                .world_transform_at(&["court", name])
                .unwrap()
                .transform_vector3(Vec3::Z)
                .normalize();
            assert_relative_eq!(normal.y.abs(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_invalid_net_is_reported() {
        let mut config = CourtConfig::default();
        config.net.shrink_factor = 1.2;
        let result = build_court_scene(&config, &RecordingProvider::default());
        assert!(result.is_err());
    }
}
