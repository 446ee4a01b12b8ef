//! Arena lighting rig.
//!
//! One ambient term plus a ring of directional lights placed symmetrically
//! above the court so no side of the floor is left dark.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::material::hex_color;

/// Shadow map settings for a shadow-casting light.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShadowSettings {
    pub map_size: u32,
    pub near: f32,
    pub far: f32,
}

/// Light arriving from a distant source positioned at `position`,
/// shining toward the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    pub position: Vec3,
    pub color: [f32; 4],
    pub intensity: f32,
    pub cast_shadow: bool,
    /// Explicit shadow map settings; renderer defaults otherwise.
    pub shadow: Option<ShadowSettings>,
}

impl DirectionalLight {
    /// Unit vector pointing from the scene toward the light.
    pub fn direction(&self) -> Vec3 {
        self.position.normalize_or_zero()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmbientLight {
    pub color: [f32; 4],
    pub intensity: f32,
}

/// Lighting configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LightingConfig {
    pub background: u32,
    pub ambient_color: u32,
    pub ambient_intensity: f32,
    pub key_color: u32,
    pub key_intensity: f32,
    /// Positions of the directional lights; the first one carries the tuned shadow map.
    pub key_positions: Vec<[f32; 3]>,
    pub shadow_map_size: u32,
    pub shadow_near: f32,
    pub shadow_far: f32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            background: 0x000000,
            ambient_color: 0xffffff,
            ambient_intensity: 0.5,
            key_color: 0xffffff,
            key_intensity: 0.35,
            key_positions: vec![
                [10.0, 30.0, 15.0],
                [-10.0, 30.0, 15.0],
                [10.0, 30.0, -15.0],
                [-10.0, 30.0, -15.0],
            ],
            shadow_map_size: 2048,
            shadow_near: 1.0,
            shadow_far: 100.0,
        }
    }
}

/// Resolved set of lights for the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightingRig {
    pub background: [f32; 4],
    pub ambient: AmbientLight,
    pub directional: Vec<DirectionalLight>,
}

impl LightingRig {
    pub fn from_config(config: &LightingConfig) -> Self {
        let directional = config
            .key_positions
            .iter()
            .enumerate()
            .map(|(i, position)| DirectionalLight {
                position: Vec3::from(*position),
                color: hex_color(config.key_color),
                intensity: config.key_intensity,
                cast_shadow: true,
                shadow: (i == 0).then_some(ShadowSettings {
                    map_size: config.shadow_map_size,
                    near: config.shadow_near,
                    far: config.shadow_far,
                }),
            })
            .collect();

        Self {
            background: hex_color(config.background),
            ambient: AmbientLight {
                color: hex_color(config.ambient_color),
                intensity: config.ambient_intensity,
            },
            directional,
        }
    }
}

impl Default for LightingRig {
    fn default() -> Self {
        Self::from_config(&LightingConfig::default())
    }
}
