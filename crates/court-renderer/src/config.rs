//! Renderer configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{camera, orbit};

/// Projection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near_plane: f32,
    pub far_plane: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: camera::DEFAULT_FOV_DEGREES,
            near_plane: camera::DEFAULT_NEAR,
            far_plane: camera::DEFAULT_FAR,
        }
    }
}

/// Orbit control tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            rotate_speed: orbit::ROTATE_SPEED,
            zoom_speed: orbit::ZOOM_SPEED,
            pan_speed: orbit::PAN_SPEED,
            min_distance: orbit::MIN_DISTANCE,
            max_distance: orbit::MAX_DISTANCE,
        }
    }
}

/// Renderer configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    pub camera: CameraConfig,
    pub orbit: OrbitConfig,
}
