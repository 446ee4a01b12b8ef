//! Fixed camera viewpoints.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::camera::{Camera, OrbitController};

#[derive(Debug, Error, PartialEq)]
pub enum PresetError {
    #[error("at least one camera preset is required")]
    Empty,
}

/// A named eye position and the point it looks at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraPreset {
    pub name: String,
    pub eye: Vec3,
    pub look_at: Vec3,
}

impl CameraPreset {
    pub fn new(name: impl Into<String>, eye: Vec3, look_at: Vec3) -> Self {
        Self {
            name: name.into(),
            eye,
            look_at,
        }
    }

    /// Move `camera` to this preset and re-pivot `orbit` on its look-at point.
    ///
    /// The camera is turned to face the new pivot immediately, so the next
    /// orbit update rotates around it without a jump.
    pub fn apply(&self, camera: &mut Camera, orbit: &mut OrbitController) {
        camera.position = self.eye;
        orbit.target = self.look_at;
        camera.look_at(self.look_at);
    }
}

/// Both sidelines, then each basket.
pub fn default_presets() -> Vec<CameraPreset> {
    vec![
        CameraPreset::new("sideline_near", Vec3::new(0.0, 15.0, 30.0), Vec3::ZERO),
        CameraPreset::new("sideline_far", Vec3::new(0.0, 15.0, -30.0), Vec3::ZERO),
        CameraPreset::new(
            "basket_left",
            Vec3::new(-20.0, 8.0, 0.0),
            Vec3::new(-15.5, 3.0, 0.0),
        ),
        CameraPreset::new(
            "basket_right",
            Vec3::new(20.0, 8.0, 0.0),
            Vec3::new(15.5, 3.0, 0.0),
        ),
    ]
}

/// Ordered, non-empty preset list.
///
/// Which preset is active is tracked by the caller; the list only resolves
/// an index to a viewpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraPresets {
    presets: Vec<CameraPreset>,
}

impl CameraPresets {
    pub fn new(presets: Vec<CameraPreset>) -> Result<Self, PresetError> {
        if presets.is_empty() {
            return Err(PresetError::Empty);
        }
        Ok(Self { presets })
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CameraPreset> {
        self.presets.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CameraPreset> {
        self.presets.iter()
    }

    /// Apply the preset at `index`. Out-of-range indices leave the camera untouched.
    pub fn apply(
        &self,
        index: usize,
        camera: &mut Camera,
        orbit: &mut OrbitController,
    ) -> Option<&CameraPreset> {
        let preset = self.presets.get(index)?;
        preset.apply(camera, orbit);
        Some(preset)
    }
}

impl Default for CameraPresets {
    fn default() -> Self {
        Self {
            presets: default_presets(),
        }
    }
}
