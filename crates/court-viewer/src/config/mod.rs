//! Viewer configuration.
//!
//! Court geometry, renderer tuning, camera presets, key bindings and frame
//! pacing, persisted together as one RON file.

mod manager;

pub use manager::{ConfigError, ConfigManager};

use std::path::PathBuf;

use court_core::CourtConfig;
use court_renderer::RendererConfig;
use court_renderer::presets::{CameraPreset, default_presets};
use serde::{Deserialize, Serialize};

/// Keys bound to viewer actions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeyBindings {
    pub toggle_orbit: Vec<char>,
    pub cycle_camera: Vec<char>,
    pub quit: Vec<char>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            toggle_orbit: vec!['o'],
            cycle_camera: vec!['c', 'C'],
            quit: vec!['q'],
        }
    }
}

/// Frame pacing and output surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameConfig {
    pub target_fps: u32,
    /// Surface size in pixels, used for the camera aspect ratio.
    pub viewport: [u32; 2],
    /// Directory the court images are loaded from.
    pub asset_dir: PathBuf,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            viewport: [1280, 720],
            asset_dir: PathBuf::from(court_renderer::constants::texture::DEFAULT_ASSET_DIR),
        }
    }
}

impl FrameConfig {
    pub fn aspect(&self) -> f32 {
        let [width, height] = self.viewport;
        width as f32 / height.max(1) as f32
    }
}

/// Complete viewer configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Configuration format version.
    #[serde(default)]
    pub version: u32,
    /// Court geometry.
    #[serde(default)]
    pub court: CourtConfig,
    /// Projection and orbit settings.
    #[serde(default)]
    pub renderer: RendererConfig,
    /// Viewpoints cycled by the camera key, in order.
    #[serde(default = "default_presets")]
    pub presets: Vec<CameraPreset>,
    #[serde(default)]
    pub input: KeyBindings,
    #[serde(default)]
    pub frame: FrameConfig,
}

impl AppConfig {
    /// Current configuration version.
    pub const CURRENT_VERSION: u32 = 1;

    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            court: CourtConfig::default(),
            renderer: RendererConfig::default(),
            presets: default_presets(),
            input: KeyBindings::default(),
            frame: FrameConfig::default(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}
