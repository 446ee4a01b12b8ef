//! Court configuration.
//!
//! Every numeric constant the builders use lives here, so each builder is a
//! deterministic function of a [`CourtConfig`]. Lengths are in meters,
//! angles in degrees, colors as `0xRRGGBB`.

use serde::{Deserialize, Serialize};

use crate::lighting::LightingConfig;
use crate::net::NetConfig;

/// Playing surface and out-of-bounds apron.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Court length along X.
    pub length: f32,
    /// Court width along Z.
    pub width: f32,
    pub thickness: f32,
    pub apron_length: f32,
    pub apron_width: f32,
    pub apron_color: u32,
    pub floor_texture: String,
    pub floor_repeat: [f32; 2],
    pub floor_shininess: f32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            length: 30.0,
            width: 15.0,
            thickness: 0.1,
            apron_length: 34.0,
            apron_width: 19.0,
            apron_color: 0x552583,
            floor_texture: "wood.jpg".to_string(),
            floor_repeat: [14.0, 7.0],
            floor_shininess: 50.0,
        }
    }
}

/// Court lines, center circle and three-point arcs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MarkingsConfig {
    /// Height of painted lines above the court origin.
    pub height: f32,
    pub line_width: f32,
    pub line_thickness: f32,
    pub line_color: u32,
    pub center_circle_inner: f32,
    pub center_circle_outer: f32,
    pub center_circle_segments: u32,
    pub three_point_radius: f32,
    /// Distance of each three-point arc center from the court center.
    pub three_point_center: f32,
    /// How far past the half-circle each arc extends, per end.
    pub three_point_overshoot: f32,
    pub three_point_segments: u32,
    pub three_point_height: f32,
    pub tube_radius: f32,
    pub tube_tubular_segments: u32,
    pub tube_radial_segments: u32,
}

impl Default for MarkingsConfig {
    fn default() -> Self {
        Self {
            height: 0.06,
            line_width: 0.1,
            line_thickness: 0.01,
            line_color: 0xffffff,
            center_circle_inner: 1.9,
            center_circle_outer: 2.0,
            center_circle_segments: 64,
            three_point_radius: 6.75,
            three_point_center: 13.5,
            three_point_overshoot: 13.0,
            three_point_segments: 64,
            three_point_height: 0.02,
            tube_radius: 0.05,
            tube_tubular_segments: 128,
            tube_radial_segments: 8,
        }
    }
}

/// Free-throw lane ("key").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct KeyAreaConfig {
    /// Distance of the key center from the court center.
    pub center: f32,
    /// Lane width (across the court).
    pub width: f32,
    /// Lane length (along the court).
    pub length: f32,
    /// Extra width of the free-throw line beyond the lane.
    pub free_throw_line_extension: f32,
    pub free_throw_radius: f32,
    pub free_throw_segments: u32,
    /// Hash mark offsets along the lane from the key center (left end).
    pub hash_offsets: Vec<f32>,
    /// Gap between the lane edge and the hash mark center.
    pub hash_margin: f32,
    pub hash_length: f32,
    pub hash_width: f32,
}

impl Default for KeyAreaConfig {
    fn default() -> Self {
        Self {
            center: 12.0,
            width: 4.9,
            length: 5.8,
            free_throw_line_extension: 0.1,
            free_throw_radius: 1.8,
            free_throw_segments: 64,
            hash_offsets: vec![-0.85, 0.0, 0.85, 1.75],
            hash_margin: 0.1,
            hash_length: 0.2,
            hash_width: 0.05,
        }
    }
}

/// Goal structure: base, pole, arm, backboard, frame and rim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HoopConfig {
    /// Base platform size (width, height, depth).
    pub base_size: [f32; 3],
    /// Distance of the base from the court center.
    pub base_offset: f32,
    /// Base lift above the floor.
    pub base_lift: f32,
    pub base_color: u32,
    pub pole_width: f32,
    pub pole_height: f32,
    pub steel_color: u32,
    pub arm_length: f32,
    pub arm_thickness: f32,
    pub arm_angle: f32,
    /// Shift of the arm back toward the pole so it overlaps the pole top.
    pub arm_inset: f32,
    pub arm_drop: f32,
    pub backboard_width: f32,
    pub backboard_height: f32,
    /// Gap between the arm tip and the backboard along the long axis.
    pub backboard_offset: f32,
    pub backboard_color: u32,
    pub backboard_opacity: f32,
    pub backboard_shininess: f32,
    /// Connector length beyond the backboard gap.
    pub connector_overlap: f32,
    pub connector_inset: f32,
    pub connector_drop: f32,
    pub frame_thickness: f32,
    pub frame_overhang: f32,
    pub frame_color: u32,
    pub square_width: f32,
    pub square_height: f32,
    /// Drop of the shooter's square center below the backboard center.
    pub square_vertical_offset: f32,
    pub rim_radius: f32,
    pub rim_tube: f32,
    /// Rim center distance in front of the backboard.
    pub rim_offset: f32,
    pub rim_color: u32,
    pub rim_shininess: f32,
    /// Distance of each support structure from the court center.
    pub support_offset: f32,
}

impl Default for HoopConfig {
    fn default() -> Self {
        Self {
            base_size: [1.0, 0.25, 1.8],
            base_offset: 16.0,
            base_lift: 0.06,
            base_color: 0x4169e1,
            pole_width: 0.4,
            pole_height: 2.2,
            steel_color: 0x0044aa,
            arm_length: 1.8,
            arm_thickness: 0.2,
            arm_angle: 25.0,
            arm_inset: 0.15,
            arm_drop: 0.09,
            backboard_width: 1.8,
            backboard_height: 1.05,
            backboard_offset: 0.15,
            backboard_color: 0x000000,
            backboard_opacity: 0.3,
            backboard_shininess: 100.0,
            connector_overlap: 0.03,
            connector_inset: 0.05,
            connector_drop: 0.011,
            frame_thickness: 0.03,
            frame_overhang: 0.06,
            frame_color: 0xffffff,
            square_width: 0.6,
            square_height: 0.45,
            square_vertical_offset: 0.2,
            rim_radius: 0.23,
            rim_tube: 0.02,
            rim_offset: 0.25,
            rim_color: 0xd35400,
            rim_shininess: 30.0,
            support_offset: 15.5,
        }
    }
}

/// Static ball at center court.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BallConfig {
    pub radius: f32,
    pub segments: u32,
    /// Gap between the ball bottom and the court origin.
    pub lift: f32,
    pub diffuse_texture: String,
    pub bump_texture: String,
    pub bump_scale: f32,
    pub shininess: f32,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            radius: 0.22,
            segments: 64,
            lift: 0.07,
            diffuse_texture: "basketball.png".to_string(),
            bump_texture: "basketballBump.png".to_string(),
            bump_scale: 0.04,
            shininess: 40.0,
        }
    }
}

/// Floor emblems on alternating halves.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogoConfig {
    pub texture: String,
    pub width: f32,
    pub height: f32,
    pub elevation: f32,
    /// Offset of each logo from center court along X.
    pub offset_x: f32,
    /// Offset of each logo from center court along Z.
    pub offset_z: f32,
}

impl Default for LogoConfig {
    fn default() -> Self {
        Self {
            texture: "Laker.PNG".to_string(),
            width: 4.0,
            height: 3.0,
            elevation: 0.07,
            offset_x: 5.0,
            offset_z: 4.0,
        }
    }
}

/// Complete court configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct CourtConfig {
    pub surface: SurfaceConfig,
    pub markings: MarkingsConfig,
    pub key: KeyAreaConfig,
    pub hoop: HoopConfig,
    pub net: NetConfig,
    pub ball: BallConfig,
    pub logos: LogoConfig,
    pub lighting: LightingConfig,
}
