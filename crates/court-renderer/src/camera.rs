//! Perspective camera and orbit controls.
//!
//! The world is Y-up. The camera stores its eye position and viewing
//! direction; what it orbits around lives in [`OrbitController`].

use std::f32::consts::PI;

use glam::{Mat4, Vec2, Vec3};

use crate::config::{CameraConfig, OrbitConfig};
use crate::constants::{camera, orbit};

/// Perspective camera.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    forward: Vec3,
    pub up: Vec3,
    fov_degrees: f32,
    aspect: f32,
    near: f32,
    far: f32,
}

impl Camera {
    /// Camera at the default eye position, looking at the origin.
    pub fn new(aspect: f32) -> Self {
        let mut camera = Self {
            position: Vec3::from(camera::DEFAULT_EYE),
            forward: Vec3::NEG_Z,
            up: Vec3::Y,
            fov_degrees: camera::DEFAULT_FOV_DEGREES,
            aspect,
            near: camera::DEFAULT_NEAR,
            far: camera::DEFAULT_FAR,
        };
        camera.look_at(Vec3::ZERO);
        camera
    }

    /// Turn the camera to face `point`. A point at the eye is ignored.
    pub fn look_at(&mut self, point: Vec3) {
        let direction = (point - self.position).normalize_or_zero();
        if direction != Vec3::ZERO {
            self.forward = direction;
        }
    }

    /// Unit viewing direction.
    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    /// Unit vector pointing to the right of the view.
    pub fn right(&self) -> Vec3 {
        let right = self.forward.cross(self.up).normalize_or_zero();
        if right == Vec3::ZERO {
            // Looking straight along `up`
            Vec3::X
        } else {
            right
        }
    }

    pub fn fov_degrees(&self) -> f32 {
        self.fov_degrees
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn set_fov_degrees(&mut self, fov: f32) {
        self.fov_degrees = fov;
    }

    pub fn set_near(&mut self, near: f32) {
        self.near = near;
    }

    pub fn set_far(&mut self, far: f32) {
        self.far = far;
    }

    /// Update the aspect ratio after a resize.
    pub fn update_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// Apply projection settings from configuration.
    pub fn apply_config(&mut self, config: &CameraConfig) {
        self.set_fov_degrees(config.fov_degrees);
        self.set_near(config.near_plane);
        self.set_far(config.far_plane);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        )
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// True when every parameter yields a usable projection.
    pub fn is_valid(&self) -> bool {
        self.position.is_finite()
            && self.forward.is_finite()
            && self.aspect > 0.0
            && self.near > 0.0
            && self.far > self.near
            && self.fov_degrees > 0.0
            && self.fov_degrees < 180.0
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(camera::DEFAULT_ASPECT)
    }
}

/// Orbit controls around a pivot point.
///
/// Input calls only accumulate; nothing moves until [`update`](Self::update)
/// runs. While disabled, accumulated input is discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitController {
    /// Pivot the camera orbits around and looks at.
    pub target: Vec3,
    pub enabled: bool,
    config: OrbitConfig,
    /// x = azimuth, y = polar, in radians.
    rotate_delta: Vec2,
    /// Multiplier applied to the orbit distance.
    zoom_scale: f32,
    pan_delta: Vec2,
}

impl OrbitController {
    pub fn new(target: Vec3, config: OrbitConfig) -> Self {
        Self {
            target,
            enabled: true,
            config,
            rotate_delta: Vec2::ZERO,
            zoom_scale: 1.0,
            pan_delta: Vec2::ZERO,
        }
    }

    pub fn config(&self) -> &OrbitConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: OrbitConfig) {
        self.config = config;
    }

    /// Queue a rotation around the pivot.
    pub fn rotate(&mut self, azimuth: f32, polar: f32) {
        self.rotate_delta += Vec2::new(azimuth, polar) * self.config.rotate_speed;
    }

    /// Queue a zoom; positive moves closer.
    pub fn zoom(&mut self, amount: f32) {
        self.zoom_scale *= (-amount * self.config.zoom_speed).exp();
    }

    /// Queue a pan in screen space.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.pan_delta += Vec2::new(dx, dy) * self.config.pan_speed;
    }

    pub fn has_pending(&self) -> bool {
        self.rotate_delta != Vec2::ZERO || self.zoom_scale != 1.0 || self.pan_delta != Vec2::ZERO
    }

    fn clear_pending(&mut self) {
        self.rotate_delta = Vec2::ZERO;
        self.zoom_scale = 1.0;
        self.pan_delta = Vec2::ZERO;
    }

    /// Apply queued input to `camera`. Returns true if the eye moved.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        if !self.enabled {
            self.clear_pending();
            return false;
        }
        if !self.has_pending() {
            camera.look_at(self.target);
            return false;
        }

        let offset = camera.position - self.target;
        let mut radius = offset.length();
        let (mut theta, mut phi) = if radius > f32::EPSILON {
            (offset.x.atan2(offset.z), (offset.y / radius).clamp(-1.0, 1.0).acos())
        } else {
            radius = self.config.min_distance;
            (0.0, PI / 2.0)
        };

        theta += self.rotate_delta.x;
        phi = (phi + self.rotate_delta.y).clamp(orbit::POLAR_EPSILON, PI - orbit::POLAR_EPSILON);
        radius = (radius * self.zoom_scale).clamp(self.config.min_distance, self.config.max_distance);

        if self.pan_delta != Vec2::ZERO {
            let right = camera.right();
            let up = right.cross(camera.forward()).normalize_or_zero();
            self.target += (right * -self.pan_delta.x + up * self.pan_delta.y) * radius;
        }

        let sin_phi = phi.sin();
        let eye = self.target
            + Vec3::new(
                radius * sin_phi * theta.sin(),
                radius * phi.cos(),
                radius * sin_phi * theta.cos(),
            );

        let moved = eye != camera.position;
        camera.position = eye;
        camera.look_at(self.target);
        self.clear_pending();
        moved
    }
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new(Vec3::ZERO, OrbitConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_view_matrix_centers_target() {
        let camera = Camera::new(1.5);
        let view = camera.view_matrix();
        let p = view.transform_point3(Vec3::ZERO);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-4);
        assert!(p.z < 0.0);
        assert!(camera.is_valid());

        let ndc = camera.view_projection().project_point3(Vec3::ZERO);
        assert_relative_eq!(ndc.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(ndc.y, 0.0, epsilon = 1e-4);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_look_at_ignores_eye_position() {
        let mut camera = Camera::default();
        let forward = camera.forward();
        camera.look_at(camera.position);
        assert_eq!(camera.forward(), forward);
    }

    #[test]
    fn test_orbit_preserves_distance() {
        let mut camera = Camera::default();
        let mut orbit = OrbitController::default();
        let before = camera.position.length();

        orbit.rotate(0.7, 0.2);
        assert!(orbit.update(&mut camera));
        assert_relative_eq!(camera.position.length(), before, epsilon = 1e-3);
        assert_relative_eq!(camera.forward().dot(-camera.position.normalize()), 1.0, epsilon = 1e-5);
        assert!(!orbit.has_pending());
    }

    #[test]
    fn test_polar_angle_is_clamped() {
        let mut camera = Camera::default();
        let mut orbit = OrbitController::default();
        orbit.rotate(0.0, -10.0);
        orbit.update(&mut camera);
        assert!(camera.position.y > 0.0);
        assert!(camera.right().is_finite());
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut camera = Camera::default();
        let config = OrbitConfig {
            min_distance: 5.0,
            max_distance: 50.0,
            ..Default::default()
        };
        let mut orbit = OrbitController::new(Vec3::ZERO, config);

        orbit.zoom(1000.0);
        orbit.update(&mut camera);
        assert_relative_eq!(camera.position.length(), 5.0, epsilon = 1e-4);

        orbit.zoom(-1000.0);
        orbit.update(&mut camera);
        assert_relative_eq!(camera.position.length(), 50.0, epsilon = 1e-3);
    }

    #[test]
    fn test_pan_moves_target_with_camera() {
        let mut camera = Camera::default();
        let mut orbit = OrbitController::default();
        let offset = camera.position - orbit.target;

        orbit.pan(100.0, 0.0);
        orbit.update(&mut camera);
        assert!(orbit.target.x < 0.0);
        let after = camera.position - orbit.target;
        assert_relative_eq!(after.x, offset.x, epsilon = 1e-3);
        assert_relative_eq!(after.y, offset.y, epsilon = 1e-3);
        assert_relative_eq!(after.z, offset.z, epsilon = 1e-3);
    }

    #[test]
    fn test_disabled_discards_input() {
        let mut camera = Camera::default();
        let before = camera.clone();
        let mut orbit = OrbitController::default();
        orbit.enabled = false;

        orbit.rotate(1.0, 0.0);
        assert!(!orbit.update(&mut camera));
        assert_eq!(camera, before);

        // Input queued while disabled does not leak into later updates
        orbit.enabled = true;
        assert!(!orbit.update(&mut camera));
        assert_eq!(camera.position, before.position);
    }
}
