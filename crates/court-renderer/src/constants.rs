//! Renderer defaults.

/// Camera defaults.
pub mod camera {
    /// Vertical field of view in degrees.
    pub const DEFAULT_FOV_DEGREES: f32 = 75.0;
    pub const DEFAULT_NEAR: f32 = 0.1;
    pub const DEFAULT_FAR: f32 = 1000.0;
    /// Initial eye position, behind one sideline looking at center court.
    pub const DEFAULT_EYE: [f32; 3] = [0.0, 15.0, 30.0];
    pub const DEFAULT_ASPECT: f32 = 16.0 / 9.0;
}

/// Orbit control defaults.
pub mod orbit {
    /// Radians per unit of rotate input.
    pub const ROTATE_SPEED: f32 = 1.0;
    /// Fraction of distance per unit of zoom input.
    pub const ZOOM_SPEED: f32 = 0.1;
    /// Fraction of distance per unit of pan input.
    pub const PAN_SPEED: f32 = 0.002;
    pub const MIN_DISTANCE: f32 = 0.1;
    pub const MAX_DISTANCE: f32 = 10000.0;
    /// Keeps the polar angle off the poles so `up` stays well defined.
    pub const POLAR_EPSILON: f32 = 1e-4;
}

/// Texture loading.
pub mod texture {
    /// Directory searched for court images when none is configured.
    pub const DEFAULT_ASSET_DIR: &str = "assets";
}
