//! Application context.
//!
//! Owns the composed court, the draw-ready scene, the camera with its orbit
//! controls, the preset list and the view state. One `tick` applies queued
//! input, steps the orbit controls and renders a frame.

use std::sync::Arc;

use court_core::{CourtScene, GeometryError, build_court_scene};
use court_renderer::{
    Camera, CameraPreset, CameraPresets, FrameRenderer, FrameStats, HeadlessRenderer,
    OrbitController, PresetError, RenderError, RenderScene, TextureRegistry,
};
use glam::Vec3;
use thiserror::Error;

use crate::config::{AppConfig, ConfigError};
use crate::input::{Action, InputQueue, KeyEvent};
use crate::state::ViewState;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("invalid court geometry: {0}")]
    Geometry(#[from] GeometryError),
    #[error("render failed: {0}")]
    Render(#[from] RenderError),
    #[error(transparent)]
    Preset(#[from] PresetError),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize scene: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Everything the frame loop works on.
pub struct AppContext<R: FrameRenderer> {
    config: AppConfig,
    court: CourtScene,
    scene: RenderScene,
    camera: Camera,
    orbit: OrbitController,
    presets: CameraPresets,
    view: ViewState,
    textures: Arc<TextureRegistry>,
    input: InputQueue,
    renderer: R,
    running: bool,
}

impl AppContext<HeadlessRenderer> {
    /// Context drawing through the headless renderer.
    pub fn headless(config: AppConfig) -> Result<Self, ViewerError> {
        let textures = Arc::new(TextureRegistry::new());
        let renderer = HeadlessRenderer::new(textures.clone());
        Self::new(config, textures, renderer)
    }
}

impl<R: FrameRenderer> AppContext<R> {
    /// Compose the court and place the camera at the first preset.
    ///
    /// Textures are only requested here; they resolve into `textures` later.
    pub fn new(
        config: AppConfig,
        textures: Arc<TextureRegistry>,
        renderer: R,
    ) -> Result<Self, ViewerError> {
        let court = build_court_scene(&config.court, textures.as_ref())?;
        let scene = RenderScene::from_court(&court);
        let presets = CameraPresets::new(config.presets.clone())?;

        let mut camera = Camera::new(config.frame.aspect());
        camera.apply_config(&config.renderer.camera);
        let mut orbit = OrbitController::new(Vec3::ZERO, config.renderer.orbit.clone());
        let view = ViewState::default();
        presets.apply(view.preset_index, &mut camera, &mut orbit);

        tracing::info!(
            objects = scene.len(),
            meshes = scene.meshes().len(),
            presets = presets.len(),
            "Viewer ready"
        );

        Ok(Self {
            config,
            court,
            scene,
            camera,
            orbit,
            presets,
            view,
            textures,
            input: InputQueue::new(),
            renderer,
            running: true,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn court(&self) -> &CourtScene {
        &self.court
    }

    pub fn render_scene(&self) -> &RenderScene {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn orbit(&self) -> &OrbitController {
        &self.orbit
    }

    /// Orbit controls, for feeding pointer input.
    pub fn orbit_mut(&mut self) -> &mut OrbitController {
        &mut self.orbit
    }

    pub fn presets(&self) -> &CameraPresets {
        &self.presets
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    /// Preset selected by the view state.
    pub fn active_preset(&self) -> Option<&CameraPreset> {
        self.presets.get(self.view.preset_index)
    }

    pub fn textures(&self) -> &Arc<TextureRegistry> {
        &self.textures
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Handle for pushing key events from another thread.
    pub fn input(&self) -> InputQueue {
        self.input.clone()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn control_hints(&self) -> Vec<String> {
        self.config.input.hints()
    }

    /// Apply one key press. Unbound keys do nothing.
    pub fn handle_key(&mut self, event: KeyEvent) -> Option<Action> {
        let action = self.config.input.action_for(event.key)?;
        match action {
            Action::ToggleOrbit => {
                self.view = self.view.toggle_orbit();
                tracing::debug!(enabled = self.view.orbit_enabled, "Orbit toggled");
            }
            Action::CycleCamera => {
                self.view = self.view.advance_preset(self.presets.len());
                let applied =
                    self.presets.apply(self.view.preset_index, &mut self.camera, &mut self.orbit);
                if let Some(preset) = applied {
                    tracing::debug!(
                        index = self.view.preset_index,
                        preset = %preset.name,
                        "Camera preset"
                    );
                }
            }
            Action::Quit => {
                tracing::info!("Quit requested");
                self.running = false;
            }
        }
        Some(action)
    }

    /// Resize the output surface.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.update_aspect(width as f32 / height.max(1) as f32);
        self.renderer.resize(width, height);
    }

    /// Apply queued input, step the orbit controls, then render one frame.
    pub fn tick(&mut self) -> Result<FrameStats, ViewerError> {
        for event in self.input.drain() {
            self.handle_key(event);
        }
        if self.input.is_closed() {
            self.running = false;
        }

        self.orbit.enabled = self.view.orbit_enabled;
        self.orbit.update(&mut self.camera);

        Ok(self.renderer.render_frame(&self.scene, &self.camera)?)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn context() -> AppContext<HeadlessRenderer> {
        AppContext::headless(AppConfig::new()).unwrap()
    }

    fn press(ctx: &AppContext<HeadlessRenderer>, keys: &str) {
        let input = ctx.input();
        for key in keys.chars() {
            input.push(KeyEvent::new(key));
        }
    }

    #[test]
    fn test_starts_at_first_preset() {
        let ctx = context();
        assert_eq!(ctx.camera().position, Vec3::new(0.0, 15.0, 30.0));
        assert_eq!(ctx.orbit().target, Vec3::ZERO);
        assert_eq!(ctx.view(), ViewState::default());
        assert_eq!(
            ctx.control_hints(),
            vec!["O - Toggle orbit camera", "C - Toggle cameras"]
        );
    }

    #[test]
    fn test_full_cycle_returns_to_first_preset() {
        let mut ctx = context();
        let n = ctx.presets().len();
        press(&ctx, &"c".repeat(n));
        ctx.tick().unwrap();

        assert_eq!(ctx.view().preset_index, 0);
        assert_eq!(ctx.camera().position, Vec3::new(0.0, 15.0, 30.0));
        assert_eq!(ctx.orbit().target, Vec3::ZERO);
    }

    #[test]
    fn test_cycle_moves_camera_to_basket() {
        let mut ctx = context();
        press(&ctx, "cC");
        ctx.tick().unwrap();

        assert_eq!(ctx.view().preset_index, 2);
        assert_eq!(ctx.active_preset().unwrap().name, "basket_left");
        assert_eq!(ctx.camera().position, Vec3::new(-20.0, 8.0, 0.0));
        assert_eq!(ctx.orbit().target, Vec3::new(-15.5, 3.0, 0.0));
    }

    #[test]
    fn test_orbit_pivots_around_new_target() {
        let mut ctx = context();
        press(&ctx, "cc");
        ctx.tick().unwrap();

        let target = ctx.orbit().target;
        let distance = ctx.camera().position.distance(target);
        ctx.orbit_mut().rotate(0.4, 0.1);
        ctx.tick().unwrap();

        assert_ne!(ctx.camera().position, Vec3::new(-20.0, 8.0, 0.0));
        assert_relative_eq!(ctx.camera().position.distance(target), distance, epsilon = 1e-4);
        let facing = (target - ctx.camera().position).normalize();
        assert_relative_eq!(ctx.camera().forward().dot(facing), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_unbound_keys_are_ignored() {
        let mut ctx = context();
        let before = ctx.camera().clone();
        press(&ctx, "xO1 ");
        ctx.tick().unwrap();

        assert_eq!(ctx.view(), ViewState::default());
        assert_eq!(ctx.camera().position, before.position);
        assert!(ctx.is_running());
    }

    #[test]
    fn test_disabled_orbit_ignores_pointer_input() {
        let mut ctx = context();
        press(&ctx, "o");
        ctx.tick().unwrap();
        assert!(!ctx.view().orbit_enabled);

        let position = ctx.camera().position;
        ctx.orbit_mut().rotate(1.0, 0.0);
        ctx.tick().unwrap();
        assert_eq!(ctx.camera().position, position);

        // Presets still cycle while orbiting is off
        press(&ctx, "c");
        ctx.tick().unwrap();
        assert_eq!(ctx.camera().position, Vec3::new(0.0, 15.0, -30.0));
        assert!(!ctx.view().orbit_enabled);
    }

    #[test]
    fn test_quit_and_closed_input_stop() {
        let mut ctx = context();
        press(&ctx, "q");
        ctx.tick().unwrap();
        assert!(!ctx.is_running());

        let mut ctx = context();
        ctx.input().close();
        ctx.tick().unwrap();
        assert!(!ctx.is_running());
    }

    #[test]
    fn test_resize_updates_aspect() {
        let mut ctx = context();
        ctx.resize(1000, 500);
        assert_eq!(ctx.camera().aspect(), 2.0);
    }

    #[test]
    fn test_empty_presets_rejected() {
        let config = AppConfig {
            presets: Vec::new(),
            ..AppConfig::new()
        };
        assert!(matches!(
            AppContext::headless(config),
            Err(ViewerError::Preset(PresetError::Empty))
        ));
    }
}
