//! Frame rendering boundary.
//!
//! A backend draws a [`RenderScene`] from a [`Camera`]. The headless
//! renderer walks the same draw list a GPU backend would and reports what
//! it would have drawn.

use std::sync::Arc;

use thiserror::Error;

use crate::camera::Camera;
use crate::mesh::{MeshHandle, Topology};
use crate::scene::RenderScene;
use crate::texture::TextureRegistry;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum RenderError {
    #[error("object '{name}' references missing mesh {handle:?}")]
    MissingMesh { name: String, handle: MeshHandle },
    #[error("camera cannot produce a projection")]
    InvalidCamera,
}

/// What one frame drew.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub frame: u64,
    pub draw_calls: usize,
    pub triangles: usize,
    pub lines: usize,
    pub blended: usize,
    pub textured: usize,
    /// Draws whose texture failed and fell back to a solid color.
    pub fallbacks: usize,
}

/// A rendering backend.
pub trait FrameRenderer {
    /// Draw one frame of `scene` as seen by `camera`.
    fn render_frame(&mut self, scene: &RenderScene, camera: &Camera)
    -> Result<FrameStats, RenderError>;

    /// Notify the backend of a new surface size.
    fn resize(&mut self, _width: u32, _height: u32) {}
}

/// Backend without a GPU surface.
#[derive(Debug)]
pub struct HeadlessRenderer {
    textures: Arc<TextureRegistry>,
    frame: u64,
    last_stats: Option<FrameStats>,
}

impl HeadlessRenderer {
    pub fn new(textures: Arc<TextureRegistry>) -> Self {
        Self {
            textures,
            frame: 0,
            last_stats: None,
        }
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frame
    }

    pub fn last_stats(&self) -> Option<FrameStats> {
        self.last_stats
    }
}

impl FrameRenderer for HeadlessRenderer {
    fn render_frame(
        &mut self,
        scene: &RenderScene,
        camera: &Camera,
    ) -> Result<FrameStats, RenderError> {
        if !camera.is_valid() {
            return Err(RenderError::InvalidCamera);
        }
        let mut stats = FrameStats {
            frame: self.frame + 1,
            ..Default::default()
        };
        for object in scene.draw_order(camera.position) {
            let mesh = scene
                .mesh(object.mesh)
                .ok_or_else(|| RenderError::MissingMesh {
                    name: object.name.clone(),
                    handle: object.mesh,
                })?;
            if mesh.is_empty() {
                continue;
            }

            let material = self.textures.resolve_material(&object.material);
            stats.draw_calls += 1;
            match mesh.topology {
                Topology::Triangles => stats.triangles += mesh.triangle_count(),
                Topology::Lines => stats.lines += mesh.line_count(),
            }
            if object.layer.uses_blending() {
                stats.blended += 1;
            }
            if material.diffuse.is_some() {
                stats.textured += 1;
            }
            if material.fallback {
                stats.fallbacks += 1;
            }
        }

        if self.last_stats.is_none() {
            tracing::info!(
                draw_calls = stats.draw_calls,
                triangles = stats.triangles,
                lines = stats.lines,
                "First frame rendered"
            );
        } else {
            tracing::trace!(frame = stats.frame, draw_calls = stats.draw_calls, "Frame rendered");
        }

        self.frame = stats.frame;
        self.last_stats = Some(stats);
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use court_core::{CourtConfig, build_court_scene};

    use super::*;
    use crate::FileImageLoader;

    fn setup() -> (RenderScene, Arc<TextureRegistry>) {
        let textures = Arc::new(TextureRegistry::new());
        let court = build_court_scene(&CourtConfig::default(), textures.as_ref()).unwrap();
        (RenderScene::from_court(&court), textures)
    }

    #[test]
    fn test_render_counts_every_object() {
        let (scene, textures) = setup();
        let mut renderer = HeadlessRenderer::new(textures);
        let stats = renderer.render_frame(&scene, &Camera::default()).unwrap();

        assert_eq!(stats.frame, 1);
        assert_eq!(stats.draw_calls, scene.len());
        // 16 strands x 3 segments per net, two nets
        assert_eq!(stats.lines, 96);
        assert!(stats.triangles > 0);
        assert!(stats.blended >= 2);

        renderer.render_frame(&scene, &Camera::default()).unwrap();
        assert_eq!(renderer.frames_rendered(), 2);
    }

    #[test]
    fn test_missing_textures_fall_back() {
        let (scene, textures) = setup();
        let dir = std::env::temp_dir().join(format!("court-empty-{}", uuid::Uuid::new_v4()));
        FileImageLoader::new(dir).load_pending(&textures);

        let mut renderer = HeadlessRenderer::new(textures);
        let stats = renderer.render_frame(&scene, &Camera::default()).unwrap();
        // Floor, ball and both logos
        assert_eq!(stats.fallbacks, 4);
        assert_eq!(stats.textured, 0);
        assert_eq!(stats.draw_calls, scene.len());
    }

    #[test]
    fn test_invalid_camera() {
        let (scene, textures) = setup();
        let mut renderer = HeadlessRenderer::new(textures);
        let mut camera = Camera::default();
        camera.set_near(0.0);
        assert_eq!(
            renderer.render_frame(&scene, &camera),
            Err(RenderError::InvalidCamera)
        );
        assert_eq!(renderer.frames_rendered(), 0);
    }
}
