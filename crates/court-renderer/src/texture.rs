//! Texture resources.
//!
//! Scene composition asks for images by name and gets a handle back
//! straight away. The pixels arrive later: a loader decodes files on a
//! background thread and resolves each handle to ready or failed.
//! Materials whose texture failed fall back to their solid color.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::JoinHandle;

use court_core::{ImageProvider, Material, TextureHandle};
use image::ImageFormat;
use parking_lot::RwLock;
use thiserror::Error;

use crate::constants;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ResourceError {
    #[error("failed to read image '{name}': {message}")]
    Io { name: String, message: String },
    #[error("failed to decode image '{name}': {message}")]
    Decode { name: String, message: String },
    #[error("unknown texture handle {0:?}")]
    UnknownHandle(TextureHandle),
}

/// Decoded RGBA8 pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Decode image bytes to RGBA8, guessing the format from the name first.
pub fn decode_image(name: &str, bytes: &[u8]) -> Result<ImageData, ResourceError> {
    let decoded = match ImageFormat::from_path(name) {
        Ok(format) => image::load_from_memory_with_format(bytes, format),
        Err(_) => image::load_from_memory(bytes),
    }
    .map_err(|e| ResourceError::Decode {
        name: name.to_string(),
        message: e.to_string(),
    })?;

    let rgba = decoded.to_rgba8();
    Ok(ImageData {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    })
}

/// Load state of a requested texture.
#[derive(Debug, Clone, PartialEq)]
pub enum TextureState {
    Pending,
    Ready(Arc<ImageData>),
    Failed(ResourceError),
}

#[derive(Debug)]
struct TextureEntry {
    name: String,
    state: TextureState,
}

#[derive(Debug, Default)]
struct RegistryInner {
    by_name: HashMap<String, TextureHandle>,
    entries: HashMap<TextureHandle, TextureEntry>,
    next_handle: u64,
}

/// Counts of textures in each state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextureCounts {
    pub pending: usize,
    pub ready: usize,
    pub failed: usize,
}

/// Shared texture table.
///
/// Requests are deduplicated by name. Safe to resolve from a loader thread
/// while the frame loop reads.
#[derive(Debug, Default)]
pub struct TextureRegistry {
    inner: RwLock<RegistryInner>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name the handle was requested under.
    pub fn name(&self, handle: TextureHandle) -> Option<String> {
        self.inner.read().entries.get(&handle).map(|e| e.name.clone())
    }

    pub fn state(&self, handle: TextureHandle) -> Option<TextureState> {
        self.inner.read().entries.get(&handle).map(|e| e.state.clone())
    }

    /// Pixels of a loaded texture.
    pub fn image(&self, handle: TextureHandle) -> Option<Arc<ImageData>> {
        match self.state(handle)? {
            TextureState::Ready(image) => Some(image),
            _ => None,
        }
    }

    /// Requests still waiting for data, in handle order.
    pub fn pending(&self) -> Vec<(TextureHandle, String)> {
        let inner = self.inner.read();
        let mut pending: Vec<_> = inner
            .entries
            .iter()
            .filter(|(_, e)| e.state == TextureState::Pending)
            .map(|(h, e)| (*h, e.name.clone()))
            .collect();
        pending.sort_by_key(|(h, _)| h.raw());
        pending
    }

    pub fn counts(&self) -> TextureCounts {
        let inner = self.inner.read();
        inner
            .entries
            .values()
            .fold(TextureCounts::default(), |mut counts, e| {
                match e.state {
                    TextureState::Pending => counts.pending += 1,
                    TextureState::Ready(_) => counts.ready += 1,
                    TextureState::Failed(_) => counts.failed += 1,
                }
                counts
            })
    }

    /// Settle a request with its loaded image or the error that stopped it.
    pub fn resolve(
        &self,
        handle: TextureHandle,
        result: Result<ImageData, ResourceError>,
    ) -> Result<(), ResourceError> {
        let mut inner = self.inner.write();
        let entry = inner
            .entries
            .get_mut(&handle)
            .ok_or(ResourceError::UnknownHandle(handle))?;

        entry.state = match result {
            Ok(image) => {
                tracing::debug!(
                    name = %entry.name,
                    width = image.width,
                    height = image.height,
                    "Texture ready"
                );
                TextureState::Ready(Arc::new(image))
            }
            Err(e) => {
                tracing::warn!(name = %entry.name, "Texture unavailable, using solid color: {}", e);
                TextureState::Failed(e)
            }
        };
        Ok(())
    }

    /// Resolve the textures a material references against current state.
    pub fn resolve_material(&self, material: &Material) -> ResolvedMaterial {
        let mut resolved = ResolvedMaterial {
            material: material.clone(),
            diffuse: None,
            bump: None,
            fallback: false,
        };

        if let Some(map) = material.map {
            match self.state(map.handle) {
                Some(TextureState::Ready(image)) => resolved.diffuse = Some(image),
                Some(TextureState::Failed(_)) | None => {
                    resolved.material.map = None;
                    resolved.fallback = true;
                }
                Some(TextureState::Pending) => resolved.material.map = None,
            }
        }
        if let Some(bump) = material.bump {
            match self.image(bump.handle) {
                Some(image) => resolved.bump = Some(image),
                None => resolved.material.bump = None,
            }
        }
        resolved
    }
}

impl ImageProvider for TextureRegistry {
    fn request(&self, name: &str) -> TextureHandle {
        let mut inner = self.inner.write();
        if let Some(handle) = inner.by_name.get(name) {
            return *handle;
        }

        inner.next_handle += 1;
        let handle = TextureHandle::from_raw(inner.next_handle);
        inner.by_name.insert(name.to_string(), handle);
        inner.entries.insert(
            handle,
            TextureEntry {
                name: name.to_string(),
                state: TextureState::Pending,
            },
        );
        tracing::trace!(name, handle = handle.raw(), "Texture requested");
        handle
    }
}

/// A material with its textures looked up for drawing.
#[derive(Debug, Clone)]
pub struct ResolvedMaterial {
    /// Material with unavailable texture slots cleared.
    pub material: Material,
    pub diffuse: Option<Arc<ImageData>>,
    pub bump: Option<Arc<ImageData>>,
    /// The diffuse texture failed and the solid color stands in.
    pub fallback: bool,
}

/// Outcome of one loader pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub loaded: usize,
    pub failed: usize,
}

/// Loads requested textures from a directory.
#[derive(Debug, Clone)]
pub struct FileImageLoader {
    root: PathBuf,
}

impl FileImageLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn load(&self, name: &str) -> Result<ImageData, ResourceError> {
        let bytes = std::fs::read(self.root.join(name)).map_err(|e| ResourceError::Io {
            name: name.to_string(),
            message: e.to_string(),
        })?;
        decode_image(name, &bytes)
    }

    /// Load every pending request in `registry` on the calling thread.
    pub fn load_pending(&self, registry: &TextureRegistry) -> LoadSummary {
        let mut summary = LoadSummary::default();
        for (handle, name) in registry.pending() {
            let result = self.load(&name);
            if result.is_ok() {
                summary.loaded += 1;
            } else {
                summary.failed += 1;
            }
            if let Err(e) = registry.resolve(handle, result) {
                tracing::error!("Failed to resolve texture '{}': {}", name, e);
            }
        }
        tracing::info!(
            loaded = summary.loaded,
            failed = summary.failed,
            root = %self.root.display(),
            "Texture loading finished"
        );
        summary
    }

    /// Load every pending request on a background thread.
    pub fn spawn(
        self,
        registry: Arc<TextureRegistry>,
    ) -> std::io::Result<JoinHandle<LoadSummary>> {
        std::thread::Builder::new()
            .name("texture-loader".to_string())
            .spawn(move || self.load_pending(&registry))
    }
}

impl Default for FileImageLoader {
    fn default() -> Self {
        Self::new(constants::texture::DEFAULT_ASSET_DIR)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use court_core::TextureRef;
    use image::{DynamicImage, Rgba, RgbaImage};

    use super::*;

    fn png_bytes() -> Vec<u8> {
        let image = RgbaImage::from_pixel(2, 3, Rgba([200, 100, 50, 255]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(image)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("court-textures-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_request_returns_stable_handles() {
        let registry = TextureRegistry::new();
        let a = registry.request("wood.jpg");
        let b = registry.request("Laker.PNG");
        assert_ne!(a, b);
        assert_eq!(registry.request("wood.jpg"), a);
        assert_eq!(registry.state(a), Some(TextureState::Pending));
        assert_eq!(registry.counts().pending, 2);
    }

    #[test]
    fn test_decode_png() {
        let image = decode_image("ball.png", &png_bytes()).unwrap();
        assert_eq!((image.width, image.height), (2, 3));
        assert_eq!(image.pixels.len(), 2 * 3 * 4);
        assert_eq!(&image.pixels[..4], &[200, 100, 50, 255]);

        // Unknown extension still decodes by content
        assert!(decode_image("ball", &png_bytes()).is_ok());
        assert!(matches!(
            decode_image("ball.png", b"not an image"),
            Err(ResourceError::Decode { .. })
        ));
    }

    #[test]
    fn test_resolve_unknown_handle() {
        let registry = TextureRegistry::new();
        let handle = TextureHandle::from_raw(99);
        assert_eq!(
            registry.resolve(handle, Err(ResourceError::UnknownHandle(handle))),
            Err(ResourceError::UnknownHandle(handle))
        );
    }

    #[test]
    fn test_loader_thread_resolves_requests() {
        let dir = temp_dir();
        std::fs::write(dir.join("basketball.png"), png_bytes()).unwrap();

        let registry = Arc::new(TextureRegistry::new());
        let ball = registry.request("basketball.png");
        let missing = registry.request("wood.jpg");

        let summary = FileImageLoader::new(&dir)
            .spawn(registry.clone())
            .unwrap()
            .join()
            .unwrap();
        assert_eq!(summary, LoadSummary { loaded: 1, failed: 1 });
        assert!(registry.image(ball).is_some());
        assert!(matches!(
            registry.state(missing),
            Some(TextureState::Failed(ResourceError::Io { .. }))
        ));
        assert!(registry.pending().is_empty());

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_failed_texture_falls_back_to_color() {
        let registry = TextureRegistry::new();
        let floor = registry.request("wood.jpg");
        let material = Material::phong(0x552583).with_map(TextureRef::repeating(floor, 14.0, 7.0));

        let pending = registry.resolve_material(&material);
        assert!(pending.material.map.is_none());
        assert!(!pending.fallback);

        registry
            .resolve(
                floor,
                Err(ResourceError::Io {
                    name: "wood.jpg".into(),
                    message: "not found".into(),
                }),
            )
            .unwrap();
        let failed = registry.resolve_material(&material);
        assert!(failed.fallback);
        assert!(failed.diffuse.is_none());
        assert_eq!(failed.material.color, material.color);

        let untextured = registry.resolve_material(&Material::basic(0xffffff));
        assert!(!untextured.fallback);
    }
}
