//! Court Scene Renderer.
//!
//! Everything between the composed court scene and a frame on screen,
//! minus the GPU backend itself.
//!
//! # Architecture
//!
//! - [`camera::Camera`] / [`camera::OrbitController`] - view state and orbit controls
//! - [`presets::CameraPresets`] - the fixed viewpoints cycled from the keyboard
//! - [`mesh`] - CPU mesh generation for every scene primitive
//! - [`scene::RenderScene`] - flattened, draw-ready objects
//! - [`texture::TextureRegistry`] - asynchronous image loading behind handles
//! - [`renderer::FrameRenderer`] - the boundary a rendering backend implements

pub mod camera;
pub mod config;
pub mod constants;
pub mod mesh;
pub mod presets;
pub mod renderer;
pub mod scene;
pub mod texture;
pub mod vertex;

pub use camera::{Camera, OrbitController};
pub use config::{CameraConfig, OrbitConfig, RendererConfig};
pub use mesh::{MeshCache, MeshData, MeshHandle, Topology};
pub use presets::{CameraPreset, CameraPresets, PresetError};
pub use renderer::{FrameRenderer, FrameStats, HeadlessRenderer, RenderError};
pub use scene::{BoundingBox, RenderLayer, RenderObject, RenderScene};
pub use texture::{
    FileImageLoader, ImageData, LoadSummary, ResolvedMaterial, ResourceError, TextureCounts,
    TextureRegistry, TextureState, decode_image,
};
pub use vertex::MeshVertex;
