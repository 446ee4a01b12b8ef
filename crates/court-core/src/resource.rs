//! Texture handles and the image provider boundary.

use serde::{Deserialize, Serialize};

/// Handle to an image requested from an [`ImageProvider`].
///
/// Handles are returned immediately; the pixel data behind them may
/// arrive later (or never, if loading fails).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextureHandle(u64);

impl TextureHandle {
    /// Returns the raw handle value.
    pub fn raw(&self) -> u64 {
        self.0
    }

    /// Creates a handle from a raw value.
    pub fn from_raw(value: u64) -> Self {
        Self(value)
    }
}

/// Texture addressing outside the [0, 1] UV range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextureWrap {
    #[default]
    Clamp,
    Repeat,
}

/// A texture bound to a material slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextureRef {
    pub handle: TextureHandle,
    pub wrap: TextureWrap,
    /// UV repeat count (only meaningful with [`TextureWrap::Repeat`]).
    pub repeat: [f32; 2],
}

impl TextureRef {
    /// Clamped texture with no repetition.
    pub fn new(handle: TextureHandle) -> Self {
        Self {
            handle,
            wrap: TextureWrap::Clamp,
            repeat: [1.0, 1.0],
        }
    }

    /// Repeating texture tiled `u x v` times.
    pub fn repeating(handle: TextureHandle, u: f32, v: f32) -> Self {
        Self {
            handle,
            wrap: TextureWrap::Repeat,
            repeat: [u, v],
        }
    }
}

/// Source of named images.
///
/// `request` must return without waiting for the image data.
pub trait ImageProvider {
    fn request(&self, name: &str) -> TextureHandle;
}
