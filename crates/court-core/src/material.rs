//! Surface materials attached to scene nodes.

use serde::{Deserialize, Serialize};

use crate::resource::{TextureHandle, TextureRef};

/// Convert a `0xRRGGBB` color into linear-agnostic RGBA floats.
pub fn hex_color(hex: u32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        1.0,
    ]
}

/// Shading model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MaterialKind {
    /// Unlit, flat color (court lines).
    Basic,
    /// Blinn-Phong with shininess.
    #[default]
    Phong,
    /// Physically based (metal poles, net rings).
    Standard,
    /// Unlit line primitive (net strands).
    Line,
}

/// Bump map with its height scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BumpMap {
    pub handle: TextureHandle,
    pub scale: f32,
}

/// Material description consumed by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub kind: MaterialKind,
    /// Base color (RGBA).
    pub color: [f32; 4],
    /// Diffuse texture.
    pub map: Option<TextureRef>,
    pub bump: Option<BumpMap>,
    pub shininess: f32,
    pub opacity: f32,
    pub transparent: bool,
    pub double_sided: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            kind: MaterialKind::Phong,
            color: [1.0, 1.0, 1.0, 1.0],
            map: None,
            bump: None,
            shininess: 30.0,
            opacity: 1.0,
            transparent: false,
            double_sided: false,
        }
    }
}

impl Material {
    pub fn basic(hex: u32) -> Self {
        Self {
            kind: MaterialKind::Basic,
            color: hex_color(hex),
            ..Default::default()
        }
    }

    pub fn phong(hex: u32) -> Self {
        Self {
            kind: MaterialKind::Phong,
            color: hex_color(hex),
            ..Default::default()
        }
    }

    pub fn standard(hex: u32) -> Self {
        Self {
            kind: MaterialKind::Standard,
            color: hex_color(hex),
            ..Default::default()
        }
    }

    pub fn line(hex: u32) -> Self {
        Self {
            kind: MaterialKind::Line,
            color: hex_color(hex),
            ..Default::default()
        }
    }

    /// Set the diffuse texture.
    pub fn with_map(mut self, map: TextureRef) -> Self {
        self.map = Some(map);
        self
    }

    /// Set the bump map.
    pub fn with_bump(mut self, handle: TextureHandle, scale: f32) -> Self {
        self.bump = Some(BumpMap { handle, scale });
        self
    }

    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }

    /// Enable alpha blending with the given opacity.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self.transparent = true;
        self
    }

    /// Enable alpha blending without changing opacity (alpha comes from the texture).
    pub fn transparent(mut self) -> Self {
        self.transparent = true;
        self
    }

    pub fn double_sided(mut self) -> Self {
        self.double_sided = true;
        self
    }

    /// All texture handles referenced by this material.
    pub fn textures(&self) -> impl Iterator<Item = TextureHandle> + '_ {
        self.map
            .iter()
            .map(|m| m.handle)
            .chain(self.bump.iter().map(|b| b.handle))
    }
}
