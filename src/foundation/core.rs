use crate::foundation::error::{BakeError, BakeResult};

/// Largest texture edge the bake engine will ever produce or read at full quality.
pub const MAX_TEXTURE_SIZE: u32 = 4096;

/// Image dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Extent {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Extent {
    /// Create a validated, non-empty extent.
    pub fn new(width: u32, height: u32) -> BakeResult<Self> {
        if width == 0 || height == 0 {
            return Err(BakeError::validation("extent width/height must be > 0"));
        }
        Ok(Self { width, height })
    }

    pub const fn square(size: u32) -> Self {
        Self {
            width: size,
            height: size,
        }
    }

    /// Component-wise maximum.
    pub fn max(self, other: Self) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    /// Clamp each dimension to `cap`, never below one pixel.
    pub fn clamp_to(self, cap: u32) -> Self {
        Self {
            width: self.width.clamp(1, cap.max(1)),
            height: self.height.clamp(1, cap.max(1)),
        }
    }

    pub fn pixel_count(self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }
}

/// How texel values of a texture are encoded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorSpace {
    /// Raw data (masks, normals, thickness).
    #[default]
    Linear,
    /// Perceptually encoded color (base color).
    Srgb,
}

/// What the renderer should treat a texture as when importing it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureSemantic {
    /// Generic data or color map.
    #[default]
    Data,
    /// Tangent-space normal map.
    NormalMap,
    /// Base color whose alpha drives hair alpha blending.
    HairAlpha,
    /// Base color whose alpha is used for alpha clipping.
    AlphaClip,
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
