use std::sync::Arc;

use image::RgbaImage;

use crate::foundation::{
    core::{ColorSpace, Extent},
    error::{BakeError, BakeResult},
    math::{Rgba, from_u8},
};

/// Shared, immutable texture handle.
///
/// Identity matters: two slots hold "the same texture" iff their handles are `Arc::ptr_eq`.
pub type TextureRef = Arc<Texture>;

/// An RGBA8 texture as read from (or written to) the asset database.
#[derive(Clone, Debug)]
pub struct Texture {
    name: String,
    asset_path: Option<String>,
    color_space: ColorSpace,
    pixels: RgbaImage,
}

impl Texture {
    /// Wrap decoded pixels. Sampling needs at least one texel, so empty images are rejected.
    pub fn new(name: impl Into<String>, pixels: RgbaImage) -> BakeResult<Self> {
        let name = name.into();
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(BakeError::validation(format!(
                "texture '{name}' has no pixels ({}x{})",
                pixels.width(),
                pixels.height()
            )));
        }
        Ok(Self::from_pixels(name, pixels))
    }

    /// A texture filled with one color; each edge is at least one pixel.
    pub fn solid(name: impl Into<String>, extent: Extent, rgba: [u8; 4]) -> Self {
        let extent = extent.clamp_to(u32::MAX);
        let pixels = RgbaImage::from_pixel(extent.width, extent.height, image::Rgba(rgba));
        Self::from_pixels(name.into(), pixels)
    }

    fn from_pixels(name: String, pixels: RgbaImage) -> Self {
        Self {
            name,
            asset_path: None,
            color_space: ColorSpace::Linear,
            pixels,
        }
    }

    pub fn with_asset_path(mut self, path: impl Into<String>) -> Self {
        self.asset_path = Some(path.into());
        self
    }

    pub fn with_color_space(mut self, color_space: ColorSpace) -> Self {
        self.color_space = color_space;
        self
    }

    pub fn into_shared(self) -> TextureRef {
        Arc::new(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Project-relative path of the backing asset, `None` for in-memory textures.
    pub fn asset_path(&self) -> Option<&str> {
        self.asset_path.as_deref()
    }

    pub fn color_space(&self) -> ColorSpace {
        self.color_space
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn extent(&self) -> Extent {
        Extent {
            width: self.pixels.width(),
            height: self.pixels.height(),
        }
    }

    /// Normalized texel fetch with clamp-to-edge addressing.
    pub fn texel(&self, x: i64, y: i64) -> Rgba {
        let (w, h) = self.pixels.dimensions();
        let x = x.clamp(0, i64::from(w) - 1) as u32;
        let y = y.clamp(0, i64::from(h) - 1) as u32;
        let p = self.pixels.get_pixel(x, y).0;
        [from_u8(p[0]), from_u8(p[1]), from_u8(p[2]), from_u8(p[3])]
    }

    /// Bilinear sample at `uv`, where `v = 0` is the bottom row.
    pub fn sample(&self, u: f32, v: f32) -> Rgba {
        let (w, h) = self.pixels.dimensions();
        let x = u * w as f32 - 0.5;
        let y = (1.0 - v) * h as f32 - 0.5;
        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;
        let (x0, y0) = (x0 as i64, y0 as i64);

        let a = self.texel(x0, y0);
        let b = self.texel(x0 + 1, y0);
        let c = self.texel(x0, y0 + 1);
        let d = self.texel(x0 + 1, y0 + 1);

        let mut out = [0.0f32; 4];
        for i in 0..4 {
            let top = a[i] + (b[i] - a[i]) * fx;
            let bottom = c[i] + (d[i] - c[i]) * fx;
            out[i] = top + (bottom - top) * fy;
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/texture.rs"]
mod tests;
