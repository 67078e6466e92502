use std::cell::OnceCell;

use crate::{
    assets::texture::{Texture, TextureRef},
    foundation::core::{ColorSpace, Extent},
};

/// What an absent texture slot stands for, which decides its placeholder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FallbackKind {
    /// Opaque white base color.
    Diffuse,
    /// Flat tangent-space normal.
    Normal,
    /// Opaque white mask: full AO, full weight.
    Mask,
    /// Mid-gray, the identity for overlay blends.
    Overlay,
    /// Opaque black: region masks that select nothing.
    Blank,
    /// 8×8 cyan debug texture with alpha 0.5, used for unmapped HDRP mask inputs.
    Hdrp,
}

impl FallbackKind {
    fn appearance(self) -> (&'static str, u32, [u8; 4], ColorSpace) {
        match self {
            Self::Diffuse => ("fallback_white", 4, [255, 255, 255, 255], ColorSpace::Srgb),
            Self::Normal => ("fallback_normal", 4, [128, 128, 255, 255], ColorSpace::Linear),
            Self::Mask => ("fallback_mask", 4, [255, 255, 255, 255], ColorSpace::Linear),
            Self::Overlay => ("fallback_gray", 4, [128, 128, 128, 255], ColorSpace::Linear),
            Self::Blank => ("fallback_black", 4, [0, 0, 0, 255], ColorSpace::Linear),
            Self::Hdrp => ("fallback_hdrp", 8, [0, 255, 255, 128], ColorSpace::Linear),
        }
    }
}

/// Substitutes placeholders for absent inputs so every dispatch sees a full parameter set.
///
/// Placeholders are built on first use and shared for the lifetime of the policy, which is one
/// bake session.
#[derive(Debug, Default)]
pub struct FallbackPolicy {
    diffuse: OnceCell<TextureRef>,
    normal: OnceCell<TextureRef>,
    mask: OnceCell<TextureRef>,
    overlay: OnceCell<TextureRef>,
    blank: OnceCell<TextureRef>,
    hdrp: OnceCell<TextureRef>,
}

impl FallbackPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// `texture` itself when present, otherwise the placeholder for `kind`.
    pub fn resolve(&self, texture: Option<&TextureRef>, kind: FallbackKind) -> TextureRef {
        match texture {
            Some(t) => t.clone(),
            None => self.placeholder(kind),
        }
    }

    pub fn placeholder(&self, kind: FallbackKind) -> TextureRef {
        self.cell(kind)
            .get_or_init(|| {
                let (name, size, rgba, color_space) = kind.appearance();
                tracing::trace!(name, "placeholder texture created");
                Texture::solid(name, Extent::square(size), rgba)
                    .with_color_space(color_space)
                    .into_shared()
            })
            .clone()
    }

    /// Whether the debug placeholder has been built in this session.
    pub fn hdrp_placeholder_created(&self) -> bool {
        self.hdrp.get().is_some()
    }

    fn cell(&self, kind: FallbackKind) -> &OnceCell<TextureRef> {
        match kind {
            FallbackKind::Diffuse => &self.diffuse,
            FallbackKind::Normal => &self.normal,
            FallbackKind::Mask => &self.mask,
            FallbackKind::Overlay => &self.overlay,
            FallbackKind::Blank => &self.blank,
            FallbackKind::Hdrp => &self.hdrp,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/bake/fallback.rs"]
mod tests;
