use image::RgbaImage;

use crate::{
    assets::{
        database::{AssetDatabase, TextureImportSettings},
        paths::BakePaths,
        texture::TextureRef,
    },
    bake::settings::BakeSettings,
    foundation::{
        core::{ColorSpace, Extent, TextureSemantic},
        error::{BakeError, BakeResult},
    },
};

/// Output slot a baked image is destined for; decides the file-name suffix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MapKind {
    BaseMap,
    Mask,
    Normal,
    Detail,
    Subsurface,
    Thickness,
}

impl MapKind {
    pub fn suffix(self) -> &'static str {
        match self {
            Self::BaseMap => "BaseMap",
            Self::Mask => "Mask",
            Self::Normal => "Normal",
            Self::Detail => "Detail",
            Self::Subsurface => "SSSMap",
            Self::Thickness => "Thickness",
        }
    }

    /// `<sourceMaterialName>_<mapKind>`
    pub fn texture_name(self, source_name: &str) -> String {
        format!("{source_name}_{}", self.suffix())
    }
}

/// How a target's resolution is chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeRule {
    /// Largest present input, capped at the maximum texture size.
    FromInputs,
    /// As `FromInputs`, then capped at the region cap.
    RegionCapped,
    /// Fixed thumbnail square regardless of inputs.
    Thumbnail,
}

/// Color-space and semantic flags applied to a finalized texture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TargetFlags {
    pub color_space: ColorSpace,
    pub semantic: TextureSemantic,
}

impl TargetFlags {
    pub const DATA: Self = Self {
        color_space: ColorSpace::Linear,
        semantic: TextureSemantic::Data,
    };
    pub const SRGB: Self = Self {
        color_space: ColorSpace::Srgb,
        semantic: TextureSemantic::Data,
    };
    pub const NORMAL: Self = Self {
        color_space: ColorSpace::Linear,
        semantic: TextureSemantic::NormalMap,
    };

    /// sRGB color with alpha: alpha-blended when the texture name mentions hair, alpha-clipped
    /// otherwise (eyelashes, brows and other cards).
    pub fn hair(texture_name: &str) -> Self {
        let semantic = if texture_name.to_ascii_lowercase().contains("hair") {
            TextureSemantic::HairAlpha
        } else {
            TextureSemantic::AlphaClip
        };
        Self {
            color_space: ColorSpace::Srgb,
            semantic,
        }
    }
}

/// One in-flight output image: consumed by exactly one dispatch, then finalized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BakeTarget {
    pub name: String,
    pub extent: Extent,
    pub flags: TargetFlags,
}

/// Decides output resolution and persists finished images.
#[derive(Clone, Copy, Debug)]
pub struct TargetAllocator {
    max_size: u32,
    region_cap: u32,
    thumbnail_size: u32,
}

impl TargetAllocator {
    pub fn new(settings: &BakeSettings) -> Self {
        Self {
            max_size: settings.max_size,
            region_cap: settings.region_cap.min(settings.max_size),
            thumbnail_size: settings.thumbnail_size.min(settings.max_size),
        }
    }

    /// Output extent for `rule`. Absent inputs are ignored; with none present the target falls
    /// back to the thumbnail size.
    pub fn extent(&self, rule: SizeRule, inputs: &[Option<&TextureRef>]) -> Extent {
        self.extent_of(rule, inputs.iter().flatten().map(|t| t.extent()))
    }

    /// [`TargetAllocator::extent`] over bare input extents.
    pub fn extent_of(&self, rule: SizeRule, inputs: impl IntoIterator<Item = Extent>) -> Extent {
        let thumbnail = Extent::square(self.thumbnail_size);
        let from_inputs = || {
            inputs
                .into_iter()
                .reduce(Extent::max)
                .map(|e| e.clamp_to(self.max_size))
                .unwrap_or(thumbnail)
        };
        match rule {
            SizeRule::FromInputs => from_inputs(),
            SizeRule::RegionCapped => from_inputs().clamp_to(self.region_cap),
            SizeRule::Thumbnail => thumbnail,
        }
    }

    pub fn allocate(
        &self,
        name: String,
        rule: SizeRule,
        inputs: &[Option<&TextureRef>],
        flags: TargetFlags,
    ) -> BakeTarget {
        BakeTarget {
            name,
            extent: self.extent(rule, inputs),
            flags,
        }
    }

    /// Write the kernel output for `target` to `<textures>/<name>.png` with its import flags.
    pub fn finalize(
        &self,
        target: BakeTarget,
        pixels: &RgbaImage,
        paths: &BakePaths,
        db: &mut dyn AssetDatabase,
    ) -> BakeResult<TextureRef> {
        let (w, h) = pixels.dimensions();
        if (w, h) != (target.extent.width, target.extent.height) {
            return Err(BakeError::validation(format!(
                "kernel output {w}x{h} does not match target '{}' ({}x{})",
                target.name, target.extent.width, target.extent.height
            )));
        }
        let path = paths.texture_path(&target.name);
        let settings = TextureImportSettings::baked(target.flags.color_space, target.flags.semantic);
        db.write_texture(&path, pixels, settings)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/bake/target.rs"]
mod tests;
