use image::RgbaImage;

use crate::{
    assets::texture::TextureRef,
    foundation::{
        core::{ColorSpace, MAX_TEXTURE_SIZE, TextureSemantic},
        error::BakeResult,
    },
    scene::{graph::PrefabFile, material::Material},
};

/// Per-texture import settings, persisted next to the texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TextureImportSettings {
    pub color_space: ColorSpace,
    pub semantic: TextureSemantic,
    pub compressed: bool,
    pub max_size: u32,
}

impl Default for TextureImportSettings {
    fn default() -> Self {
        Self {
            color_space: ColorSpace::Srgb,
            semantic: TextureSemantic::Data,
            compressed: true,
            max_size: 2048,
        }
    }
}

impl TextureImportSettings {
    /// Settings for a freshly baked output texture.
    pub fn baked(color_space: ColorSpace, semantic: TextureSemantic) -> Self {
        Self {
            color_space,
            semantic,
            compressed: false,
            max_size: MAX_TEXTURE_SIZE,
        }
    }

    /// `true` when a kernel can read the texture at full quality.
    pub fn is_lossless(&self, normal: bool) -> bool {
        let semantic_ok = if normal {
            self.semantic == TextureSemantic::NormalMap
        } else {
            self.semantic != TextureSemantic::NormalMap
        };
        !self.compressed && self.max_size >= MAX_TEXTURE_SIZE && semantic_ok
    }

    /// The same settings with compression off, the size cap lifted, and the right type.
    pub fn to_lossless(self, normal: bool) -> Self {
        Self {
            color_space: if normal {
                ColorSpace::Linear
            } else {
                self.color_space
            },
            semantic: if normal {
                TextureSemantic::NormalMap
            } else if self.semantic == TextureSemantic::NormalMap {
                TextureSemantic::Data
            } else {
                self.semantic
            },
            compressed: false,
            max_size: MAX_TEXTURE_SIZE,
        }
    }
}

/// The asset-persistence layer the bake engine writes through.
///
/// All paths are project-relative and `/`-separated.
pub trait AssetDatabase {
    fn exists(&self, path: &str) -> bool;

    /// Create `folder` and any missing parents.
    fn create_folder(&mut self, folder: &str) -> BakeResult<()>;

    fn load_texture(&mut self, path: &str) -> BakeResult<TextureRef>;

    fn import_settings(&self, path: &str) -> BakeResult<Option<TextureImportSettings>>;

    /// Switch a source texture to lossless, full-resolution import before it is read.
    ///
    /// Returns `true` when the settings changed and the texture was reimported.
    fn ensure_lossless_import(&mut self, path: &str, normal: bool) -> BakeResult<bool>;

    /// Persist a baked image and return the handle of the stored texture.
    fn write_texture(
        &mut self,
        path: &str,
        pixels: &RgbaImage,
        settings: TextureImportSettings,
    ) -> BakeResult<TextureRef>;

    /// Look up `<folder>/<name>.mat`.
    fn find_material(&mut self, folder: &str, name: &str) -> BakeResult<Option<Material>>;

    fn save_material(&mut self, path: &str, material: &Material) -> BakeResult<()>;

    /// `path` itself when free, otherwise the first free `<stem> N.<ext>` variant.
    fn unique_path(&self, path: &str) -> String;

    /// Write pending import metadata for `path`; `true` when it had been dirtied.
    fn write_import_settings_if_dirty(&mut self, path: &str) -> BakeResult<bool>;

    fn reimport(&mut self, paths: &[String]) -> BakeResult<()>;

    fn save_prefab(&mut self, path: &str, prefab: &PrefabFile) -> BakeResult<()>;

    /// Flush and refresh; called once after the material batch.
    fn save_assets(&mut self) -> BakeResult<()>;
}
