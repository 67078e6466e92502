use std::{
    collections::{BTreeSet, HashMap},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use image::RgbaImage;

use crate::{
    assets::{
        database::{AssetDatabase, TextureImportSettings},
        paths::{file_stem, join, normalize_asset_path, parent},
        texture::{Texture, TextureRef},
    },
    foundation::error::{BakeError, BakeResult},
    scene::{
        graph::PrefabFile,
        material::{Material, MaterialFile},
    },
};

const META_EXT: &str = "meta";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FsAssetStats {
    pub textures_written: u64,
    pub materials_written: u64,
    pub source_reimports: u64,
    pub deferred_reimports: u64,
}

/// [`AssetDatabase`] backed by a project directory on disk.
///
/// Textures are PNG files, materials and prefabs are JSON documents, and import settings live in
/// a `<asset>.meta` JSON sidecar next to each asset.
pub struct FsAssetDatabase {
    root: PathBuf,
    textures: HashMap<String, TextureRef>,
    dirty: BTreeSet<String>,
    stats: FsAssetStats,
}

#[derive(serde::Serialize, serde::Deserialize)]
struct MaterialMeta {
    kind: String,
}

impl FsAssetDatabase {
    pub fn open(root: impl Into<PathBuf>) -> BakeResult<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(BakeError::asset(format!(
                "project root '{}' is not a directory",
                root.display()
            )));
        }
        Ok(Self {
            root,
            textures: HashMap::new(),
            dirty: BTreeSet::new(),
            stats: FsAssetStats::default(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn stats(&self) -> FsAssetStats {
        self.stats
    }

    fn abs(&self, path: &str) -> BakeResult<PathBuf> {
        Ok(self.root.join(normalize_asset_path(path)?))
    }

    fn meta_path(&self, path: &str) -> BakeResult<PathBuf> {
        let norm = normalize_asset_path(path)?;
        Ok(self.root.join(format!("{norm}.{META_EXT}")))
    }

    fn write_json<T: serde::Serialize>(&self, abs: &Path, value: &T) -> BakeResult<()> {
        if let Some(dir) = abs.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("create folder '{}'", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(value)?;
        std::fs::write(abs, json).with_context(|| format!("write '{}'", abs.display()))?;
        Ok(())
    }

    fn write_settings(&self, path: &str, settings: &TextureImportSettings) -> BakeResult<()> {
        let meta = self.meta_path(path)?;
        self.write_json(&meta, settings)
    }
}

impl AssetDatabase for FsAssetDatabase {
    fn exists(&self, path: &str) -> bool {
        self.abs(path).map(|p| p.exists()).unwrap_or(false)
    }

    fn create_folder(&mut self, folder: &str) -> BakeResult<()> {
        let abs = self.abs(folder)?;
        std::fs::create_dir_all(&abs)
            .with_context(|| format!("create folder '{}'", abs.display()))?;
        Ok(())
    }

    fn load_texture(&mut self, path: &str) -> BakeResult<TextureRef> {
        let norm = normalize_asset_path(path)?;
        if let Some(t) = self.textures.get(&norm) {
            return Ok(t.clone());
        }

        let abs = self.abs(&norm)?;
        let pixels = image::open(&abs)
            .with_context(|| format!("open texture '{}'", abs.display()))?
            .to_rgba8();
        let settings = self.import_settings(&norm)?.unwrap_or_default();
        let texture = Texture::new(file_stem(&norm), pixels)?
            .with_asset_path(norm.clone())
            .with_color_space(settings.color_space)
            .into_shared();
        self.textures.insert(norm, texture.clone());
        Ok(texture)
    }

    fn import_settings(&self, path: &str) -> BakeResult<Option<TextureImportSettings>> {
        let meta = self.meta_path(path)?;
        if !meta.exists() {
            return Ok(None);
        }
        let text = std::fs::read_to_string(&meta)
            .with_context(|| format!("read '{}'", meta.display()))?;
        Ok(Some(serde_json::from_str(&text)?))
    }

    fn ensure_lossless_import(&mut self, path: &str, normal: bool) -> BakeResult<bool> {
        let norm = normalize_asset_path(path)?;
        let current = self.import_settings(&norm)?.unwrap_or_default();
        if current.is_lossless(normal) {
            return Ok(false);
        }

        self.write_settings(&norm, &current.to_lossless(normal))?;
        self.textures.remove(&norm);
        self.stats.source_reimports += 1;
        tracing::debug!(path = %norm, normal, "reimported source texture lossless");
        Ok(true)
    }

    fn write_texture(
        &mut self,
        path: &str,
        pixels: &RgbaImage,
        settings: TextureImportSettings,
    ) -> BakeResult<TextureRef> {
        let norm = normalize_asset_path(path)?;
        let abs = self.abs(&norm)?;
        if let Some(dir) = abs.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("create folder '{}'", dir.display()))?;
        }
        pixels.save_with_format(&abs, image::ImageFormat::Png)?;
        self.write_settings(&norm, &settings)?;

        let texture = Texture::new(file_stem(&norm), pixels.clone())?
            .with_asset_path(norm.clone())
            .with_color_space(settings.color_space)
            .into_shared();
        self.textures.insert(norm, texture.clone());
        self.stats.textures_written += 1;
        Ok(texture)
    }

    fn find_material(&mut self, folder: &str, name: &str) -> BakeResult<Option<Material>> {
        let path = normalize_asset_path(&join(folder, &format!("{name}.mat")))?;
        if !self.exists(&path) {
            return Ok(None);
        }
        let abs = self.abs(&path)?;
        let text =
            std::fs::read_to_string(&abs).with_context(|| format!("read '{}'", abs.display()))?;
        let file: MaterialFile = serde_json::from_str(&text)?;
        let material = Material::from_file(name, &path, file, |p| {
            if !self.exists(p) {
                tracing::warn!(material = %path, texture = %p, "material references a missing texture");
                return Ok(None);
            }
            self.load_texture(p).map(Some)
        })?;
        Ok(Some(material))
    }

    fn save_material(&mut self, path: &str, material: &Material) -> BakeResult<()> {
        let norm = normalize_asset_path(path)?;
        let abs = self.abs(&norm)?;
        let json = serde_json::to_string_pretty(&material.to_file())?;
        let unchanged = std::fs::read_to_string(&abs)
            .map(|old| old == json)
            .unwrap_or(false);
        if unchanged {
            return Ok(());
        }

        if let Some(dir) = abs.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("create folder '{}'", dir.display()))?;
        }
        std::fs::write(&abs, json).with_context(|| format!("write '{}'", abs.display()))?;
        self.dirty.insert(norm);
        self.stats.materials_written += 1;
        Ok(())
    }

    fn unique_path(&self, path: &str) -> String {
        if !self.exists(path) {
            return path.to_string();
        }
        let folder = parent(path);
        let stem = file_stem(path);
        let ext = path
            .rsplit_once('/')
            .map(|(_, n)| n)
            .unwrap_or(path)
            .rsplit_once('.')
            .map(|(_, e)| format!(".{e}"))
            .unwrap_or_default();
        (1u32..)
            .map(|i| join(folder, &format!("{stem} {i}{ext}")))
            .find(|candidate| !self.exists(candidate))
            .unwrap_or_else(|| path.to_string())
    }

    fn write_import_settings_if_dirty(&mut self, path: &str) -> BakeResult<bool> {
        let norm = normalize_asset_path(path)?;
        if !self.dirty.remove(&norm) {
            return Ok(false);
        }
        let meta = self.meta_path(&norm)?;
        self.write_json(
            &meta,
            &MaterialMeta {
                kind: "material".to_string(),
            },
        )?;
        Ok(true)
    }

    fn reimport(&mut self, paths: &[String]) -> BakeResult<()> {
        for p in paths {
            let norm = normalize_asset_path(p)?;
            self.textures.remove(&norm);
            let abs = self.abs(&norm)?;
            if norm.ends_with(".mat") {
                let text = std::fs::read_to_string(&abs)
                    .with_context(|| format!("reimport '{}'", abs.display()))?;
                let _: MaterialFile = serde_json::from_str(&text)?;
            }
            self.stats.deferred_reimports += 1;
        }
        Ok(())
    }

    fn save_prefab(&mut self, path: &str, prefab: &PrefabFile) -> BakeResult<()> {
        let abs = self.abs(path)?;
        self.write_json(&abs, prefab)
    }

    fn save_assets(&mut self) -> BakeResult<()> {
        tracing::debug!(
            root = %self.root.display(),
            pending = self.dirty.len(),
            "asset database saved"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fs.rs"]
mod tests;
