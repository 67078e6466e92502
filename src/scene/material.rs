use std::{collections::BTreeMap, sync::Arc};

use crate::{assets::texture::TextureRef, foundation::error::BakeResult};

/// Shared material handle; slot identity is `Arc::ptr_eq`.
pub type MaterialRef = Arc<Material>;

/// A texture binding plus its UV tiling.
#[derive(Clone, Debug)]
pub struct TextureSlot {
    pub texture: Option<TextureRef>,
    pub scale: [f32; 2],
}

impl Default for TextureSlot {
    fn default() -> Self {
        Self {
            texture: None,
            scale: [1.0, 1.0],
        }
    }
}

/// A shader plus its full parameter block.
///
/// Used both for source materials delivered by the importer (read-only during a bake) and for
/// the baked materials the assembler writes.
#[derive(Clone, Debug, Default)]
pub struct Material {
    pub name: String,
    pub shader: String,
    /// Project-relative path of the asset this material lives in.
    pub asset_path: Option<String>,
    pub textures: BTreeMap<String, TextureSlot>,
    pub floats: BTreeMap<String, f32>,
    pub colors: BTreeMap<String, [f32; 4]>,
    pub vectors: BTreeMap<String, [f32; 4]>,
}

impl Material {
    pub fn new(name: impl Into<String>, shader: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shader: shader.into(),
            ..Self::default()
        }
    }

    /// Shader name without its menu path, e.g. `Reallusion/RL_TeethShader` -> `RL_TeethShader`.
    pub fn shader_tag(&self) -> &str {
        self.shader
            .rsplit_once('/')
            .map(|(_, tag)| tag)
            .unwrap_or(&self.shader)
    }

    pub fn texture(&self, slot: &str) -> Option<&TextureRef> {
        self.textures.get(slot).and_then(|s| s.texture.as_ref())
    }

    pub fn set_texture(&mut self, slot: &str, texture: Option<TextureRef>) {
        self.textures.entry(slot.to_string()).or_default().texture = texture;
    }

    pub fn texture_scale(&self, slot: &str) -> Option<[f32; 2]> {
        self.textures.get(slot).map(|s| s.scale)
    }

    pub fn set_texture_scale(&mut self, slot: &str, scale: [f32; 2]) {
        self.textures.entry(slot.to_string()).or_default().scale = scale;
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        self.floats.get(name).copied()
    }

    pub fn set_float(&mut self, name: &str, value: f32) {
        self.floats.insert(name.to_string(), value);
    }

    pub fn color(&self, name: &str) -> Option<[f32; 4]> {
        self.colors.get(name).copied()
    }

    pub fn set_color(&mut self, name: &str, value: [f32; 4]) {
        self.colors.insert(name.to_string(), value);
    }

    pub fn vector(&self, name: &str) -> Option<[f32; 4]> {
        self.vectors.get(name).copied()
    }

    pub fn set_vector(&mut self, name: &str, value: [f32; 4]) {
        self.vectors.insert(name.to_string(), value);
    }

    /// Copy the whole shading-parameter block of `other`, keeping name and asset path.
    pub fn copy_properties_from(&mut self, other: &Material) {
        self.textures = other.textures.clone();
        self.floats = other.floats.clone();
        self.colors = other.colors.clone();
        self.vectors = other.vectors.clone();
    }

    pub fn to_file(&self) -> MaterialFile {
        MaterialFile {
            shader: self.shader.clone(),
            textures: self
                .textures
                .iter()
                .map(|(k, s)| {
                    (
                        k.clone(),
                        TextureSlotFile {
                            path: s
                                .texture
                                .as_ref()
                                .and_then(|t| t.asset_path().map(str::to_string)),
                            scale: s.scale,
                        },
                    )
                })
                .collect(),
            floats: self.floats.clone(),
            colors: self.colors.clone(),
            vectors: self.vectors.clone(),
        }
    }

    /// Rebuild a material from its persisted form, resolving texture paths through `load`.
    ///
    /// `load` may return `None` for textures that no longer exist; the slot is kept empty.
    pub fn from_file(
        name: &str,
        asset_path: &str,
        file: MaterialFile,
        mut load: impl FnMut(&str) -> BakeResult<Option<TextureRef>>,
    ) -> BakeResult<Self> {
        let mut textures = BTreeMap::new();
        for (slot, f) in file.textures {
            let texture = match f.path {
                Some(p) => load(&p)?,
                None => None,
            };
            textures.insert(
                slot,
                TextureSlot {
                    texture,
                    scale: f.scale,
                },
            );
        }
        Ok(Self {
            name: name.to_string(),
            shader: file.shader,
            asset_path: Some(asset_path.to_string()),
            textures,
            floats: file.floats,
            colors: file.colors,
            vectors: file.vectors,
        })
    }
}

/// On-disk JSON form of a [`Material`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MaterialFile {
    pub shader: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub textures: BTreeMap<String, TextureSlotFile>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub floats: BTreeMap<String, f32>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub colors: BTreeMap<String, [f32; 4]>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub vectors: BTreeMap<String, [f32; 4]>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextureSlotFile {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default = "unit_scale")]
    pub scale: [f32; 2],
}

fn unit_scale() -> [f32; 2] {
    [1.0, 1.0]
}

#[cfg(test)]
#[path = "../../tests/unit/scene/material.rs"]
mod tests;
