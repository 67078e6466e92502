//! JSON description of an imported character, and its resolution into a live [`Character`].

use std::{
    collections::{BTreeMap, HashMap},
    path::Path,
    sync::Arc,
};

use anyhow::Context;

use crate::{
    assets::{
        database::AssetDatabase,
        paths::{file_stem, normalize_asset_path},
    },
    foundation::error::{BakeError, BakeResult},
    scene::{
        graph::{SceneGraph, SceneNode},
        material::{Material, MaterialRef},
    },
};

/// The only character generation the bake engine understands.
pub const CC3_GENERATION: &str = "CC3";

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CharacterManifest {
    /// Project-relative path of the imported model; the character is named after its stem.
    pub model_path: String,
    pub generation: String,
    pub nodes: Vec<NodeManifest>,
    #[serde(default)]
    pub materials: BTreeMap<String, MaterialManifest>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeManifest {
    pub name: String,
    /// Material names per slot; absent for transform-only nodes.
    #[serde(default)]
    pub materials: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaterialManifest {
    pub shader: String,
    /// Name the material had in the source model, when it was renamed after import.
    #[serde(default)]
    pub source_name: Option<String>,
    /// Where the material asset itself lives, if it was extracted from the model.
    #[serde(default)]
    pub asset_path: Option<String>,
    /// Slot name to texture asset path.
    #[serde(default)]
    pub textures: BTreeMap<String, String>,
    #[serde(default)]
    pub floats: BTreeMap<String, f32>,
    #[serde(default)]
    pub colors: BTreeMap<String, [f32; 4]>,
    #[serde(default)]
    pub vectors: BTreeMap<String, [f32; 4]>,
}

impl CharacterManifest {
    pub fn from_json(text: &str) -> BakeResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path(path: &Path) -> BakeResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read manifest '{}'", path.display()))?;
        Self::from_json(&text)
    }
}

/// An imported character with its source materials resolved against the asset database.
#[derive(Clone, Debug)]
pub struct Character {
    pub name: String,
    pub model_path: String,
    pub generation: String,
    pub graph: SceneGraph,
    source_names: HashMap<String, String>,
}

impl Character {
    /// Build the scene graph and load every referenced texture.
    ///
    /// Each texture is switched to lossless import before it is read so kernels see full
    /// resolution, uncompressed data.
    #[tracing::instrument(skip(manifest, db), fields(model = %manifest.model_path))]
    pub fn load(manifest: &CharacterManifest, db: &mut dyn AssetDatabase) -> BakeResult<Self> {
        let model_path = normalize_asset_path(&manifest.model_path)?;
        let name = file_stem(&model_path).to_string();

        let mut materials: HashMap<&str, MaterialRef> = HashMap::new();
        let mut source_names = HashMap::new();
        for (mat_name, m) in &manifest.materials {
            let mut material = Material::new(mat_name.as_str(), m.shader.as_str());
            material.asset_path = m.asset_path.as_deref().map(normalize_asset_path).transpose()?;
            for (slot, path) in &m.textures {
                db.ensure_lossless_import(path, is_normal_slot(slot))?;
                material.set_texture(slot, Some(db.load_texture(path)?));
            }
            material.floats = m.floats.clone();
            material.colors = m.colors.clone();
            material.vectors = m.vectors.clone();
            if let Some(src) = &m.source_name {
                source_names.insert(mat_name.clone(), src.clone());
            }
            materials.insert(mat_name.as_str(), Arc::new(material));
        }

        let mut graph = SceneGraph::new(name.as_str());
        for node in &manifest.nodes {
            let Some(slots) = &node.materials else {
                graph.nodes.push(SceneNode::transform(node.name.as_str()));
                continue;
            };
            let refs = slots
                .iter()
                .map(|s| {
                    materials.get(s.as_str()).cloned().ok_or_else(|| {
                        BakeError::validation(format!(
                            "node '{}' references unknown material '{s}'",
                            node.name
                        ))
                    })
                })
                .collect::<BakeResult<Vec<_>>>()?;
            graph
                .nodes
                .push(SceneNode::renderable(node.name.as_str(), refs));
        }

        tracing::debug!(
            character = %name,
            materials = materials.len(),
            nodes = graph.nodes.len(),
            "character loaded"
        );
        Ok(Self {
            name,
            model_path,
            generation: manifest.generation.clone(),
            graph,
            source_names,
        })
    }

    /// A CC3 character assembled in code rather than from a manifest.
    pub fn new(model_path: &str, graph: SceneGraph) -> BakeResult<Self> {
        let model_path = normalize_asset_path(model_path)?;
        Ok(Self {
            name: file_stem(&model_path).to_string(),
            model_path,
            generation: CC3_GENERATION.to_string(),
            graph,
            source_names: HashMap::new(),
        })
    }

    pub fn with_generation(mut self, generation: impl Into<String>) -> Self {
        self.generation = generation.into();
        self
    }

    pub fn is_cc3(&self) -> bool {
        self.generation.eq_ignore_ascii_case(CC3_GENERATION)
    }

    /// The material's name in the source model; baked assets are keyed by it.
    pub fn source_name<'a>(&'a self, material: &'a Material) -> &'a str {
        self.source_names
            .get(&material.name)
            .map(String::as_str)
            .unwrap_or(&material.name)
    }
}

/// Normal-map slots are imported with the normal-map texture type.
pub fn is_normal_slot(slot: &str) -> bool {
    slot.contains("Normal") && !slot.contains("Strength")
}

#[cfg(test)]
#[path = "../../tests/unit/scene/manifest.rs"]
mod tests;
