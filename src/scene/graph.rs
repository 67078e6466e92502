use std::sync::Arc;

use crate::scene::material::MaterialRef;

/// Ordered material slots of one renderable node.
#[derive(Clone, Debug, Default)]
pub struct Renderer {
    pub materials: Vec<MaterialRef>,
}

#[derive(Clone, Debug)]
pub struct SceneNode {
    pub name: String,
    /// `None` for transform-only nodes (bones, empties).
    pub renderer: Option<Renderer>,
}

impl SceneNode {
    pub fn transform(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            renderer: None,
        }
    }

    pub fn renderable(name: impl Into<String>, materials: Vec<MaterialRef>) -> Self {
        Self {
            name: name.into(),
            renderer: Some(Renderer { materials }),
        }
    }
}

/// The character hierarchy as delivered by the importer.
///
/// Cloning is shallow for materials: every slot of the clone points at the same material as the
/// original, which is what the rebind step relies on.
#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    pub name: String,
    pub nodes: Vec<SceneNode>,
}

impl SceneGraph {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
        }
    }

    pub fn renderers(&self) -> impl Iterator<Item = &Renderer> {
        self.nodes.iter().filter_map(|n| n.renderer.as_ref())
    }

    /// Every distinct material referenced by any renderer, in first-seen order.
    pub fn unique_materials(&self) -> Vec<MaterialRef> {
        let mut out: Vec<MaterialRef> = Vec::new();
        for m in self.renderers().flat_map(|r| r.materials.iter()) {
            if !out.iter().any(|seen| Arc::ptr_eq(seen, m)) {
                out.push(Arc::clone(m));
            }
        }
        out
    }

    pub fn to_prefab(&self) -> PrefabFile {
        PrefabFile {
            name: self.name.clone(),
            nodes: self
                .nodes
                .iter()
                .map(|n| PrefabNode {
                    name: n.name.clone(),
                    materials: n.renderer.as_ref().map(|r| {
                        r.materials
                            .iter()
                            .map(|m| PrefabMaterial {
                                name: m.name.clone(),
                                path: m.asset_path.clone(),
                            })
                            .collect()
                    }),
                })
                .collect(),
        }
    }
}

/// On-disk JSON form of a persisted scene graph.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PrefabFile {
    pub name: String,
    pub nodes: Vec<PrefabNode>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PrefabNode {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub materials: Option<Vec<PrefabMaterial>>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PrefabMaterial {
    pub name: String,
    #[serde(default)]
    pub path: Option<String>,
}
