use std::sync::Arc;

use crate::{
    assets::{database::AssetDatabase, paths},
    foundation::error::BakeResult,
    scene::{graph::SceneGraph, material::MaterialRef},
};

/// Pairs of `(original, baked)` materials.
pub type MaterialMap = Vec<(MaterialRef, MaterialRef)>;

/// Point every slot that holds an original material at its baked counterpart.
///
/// Matching is by identity, so two distinct materials that happen to share a name are never
/// confused. Slot order and unrelated slots are left as they are. Returns the number of slots
/// replaced.
pub fn rebind(graph: &mut SceneGraph, map: &[(MaterialRef, MaterialRef)]) -> usize {
    let mut replaced = 0;
    for renderer in graph.nodes.iter_mut().filter_map(|n| n.renderer.as_mut()) {
        for slot in renderer.materials.iter_mut() {
            if let Some((_, baked)) = map.iter().find(|(orig, _)| Arc::ptr_eq(orig, slot)) {
                *slot = Arc::clone(baked);
                replaced += 1;
            }
        }
    }
    replaced
}

/// Persist the rebound clone as a prefab at `path` and drop it.
#[tracing::instrument(skip(graph, db), fields(graph = %graph.name))]
pub fn finalize(graph: SceneGraph, db: &mut dyn AssetDatabase, path: &str) -> BakeResult<String> {
    let folder = paths::parent(path);
    if !folder.is_empty() {
        db.create_folder(folder)?;
    }
    db.save_prefab(path, &graph.to_prefab())?;
    tracing::info!(path, "baked prefab written");
    Ok(path.to_string())
}

#[cfg(test)]
#[path = "../../tests/unit/scene/rebind.rs"]
mod tests;
