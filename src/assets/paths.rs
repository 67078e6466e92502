use crate::foundation::error::{BakeError, BakeResult};

pub const BAKE_FOLDER: &str = "Baked";
pub const TEXTURES_FOLDER: &str = "Textures";
pub const MATERIALS_FOLDER: &str = "Materials";
pub const PREFABS_FOLDER: &str = "Prefabs";
pub const MATERIAL_EXT: &str = "mat";
pub const TEXTURE_EXT: &str = "png";
pub const PREFAB_EXT: &str = "prefab";

/// Canonical form of a project-relative asset path: `/` separators, no `.` segments, no
/// surrounding whitespace.
///
/// Paths that would escape the project (leading `/`, a drive prefix such as `C:`, or `..`)
/// are rejected, as are paths that name no asset at all.
pub fn normalize_asset_path(source: &str) -> BakeResult<String> {
    let invalid = |why: &str| BakeError::validation(format!("asset path '{source}' {why}"));
    let unified = source.trim().replace('\\', "/");
    if unified.is_empty() {
        return Err(invalid("is empty"));
    }
    if unified.starts_with('/') || has_drive_prefix(&unified) {
        return Err(invalid("must be relative to the project"));
    }

    let segments = unified
        .split('/')
        .filter(|seg| !seg.is_empty() && *seg != ".")
        .map(|seg| match seg {
            ".." => Err(invalid("must not leave the project")),
            _ => Ok(seg),
        })
        .collect::<BakeResult<Vec<_>>>()?;
    if segments.is_empty() {
        return Err(invalid("names no asset"));
    }
    Ok(segments.join("/"))
}

fn has_drive_prefix(path: &str) -> bool {
    matches!(path.as_bytes(), [letter, b':', ..] if letter.is_ascii_alphabetic())
}

pub fn join(folder: &str, name: &str) -> String {
    if folder.is_empty() {
        return name.to_string();
    }
    format!("{}/{}", folder.trim_end_matches('/'), name)
}

/// Folder part of an asset path (empty for top-level files).
pub fn parent(path: &str) -> &str {
    path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

/// File name without folder and without its last extension.
pub fn file_stem(path: &str) -> &str {
    let name = path.rsplit_once('/').map(|(_, n)| n).unwrap_or(path);
    match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    }
}

/// Deterministic output locations for one character's bake.
///
/// ```text
/// <fbxFolder>/Baked/<name>/Textures/<source>_<kind>.png
/// <fbxFolder>/Baked/<name>/Materials/<source>.mat
/// <fbxFolder>/Prefabs/<name>/<name>_Baked.prefab
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BakePaths {
    pub model_path: String,
    pub character_name: String,
    pub model_folder: String,
    pub bake_folder: String,
    pub character_folder: String,
    pub textures_folder: String,
    pub materials_folder: String,
    pub prefab_folder: String,
}

impl BakePaths {
    pub fn for_model(model_path: &str) -> BakeResult<Self> {
        let model_path = normalize_asset_path(model_path)?;
        let character_name = file_stem(&model_path).to_string();
        let model_folder = parent(&model_path).to_string();
        let bake_folder = join(&model_folder, BAKE_FOLDER);
        let character_folder = join(&bake_folder, &character_name);
        let textures_folder = join(&character_folder, TEXTURES_FOLDER);
        let materials_folder = join(&character_folder, MATERIALS_FOLDER);
        let prefab_folder = join(&join(&model_folder, PREFABS_FOLDER), &character_name);
        Ok(Self {
            model_path,
            character_name,
            model_folder,
            bake_folder,
            character_folder,
            textures_folder,
            materials_folder,
            prefab_folder,
        })
    }

    /// `<textures>/<sourceMaterialName>_<mapKind>.png`
    pub fn texture_path(&self, texture_name: &str) -> String {
        join(
            &self.textures_folder,
            &format!("{texture_name}.{TEXTURE_EXT}"),
        )
    }

    pub fn material_path(&self, source_name: &str) -> String {
        join(
            &self.materials_folder,
            &format!("{source_name}.{MATERIAL_EXT}"),
        )
    }

    pub fn prefab_path(&self) -> String {
        join(
            &self.prefab_folder,
            &format!("{}_Baked.{PREFAB_EXT}", self.character_name),
        )
    }

    /// Every folder the bake writes into.
    pub fn folders(&self) -> [&str; 3] {
        [
            &self.textures_folder,
            &self.materials_folder,
            &self.prefab_folder,
        ]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/paths.rs"]
mod tests;
