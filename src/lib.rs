//! cc3-bake flattens Character Creator 3 high-quality shader materials into fixed PBR texture
//! sets.
//!
//! A bake walks a character's materials once:
//!
//! - route each material to its category recipe by shader tag
//! - composite the recipe's output maps on a [`ComputeBackend`]
//! - write the maps and a baked material next to the model, then save a prefab whose slots
//!   point at the baked materials
//!
//! The asset layer is behind [`AssetDatabase`]; [`FsAssetDatabase`] stores everything as PNG and
//! JSON files under a project root.
#![forbid(unsafe_code)]

pub mod assets;
pub mod bake;
pub mod foundation;
pub mod kernel;
pub mod scene;

pub use crate::assets::database::{AssetDatabase, TextureImportSettings};
pub use crate::assets::fs::FsAssetDatabase;
pub use crate::assets::paths::BakePaths;
pub use crate::assets::texture::{Texture, TextureRef};
pub use crate::bake::{BakeReport, BakeSettings, bake_character};
pub use crate::foundation::core::{ColorSpace, Extent, TextureSemantic};
pub use crate::foundation::error::{BakeError, BakeResult};
pub use crate::kernel::{
    BackendKind, ComputeBackend, CpuBackend, CpuBackendOpts, RecordingBackend, create_backend,
};
pub use crate::scene::manifest::{Character, CharacterManifest};
pub use crate::scene::material::{Material, MaterialRef};
pub use crate::scene::template::{BuiltinTemplates, MaterialType, TemplateRegistry};
