use std::{collections::BTreeMap, path::Path, sync::Arc};

use anyhow::Context;

use crate::{
    assets::paths::MATERIAL_EXT,
    bake::settings::BakeSettings,
    foundation::error::BakeResult,
    scene::material::{Material, MaterialFile, MaterialRef},
};

/// The baked-material family a recipe produces; selects the template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub enum MaterialType {
    Skin,
    Teeth,
    Tongue,
    Hair,
    Eye,
    Cornea,
    EyeOcclusion,
}

impl MaterialType {
    pub const ALL: [MaterialType; 7] = [
        Self::Skin,
        Self::Teeth,
        Self::Tongue,
        Self::Hair,
        Self::Eye,
        Self::Cornea,
        Self::EyeOcclusion,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Skin => "Skin",
            Self::Teeth => "Teeth",
            Self::Tongue => "Tongue",
            Self::Hair => "Hair",
            Self::Eye => "Eye",
            Self::Cornea => "Cornea",
            Self::EyeOcclusion => "EyeOcclusion",
        }
    }
}

impl std::fmt::Display for MaterialType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Supplies the baked-quality template material for each [`MaterialType`].
pub trait TemplateRegistry {
    fn template(&self, ty: MaterialType) -> Option<MaterialRef>;
}

pub const CUSTOM_HAIR_SHADER: &str = "Reallusion/RL_HairShaderBaked";
pub const BUILTIN_HAIR_SHADER: &str = "HDRP/Hair";

/// Built-in templates, optionally overridden by user-authored `<Type>.mat` files.
#[derive(Clone, Debug, Default)]
pub struct BuiltinTemplates {
    templates: BTreeMap<MaterialType, MaterialRef>,
}

impl BuiltinTemplates {
    pub fn new(settings: &BakeSettings) -> Self {
        let templates = MaterialType::ALL
            .into_iter()
            .map(|ty| (ty, Arc::new(builtin(ty, settings))))
            .collect();
        Self { templates }
    }

    /// Replace templates with any `<Type>.mat` found in `dir`; other types keep their default.
    ///
    /// Texture slots of template files are kept empty: templates carry shading defaults only.
    pub fn with_overrides_from(mut self, dir: &Path) -> BakeResult<Self> {
        for ty in MaterialType::ALL {
            let path = dir.join(format!("{}.{MATERIAL_EXT}", ty.as_str()));
            if !path.is_file() {
                continue;
            }
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("read template '{}'", path.display()))?;
            let file: MaterialFile = serde_json::from_str(&text)?;
            let name = template_name(ty);
            let material = Material::from_file(&name, &path.to_string_lossy(), file, |_| Ok(None))?;
            tracing::debug!(template = %ty, path = %path.display(), "template override loaded");
            self.templates.insert(ty, Arc::new(material));
        }
        Ok(self)
    }
}

impl TemplateRegistry for BuiltinTemplates {
    fn template(&self, ty: MaterialType) -> Option<MaterialRef> {
        self.templates.get(&ty).cloned()
    }
}

fn template_name(ty: MaterialType) -> String {
    format!("RL_Template_Baked_{}", ty.as_str())
}

// HDRP/Lit material ids.
const LIT_SUBSURFACE: f32 = 0.0;
const LIT_STANDARD: f32 = 1.0;

fn builtin(ty: MaterialType, settings: &BakeSettings) -> Material {
    let shader = match ty {
        MaterialType::Hair if settings.bake_custom_shaders => CUSTOM_HAIR_SHADER,
        MaterialType::Hair => BUILTIN_HAIR_SHADER,
        _ => settings.default_shader.as_str(),
    };
    let mut m = Material::new(template_name(ty), shader);
    match ty {
        MaterialType::Skin | MaterialType::Teeth | MaterialType::Tongue => {
            m.set_float("_MaterialID", LIT_SUBSURFACE);
            m.set_float("_SubsurfaceMask", 1.0);
            m.set_float("_Thickness", 1.0);
            m.set_color("_ThicknessRemap", [0.0, 1.0, 0.0, 0.0]);
        }
        MaterialType::Eye => {
            m.set_float("_MaterialID", LIT_STANDARD);
        }
        MaterialType::Cornea => {
            m.set_float("_MaterialID", LIT_STANDARD);
            m.set_float("_SurfaceType", 1.0);
            m.set_float("_RefractionModel", 1.0);
            m.set_float("_Ior", 1.4);
        }
        MaterialType::EyeOcclusion => {
            m.set_float("_MaterialID", LIT_STANDARD);
            m.set_float("_SurfaceType", 1.0);
            m.set_float("_BlendMode", 0.0);
        }
        MaterialType::Hair => {
            m.set_float("_AlphaCutoffEnable", 1.0);
            m.set_float("_DoubleSidedEnable", 1.0);
        }
    }
    m
}

#[cfg(test)]
#[path = "../../tests/unit/scene/template.rs"]
mod tests;
