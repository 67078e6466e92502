use std::sync::Arc;

use crate::{
    bake::{context::BakeContext, recipes::RecipeOutput, settings::BakeSettings},
    foundation::error::{BakeError, BakeResult},
    scene::{
        material::{Material, MaterialRef},
        template::TemplateRegistry,
    },
};

/// Write the baked material for `source_name` and return it.
///
/// The material at the deterministic path is reused when it exists, so repeated bakes of one
/// character overwrite rather than duplicate. The template, when supplied, replaces the whole
/// shading block before the baked maps and recipe overrides are applied on top.
pub fn assemble(
    cx: &mut BakeContext<'_>,
    output: RecipeOutput,
    source: &Material,
    source_name: &str,
    templates: &dyn TemplateRegistry,
    settings: &BakeSettings,
) -> BakeResult<MaterialRef> {
    let folder = cx.paths().materials_folder.clone();
    let existing = cx.db().find_material(&folder, source_name)?;
    let path = match existing.as_ref().and_then(|m| m.asset_path.clone()) {
        Some(p) => p,
        None => {
            let wanted = cx.paths().material_path(source_name);
            cx.db().unique_path(&wanted)
        }
    };

    if path == cx.paths().model_path || source.asset_path.as_deref() == Some(path.as_str()) {
        tracing::error!(%path, source = %source_name, "baked material path collides with the source asset");
        return Err(BakeError::path_collision(path));
    }

    let mut material =
        existing.unwrap_or_else(|| Material::new(source_name, settings.default_shader.as_str()));
    match templates.template(output.template) {
        Some(template) => {
            if !template.shader.is_empty() && template.shader != material.shader {
                material.shader = template.shader.clone();
            }
            material.copy_properties_from(&template);
        }
        None => {
            if material.shader != settings.default_shader {
                material.shader = settings.default_shader.clone();
            }
        }
    }

    for (slot, texture) in output.maps.slots() {
        material.set_texture(slot, texture.cloned());
    }
    if output.maps.detail.is_some() {
        material.set_texture_scale("_DetailMap", [output.tiling, output.tiling]);
    }
    output.overrides.apply(&mut material);

    material.name = source_name.to_string();
    material.asset_path = Some(path.clone());
    cx.db().save_material(&path, &material)?;
    if cx.db().write_import_settings_if_dirty(&path)? {
        cx.defer_reimport(path);
    }
    Ok(Arc::new(material))
}

#[cfg(test)]
#[path = "../../tests/unit/bake/assemble.rs"]
mod tests;
