use crate::{
    bake::{
        category::MaterialCategory,
        context::BakeContext,
        props::Props,
        recipes::{self, RecipeOutput},
        settings::BakeSettings,
    },
    foundation::error::BakeResult,
    scene::material::Material,
};

/// Run the recipe for `material`'s category.
///
/// `Ok(None)` means the category is not one the engine bakes; the material passes through.
#[tracing::instrument(skip(cx, material, settings), fields(shader = %material.shader))]
pub fn route(
    cx: &mut BakeContext<'_>,
    material: &Material,
    source_name: &str,
    settings: &BakeSettings,
) -> BakeResult<Option<RecipeOutput>> {
    let Some(category) = MaterialCategory::of(material) else {
        tracing::debug!("unrecognized shader category, passing through");
        return Ok(None);
    };

    let p = Props(material);
    let out = match category {
        MaterialCategory::Skin => recipes::skin::bake(cx, source_name, p)?,
        MaterialCategory::Teeth => recipes::teeth::bake(cx, source_name, p)?,
        MaterialCategory::Tongue => recipes::tongue::bake(cx, source_name, p)?,
        MaterialCategory::Hair => {
            recipes::hair::bake(cx, source_name, p, settings.bake_custom_shaders)?
        }
        MaterialCategory::Eye => recipes::eye::bake(cx, source_name, p)?,
        MaterialCategory::EyeOcclusion => recipes::occlusion::bake(cx, source_name, p)?,
    };
    tracing::debug!(?category, template = %out.template, "recipe finished");
    Ok(Some(out))
}

#[cfg(test)]
#[path = "../../tests/unit/bake/router.rs"]
mod tests;
