use crate::{
    bake::{
        context::BakeContext,
        maps,
        props::Props,
        recipes::{BakedMapSet, RecipeOutput},
    },
    foundation::error::BakeResult,
    scene::template::MaterialType,
};

/// Shell geometry offsets carried over unchanged.
pub const EXPAND_PROPERTIES: [&str; 5] = [
    "_ExpandOut",
    "_ExpandUpper",
    "_ExpandLower",
    "_ExpandInner",
    "_ExpandOuter",
];

/// Eye occlusion has no source textures; its base color is generated from the curve
/// parameters alone.
pub fn bake(cx: &mut BakeContext<'_>, src: &str, p: Props<'_>) -> BakeResult<RecipeOutput> {
    let maps = BakedMapSet {
        base_color: maps::eye_occlusion_diffuse(cx, src, p)?,
        ..BakedMapSet::default()
    };

    let mut output = RecipeOutput::new(maps, 1.0, MaterialType::EyeOcclusion);
    for name in EXPAND_PROPERTIES {
        output.overrides.float(name, p.f(name));
    }
    Ok(output)
}
