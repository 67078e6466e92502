use crate::{
    bake::{
        context::BakeContext,
        guard::compose_guarded,
        maps,
        props::Props,
        recipes::{BakedMapSet, RecipeOutput, keep},
    },
    foundation::error::BakeResult,
    scene::template::MaterialType,
};

pub fn bake(cx: &mut BakeContext<'_>, src: &str, p: Props<'_>) -> BakeResult<RecipeOutput> {
    let diffuse = p.tex("_DiffuseMap");
    let mask = p.tex("_MaskMap");
    let normal = p.tex("_NormalMap");
    let micro_normal = p.tex("_MicroNormalMap");
    let gums = p.tex("_GumsMaskMap");
    let gradient = p.tex("_GradientAOMap");

    let mut out = BakedMapSet {
        base_color: diffuse.cloned(),
        mask: mask.cloned(),
        normal: normal.cloned(),
        ..BakedMapSet::default()
    };

    let base = compose_guarded(
        cx,
        [diffuse, gums, gradient],
        |cx, inputs| maps::teeth_diffuse(cx, src, inputs.map(Some), p),
        |_| Ok(None),
    )?;
    keep(&mut out.base_color, base);

    let baked_mask = compose_guarded(
        cx,
        [mask, gradient],
        |cx, [m, g]| maps::teeth_mask(cx, src, Some(m), Some(g), p),
        |cx| match mask {
            Some(m) => maps::mask(cx, src, Some(m), p),
            None => Ok(None),
        },
    )?;
    keep(&mut out.mask, baked_mask);

    if micro_normal.is_some() {
        out.detail = maps::detail(cx, src, micro_normal)?;
    }

    out.subsurface = compose_guarded(
        cx,
        [gums, gradient],
        |cx, [m, g]| maps::teeth_subsurface(cx, src, Some(m), Some(g), p),
        |_| Ok(None),
    )?;

    if gums.is_some() {
        out.thickness = maps::teeth_thickness(cx, src, gums, p)?;
    }

    Ok(RecipeOutput::new(
        out,
        p.f("_MicroNormalTiling"),
        MaterialType::Teeth,
    ))
}
