use crate::{
    bake::{
        context::BakeContext,
        guard::compose_guarded,
        maps::{self, HeadRegions},
        props::Props,
        recipes::{BakedMapSet, RecipeOutput, keep},
    },
    foundation::error::BakeResult,
    scene::template::MaterialType,
};

/// Head sub-meshes carry the cavity map and the three region masks.
pub const IS_HEAD: &str = "BOOLEAN_IS_HEAD";

pub fn bake(cx: &mut BakeContext<'_>, src: &str, p: Props<'_>) -> BakeResult<RecipeOutput> {
    let diffuse = p.tex("_DiffuseMap");
    let mask = p.tex("_MaskMap");
    let subsurface = p.tex("_SSSMap");
    let thickness = p.tex("_ThicknessMap");
    let normal = p.tex("_NormalMap");
    let micro_normal = p.tex("_MicroNormalMap");
    let color_blend = p.tex("_ColorBlendMap");
    let cavity = p.tex("_MNAOMap");
    let normal_blend = p.tex("_NormalBlendMap");
    let rgba = p.tex("_RGBAMask");
    let cfulc = p.tex("_CFULCMask");
    let ear_neck = p.tex("_EarNeckMask");

    let mut out = BakedMapSet {
        base_color: diffuse.cloned(),
        mask: mask.cloned(),
        normal: normal.cloned(),
        detail: None,
        subsurface: subsurface.cloned(),
        thickness: thickness.cloned(),
    };

    if p.flag(IS_HEAD) {
        // On the head the RGBA mask carries nose, mouth, upper lid and inner lid.
        let regions = HeadRegions {
            nmuil: rgba,
            cfulc,
            ear_neck,
        };

        let base = compose_guarded(
            cx,
            [diffuse, color_blend, cavity],
            |cx, inputs| maps::head_diffuse(cx, src, inputs.map(Some), p),
            |_| Ok(None),
        )?;
        keep(&mut out.base_color, base);

        let blended = compose_guarded(
            cx,
            [normal, normal_blend],
            |cx, [n, b]| maps::normal_blend(cx, src, Some(n), Some(b), p.f("_NormalBlendStrength")),
            |_| Ok(None),
        )?;
        keep(&mut out.normal, blended);

        let baked_mask = compose_guarded(
            cx,
            [mask, cavity, rgba, cfulc, ear_neck],
            |cx, [m, c, ..]| maps::head_mask(cx, src, Some(m), Some(c), regions, p),
            |cx| plain_mask(cx, src, p),
        )?;
        keep(&mut out.mask, baked_mask);

        let sss = compose_guarded(
            cx,
            [subsurface, rgba, cfulc, ear_neck],
            |cx, [s, ..]| maps::head_subsurface(cx, src, Some(s), regions, p),
            |cx| plain_subsurface(cx, src, p),
        )?;
        keep(&mut out.subsurface, sss);
    } else {
        let baked_mask = compose_guarded(
            cx,
            [mask, rgba],
            |cx, [m, r]| maps::skin_mask(cx, src, Some(m), Some(r), p),
            |cx| plain_mask(cx, src, p),
        )?;
        keep(&mut out.mask, baked_mask);

        let sss = compose_guarded(
            cx,
            [subsurface, rgba],
            |cx, [s, r]| maps::skin_subsurface(cx, src, Some(s), Some(r), p),
            |cx| plain_subsurface(cx, src, p),
        )?;
        keep(&mut out.subsurface, sss);
    }

    if micro_normal.is_some() {
        out.detail = maps::detail(cx, src, micro_normal)?;
    }
    if thickness.is_some() {
        let baked = maps::thickness(cx, src, thickness, p.f("_ThicknessScale"))?;
        keep(&mut out.thickness, baked);
    }

    Ok(RecipeOutput::new(
        out,
        p.f("_MicroNormalTiling"),
        MaterialType::Skin,
    ))
}

fn plain_mask(cx: &mut BakeContext<'_>, src: &str, p: Props<'_>) -> maps::Baked {
    match p.tex("_MaskMap") {
        Some(m) => maps::mask(cx, src, Some(m), p),
        None => Ok(None),
    }
}

fn plain_subsurface(cx: &mut BakeContext<'_>, src: &str, p: Props<'_>) -> maps::Baked {
    match p.tex("_SSSMap") {
        Some(s) => maps::subsurface(cx, src, Some(s), p.f("_SubsurfaceScale")),
        None => Ok(None),
    }
}
