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

pub const IS_CORNEA: &str = "BOOLEAN_ISCORNEA";

/// Physical refraction thickness covered by the baked thickness map, in metres.
pub const CORNEA_THICKNESS_RANGE: f32 = 0.025;

/// HDRP/Lit reads refraction thickness at ten times the source scale.
pub const LIT_THICKNESS_FACTOR: f32 = 10.0;

/// Thickness remap stored on the baked cornea: the `[0, 1]` image maps to
/// `[0, CORNEA_THICKNESS_RANGE]`.
pub const CORNEA_THICKNESS_REMAP: [f32; 4] = [0.0, CORNEA_THICKNESS_RANGE, 0.0, 0.0];

/// Value written into the thickness image for a source refraction thickness `t`.
///
/// 8-bit channels cannot hold the physical magnitude, so the image stores `t` relative to the
/// remap range and the material carries the range.
pub fn normalized_cornea_thickness(t: f32) -> f32 {
    t / (CORNEA_THICKNESS_RANGE * LIT_THICKNESS_FACTOR)
}

/// Inverse of [`normalized_cornea_thickness`].
pub fn reconstruct_cornea_thickness(stored: f32) -> f32 {
    stored * CORNEA_THICKNESS_RANGE * LIT_THICKNESS_FACTOR
}

pub fn bake(cx: &mut BakeContext<'_>, src: &str, p: Props<'_>) -> BakeResult<RecipeOutput> {
    let sclera = p.tex("_ScleraDiffuseMap");
    let cornea = p.tex("_CorneaDiffuseMap");
    let blend = p.tex("_ColorBlendMap");
    let mask = p.tex("_MaskMap");
    let micro_normal = p.tex("_ScleraNormalMap");
    let tiling = p.f("_ScleraNormalTiling");

    let mut out = BakedMapSet {
        base_color: cornea.cloned(),
        mask: mask.cloned(),
        ..BakedMapSet::default()
    };

    if p.flag(IS_CORNEA) {
        let base = compose_guarded(
            cx,
            [sclera, blend],
            |cx, inputs| maps::cornea_diffuse(cx, src, inputs.map(Some), p),
            |_| Ok(None),
        )?;
        keep(&mut out.base_color, base);

        if mask.is_some() {
            keep(&mut out.mask, maps::cornea_mask(cx, src, mask, p)?);
        }
        if micro_normal.is_some() {
            out.detail = maps::detail(cx, src, micro_normal)?;
        }

        let refraction = p.f("_RefractionThickness");
        out.thickness =
            maps::cornea_thickness(cx, src, p, normalized_cornea_thickness(refraction))?;

        let mut output = RecipeOutput::new(out, tiling, MaterialType::Cornea);
        output
            .overrides
            .float("_Ior", p.f("_IOR"))
            .float("_Thickness", refraction / LIT_THICKNESS_FACTOR)
            .color("_ThicknessRemap", CORNEA_THICKNESS_REMAP);
        Ok(output)
    } else {
        let base = compose_guarded(
            cx,
            [cornea, blend],
            |cx, inputs| maps::eye_diffuse(cx, src, inputs.map(Some), p),
            |_| Ok(None),
        )?;
        keep(&mut out.base_color, base);

        if mask.is_some() {
            keep(&mut out.mask, maps::eye_mask(cx, src, mask, p)?);
        }

        let mut output = RecipeOutput::new(out, tiling, MaterialType::Eye);
        output
            .overrides
            .float("_IrisDepth", p.f("_IrisDepth"))
            .float("_PupilScale", p.f("_PupilScale"));
        Ok(output)
    }
}
