//! One helper per output map: binds source properties to kernel parameters, substitutes
//! placeholders for absent inputs and sizes the target.
//!
//! Every helper returns `Ok(None)` when the dispatch was skipped because the backend or
//! kernel is unavailable.

use crate::{
    assets::texture::TextureRef,
    bake::{
        context::BakeContext,
        fallback::FallbackKind,
        props::Props,
        target::{MapKind, SizeRule, TargetFlags},
    },
    foundation::error::BakeResult,
    kernel::{KernelParams, library as k},
};

/// A baked texture, or `None` when the dispatch was skipped.
pub type Baked = BakeResult<Option<TextureRef>>;

fn bake(
    cx: &mut BakeContext<'_>,
    kernel: &str,
    name: String,
    rule: SizeRule,
    inputs: &[Option<&TextureRef>],
    flags: TargetFlags,
    params: &KernelParams,
) -> Baked {
    let target = cx.target(name, rule, inputs, flags);
    cx.run(kernel, target, params)
}

/// HDRP mask remap inputs shared by every mask kernel.
fn mask_params(params: &mut KernelParams, p: Props<'_>, micro_normal_strength: f32) {
    params
        .set_float("aoStrength", p.f("_AOStrength"))
        .set_float("smoothnessMin", p.f("_SmoothnessMin"))
        .set_float("smoothnessMax", p.f("_SmoothnessMax"))
        .set_float("smoothnessPower", p.f("_SmoothnessPower"))
        .set_float("microNormalStrength", micro_normal_strength);
}

fn floats(params: &mut KernelParams, pairs: &[(&str, f32)]) {
    for (name, value) in pairs {
        params.set_float(name, *value);
    }
}

// Shared maps.

pub fn mask(cx: &mut BakeContext<'_>, src: &str, mask: Option<&TextureRef>, p: Props<'_>) -> Baked {
    let mut params = KernelParams::new();
    params.set_texture("Mask", cx.resolve(mask, FallbackKind::Hdrp));
    mask_params(&mut params, p, p.f("_MicroNormalStrength"));
    let name = MapKind::Mask.texture_name(src);
    bake(cx, k::MASK, name, SizeRule::FromInputs, &[mask], TargetFlags::DATA, &params)
}

pub fn detail(cx: &mut BakeContext<'_>, src: &str, micro_normal: Option<&TextureRef>) -> Baked {
    let mut params = KernelParams::new();
    params.set_texture("MicroNormal", cx.resolve(micro_normal, FallbackKind::Normal));
    let name = MapKind::Detail.texture_name(src);
    bake(cx, k::DETAIL, name, SizeRule::FromInputs, &[micro_normal], TargetFlags::DATA, &params)
}

pub fn subsurface(
    cx: &mut BakeContext<'_>,
    src: &str,
    subsurface: Option<&TextureRef>,
    scale: f32,
) -> Baked {
    let mut params = KernelParams::new();
    params
        .set_texture("Subsurface", cx.resolve(subsurface, FallbackKind::Mask))
        .set_float("subsurfaceScale", scale);
    let name = MapKind::Subsurface.texture_name(src);
    bake(cx, k::SUBSURFACE, name, SizeRule::RegionCapped, &[subsurface], TargetFlags::DATA, &params)
}

pub fn thickness(
    cx: &mut BakeContext<'_>,
    src: &str,
    thickness: Option<&TextureRef>,
    scale: f32,
) -> Baked {
    let mut params = KernelParams::new();
    params
        .set_texture("Thickness", cx.resolve(thickness, FallbackKind::Mask))
        .set_float("thicknessScale", scale);
    let name = MapKind::Thickness.texture_name(src);
    bake(cx, k::THICKNESS, name, SizeRule::RegionCapped, &[thickness], TargetFlags::DATA, &params)
}

pub fn normal_blend(
    cx: &mut BakeContext<'_>,
    src: &str,
    normal: Option<&TextureRef>,
    blend: Option<&TextureRef>,
    strength: f32,
) -> Baked {
    let mut params = KernelParams::new();
    params
        .set_texture("Normal", cx.resolve(normal, FallbackKind::Normal))
        .set_texture("NormalBlend", cx.resolve(blend, FallbackKind::Normal))
        .set_float("normalBlendStrength", strength);
    let name = MapKind::Normal.texture_name(src);
    bake(cx, k::NORMAL_BLEND, name, SizeRule::FromInputs, &[normal, blend], TargetFlags::NORMAL, &params)
}

pub fn diffuse_blend(
    cx: &mut BakeContext<'_>,
    src: &str,
    diffuse: Option<&TextureRef>,
    blend: Option<&TextureRef>,
    strength: f32,
) -> Baked {
    let mut params = KernelParams::new();
    params
        .set_texture("Diffuse", cx.resolve(diffuse, FallbackKind::Diffuse))
        .set_texture("ColorBlend", cx.resolve(blend, FallbackKind::Overlay))
        .set_float("colorBlendStrength", strength);
    let name = MapKind::BaseMap.texture_name(src);
    bake(cx, k::DIFFUSE_BLEND, name, SizeRule::FromInputs, &[diffuse], TargetFlags::SRGB, &params)
}

/// Thickness map at unit scale, for callers that only need the source remapped to the baked
/// layout.
pub fn bake_default_thickness(
    cx: &mut BakeContext<'_>,
    src: &str,
    thickness_map: Option<&TextureRef>,
) -> Baked {
    thickness(cx, src, thickness_map, 1.0)
}

/// Detail map from a micro normal, outside any recipe.
pub fn bake_default_detail(
    cx: &mut BakeContext<'_>,
    src: &str,
    micro_normal: Option<&TextureRef>,
) -> Baked {
    detail(cx, src, micro_normal)
}

// Skin.

/// The three head region masks: nose/mouth/upper lid/inner lid, cheek/forehead/upper lip/chin,
/// ear/neck.
#[derive(Clone, Copy)]
pub struct HeadRegions<'t> {
    pub nmuil: Option<&'t TextureRef>,
    pub cfulc: Option<&'t TextureRef>,
    pub ear_neck: Option<&'t TextureRef>,
}

impl HeadRegions<'_> {
    fn bind(&self, cx: &BakeContext<'_>, params: &mut KernelParams) {
        params
            .set_texture("NMUILMask", cx.resolve(self.nmuil, FallbackKind::Blank))
            .set_texture("CFULCMask", cx.resolve(self.cfulc, FallbackKind::Blank))
            .set_texture("EarNeckMask", cx.resolve(self.ear_neck, FallbackKind::Blank));
    }
}

fn cavity_params(params: &mut KernelParams, p: Props<'_>) {
    floats(
        params,
        &[
            ("mouthAOPower", p.f("_MouthCavityAO")),
            ("nostrilAOPower", p.f("_NostrilCavityAO")),
            ("lipsAOPower", p.f("_LipsCavityAO")),
        ],
    );
}

pub fn head_diffuse(
    cx: &mut BakeContext<'_>,
    src: &str,
    [diffuse, blend, cavity]: [Option<&TextureRef>; 3],
    p: Props<'_>,
) -> Baked {
    let mut params = KernelParams::new();
    params
        .set_texture("Diffuse", cx.resolve(diffuse, FallbackKind::Diffuse))
        .set_texture("ColorBlend", cx.resolve(blend, FallbackKind::Overlay))
        .set_texture("CavityAO", cx.resolve(cavity, FallbackKind::Mask))
        .set_float("colorBlendStrength", p.f("_ColorBlendStrength"));
    cavity_params(&mut params, p);
    let name = MapKind::BaseMap.texture_name(src);
    bake(cx, k::HEAD_DIFFUSE, name, SizeRule::FromInputs, &[diffuse], TargetFlags::SRGB, &params)
}

pub fn head_mask(
    cx: &mut BakeContext<'_>,
    src: &str,
    mask: Option<&TextureRef>,
    cavity: Option<&TextureRef>,
    regions: HeadRegions<'_>,
    p: Props<'_>,
) -> Baked {
    let mut params = KernelParams::new();
    params
        .set_texture("Mask", cx.resolve(mask, FallbackKind::Hdrp))
        .set_texture("CavityAO", cx.resolve(cavity, FallbackKind::Mask));
    regions.bind(cx, &mut params);
    mask_params(&mut params, p, p.f("_MicroNormalStrength"));
    cavity_params(&mut params, p);
    // The RGBA region channels cover nose, mouth, upper lid and inner lid on the head.
    floats(
        &mut params,
        &[
            ("microSmoothnessMod", p.f("_MicroSmoothnessMod")),
            ("noseMSM", p.f("_RSmoothnessMod")),
            ("mouthMSM", p.f("_GSmoothnessMod")),
            ("upperLidMSM", p.f("_BSmoothnessMod")),
            ("innerLidMSM", p.f("_ASmoothnessMod")),
            ("earMSM", p.f("_EarSmoothnessMod")),
            ("neckMSM", p.f("_NeckSmoothnessMod")),
            ("cheekMSM", p.f("_CheekSmoothnessMod")),
            ("foreheadMSM", p.f("_ForeheadSmoothnessMod")),
            ("upperLipMSM", p.f("_UpperLipSmoothnessMod")),
            ("chinMSM", p.f("_ChinSmoothnessMod")),
            ("unmaskedMSM", p.f("_UnmaskedSmoothnessMod")),
        ],
    );
    let name = MapKind::Mask.texture_name(src);
    bake(cx, k::HEAD_MASK, name, SizeRule::FromInputs, &[mask], TargetFlags::DATA, &params)
}

pub fn skin_mask(
    cx: &mut BakeContext<'_>,
    src: &str,
    mask: Option<&TextureRef>,
    rgba: Option<&TextureRef>,
    p: Props<'_>,
) -> Baked {
    let mut params = KernelParams::new();
    params
        .set_texture("Mask", cx.resolve(mask, FallbackKind::Hdrp))
        .set_texture("RGBAMask", cx.resolve(rgba, FallbackKind::Blank));
    mask_params(&mut params, p, p.f("_MicroNormalStrength"));
    floats(
        &mut params,
        &[
            ("microSmoothnessMod", p.f("_MicroSmoothnessMod")),
            ("rMSM", p.f("_RSmoothnessMod")),
            ("gMSM", p.f("_GSmoothnessMod")),
            ("bMSM", p.f("_BSmoothnessMod")),
            ("aMSM", p.f("_ASmoothnessMod")),
            ("unmaskedMSM", p.f("_UnmaskedSmoothnessMod")),
        ],
    );
    let name = MapKind::Mask.texture_name(src);
    bake(cx, k::SKIN_MASK, name, SizeRule::FromInputs, &[mask], TargetFlags::DATA, &params)
}

pub fn head_subsurface(
    cx: &mut BakeContext<'_>,
    src: &str,
    subsurface: Option<&TextureRef>,
    regions: HeadRegions<'_>,
    p: Props<'_>,
) -> Baked {
    let mut params = KernelParams::new();
    params.set_texture("Subsurface", cx.resolve(subsurface, FallbackKind::Mask));
    regions.bind(cx, &mut params);
    floats(
        &mut params,
        &[
            ("subsurfaceScale", p.f("_SubsurfaceScale")),
            ("noseSS", p.f("_RScatterScale")),
            ("mouthSS", p.f("_GScatterScale")),
            ("upperLidSS", p.f("_BScatterScale")),
            ("innerLidSS", p.f("_AScatterScale")),
            ("earSS", p.f("_EarScatterScale")),
            ("neckSS", p.f("_NeckScatterScale")),
            ("cheekSS", p.f("_CheekScatterScale")),
            ("foreheadSS", p.f("_ForeheadScatterScale")),
            ("upperLipSS", p.f("_UpperLipScatterScale")),
            ("chinSS", p.f("_ChinScatterScale")),
            ("unmaskedSS", p.f("_UnmaskedScatterScale")),
        ],
    );
    let name = MapKind::Subsurface.texture_name(src);
    bake(
        cx,
        k::HEAD_SUBSURFACE,
        name,
        SizeRule::RegionCapped,
        &[subsurface],
        TargetFlags::DATA,
        &params,
    )
}

pub fn skin_subsurface(
    cx: &mut BakeContext<'_>,
    src: &str,
    subsurface: Option<&TextureRef>,
    rgba: Option<&TextureRef>,
    p: Props<'_>,
) -> Baked {
    let mut params = KernelParams::new();
    params
        .set_texture("Subsurface", cx.resolve(subsurface, FallbackKind::Mask))
        .set_texture("RGBAMask", cx.resolve(rgba, FallbackKind::Blank));
    floats(
        &mut params,
        &[
            ("subsurfaceScale", p.f("_SubsurfaceScale")),
            ("rSS", p.f("_RScatterScale")),
            ("gSS", p.f("_GScatterScale")),
            ("bSS", p.f("_BScatterScale")),
            ("aSS", p.f("_AScatterScale")),
            ("unmaskedSS", p.f("_UnmaskedScatterScale")),
        ],
    );
    let name = MapKind::Subsurface.texture_name(src);
    bake(
        cx,
        k::SKIN_SUBSURFACE,
        name,
        SizeRule::RegionCapped,
        &[subsurface],
        TargetFlags::DATA,
        &params,
    )
}

// Teeth and tongue.

fn gradient_params(params: &mut KernelParams, p: Props<'_>) {
    floats(
        params,
        &[("frontAO", p.f("_FrontAO")), ("rearAO", p.f("_RearAO"))],
    );
}

fn teeth_gradient_params(params: &mut KernelParams, p: Props<'_>) {
    gradient_params(params, p);
    params.set_float("isUpperTeeth", p.f("_IsUpperTeeth"));
}

pub fn teeth_diffuse(
    cx: &mut BakeContext<'_>,
    src: &str,
    [diffuse, gums, gradient]: [Option<&TextureRef>; 3],
    p: Props<'_>,
) -> Baked {
    let mut params = KernelParams::new();
    params
        .set_texture("Diffuse", cx.resolve(diffuse, FallbackKind::Diffuse))
        .set_texture("GumsMask", cx.resolve(gums, FallbackKind::Mask))
        .set_texture("GradientAO", cx.resolve(gradient, FallbackKind::Mask));
    teeth_gradient_params(&mut params, p);
    floats(
        &mut params,
        &[
            ("teethSaturation", p.f("_TeethSaturation")),
            ("teethBrightness", p.f("_TeethBrightness")),
            ("gumsSaturation", p.f("_GumsSaturation")),
            ("gumsBrightness", p.f("_GumsBrightness")),
        ],
    );
    let name = MapKind::BaseMap.texture_name(src);
    bake(cx, k::TEETH_DIFFUSE, name, SizeRule::FromInputs, &[diffuse], TargetFlags::SRGB, &params)
}

pub fn teeth_mask(
    cx: &mut BakeContext<'_>,
    src: &str,
    mask: Option<&TextureRef>,
    gradient: Option<&TextureRef>,
    p: Props<'_>,
) -> Baked {
    let mut params = KernelParams::new();
    params
        .set_texture("Mask", cx.resolve(mask, FallbackKind::Hdrp))
        .set_texture("GradientAO", cx.resolve(gradient, FallbackKind::Mask));
    mask_params(&mut params, p, p.f("_MicroNormalStrength"));
    teeth_gradient_params(&mut params, p);
    let name = MapKind::Mask.texture_name(src);
    bake(cx, k::TEETH_MASK, name, SizeRule::FromInputs, &[mask], TargetFlags::DATA, &params)
}

pub fn teeth_subsurface(
    cx: &mut BakeContext<'_>,
    src: &str,
    gums: Option<&TextureRef>,
    gradient: Option<&TextureRef>,
    p: Props<'_>,
) -> Baked {
    let mut params = KernelParams::new();
    params
        .set_texture("GumsMask", cx.resolve(gums, FallbackKind::Mask))
        .set_texture("GradientAO", cx.resolve(gradient, FallbackKind::Mask));
    teeth_gradient_params(&mut params, p);
    floats(
        &mut params,
        &[("teethSSS", p.f("_TeethSSS")), ("gumsSSS", p.f("_GumsSSS"))],
    );
    let name = MapKind::Subsurface.texture_name(src);
    bake(cx, k::TEETH_SUBSURFACE, name, SizeRule::Thumbnail, &[], TargetFlags::DATA, &params)
}

pub fn teeth_thickness(
    cx: &mut BakeContext<'_>,
    src: &str,
    gums: Option<&TextureRef>,
    p: Props<'_>,
) -> Baked {
    let mut params = KernelParams::new();
    params.set_texture("GumsMask", cx.resolve(gums, FallbackKind::Mask));
    floats(
        &mut params,
        &[
            ("teethThickness", p.f("_TeethThickness")),
            ("gumsThickness", p.f("_GumsThickness")),
        ],
    );
    let name = MapKind::Thickness.texture_name(src);
    bake(cx, k::TEETH_THICKNESS, name, SizeRule::Thumbnail, &[], TargetFlags::DATA, &params)
}

pub fn tongue_diffuse(
    cx: &mut BakeContext<'_>,
    src: &str,
    [diffuse, gradient]: [Option<&TextureRef>; 2],
    p: Props<'_>,
) -> Baked {
    let mut params = KernelParams::new();
    params
        .set_texture("Diffuse", cx.resolve(diffuse, FallbackKind::Diffuse))
        .set_texture("GradientAO", cx.resolve(gradient, FallbackKind::Mask));
    gradient_params(&mut params, p);
    floats(
        &mut params,
        &[
            ("tongueSaturation", p.f("_TongueSaturation")),
            ("tongueBrightness", p.f("_TongueBrightness")),
        ],
    );
    let name = MapKind::BaseMap.texture_name(src);
    bake(cx, k::TONGUE_DIFFUSE, name, SizeRule::FromInputs, &[diffuse], TargetFlags::SRGB, &params)
}

pub fn tongue_mask(
    cx: &mut BakeContext<'_>,
    src: &str,
    mask: Option<&TextureRef>,
    gradient: Option<&TextureRef>,
    p: Props<'_>,
) -> Baked {
    let mut params = KernelParams::new();
    params
        .set_texture("Mask", cx.resolve(mask, FallbackKind::Hdrp))
        .set_texture("GradientAO", cx.resolve(gradient, FallbackKind::Mask));
    mask_params(&mut params, p, p.f("_MicroNormalStrength"));
    gradient_params(&mut params, p);
    let name = MapKind::Mask.texture_name(src);
    bake(cx, k::TONGUE_MASK, name, SizeRule::FromInputs, &[mask], TargetFlags::DATA, &params)
}

pub fn tongue_subsurface(
    cx: &mut BakeContext<'_>,
    src: &str,
    gradient: Option<&TextureRef>,
    p: Props<'_>,
) -> Baked {
    let mut params = KernelParams::new();
    params.set_texture("GradientAO", cx.resolve(gradient, FallbackKind::Mask));
    gradient_params(&mut params, p);
    params.set_float("tongueSSS", p.f("_TongueSSS"));
    let name = MapKind::Subsurface.texture_name(src);
    bake(cx, k::TONGUE_SUBSURFACE, name, SizeRule::Thumbnail, &[], TargetFlags::DATA, &params)
}

// Eyes.

pub fn cornea_diffuse(
    cx: &mut BakeContext<'_>,
    src: &str,
    [sclera, blend]: [Option<&TextureRef>; 2],
    p: Props<'_>,
) -> Baked {
    let mut params = KernelParams::new();
    params
        .set_texture("ScleraDiffuse", cx.resolve(sclera, FallbackKind::Diffuse))
        .set_texture("ColorBlend", cx.resolve(blend, FallbackKind::Overlay))
        .set_vector("cornerShadowColor", p.color("_CornerShadowColor"));
    floats(
        &mut params,
        &[
            ("scleraScale", p.f("_ScleraScale")),
            ("scleraHue", p.f("_ScleraHue")),
            ("scleraSaturation", p.f("_ScleraSaturation")),
            ("scleraBrightness", p.f("_ScleraBrightness")),
            ("irisScale", p.f("_IrisScale")),
            ("irisRadius", p.f("_IrisRadius")),
            ("limbusWidth", p.f("_LimbusWidth")),
            ("shadowRadius", p.f("_ShadowRadius")),
            ("shadowHardness", p.f("_ShadowHardness")),
            ("colorBlendStrength", p.f("_ColorBlendStrength")),
        ],
    );
    let name = MapKind::BaseMap.texture_name(src);
    bake(cx, k::CORNEA_DIFFUSE, name, SizeRule::FromInputs, &[sclera], TargetFlags::SRGB, &params)
}

pub fn eye_diffuse(
    cx: &mut BakeContext<'_>,
    src: &str,
    [cornea, blend]: [Option<&TextureRef>; 2],
    p: Props<'_>,
) -> Baked {
    let mut params = KernelParams::new();
    params
        .set_texture("CorneaDiffuse", cx.resolve(cornea, FallbackKind::Diffuse))
        .set_texture("ColorBlend", cx.resolve(blend, FallbackKind::Overlay))
        .set_vector("limbusColor", p.color("_LimbusColor"));
    floats(
        &mut params,
        &[
            ("irisScale", p.f("_IrisScale")),
            ("irisHue", p.f("_IrisHue")),
            ("irisSaturation", p.f("_IrisSaturation")),
            ("irisBrightness", p.f("_IrisBrightness")),
            ("limbusDarkRadius", p.f("_LimbusDarkRadius")),
            ("limbusDarkWidth", p.f("_LimbusDarkWidth")),
            ("colorBlendStrength", p.f("_ColorBlendStrength")),
        ],
    );
    let name = MapKind::BaseMap.texture_name(src);
    bake(cx, k::EYE_DIFFUSE, name, SizeRule::FromInputs, &[cornea], TargetFlags::SRGB, &params)
}

pub fn cornea_mask(
    cx: &mut BakeContext<'_>,
    src: &str,
    mask: Option<&TextureRef>,
    p: Props<'_>,
) -> Baked {
    let mut params = KernelParams::new();
    params.set_texture("Mask", cx.resolve(mask, FallbackKind::Hdrp));
    floats(
        &mut params,
        &[
            ("aoStrength", p.f("_AOStrength")),
            ("corneaSmoothness", p.f("_CorneaSmoothness")),
            ("scleraSmoothness", p.f("_ScleraSmoothness")),
            ("microNormalStrength", p.f("_ScleraNormalStrength")),
            ("irisScale", p.f("_IrisScale")),
            ("irisRadius", p.f("_IrisRadius")),
            ("limbusWidth", p.f("_LimbusWidth")),
        ],
    );
    let name = MapKind::Mask.texture_name(src);
    bake(cx, k::CORNEA_MASK, name, SizeRule::FromInputs, &[mask], TargetFlags::DATA, &params)
}

pub fn eye_mask(cx: &mut BakeContext<'_>, src: &str, mask: Option<&TextureRef>, p: Props<'_>) -> Baked {
    let mut params = KernelParams::new();
    params.set_texture("Mask", cx.resolve(mask, FallbackKind::Hdrp));
    floats(
        &mut params,
        &[
            ("aoStrength", p.f("_AOStrength")),
            ("irisSmoothness", p.f("_IrisSmoothness")),
            ("scleraSmoothness", p.f("_ScleraSmoothness")),
            ("irisScale", p.f("_IrisScale")),
            ("limbusDarkRadius", p.f("_LimbusDarkRadius")),
            ("limbusDarkWidth", p.f("_LimbusDarkWidth")),
            ("irisRadius", p.f("_IrisRadius")),
            ("depthRadius", p.f("_DepthRadius")),
        ],
    );
    let name = MapKind::Mask.texture_name(src);
    bake(cx, k::EYE_MASK, name, SizeRule::FromInputs, &[mask], TargetFlags::DATA, &params)
}

/// Synthetic thickness over the iris; `scale` is the already normalized thickness.
pub fn cornea_thickness(cx: &mut BakeContext<'_>, src: &str, p: Props<'_>, scale: f32) -> Baked {
    let mut params = KernelParams::new();
    floats(
        &mut params,
        &[
            ("irisScale", p.f("_IrisScale")),
            ("limbusDarkRadius", p.f("_LimbusDarkRadius")),
            ("limbusDarkWidth", p.f("_LimbusDarkWidth")),
            ("thicknessScale", scale),
        ],
    );
    let name = MapKind::Thickness.texture_name(src);
    bake(cx, k::CORNEA_THICKNESS, name, SizeRule::Thumbnail, &[], TargetFlags::DATA, &params)
}

pub fn eye_occlusion_diffuse(cx: &mut BakeContext<'_>, src: &str, p: Props<'_>) -> Baked {
    let mut params = KernelParams::new();
    params.set_vector("eoEyeOcclusionColor", p.color("_OcclusionColor"));
    floats(
        &mut params,
        &[
            ("eoOcclusionStrength", p.f("_OcclusionStrength")),
            ("eoOcclusionPower", p.f("_OcclusionPower")),
            ("eoTopMin", p.f("_TopMin")),
            ("eoTopMax", p.f("_TopMax")),
            ("eoTopCurve", p.f("_TopCurve")),
            ("eoBottomMin", p.f("_BottomMin")),
            ("eoBottomMax", p.f("_BottomMax")),
            ("eoBottomCurve", p.f("_BottomCurve")),
            ("eoInnerMin", p.f("_InnerMin")),
            ("eoInnerMax", p.f("_InnerMax")),
            ("eoOuterMin", p.f("_OuterMin")),
            ("eoOuterMax", p.f("_OuterMax")),
            ("eoOcclusionStrength2", p.f("_OcclusionStrength2")),
            ("eoTop2Min", p.f("_Top2Min")),
            ("eoTop2Max", p.f("_Top2Max")),
            ("eoTearDuctPosition", p.f("_TearDuctPosition")),
            ("eoTearDuctWidth", p.f("_TearDuctWidth")),
        ],
    );
    let name = MapKind::BaseMap.texture_name(src);
    bake(cx, k::EYE_OCCLUSION_DIFFUSE, name, SizeRule::Thumbnail, &[], TargetFlags::SRGB, &params)
}

// Hair.

fn hair_base_params(params: &mut KernelParams, p: Props<'_>) {
    params.set_vector("vertexBaseColor", p.color("_VertexBaseColor"));
    floats(
        params,
        &[
            ("diffuseStrength", p.f("_DiffuseStrength")),
            ("alphaPower", p.f("_AlphaPower")),
            ("alphaRemap", p.f("_AlphaRemap")),
            ("aoStrength", p.f("_AOStrength")),
            ("aoOccludeAll", p.f("_AOOccludeAll")),
            ("colorBlendStrength", p.f("_BlendStrength")),
            ("vertexColorStrength", p.f("_VertexColorStrength")),
        ],
    );
}

pub fn hair_diffuse(
    cx: &mut BakeContext<'_>,
    src: &str,
    diffuse: Option<&TextureRef>,
    blend: Option<&TextureRef>,
    mask: Option<&TextureRef>,
    p: Props<'_>,
) -> Baked {
    let mut params = KernelParams::new();
    params
        .set_texture("Diffuse", cx.resolve(diffuse, FallbackKind::Diffuse))
        .set_texture("ColorBlend", cx.resolve(blend, FallbackKind::Mask))
        .set_texture("Mask", cx.resolve(mask, FallbackKind::Mask));
    hair_base_params(&mut params, p);
    let name = MapKind::BaseMap.texture_name(src);
    let flags = TargetFlags::hair(&name);
    bake(cx, k::HAIR_DIFFUSE, name, SizeRule::FromInputs, &[diffuse], flags, &params)
}

/// Inputs of the multi-tone hair diffuse.
#[derive(Clone, Copy)]
pub struct HairStrands<'t> {
    pub diffuse: &'t TextureRef,
    pub id: &'t TextureRef,
    pub root: &'t TextureRef,
    pub blend: Option<&'t TextureRef>,
    pub mask: Option<&'t TextureRef>,
}

pub fn hair_colored_diffuse(
    cx: &mut BakeContext<'_>,
    src: &str,
    strands: HairStrands<'_>,
    p: Props<'_>,
) -> Baked {
    let mut params = KernelParams::new();
    params
        .set_texture("Diffuse", strands.diffuse.clone())
        .set_texture("ID", strands.id.clone())
        .set_texture("Root", strands.root.clone())
        .set_texture("ColorBlend", cx.resolve(strands.blend, FallbackKind::Mask))
        .set_texture("Mask", cx.resolve(strands.mask, FallbackKind::Mask))
        .set_vector("rootColor", p.color("_RootColor"))
        .set_vector("endColor", p.color("_EndColor"))
        .set_vector("highlightAColor", p.color("_HighlightAColor"))
        .set_vector("highlightADistribution", p.vector("_HighlightADistribution"))
        .set_vector("highlightBColor", p.color("_HighlightBColor"))
        .set_vector("highlightBDistribution", p.vector("_HighlightBDistribution"));
    hair_base_params(&mut params, p);
    floats(
        &mut params,
        &[
            ("rootColorStrength", p.f("_RootColorStrength")),
            ("endColorStrength", p.f("_EndColorStrength")),
            ("globalStrength", p.f("_GlobalStrength")),
            ("invertRootMap", p.f("_InvertRootMap")),
            ("baseColorStrength", p.f("_BaseColorStrength")),
            ("highlightAStrength", p.f("_HighlightAStrength")),
            ("highlightAOverlapEnd", p.f("_HighlightAOverlapEnd")),
            ("highlightAOverlapInvert", p.f("_HighlightAOverlapInvert")),
            ("highlightBStrength", p.f("_HighlightBStrength")),
            ("highlightBOverlapEnd", p.f("_HighlightBOverlapEnd")),
            ("highlightBOverlapInvert", p.f("_HighlightBOverlapInvert")),
        ],
    );
    let name = MapKind::BaseMap.texture_name(src);
    let flags = TargetFlags::hair(&name);
    let inputs = [Some(strands.diffuse), Some(strands.id)];
    bake(cx, k::HAIR_COLORED_DIFFUSE, name, SizeRule::FromInputs, &inputs, flags, &params)
}

pub fn hair_mask(
    cx: &mut BakeContext<'_>,
    src: &str,
    mask: Option<&TextureRef>,
    specular: Option<&TextureRef>,
    p: Props<'_>,
) -> Baked {
    let mut params = KernelParams::new();
    params
        .set_texture("Mask", cx.resolve(mask, FallbackKind::Hdrp))
        .set_texture("Specular", cx.resolve(specular, FallbackKind::Mask));
    floats(
        &mut params,
        &[
            ("aoStrength", p.f("_AOStrength")),
            ("smoothnessMin", p.f("_SmoothnessMin")),
            ("smoothnessMax", p.f("_SmoothnessMax")),
            ("smoothnessPower", p.f("_SmoothnessPower")),
        ],
    );
    let name = MapKind::Mask.texture_name(src);
    bake(cx, k::HAIR_MASK, name, SizeRule::FromInputs, &[mask], TargetFlags::DATA, &params)
}

#[cfg(test)]
#[path = "../../tests/unit/bake/maps.rs"]
mod tests;
