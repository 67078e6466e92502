use crate::{
    bake::{
        context::BakeContext,
        guard::all_present,
        maps::{self, HairStrands},
        props::Props,
        recipes::{BakedMapSet, Overrides, RecipeOutput, keep},
    },
    foundation::error::BakeResult,
    scene::template::MaterialType,
};

pub const ENABLE_COLOR: &str = "BOOLEAN_ENABLECOLOR";

/// Which diffuse composite a hair material gets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HairDiffuse {
    /// Root/end tints and two highlight bands driven by the ID and root maps.
    Colored,
    /// Diffuse with the blend map and vertex tint only.
    Tinted,
    /// No diffuse texture: keep the source slot as it is.
    None,
}

/// `Colored` iff color is enabled and diffuse, ID and root maps are all present.
pub fn select_diffuse(p: Props<'_>) -> HairDiffuse {
    let strands = [p.tex("_DiffuseMap"), p.tex("_IDMap"), p.tex("_RootMap")];
    if p.flag(ENABLE_COLOR) && all_present(strands).is_some() {
        HairDiffuse::Colored
    } else if p.tex("_DiffuseMap").is_some() {
        HairDiffuse::Tinted
    } else {
        HairDiffuse::None
    }
}

pub fn bake(
    cx: &mut BakeContext<'_>,
    src: &str,
    p: Props<'_>,
    custom_shaders: bool,
) -> BakeResult<RecipeOutput> {
    let diffuse = p.tex("_DiffuseMap");
    let mask = p.tex("_MaskMap");
    let normal = p.tex("_NormalMap");
    let blend = p.tex("_BlendMap");
    let id = p.tex("_IDMap");
    let root = p.tex("_RootMap");
    let specular = p.tex("_SpecularMap");

    let mut out = BakedMapSet {
        base_color: diffuse.cloned(),
        mask: mask.cloned(),
        normal: normal.cloned(),
        ..BakedMapSet::default()
    };

    let base = match (select_diffuse(p), diffuse, id, root) {
        (HairDiffuse::Colored, Some(diffuse), Some(id), Some(root)) => {
            let strands = HairStrands {
                diffuse,
                id,
                root,
                blend,
                mask,
            };
            maps::hair_colored_diffuse(cx, src, strands, p)?
        }
        (HairDiffuse::Tinted, Some(_), ..) => maps::hair_diffuse(cx, src, diffuse, blend, mask, p)?,
        _ => None,
    };
    keep(&mut out.base_color, base);

    if mask.is_some() {
        keep(&mut out.mask, maps::hair_mask(cx, src, mask, specular, p)?);
    }

    let mut output = RecipeOutput::new(out, 1.0, MaterialType::Hair);
    output.overrides = if custom_shaders {
        custom_overrides(p)
    } else {
        builtin_overrides(p)
    };
    Ok(output)
}

/// Secondary parameters for the custom baked hair shader, which keeps the source names.
fn custom_overrides(p: Props<'_>) -> Overrides {
    let mut o = Overrides::default();
    o.texture("_FlowMap", p.tex("_FlowMap").cloned())
        .color("_VertexBaseColor", p.color("_VertexBaseColor"))
        .color("_SpecularTint", p.color("_SpecularTint"));
    for name in [
        "_VertexColorStrength",
        "_AlphaClip",
        "_ShadowClip",
        "_DepthPrepass",
        "_DepthPostpass",
        "_RimTransmissionIntensity",
        "_SpecularMultiplier",
        "_SpecularShift",
        "_SecondarySpecularMultiplier",
        "_SecondarySpecularShift",
        "_SecondarySmoothness",
        "_NormalStrength",
    ] {
        o.float(name, p.f(name));
    }
    o
}

/// The same parameters renamed for the renderer's built-in hair shader.
fn builtin_overrides(p: Props<'_>) -> Overrides {
    let mut o = Overrides::default();
    o.color("_SpecularColor", p.color("_SpecularTint"));
    for (to, from) in [
        ("_AlphaClipThreshold", "_AlphaClip"),
        ("_AlphaThresholdShadow", "_ShadowClip"),
        ("_AlphaClipThresholdDepthPrepass", "_DepthPrepass"),
        ("_AlphaClipThresholdDepthPostpass", "_DepthPostpass"),
        ("_TransmissionRim", "_RimTransmissionIntensity"),
        ("_Specular", "_SpecularMultiplier"),
        ("_SpecularShift", "_SpecularShift"),
        ("_SecondarySpecular", "_SecondarySpecularMultiplier"),
        ("_SecondarySpecularShift", "_SecondarySpecularShift"),
        ("_NormalStrength", "_NormalStrength"),
        ("_SmoothnessMin", "_SmoothnessMin"),
        ("_SmoothnessMax", "_SmoothnessMax"),
    ] {
        o.float(to, p.f(from));
    }
    o
}
