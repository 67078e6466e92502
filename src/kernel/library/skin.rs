use crate::{
    foundation::{
        error::BakeResult,
        math::{rgb, saturate, scale3, spow, with_alpha},
    },
    kernel::{
        library::{
            MaskParams, Shader,
            common::color_blend,
            region_blend,
        },
        params::Bindings,
    },
};

/// Mouth, nostril and lip cavity occlusion packed in R, G and B of the cavity map.
#[derive(Clone, Copy)]
struct CavityAo {
    mouth: f32,
    nostril: f32,
    lips: f32,
}

impl CavityAo {
    fn read(b: &Bindings<'_>) -> BakeResult<Self> {
        Ok(Self {
            mouth: b.float("mouthAOPower")?,
            nostril: b.float("nostrilAOPower")?,
            lips: b.float("lipsAOPower")?,
        })
    }

    fn eval(&self, cavity: [f32; 4]) -> f32 {
        spow(cavity[0], self.mouth) * spow(cavity[1], self.nostril) * spow(cavity[2], self.lips)
    }
}

const HEAD_REGIONS: usize = 10;
const SKIN_REGIONS: usize = 4;

fn read_region_floats<const N: usize>(
    b: &Bindings<'_>,
    names: [&str; N],
) -> BakeResult<[f32; N]> {
    let mut out = [0.0; N];
    for (slot, name) in out.iter_mut().zip(names) {
        *slot = b.float(name)?;
    }
    Ok(out)
}

/// Region weights sampled from the three head masks:
/// nose, mouth, upper lid, inner lid (NMUIL), ear, neck, cheek, forehead, upper lip, chin.
fn head_weights(nmuil: [f32; 4], cfulc: [f32; 4], ear_neck: [f32; 4]) -> [f32; HEAD_REGIONS] {
    [
        nmuil[0], nmuil[1], nmuil[2], nmuil[3], ear_neck[0], ear_neck[1], cfulc[0], cfulc[1],
        cfulc[2], cfulc[3],
    ]
}

pub(super) fn head_diffuse(b: &Bindings<'_>) -> BakeResult<Shader> {
    let diffuse = b.texture("Diffuse")?;
    let blend = b.texture("ColorBlend")?;
    let cavity = b.texture("CavityAO")?;
    let blend_strength = b.float("colorBlendStrength")?;
    let cavity_ao = CavityAo::read(b)?;
    Ok(Box::new(move |u, v| {
        let d = diffuse.sample(u, v);
        let c = color_blend(rgb(d), rgb(blend.sample(u, v)), blend_strength);
        let ao = cavity_ao.eval(cavity.sample(u, v));
        with_alpha(scale3(c, ao), d[3])
    }))
}

pub(super) fn head_mask(b: &Bindings<'_>) -> BakeResult<Shader> {
    let mask = b.texture("Mask")?;
    let cavity = b.texture("CavityAO")?;
    let nmuil = b.texture("NMUILMask")?;
    let cfulc = b.texture("CFULCMask")?;
    let ear_neck = b.texture("EarNeckMask")?;
    let p = MaskParams::read(b)?;
    let cavity_ao = CavityAo::read(b)?;
    let micro_mod = b.float("microSmoothnessMod")?;
    let mods = read_region_floats(
        b,
        [
            "noseMSM",
            "mouthMSM",
            "upperLidMSM",
            "innerLidMSM",
            "earMSM",
            "neckMSM",
            "cheekMSM",
            "foreheadMSM",
            "upperLipMSM",
            "chinMSM",
        ],
    )?;
    let unmasked = b.float("unmaskedMSM")?;
    Ok(Box::new(move |u, v| {
        let mut out = p.apply(mask.sample(u, v));
        let weights = head_weights(nmuil.sample(u, v), cfulc.sample(u, v), ear_neck.sample(u, v));
        out[1] = saturate(out[1] * cavity_ao.eval(cavity.sample(u, v)));
        out[3] = saturate(out[3] + micro_mod + region_blend(&weights, &mods, unmasked));
        out
    }))
}

pub(super) fn skin_mask(b: &Bindings<'_>) -> BakeResult<Shader> {
    let mask = b.texture("Mask")?;
    let rgba = b.texture("RGBAMask")?;
    let p = MaskParams::read(b)?;
    let micro_mod = b.float("microSmoothnessMod")?;
    let mods: [f32; SKIN_REGIONS] = read_region_floats(b, ["rMSM", "gMSM", "bMSM", "aMSM"])?;
    let unmasked = b.float("unmaskedMSM")?;
    Ok(Box::new(move |u, v| {
        let mut out = p.apply(mask.sample(u, v));
        let weights = rgba.sample(u, v);
        out[3] = saturate(out[3] + micro_mod + region_blend(&weights, &mods, unmasked));
        out
    }))
}

pub(super) fn head_subsurface(b: &Bindings<'_>) -> BakeResult<Shader> {
    let sss = b.texture("Subsurface")?;
    let nmuil = b.texture("NMUILMask")?;
    let cfulc = b.texture("CFULCMask")?;
    let ear_neck = b.texture("EarNeckMask")?;
    let scale = b.float("subsurfaceScale")?;
    let scales = read_region_floats(
        b,
        [
            "noseSS",
            "mouthSS",
            "upperLidSS",
            "innerLidSS",
            "earSS",
            "neckSS",
            "cheekSS",
            "foreheadSS",
            "upperLipSS",
            "chinSS",
        ],
    )?;
    let unmasked = b.float("unmaskedSS")?;
    Ok(Box::new(move |u, v| {
        let weights = head_weights(nmuil.sample(u, v), cfulc.sample(u, v), ear_neck.sample(u, v));
        let s = saturate(sss.sample(u, v)[0] * scale * region_blend(&weights, &scales, unmasked));
        [s, s, s, 1.0]
    }))
}

pub(super) fn skin_subsurface(b: &Bindings<'_>) -> BakeResult<Shader> {
    let sss = b.texture("Subsurface")?;
    let rgba = b.texture("RGBAMask")?;
    let scale = b.float("subsurfaceScale")?;
    let scales: [f32; SKIN_REGIONS] = read_region_floats(b, ["rSS", "gSS", "bSS", "aSS"])?;
    let unmasked = b.float("unmaskedSS")?;
    Ok(Box::new(move |u, v| {
        let weights = rgba.sample(u, v);
        let s = saturate(sss.sample(u, v)[0] * scale * region_blend(&weights, &scales, unmasked));
        [s, s, s, 1.0]
    }))
}
