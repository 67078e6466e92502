use crate::{
    foundation::{
        error::BakeResult,
        math::{
            lerp, lerp3, normalize3, overlay, pack_normal, rgb, saturate, unpack_normal, with_alpha,
        },
    },
    kernel::{
        library::{MaskParams, Shader},
        params::Bindings,
    },
};

pub(super) fn mask(b: &Bindings<'_>) -> BakeResult<Shader> {
    let mask = b.texture("Mask")?;
    let p = MaskParams::read(b)?;
    Ok(Box::new(move |u, v| p.apply(mask.sample(u, v))))
}

/// HDRP detail layout: albedo 0.5 (neutral), normal Y in G, normal X in A.
pub(super) fn detail(b: &Bindings<'_>) -> BakeResult<Shader> {
    let micro = b.texture("MicroNormal")?;
    Ok(Box::new(move |u, v| {
        let n = micro.sample(u, v);
        [0.5, n[1], 0.5, n[0]]
    }))
}

pub(super) fn subsurface(b: &Bindings<'_>) -> BakeResult<Shader> {
    let sss = b.texture("Subsurface")?;
    let scale = b.float("subsurfaceScale")?;
    Ok(Box::new(move |u, v| {
        let s = saturate(sss.sample(u, v)[0] * scale);
        [s, s, s, 1.0]
    }))
}

pub(super) fn thickness(b: &Bindings<'_>) -> BakeResult<Shader> {
    let thickness = b.texture("Thickness")?;
    let scale = b.float("thicknessScale")?;
    Ok(Box::new(move |u, v| {
        let t = saturate(thickness.sample(u, v)[0] * scale);
        [t, t, t, 1.0]
    }))
}

/// Whiteout blend of a secondary normal map over the primary one.
pub(super) fn normal_blend(b: &Bindings<'_>) -> BakeResult<Shader> {
    let normal = b.texture("Normal")?;
    let blend = b.texture("NormalBlend")?;
    let strength = b.float("normalBlendStrength")?;
    Ok(Box::new(move |u, v| {
        let n1 = unpack_normal(normal.sample(u, v));
        let n2 = unpack_normal(blend.sample(u, v));
        pack_normal(normalize3([
            n1[0] + n2[0] * strength,
            n1[1] + n2[1] * strength,
            n1[2],
        ]))
    }))
}

pub(super) fn diffuse_blend(b: &Bindings<'_>) -> BakeResult<Shader> {
    let diffuse = b.texture("Diffuse")?;
    let blend = b.texture("ColorBlend")?;
    let strength = b.float("colorBlendStrength")?;
    Ok(Box::new(move |u, v| {
        let d = diffuse.sample(u, v);
        with_alpha(color_blend(rgb(d), rgb(blend.sample(u, v)), strength), d[3])
    }))
}

/// Overlay `blend` onto `base`, faded in by `strength`.
pub(super) fn color_blend(base: [f32; 3], blend: [f32; 3], strength: f32) -> [f32; 3] {
    lerp3(base, overlay(base, blend), saturate(strength))
}

/// Fade a single occlusion channel in by `strength`.
pub(super) fn occlusion(ao: f32, strength: f32) -> f32 {
    saturate(lerp(1.0, ao, strength))
}

pub(super) fn vec3(v: [f32; 4]) -> [f32; 3] {
    [v[0], v[1], v[2]]
}
