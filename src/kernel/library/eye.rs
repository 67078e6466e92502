use crate::{
    foundation::{
        error::BakeResult,
        math::{adjust_hsb, lerp, lerp3, mul3, rgb, saturate, smoothstep, spow, with_alpha},
    },
    kernel::{
        library::{
            Shader,
            common::{color_blend, occlusion},
        },
        params::Bindings,
    },
};

/// Distance from the UV centre, scaled so that `scale` widens the feature.
fn radius(u: f32, v: f32, scale: f32) -> f32 {
    let (du, dv) = (u - 0.5, v - 0.5);
    (du * du + dv * dv).sqrt() / scale.max(1e-4)
}

/// UV re-centred and zoomed by `1 / scale` around the eye centre.
fn zoom(u: f32, v: f32, scale: f32) -> (f32, f32) {
    let s = scale.max(1e-4);
    (0.5 + (u - 0.5) / s, 0.5 + (v - 0.5) / s)
}

/// 1 inside the iris, 0 on the sclera, with a soft limbus edge.
fn iris_mask(r: f32, iris_radius: f32, limbus_width: f32) -> f32 {
    1.0 - smoothstep(iris_radius - limbus_width, iris_radius, r)
}

pub(super) fn cornea_diffuse(b: &Bindings<'_>) -> BakeResult<Shader> {
    let sclera = b.texture("ScleraDiffuse")?;
    let blend = b.texture("ColorBlend")?;
    let sclera_scale = b.float("scleraScale")?;
    let (hue, sat, bright) = (
        b.float("scleraHue")?,
        b.float("scleraSaturation")?,
        b.float("scleraBrightness")?,
    );
    let iris_scale = b.float("irisScale")?;
    let iris_radius = b.float("irisRadius")?;
    let limbus_width = b.float("limbusWidth")?;
    let shadow_radius = b.float("shadowRadius")?;
    let shadow_hardness = b.float("shadowHardness")?;
    let blend_strength = b.float("colorBlendStrength")?;
    let corner_shadow = b.vector("cornerShadowColor")?;
    Ok(Box::new(move |u, v| {
        let (su, sv) = zoom(u, v, sclera_scale);
        let s = sclera.sample(su, sv);
        let mut c = adjust_hsb(rgb(s), hue, sat, bright);
        c = color_blend(c, rgb(blend.sample(u, v)), blend_strength);

        let r = radius(u, v, 1.0);
        let softness = (1.0 - shadow_hardness).max(0.0) * 0.5;
        let shadow = smoothstep(shadow_radius, shadow_radius + softness, r);
        c = lerp3(c, mul3(c, [corner_shadow[0], corner_shadow[1], corner_shadow[2]]), shadow);

        // The cornea itself is clear over the iris.
        let iris = iris_mask(radius(u, v, iris_scale), iris_radius, limbus_width);
        with_alpha(lerp3(c, [1.0, 1.0, 1.0], iris), s[3])
    }))
}

pub(super) fn eye_diffuse(b: &Bindings<'_>) -> BakeResult<Shader> {
    let cornea = b.texture("CorneaDiffuse")?;
    let blend = b.texture("ColorBlend")?;
    let iris_scale = b.float("irisScale")?;
    let (hue, sat, bright) = (
        b.float("irisHue")?,
        b.float("irisSaturation")?,
        b.float("irisBrightness")?,
    );
    let dark_radius = b.float("limbusDarkRadius")?;
    let dark_width = b.float("limbusDarkWidth")?;
    let blend_strength = b.float("colorBlendStrength")?;
    let limbus = b.vector("limbusColor")?;
    Ok(Box::new(move |u, v| {
        let (iu, iv) = zoom(u, v, iris_scale);
        let d = cornea.sample(iu, iv);
        let mut c = adjust_hsb(rgb(d), hue, sat, bright);
        let ring = smoothstep(dark_radius, dark_radius + dark_width, radius(u, v, iris_scale));
        c = lerp3(c, mul3(c, [limbus[0], limbus[1], limbus[2]]), ring);
        with_alpha(color_blend(c, rgb(blend.sample(u, v)), blend_strength), d[3])
    }))
}

pub(super) fn cornea_mask(b: &Bindings<'_>) -> BakeResult<Shader> {
    let mask = b.texture("Mask")?;
    let ao_strength = b.float("aoStrength")?;
    let cornea_smoothness = b.float("corneaSmoothness")?;
    let sclera_smoothness = b.float("scleraSmoothness")?;
    let micro_normal_strength = b.float("microNormalStrength")?;
    let iris_scale = b.float("irisScale")?;
    let iris_radius = b.float("irisRadius")?;
    let limbus_width = b.float("limbusWidth")?;
    Ok(Box::new(move |u, v| {
        let m = mask.sample(u, v);
        let iris = iris_mask(radius(u, v, iris_scale), iris_radius, limbus_width);
        [
            0.0,
            occlusion(m[1], ao_strength),
            saturate(micro_normal_strength * (1.0 - iris)),
            saturate(lerp(sclera_smoothness, cornea_smoothness, iris)),
        ]
    }))
}

pub(super) fn eye_mask(b: &Bindings<'_>) -> BakeResult<Shader> {
    let mask = b.texture("Mask")?;
    let ao_strength = b.float("aoStrength")?;
    let iris_smoothness = b.float("irisSmoothness")?;
    let sclera_smoothness = b.float("scleraSmoothness")?;
    let iris_scale = b.float("irisScale")?;
    let dark_radius = b.float("limbusDarkRadius")?;
    let dark_width = b.float("limbusDarkWidth")?;
    let iris_radius = b.float("irisRadius")?;
    let depth_radius = b.float("depthRadius")?;
    Ok(Box::new(move |u, v| {
        let m = mask.sample(u, v);
        let r = radius(u, v, iris_scale);
        let iris = 1.0 - smoothstep(dark_radius, dark_radius + dark_width, r);
        let depth = 1.0 - smoothstep(iris_radius, depth_radius.max(iris_radius), r);
        [
            0.0,
            occlusion(m[1], ao_strength),
            saturate(depth),
            saturate(lerp(sclera_smoothness, iris_smoothness, iris)),
        ]
    }))
}

/// Domed thickness profile over the iris, stored as a fraction of `thicknessScale`.
pub(super) fn cornea_thickness(b: &Bindings<'_>) -> BakeResult<Shader> {
    let iris_scale = b.float("irisScale")?;
    let dark_radius = b.float("limbusDarkRadius")?;
    let dark_width = b.float("limbusDarkWidth")?;
    let scale = b.float("thicknessScale")?;
    Ok(Box::new(move |u, v| {
        let edge = (dark_radius + dark_width * 0.5).max(1e-4);
        let rr = radius(u, v, iris_scale) / edge;
        let dome = saturate(1.0 - rr * rr).sqrt();
        let t = saturate(dome * scale);
        [t, t, t, 1.0]
    }))
}

/// Procedural occlusion shell around the eye.
///
/// `u` runs from the tear duct (0) to the outer corner (1) and `v` from the lower lid (0) to
/// the upper lid (1).
pub(super) fn eye_occlusion_diffuse(b: &Bindings<'_>) -> BakeResult<Shader> {
    let strength = b.float("eoOcclusionStrength")?;
    let power = b.float("eoOcclusionPower")?;
    let (top_min, top_max, top_curve) = (
        b.float("eoTopMin")?,
        b.float("eoTopMax")?,
        b.float("eoTopCurve")?,
    );
    let (bottom_min, bottom_max, bottom_curve) = (
        b.float("eoBottomMin")?,
        b.float("eoBottomMax")?,
        b.float("eoBottomCurve")?,
    );
    let (inner_min, inner_max) = (b.float("eoInnerMin")?, b.float("eoInnerMax")?);
    let (outer_min, outer_max) = (b.float("eoOuterMin")?, b.float("eoOuterMax")?);
    let strength2 = b.float("eoOcclusionStrength2")?;
    let (top2_min, top2_max) = (b.float("eoTop2Min")?, b.float("eoTop2Max")?);
    let tear_position = b.float("eoTearDuctPosition")?;
    let tear_width = b.float("eoTearDuctWidth")?;
    let color = b.vector("eoEyeOcclusionColor")?;
    Ok(Box::new(move |u, v| {
        let arch = 4.0 * u * (1.0 - u);
        let top = smoothstep(top_min, top_max, v) * spow(arch, top_curve);
        let bottom = (1.0 - smoothstep(bottom_min, bottom_max, v)) * spow(arch, bottom_curve);
        let inner = 1.0 - smoothstep(inner_min, inner_max, u);
        let outer = smoothstep(outer_min, outer_max, u);

        let edges = saturate(top.max(bottom).max(inner).max(outer));
        let mut occ = spow(edges, power) * strength;
        let tear = 1.0 - smoothstep(0.0, tear_width, (u - tear_position).abs());
        occ *= 1.0 - tear;
        let occ2 = smoothstep(top2_min, top2_max, v) * strength2;

        [color[0], color[1], color[2], saturate(occ.max(occ2))]
    }))
}
