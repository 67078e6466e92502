use crate::{
    foundation::{
        error::BakeResult,
        math::{lerp, lerp3, luminance, mul3, rgb, saturate, scale3, smoothstep, spow, with_alpha},
    },
    kernel::{
        library::{
            Shader,
            common::{occlusion, vec3},
        },
        params::Bindings,
    },
};

/// Inputs shared by both hair diffuse kernels.
#[derive(Clone, Copy)]
struct HairBase {
    diffuse_strength: f32,
    alpha_power: f32,
    alpha_remap: f32,
    ao_strength: f32,
    ao_occlude_all: f32,
    blend_strength: f32,
    vertex_color_strength: f32,
    vertex_base_color: [f32; 3],
}

impl HairBase {
    fn read(b: &Bindings<'_>) -> BakeResult<Self> {
        Ok(Self {
            diffuse_strength: b.float("diffuseStrength")?,
            alpha_power: b.float("alphaPower")?,
            alpha_remap: b.float("alphaRemap")?,
            ao_strength: b.float("aoStrength")?,
            ao_occlude_all: b.float("aoOccludeAll")?,
            blend_strength: b.float("colorBlendStrength")?,
            vertex_color_strength: b.float("vertexColorStrength")?,
            vertex_base_color: vec3(b.vector("vertexBaseColor")?),
        })
    }

    fn alpha(&self, a: f32) -> f32 {
        saturate(spow(a, self.alpha_power) / self.alpha_remap.max(1e-3))
    }

    /// Apply the blend map, vertex tint and baked AO to an already colored strand.
    fn finish(&self, c: [f32; 3], blend: [f32; 4], mask: [f32; 4], alpha: f32) -> [f32; 4] {
        let c = mul3(c, lerp3([1.0; 3], rgb(blend), self.blend_strength));
        let c = mul3(c, lerp3([1.0; 3], self.vertex_base_color, self.vertex_color_strength));
        let ao = occlusion(mask[1], self.ao_strength * self.ao_occlude_all);
        with_alpha(scale3(c, ao), self.alpha(alpha))
    }
}

pub(super) fn hair_diffuse(b: &Bindings<'_>) -> BakeResult<Shader> {
    let diffuse = b.texture("Diffuse")?;
    let blend = b.texture("ColorBlend")?;
    let mask = b.texture("Mask")?;
    let base = HairBase::read(b)?;
    Ok(Box::new(move |u, v| {
        let d = diffuse.sample(u, v);
        let c = scale3(rgb(d), base.diffuse_strength);
        base.finish(c, blend.sample(u, v), mask.sample(u, v), d[3])
    }))
}

/// One highlight band positioned along the strand ID gradient.
#[derive(Clone, Copy)]
struct Highlight {
    /// Band start, peak and end along the ID map.
    distribution: [f32; 4],
    color: [f32; 3],
    strength: f32,
    overlap_end: f32,
    overlap_invert: bool,
}

impl Highlight {
    fn read(b: &Bindings<'_>, prefix: &str) -> BakeResult<Self> {
        Ok(Self {
            distribution: b.vector(&format!("{prefix}Distribution"))?,
            color: vec3(b.vector(&format!("{prefix}Color"))?),
            strength: b.float(&format!("{prefix}Strength"))?,
            overlap_end: b.float(&format!("{prefix}OverlapEnd"))?,
            overlap_invert: b.flag(&format!("{prefix}OverlapInvert"))?,
        })
    }

    fn apply(&self, c: [f32; 3], id: f32, root: f32) -> [f32; 3] {
        let [start, peak, end, _] = self.distribution;
        let mut band = smoothstep(start, peak, id) * (1.0 - smoothstep(peak, end, id));
        let along = if self.overlap_invert { root } else { 1.0 - root };
        band *= lerp(1.0, 1.0 - along, saturate(self.overlap_end));
        lerp3(c, self.color, saturate(band * self.strength))
    }
}

pub(super) fn hair_colored_diffuse(b: &Bindings<'_>) -> BakeResult<Shader> {
    let diffuse = b.texture("Diffuse")?;
    let blend = b.texture("ColorBlend")?;
    let id_map = b.texture("ID")?;
    let root_map = b.texture("Root")?;
    let mask = b.texture("Mask")?;
    let base = HairBase::read(b)?;
    let root_color = vec3(b.vector("rootColor")?);
    let end_color = vec3(b.vector("endColor")?);
    let root_strength = b.float("rootColorStrength")?;
    let end_strength = b.float("endColorStrength")?;
    let global_strength = b.float("globalStrength")?;
    let invert_root = b.flag("invertRootMap")?;
    let base_color_strength = b.float("baseColorStrength")?;
    let highlight_a = Highlight::read(b, "highlightA")?;
    let highlight_b = Highlight::read(b, "highlightB")?;
    Ok(Box::new(move |u, v| {
        let d = diffuse.sample(u, v);
        let diffuse_rgb = scale3(rgb(d), base.diffuse_strength);

        let mut root = root_map.sample(u, v)[0];
        if invert_root {
            root = 1.0 - root;
        }
        let id = id_map.sample(u, v)[0];

        // Flat tints pick up the strand variation of the diffuse map.
        let shade = lerp(1.0, luminance(diffuse_rgb) * 2.0, base_color_strength);
        let root_tint = lerp3(diffuse_rgb, scale3(root_color, shade), root_strength);
        let end_tint = lerp3(diffuse_rgb, scale3(end_color, shade), end_strength);
        let mut c = lerp3(root_tint, end_tint, 1.0 - root);
        c = highlight_a.apply(c, id, root);
        c = highlight_b.apply(c, id, root);
        let c = lerp3(diffuse_rgb, c, saturate(global_strength));

        base.finish(c, blend.sample(u, v), mask.sample(u, v), d[3])
    }))
}

pub(super) fn hair_mask(b: &Bindings<'_>) -> BakeResult<Shader> {
    let mask = b.texture("Mask")?;
    let specular = b.texture("Specular")?;
    let ao_strength = b.float("aoStrength")?;
    let smin = b.float("smoothnessMin")?;
    let smax = b.float("smoothnessMax")?;
    let spower = b.float("smoothnessPower")?;
    Ok(Box::new(move |u, v| {
        let m = mask.sample(u, v);
        let spec = specular.sample(u, v)[0];
        [
            0.0,
            occlusion(m[1], ao_strength),
            saturate(m[2]),
            saturate(lerp(smin, smax, spow(m[3], spower)) * spec),
        ]
    }))
}
