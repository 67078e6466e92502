use crate::{
    foundation::{
        error::BakeResult,
        math::{adjust_hsb, lerp, rgb, saturate, scale3, with_alpha},
    },
    kernel::{
        library::{MaskParams, Shader},
        params::Bindings,
    },
};

/// Front-to-rear occlusion driven by the gradient AO map.
#[derive(Clone, Copy)]
struct GradientAo {
    front: f32,
    rear: f32,
    /// Upper teeth read R, lower teeth and the tongue read G.
    channel: usize,
}

impl GradientAo {
    fn teeth(b: &Bindings<'_>) -> BakeResult<Self> {
        Ok(Self {
            front: b.float("frontAO")?,
            rear: b.float("rearAO")?,
            channel: if b.flag("isUpperTeeth")? { 0 } else { 1 },
        })
    }

    fn tongue(b: &Bindings<'_>) -> BakeResult<Self> {
        Ok(Self {
            front: b.float("frontAO")?,
            rear: b.float("rearAO")?,
            channel: 1,
        })
    }

    fn eval(&self, gradient: [f32; 4]) -> f32 {
        saturate(lerp(self.rear, self.front, gradient[self.channel]))
    }
}

/// Saturation/brightness pair for teeth and gums, picked by the gums mask.
#[derive(Clone, Copy)]
struct ToothTone {
    teeth_saturation: f32,
    teeth_brightness: f32,
    gums_saturation: f32,
    gums_brightness: f32,
}

pub(super) fn teeth_diffuse(b: &Bindings<'_>) -> BakeResult<Shader> {
    let diffuse = b.texture("Diffuse")?;
    let gums = b.texture("GumsMask")?;
    let gradient = b.texture("GradientAO")?;
    let ao = GradientAo::teeth(b)?;
    let tone = ToothTone {
        teeth_saturation: b.float("teethSaturation")?,
        teeth_brightness: b.float("teethBrightness")?,
        gums_saturation: b.float("gumsSaturation")?,
        gums_brightness: b.float("gumsBrightness")?,
    };
    Ok(Box::new(move |u, v| {
        let d = diffuse.sample(u, v);
        let g = gums.sample(u, v)[0];
        let saturation = lerp(tone.teeth_saturation, tone.gums_saturation, g);
        let brightness = lerp(tone.teeth_brightness, tone.gums_brightness, g);
        let c = adjust_hsb(rgb(d), 0.5, saturation, brightness);
        with_alpha(scale3(c, ao.eval(gradient.sample(u, v))), d[3])
    }))
}

pub(super) fn teeth_mask(b: &Bindings<'_>) -> BakeResult<Shader> {
    let mask = b.texture("Mask")?;
    let gradient = b.texture("GradientAO")?;
    let p = MaskParams::read(b)?;
    let ao = GradientAo::teeth(b)?;
    Ok(Box::new(move |u, v| {
        let mut out = p.apply(mask.sample(u, v));
        out[1] = saturate(out[1] * ao.eval(gradient.sample(u, v)));
        out
    }))
}

pub(super) fn teeth_subsurface(b: &Bindings<'_>) -> BakeResult<Shader> {
    let gums = b.texture("GumsMask")?;
    let gradient = b.texture("GradientAO")?;
    let ao = GradientAo::teeth(b)?;
    let teeth_sss = b.float("teethSSS")?;
    let gums_sss = b.float("gumsSSS")?;
    Ok(Box::new(move |u, v| {
        let g = gums.sample(u, v)[0];
        let s = saturate(lerp(teeth_sss, gums_sss, g) * ao.eval(gradient.sample(u, v)));
        [s, s, s, 1.0]
    }))
}

pub(super) fn teeth_thickness(b: &Bindings<'_>) -> BakeResult<Shader> {
    let gums = b.texture("GumsMask")?;
    let teeth = b.float("teethThickness")?;
    let gums_thickness = b.float("gumsThickness")?;
    Ok(Box::new(move |u, v| {
        let t = saturate(lerp(teeth, gums_thickness, gums.sample(u, v)[0]));
        [t, t, t, 1.0]
    }))
}

pub(super) fn tongue_diffuse(b: &Bindings<'_>) -> BakeResult<Shader> {
    let diffuse = b.texture("Diffuse")?;
    let gradient = b.texture("GradientAO")?;
    let ao = GradientAo::tongue(b)?;
    let saturation = b.float("tongueSaturation")?;
    let brightness = b.float("tongueBrightness")?;
    Ok(Box::new(move |u, v| {
        let d = diffuse.sample(u, v);
        let c = adjust_hsb(rgb(d), 0.5, saturation, brightness);
        with_alpha(scale3(c, ao.eval(gradient.sample(u, v))), d[3])
    }))
}

pub(super) fn tongue_mask(b: &Bindings<'_>) -> BakeResult<Shader> {
    let mask = b.texture("Mask")?;
    let gradient = b.texture("GradientAO")?;
    let p = MaskParams::read(b)?;
    let ao = GradientAo::tongue(b)?;
    Ok(Box::new(move |u, v| {
        let mut out = p.apply(mask.sample(u, v));
        out[1] = saturate(out[1] * ao.eval(gradient.sample(u, v)));
        out
    }))
}

pub(super) fn tongue_subsurface(b: &Bindings<'_>) -> BakeResult<Shader> {
    let gradient = b.texture("GradientAO")?;
    let ao = GradientAo::tongue(b)?;
    let sss = b.float("tongueSSS")?;
    Ok(Box::new(move |u, v| {
        let s = saturate(sss * ao.eval(gradient.sample(u, v)));
        [s, s, s, 1.0]
    }))
}
