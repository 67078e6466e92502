//! CPU implementations of the baking kernels.
//!
//! Each kernel reads its inputs through [`Bindings`] up front, so a missing parameter fails the
//! dispatch before any texel is shaded. The returned closure owns everything it samples.

mod common;
mod eye;
mod hair;
mod mouth;
mod skin;

use crate::{
    foundation::{error::BakeResult, math::Rgba},
    kernel::params::Bindings,
};

pub const MASK: &str = "RLMask";
pub const DETAIL: &str = "RLDetail";
pub const SUBSURFACE: &str = "RLSubsurface";
pub const THICKNESS: &str = "RLThickness";
pub const NORMAL_BLEND: &str = "RLNormalBlend";
pub const DIFFUSE_BLEND: &str = "RLDiffuseBlend";

pub const HEAD_DIFFUSE: &str = "RLHeadDiffuse";
pub const HEAD_MASK: &str = "RLHeadMask";
pub const SKIN_MASK: &str = "RLSkinMask";
pub const HEAD_SUBSURFACE: &str = "RLHeadSubsurface";
pub const SKIN_SUBSURFACE: &str = "RLSkinSubsurface";

pub const TEETH_DIFFUSE: &str = "RLTeethDiffuse";
pub const TEETH_MASK: &str = "RLTeethMask";
pub const TEETH_SUBSURFACE: &str = "RLTeethSubsurface";
pub const TEETH_THICKNESS: &str = "RLTeethThickness";
pub const TONGUE_DIFFUSE: &str = "RLTongueDiffuse";
pub const TONGUE_MASK: &str = "RLTongueMask";
pub const TONGUE_SUBSURFACE: &str = "RLTongueSubsurface";

pub const CORNEA_DIFFUSE: &str = "RLCorneaDiffuse";
pub const EYE_DIFFUSE: &str = "RLEyeDiffuse";
pub const CORNEA_MASK: &str = "RLCorneaMask";
pub const EYE_MASK: &str = "RLEyeMask";
pub const CORNEA_THICKNESS: &str = "RLCorneaThickness";
pub const EYE_OCCLUSION_DIFFUSE: &str = "RLEyeOcclusionDiffuse";

pub const HAIR_DIFFUSE: &str = "RLHairDiffuse";
pub const HAIR_COLORED_DIFFUSE: &str = "RLHairColoredDiffuse";
pub const HAIR_MASK: &str = "RLHairMask";

/// Per-texel shading function; arguments are `(u, v)` with `v` pointing up.
pub(crate) type Shader = Box<dyn Fn(f32, f32) -> Rgba + Send + Sync>;

pub(crate) struct KernelEntry {
    pub(crate) name: &'static str,
    pub(crate) build: fn(&Bindings<'_>) -> BakeResult<Shader>,
}

const fn entry(name: &'static str, build: fn(&Bindings<'_>) -> BakeResult<Shader>) -> KernelEntry {
    KernelEntry { name, build }
}

pub(crate) static KERNELS: &[KernelEntry] = &[
    entry(MASK, common::mask),
    entry(DETAIL, common::detail),
    entry(SUBSURFACE, common::subsurface),
    entry(THICKNESS, common::thickness),
    entry(NORMAL_BLEND, common::normal_blend),
    entry(DIFFUSE_BLEND, common::diffuse_blend),
    entry(HEAD_DIFFUSE, skin::head_diffuse),
    entry(HEAD_MASK, skin::head_mask),
    entry(SKIN_MASK, skin::skin_mask),
    entry(HEAD_SUBSURFACE, skin::head_subsurface),
    entry(SKIN_SUBSURFACE, skin::skin_subsurface),
    entry(TEETH_DIFFUSE, mouth::teeth_diffuse),
    entry(TEETH_MASK, mouth::teeth_mask),
    entry(TEETH_SUBSURFACE, mouth::teeth_subsurface),
    entry(TEETH_THICKNESS, mouth::teeth_thickness),
    entry(TONGUE_DIFFUSE, mouth::tongue_diffuse),
    entry(TONGUE_MASK, mouth::tongue_mask),
    entry(TONGUE_SUBSURFACE, mouth::tongue_subsurface),
    entry(CORNEA_DIFFUSE, eye::cornea_diffuse),
    entry(EYE_DIFFUSE, eye::eye_diffuse),
    entry(CORNEA_MASK, eye::cornea_mask),
    entry(EYE_MASK, eye::eye_mask),
    entry(CORNEA_THICKNESS, eye::cornea_thickness),
    entry(EYE_OCCLUSION_DIFFUSE, eye::eye_occlusion_diffuse),
    entry(HAIR_DIFFUSE, hair::hair_diffuse),
    entry(HAIR_COLORED_DIFFUSE, hair::hair_colored_diffuse),
    entry(HAIR_MASK, hair::hair_mask),
];

/// Packed HDRP mask inputs shared by the mask kernels.
#[derive(Clone, Copy, Debug)]
pub(crate) struct MaskParams {
    pub(crate) ao_strength: f32,
    pub(crate) smoothness_min: f32,
    pub(crate) smoothness_max: f32,
    pub(crate) smoothness_power: f32,
    pub(crate) micro_normal_strength: f32,
}

impl MaskParams {
    pub(crate) fn read(b: &Bindings<'_>) -> BakeResult<Self> {
        Ok(Self {
            ao_strength: b.float("aoStrength")?,
            smoothness_min: b.float("smoothnessMin")?,
            smoothness_max: b.float("smoothnessMax")?,
            smoothness_power: b.float("smoothnessPower")?,
            micro_normal_strength: b.float("microNormalStrength")?,
        })
    }

    /// Remap an authored mask texel to HDRP's (metallic, AO, detail mask, smoothness) layout.
    pub(crate) fn apply(&self, m: Rgba) -> Rgba {
        use crate::foundation::math::{lerp, saturate, spow};
        [
            saturate(m[0]),
            saturate(lerp(1.0, m[1], self.ao_strength)),
            saturate(m[2] * self.micro_normal_strength),
            saturate(lerp(
                self.smoothness_min,
                self.smoothness_max,
                spow(m[3], self.smoothness_power),
            )),
        ]
    }
}

/// Weighted sum of per-region modifiers.
///
/// Texels covered by no region receive `unmasked`; partially covered texels blend toward it by
/// the uncovered fraction.
pub(crate) fn region_blend(weights: &[f32], modifiers: &[f32], unmasked: f32) -> f32 {
    let mut covered = 0.0f32;
    let mut sum = 0.0f32;
    for (w, m) in weights.iter().zip(modifiers) {
        sum += w * m;
        covered = covered.max(*w);
    }
    sum + (1.0 - covered) * unmasked
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/library.rs"]
mod tests;
