//! Per-category bake recipes.
//!
//! A recipe reads its source material through [`Props`](crate::bake::props::Props), runs the
//! map helpers it needs and reports the resulting texture set plus the properties to carry over
//! to the baked material. Recipes never touch the source material or the scene.

pub mod eye;
pub mod hair;
pub mod occlusion;
pub mod skin;
pub mod teeth;
pub mod tongue;

use std::collections::BTreeMap;

use crate::{
    assets::texture::TextureRef,
    scene::{material::Material, template::MaterialType},
};

/// The renderer-facing texture set of one baked material.
///
/// Each slot holds either a freshly baked texture or the original source texture for that
/// slot, so a skipped bake never leaves a hole that the source had filled.
#[derive(Clone, Debug, Default)]
pub struct BakedMapSet {
    /// sRGB albedo with alpha; bound to `_BaseColorMap`.
    pub base_color: Option<TextureRef>,
    /// HDRP mask (metallic, AO, detail mask, smoothness); bound to `_MaskMap`.
    pub mask: Option<TextureRef>,
    /// Tangent-space normal; bound to `_NormalMap`.
    pub normal: Option<TextureRef>,
    /// Detail albedo and micro normal; bound to `_DetailMap` with the recipe's tiling.
    pub detail: Option<TextureRef>,
    /// Subsurface scattering amount; bound to `_SubsurfaceMaskMap`.
    pub subsurface: Option<TextureRef>,
    /// Transmission depth; bound to `_ThicknessMap`.
    pub thickness: Option<TextureRef>,
}

impl BakedMapSet {
    /// Slots in binding order with their renderer property names.
    pub fn slots(&self) -> [(&'static str, Option<&TextureRef>); 6] {
        [
            ("_BaseColorMap", self.base_color.as_ref()),
            ("_MaskMap", self.mask.as_ref()),
            ("_NormalMap", self.normal.as_ref()),
            ("_DetailMap", self.detail.as_ref()),
            ("_SubsurfaceMaskMap", self.subsurface.as_ref()),
            ("_ThicknessMap", self.thickness.as_ref()),
        ]
    }
}

/// Replace `slot` with `baked` when the bake produced something.
pub(crate) fn keep(slot: &mut Option<TextureRef>, baked: Option<TextureRef>) {
    if let Some(t) = baked {
        *slot = Some(t);
    }
}

/// Properties written onto the baked material after the template has been applied.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    /// Scalar properties by shader property name.
    pub floats: BTreeMap<String, f32>,
    /// Color properties by shader property name.
    pub colors: BTreeMap<String, [f32; 4]>,
    /// Extra texture slots; `None` clears a slot the template had filled.
    pub textures: BTreeMap<String, Option<TextureRef>>,
}

impl Overrides {
    pub fn float(&mut self, name: &str, value: f32) -> &mut Self {
        self.floats.insert(name.to_string(), value);
        self
    }

    pub fn color(&mut self, name: &str, value: [f32; 4]) -> &mut Self {
        self.colors.insert(name.to_string(), value);
        self
    }

    pub fn texture(&mut self, name: &str, value: Option<TextureRef>) -> &mut Self {
        self.textures.insert(name.to_string(), value);
        self
    }

    /// `true` when the recipe carries nothing over.
    pub fn is_empty(&self) -> bool {
        self.floats.is_empty() && self.colors.is_empty() && self.textures.is_empty()
    }

    /// Write every override onto `material`, replacing existing values.
    pub fn apply(&self, material: &mut Material) {
        for (name, value) in &self.floats {
            material.set_float(name, *value);
        }
        for (name, value) in &self.colors {
            material.set_color(name, *value);
        }
        for (name, value) in &self.textures {
            material.set_texture(name, value.clone());
        }
    }
}

/// Everything a recipe hands to the assembler.
#[derive(Clone, Debug)]
pub struct RecipeOutput {
    /// Baked or original texture per renderer slot.
    pub maps: BakedMapSet,
    /// Tiling applied to the detail map when one is bound.
    pub tiling: f32,
    /// Template whose shading properties seed the baked material.
    pub template: MaterialType,
    /// Properties copied onto the material after the template.
    pub overrides: Overrides,
}

impl RecipeOutput {
    pub fn new(maps: BakedMapSet, tiling: f32, template: MaterialType) -> Self {
        Self {
            maps,
            tiling,
            template,
            overrides: Overrides::default(),
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/bake/recipes.rs"]
mod tests;
