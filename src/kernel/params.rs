use std::collections::BTreeMap;

use crate::{
    assets::texture::TextureRef,
    foundation::{
        core::Extent,
        error::{BakeError, BakeResult},
        math::is_on,
    },
};

/// Named inputs bound to one kernel dispatch.
#[derive(Clone, Debug, Default)]
pub struct KernelParams {
    textures: BTreeMap<String, TextureRef>,
    floats: BTreeMap<String, f32>,
    vectors: BTreeMap<String, [f32; 4]>,
}

impl KernelParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_texture(&mut self, name: &str, texture: TextureRef) -> &mut Self {
        self.textures.insert(name.to_string(), texture);
        self
    }

    pub fn set_float(&mut self, name: &str, value: f32) -> &mut Self {
        self.floats.insert(name.to_string(), value);
        self
    }

    pub fn set_vector(&mut self, name: &str, value: [f32; 4]) -> &mut Self {
        self.vectors.insert(name.to_string(), value);
        self
    }

    pub fn texture(&self, name: &str) -> Option<&TextureRef> {
        self.textures.get(name)
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        self.floats.get(name).copied()
    }

    pub fn vector(&self, name: &str) -> Option<[f32; 4]> {
        self.vectors.get(name).copied()
    }

    pub fn textures(&self) -> impl Iterator<Item = (&str, &TextureRef)> {
        self.textures.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn floats(&self) -> impl Iterator<Item = (&str, f32)> {
        self.floats.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn vectors(&self) -> impl Iterator<Item = (&str, [f32; 4])> {
        self.vectors.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Dispatch grid size. Kernels run one invocation per group, so a `(width, height, 1)` grid
/// covers one output image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThreadGroups {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl ThreadGroups {
    pub fn for_extent(extent: Extent) -> Self {
        Self {
            x: extent.width,
            y: extent.height,
            z: 1,
        }
    }

    /// The output extent covered by this grid.
    pub fn extent(self) -> BakeResult<Extent> {
        if self.z != 1 {
            return Err(BakeError::validation("2D kernels must be dispatched with z == 1"));
        }
        Extent::new(self.x, self.y)
    }
}

/// Checked view over [`KernelParams`] used while building a kernel.
pub(crate) struct Bindings<'a> {
    kernel: &'a str,
    params: &'a KernelParams,
}

impl<'a> Bindings<'a> {
    pub(crate) fn new(kernel: &'a str, params: &'a KernelParams) -> Self {
        Self { kernel, params }
    }

    pub(crate) fn texture(&self, name: &str) -> BakeResult<TextureRef> {
        self.params
            .texture(name)
            .cloned()
            .ok_or_else(|| BakeError::missing_parameter(self.kernel, name))
    }

    pub(crate) fn float(&self, name: &str) -> BakeResult<f32> {
        self.params
            .float(name)
            .ok_or_else(|| BakeError::missing_parameter(self.kernel, name))
    }

    pub(crate) fn vector(&self, name: &str) -> BakeResult<[f32; 4]> {
        self.params
            .vector(name)
            .ok_or_else(|| BakeError::missing_parameter(self.kernel, name))
    }

    /// Boolean-valued float parameter.
    pub(crate) fn flag(&self, name: &str) -> BakeResult<bool> {
        Ok(is_on(self.float(name)?))
    }
}
