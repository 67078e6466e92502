use crate::{assets::texture::TextureRef, foundation::math::is_on, scene::material::Material};

/// Read-only parameter access over a source material.
///
/// Absent scalars read as zero and absent colors or vectors as transparent black, matching how
/// shader properties that were never authored evaluate.
#[derive(Clone, Copy)]
pub struct Props<'m>(pub &'m Material);

impl<'m> Props<'m> {
    pub fn tex(&self, slot: &str) -> Option<&'m TextureRef> {
        self.0.texture(slot)
    }

    pub fn f(&self, name: &str) -> f32 {
        self.0.float(name).unwrap_or(0.0)
    }

    /// Boolean-valued float property.
    pub fn flag(&self, name: &str) -> bool {
        is_on(self.f(name))
    }

    pub fn color(&self, name: &str) -> [f32; 4] {
        self.0.color(name).unwrap_or([0.0; 4])
    }

    pub fn vector(&self, name: &str) -> [f32; 4] {
        self.0.vector(name).unwrap_or([0.0; 4])
    }
}
