use crate::scene::material::Material;

/// The shader families that carry a baking recipe.
///
/// Recognized by the last `/` segment of the material's shader name. Anything else passes
/// through unbaked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MaterialCategory {
    Skin,
    Teeth,
    Tongue,
    Hair,
    Eye,
    EyeOcclusion,
}

pub const SKIN_TAG: &str = "RL_SkinShaderVariants";
pub const TEETH_TAG: &str = "RL_TeethShader";
pub const TONGUE_TAG: &str = "RL_TongueShader";
pub const HAIR_TAG: &str = "RL_HairShaderVariants";
pub const EYE_TAG: &str = "RL_EyeShaderVariants";
pub const EYE_OCCLUSION_TAG: &str = "RL_EyeOcclusionShader";

impl MaterialCategory {
    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            SKIN_TAG => Self::Skin,
            TEETH_TAG => Self::Teeth,
            TONGUE_TAG => Self::Tongue,
            HAIR_TAG => Self::Hair,
            EYE_TAG => Self::Eye,
            EYE_OCCLUSION_TAG => Self::EyeOcclusion,
            _ => return None,
        })
    }

    pub fn of(material: &Material) -> Option<Self> {
        Self::from_tag(material.shader_tag())
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Skin => SKIN_TAG,
            Self::Teeth => TEETH_TAG,
            Self::Tongue => TONGUE_TAG,
            Self::Hair => HAIR_TAG,
            Self::Eye => EYE_TAG,
            Self::EyeOcclusion => EYE_OCCLUSION_TAG,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/bake/category.rs"]
mod tests;
