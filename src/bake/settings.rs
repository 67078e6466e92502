use crate::foundation::{
    core::MAX_TEXTURE_SIZE,
    error::{BakeError, BakeResult},
};

/// Knobs for one bake session. Loadable from JSON; every field has a default, and the size
/// caps follow a smaller `max_size` when loaded that way.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BakeSettings {
    /// Upper bound for any output map edge.
    pub max_size: u32,
    /// Fixed edge for procedural and low-frequency maps.
    pub thumbnail_size: u32,
    /// Cap for subsurface and thickness maps derived from source textures.
    pub region_cap: u32,
    /// Target the custom hair shader and its property names instead of the built-in one.
    pub bake_custom_shaders: bool,
    /// Override the number of rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
    /// Shader given to newly created materials when no template applies.
    pub default_shader: String,
}

impl Default for BakeSettings {
    fn default() -> Self {
        Self {
            max_size: MAX_TEXTURE_SIZE,
            thumbnail_size: 256,
            region_cap: 1024,
            bake_custom_shaders: false,
            threads: None,
            default_shader: "HDRP/Lit".to_string(),
        }
    }
}

impl BakeSettings {
    pub fn from_json(text: &str) -> BakeResult<Self> {
        let mut settings: Self = serde_json::from_str(text)?;
        settings.fit_caps_to_max_size();
        settings.validate()?;
        Ok(settings)
    }

    /// Lower `thumbnail_size` and `region_cap` to `max_size` where they exceed it.
    pub fn fit_caps_to_max_size(&mut self) {
        self.thumbnail_size = self.thumbnail_size.min(self.max_size);
        self.region_cap = self.region_cap.min(self.max_size);
    }

    pub fn validate(&self) -> BakeResult<()> {
        if self.max_size == 0 || self.max_size > MAX_TEXTURE_SIZE {
            return Err(BakeError::validation(format!(
                "max_size must be in 1..={MAX_TEXTURE_SIZE}, got {}",
                self.max_size
            )));
        }
        for (name, value) in [
            ("thumbnail_size", self.thumbnail_size),
            ("region_cap", self.region_cap),
        ] {
            if value == 0 || value > self.max_size {
                return Err(BakeError::validation(format!(
                    "{name} must be in 1..={}, got {value}",
                    self.max_size
                )));
            }
        }
        if self.threads == Some(0) {
            return Err(BakeError::validation(
                "bake threading 'threads' must be >= 1 when set",
            ));
        }
        if self.default_shader.trim().is_empty() {
            return Err(BakeError::validation("default_shader must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/bake/settings.rs"]
mod tests;
