/// Crate-wide result alias.
pub type BakeResult<T> = Result<T, BakeError>;

/// Every failure the bake engine can surface.
///
/// Missing source textures never show up here: they are substituted by the fallback policy
/// before a kernel ever sees them.
#[derive(thiserror::Error, Debug)]
pub enum BakeError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("kernel '{kernel}' is missing parameter '{name}'")]
    MissingParameter { kernel: String, name: String },

    #[error("compute backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("baked asset path '{path}' collides with the source asset")]
    PathCollision { path: String },

    #[error("asset error: {0}")]
    Asset(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BakeError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn missing_parameter(kernel: impl Into<String>, name: impl Into<String>) -> Self {
        Self::MissingParameter {
            kernel: kernel.into(),
            name: name.into(),
        }
    }

    pub fn backend_unavailable(msg: impl Into<String>) -> Self {
        Self::BackendUnavailable(msg.into())
    }

    pub fn path_collision(path: impl Into<String>) -> Self {
        Self::PathCollision { path: path.into() }
    }

    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` for the soft failure that degrades a single dispatch to "keep original".
    pub fn is_backend_unavailable(&self) -> bool {
        matches!(self, Self::BackendUnavailable(_))
    }
}

impl From<serde_json::Error> for BakeError {
    fn from(e: serde_json::Error) -> Self {
        Self::serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
