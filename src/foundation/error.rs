/// Result alias used across the crate.
pub type HeroflowResult<T> = Result<T, HeroflowError>;

/// Error type for configuration, rendering and encoding surfaces.
///
/// The animation loop itself never fails: an unavailable surface or a reduced-motion opt-out is
/// reported as a [`crate::SkipReason`], not as an error.
#[derive(thiserror::Error, Debug)]
pub enum HeroflowError {
    /// Invalid configuration, viewport or sink parameters.
    #[error("validation error: {0}")]
    Validation(String),

    /// Raster surface failure.
    #[error("render error: {0}")]
    Render(String),

    /// Frame sink / `ffmpeg` failure.
    #[error("encode error: {0}")]
    Encode(String),

    /// Config (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, usually I/O with context attached.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HeroflowError {
    /// Build a [`HeroflowError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`HeroflowError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`HeroflowError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`HeroflowError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for HeroflowError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}
