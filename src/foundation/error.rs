/// Convenience result type used across the crate.
pub type PreviewResult<T> = Result<T, PreviewError>;

/// Error taxonomy returned by the compositing APIs.
///
/// Degenerate but well-formed outcomes (a portrait placed entirely off-canvas, for example)
/// are successes and never show up here.
#[derive(thiserror::Error, Debug)]
pub enum PreviewError {
    /// A numeric parameter (mask size, canvas dimension, diameter) is out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A supplied raster has zero area or a buffer that disagrees with its declared shape.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Layout configuration could not be read or is inconsistent.
    #[error("layout config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from codecs or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PreviewError {
    /// Build a [`PreviewError::InvalidArgument`] value.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Build a [`PreviewError::InvalidInput`] value.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Build a [`PreviewError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
