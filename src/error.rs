//! Error taxonomy for the rendering pipeline.

use thiserror::Error;

/// Errors raised inside the rendering pipeline.
///
/// None of these reach the caller of [`generate`](crate::CardRenderer::generate):
/// data-quality and resource problems are consumed at stage boundaries with a
/// documented fallback, encoding problems produce placeholder artifacts, and
/// anything unexpected is captured into the per-guest [`RenderResult`]
/// (`crate::RenderResult`) instead of propagating.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Malformed input data (bad hex color, missing font file). Always
    /// recovered locally with a fallback value.
    #[error("data quality: {0}")]
    DataQuality(String),

    /// A required resource could not be loaded (background image, font
    /// directory). Recovered by skipping the optional element or walking the
    /// fallback chain.
    #[error("resource unavailable: {0}")]
    ResourceUnavailable(String),

    /// A payload could not be encoded. Unexpected for well-formed inputs.
    #[error("encoding: {0}")]
    Encoding(String),

    /// Image codec failure while serializing an artifact.
    #[error("image: {0}")]
    Image(#[from] image::ImageError),

    /// Unexpected failure inside the compositing sequence.
    #[error("pipeline: {0}")]
    Pipeline(String),
}
