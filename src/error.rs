//! Library error type.

use thiserror::Error;

use crate::paint::ScaleMode;

/// Errors surfaced to the integrator.
///
/// Degenerate geometry and missing images are not errors; the pipeline
/// degrades silently for those. This type covers integrator mistakes and
/// source decoding failures only.
#[derive(Debug, Error)]
pub enum Error {
    /// A scale mode other than [`ScaleMode::CenterCrop`] was requested.
    /// Circular rendering is defined in terms of center-crop sampling, so
    /// this is a programming error at the call site.
    #[error("scale mode {0:?} is not supported; circular rendering requires ScaleMode::CenterCrop")]
    UnsupportedScaleMode(ScaleMode),

    /// An image file could not be decoded into an RGBA source buffer.
    #[error("failed to decode image source: {0}")]
    Decode(#[from] image::ImageError),

    /// A dynamic source failed while rendering into its backing store.
    #[error("dynamic image source failed to render: {0}")]
    SourceRender(#[source] Box<dyn std::error::Error + Send + Sync>),
}
