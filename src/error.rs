//! Error types for smallfry operations.

use thiserror::Error;

/// Result type alias for smallfry operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while preparing or scoring an image pair.
///
/// Degenerate numeric inputs (constant images, images too small for the
/// block grid) are not errors; every metric defines a fallback score for
/// them. Only malformed inputs end up here.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Width or height is zero.
    #[error("Invalid dimensions: {width}x{height} (both must be positive)")]
    InvalidDimensions {
        /// Requested width in pixels.
        width: usize,
        /// Requested height in pixels.
        height: usize,
    },

    /// A luma buffer does not match its dimensions. Plain buffers must hold
    /// exactly `width * height` samples; strided views must reach their last row.
    #[error("Invalid {image} buffer size: expected {expected} bytes, got {actual}")]
    BufferSize {
        /// Which buffer was malformed ("reference", "candidate" or "luma").
        image: &'static str,
        /// Expected number of samples.
        expected: usize,
        /// Actual number of samples.
        actual: usize,
    },

    /// Reference and candidate views have different dimensions.
    #[error("Dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        /// Reference dimensions (width, height).
        expected: (usize, usize),
        /// Candidate dimensions (width, height).
        actual: (usize, usize),
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
