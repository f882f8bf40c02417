//! # smallfry
//!
//! Luma-only perceptual quality metrics for recompression search loops.
//!
//! A recompressor re-encodes an image at decreasing quality settings and
//! stops once the result scores below a target. This library is that
//! scoring function: it takes the original and re-encoded 8-bit luma
//! planes and returns one `f64` per metric. Decoding, color handling and
//! the search itself are left to the caller.
//!
//! ## Quick Start
//!
//! ```rust
//! use smallfry::{MetricConfig, calculate_metrics, calculate_smallfry};
//!
//! let width = 16;
//! let height = 16;
//! let original: Vec<u8> = (0..width * height).map(|i| (i % 200) as u8).collect();
//! let recompressed: Vec<u8> = original.iter().map(|&v| v.saturating_add(2)).collect();
//!
//! let score = calculate_smallfry(&original, &recompressed, width, height)?;
//! assert!(score > 0.0);
//!
//! let all = calculate_metrics(&original, &recompressed, width, height, &MetricConfig::all())?;
//! assert!(all.correlation.is_some());
//! # Ok::<(), smallfry::Error>(())
//! ```
//!
//! ## Modules
//!
//! - [`error`]: Error types for the library
//! - [`image`]: Validated reference/candidate buffer pairs
//! - [`metrics`]: The metric algorithms and their configuration
//! - [`report`]: Serializable comparison reports

pub mod error;
pub mod image;
pub mod metrics;
pub mod report;

// Re-export commonly used types
pub use error::{Error, Result};
pub use image::LumaPair;
pub use metrics::{
    MetricConfig, MetricResult, calculate_aae_factor, calculate_correlation,
    calculate_max_luma, calculate_metrics, calculate_psnr_factor, calculate_ringing,
    calculate_sharpen_bad, calculate_sharpen_correlation, calculate_sharpen_distance,
    calculate_smallfry, cor_sigma, index_clamp, max_luma,
};
pub use report::ComparisonReport;

/// Library version, reported alongside every score.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Static version identifier of the metric implementations.
#[must_use]
pub fn version() -> &'static str {
    VERSION
}
