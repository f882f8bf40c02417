//! Quality metrics for luma buffer comparison.
//!
//! Every metric compares a reference image against a re-encoded candidate of
//! the same size. Supported metrics:
//!
//! - **SmallFry**: weighted PSNR and blocking factors (higher is better,
//!   about 115.7 for identical images)
//! - **Correlation**: global Pearson correlation magnitude (0-1, 1 = identical)
//! - **Sharpen correlation**: correlation after unsharp masking (0-1)
//! - **Sharpen bad**: SSIM-like agreement of local sharpen responses (1 = identical)
//! - **Sharpen distance**: 3x3 unsharp-mask distance (19/17 for identical images)
//! - **Ringing**: response-weighted RMS error (0 = identical)
//!
//! ## Degenerate inputs
//!
//! | Metric | Input | Score |
//! |--------|-------|-------|
//! | PSNR factor | identical images | 1.0 |
//! | AAE factor | no 8x8 boundary (`w < 10 && h < 10`) | 1.0 |
//! | Correlation | both images constant | 1.0 |
//! | Correlation | exactly one image constant | 0.0 |
//! | Sharpen bad | radius <= 0 | 0.0 |
//! | Ringing | no sharpen response changed | 0.0 |

pub mod aae;
pub mod correlation;
pub mod psnr;
mod reduce;
pub mod ringing;
pub mod sharpen;
pub mod sharpenbad;
pub mod smallfry;
mod window;

pub use aae::{aae_factor, calculate_aae_factor};
pub use correlation::{
    calculate_correlation, calculate_sharpen_correlation, cor_sigma, correlation,
    sharpen_correlation,
};
pub use psnr::{calculate_psnr_factor, psnr_factor};
pub use ringing::{calculate_ringing, ringing};
pub use sharpen::{index_clamp, sharpen3};
pub use sharpenbad::{
    calculate_sharpen_bad, calculate_sharpen_distance, sharpen_bad, sharpen_distance,
};
pub use smallfry::{calculate_max_luma, calculate_smallfry, max_luma, smallfry};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::image::LumaPair;

/// Window radius used when none is configured (a 3x3 window).
pub const DEFAULT_RADIUS: i32 = 1;

fn default_radius() -> i32 {
    DEFAULT_RADIUS
}

/// Configuration for which metrics to calculate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricConfig {
    /// Calculate the SmallFry score.
    #[serde(default)]
    pub smallfry: bool,
    /// Calculate the global correlation (and its sigma).
    #[serde(default)]
    pub correlation: bool,
    /// Calculate the unsharp-masked correlation.
    #[serde(default)]
    pub sharpen_correlation: bool,
    /// Calculate the windowed structural metric.
    #[serde(default)]
    pub sharpen_bad: bool,
    /// Calculate the 3x3 sharpen distance.
    #[serde(default)]
    pub sharpen_distance: bool,
    /// Calculate the ringing metric.
    #[serde(default)]
    pub ringing: bool,
    /// Window radius for the windowed metrics.
    #[serde(default = "default_radius")]
    pub radius: i32,
}

impl Default for MetricConfig {
    fn default() -> Self {
        Self::all()
    }
}

impl MetricConfig {
    /// Calculate all available metrics.
    #[must_use]
    pub fn all() -> Self {
        Self {
            smallfry: true,
            correlation: true,
            sharpen_correlation: true,
            sharpen_bad: true,
            sharpen_distance: true,
            ringing: true,
            radius: DEFAULT_RADIUS,
        }
    }

    /// Metrics that work on single pixels or fixed 3x3 kernels.
    #[must_use]
    pub fn fast() -> Self {
        Self {
            smallfry: true,
            correlation: true,
            sharpen_correlation: false,
            sharpen_bad: false,
            sharpen_distance: false,
            ringing: true,
            radius: DEFAULT_RADIUS,
        }
    }

    /// Windowed metrics only.
    #[must_use]
    pub fn structural() -> Self {
        Self {
            smallfry: false,
            correlation: false,
            sharpen_correlation: true,
            sharpen_bad: true,
            sharpen_distance: true,
            ringing: false,
            radius: DEFAULT_RADIUS,
        }
    }

    /// Same selection with a different window radius.
    #[must_use]
    pub fn with_radius(mut self, radius: i32) -> Self {
        self.radius = radius;
        self
    }

    /// Whether any metric is selected.
    pub fn is_empty(&self) -> bool {
        !(self.smallfry
            || self.correlation
            || self.sharpen_correlation
            || self.sharpen_bad
            || self.sharpen_distance
            || self.ringing)
    }
}

/// Results from metric calculations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricResult {
    /// SmallFry score (higher is better).
    pub smallfry: Option<f64>,
    /// Global correlation magnitude (1 = identical).
    pub correlation: Option<f64>,
    /// [`cor_sigma`] of the global correlation.
    pub correlation_sigma: Option<f64>,
    /// Unsharp-masked correlation magnitude (1 = identical).
    pub sharpen_correlation: Option<f64>,
    /// Windowed structural agreement (1 = identical).
    pub sharpen_bad: Option<f64>,
    /// 3x3 sharpen distance (19/17 = identical).
    pub sharpen_distance: Option<f64>,
    /// Ringing (0 = identical).
    pub ringing: Option<f64>,
}

/// Evaluate the configured metrics on a validated pair.
pub fn evaluate(pair: &LumaPair<'_>, config: &MetricConfig) -> MetricResult {
    let cor = config.correlation.then(|| correlation(pair));

    MetricResult {
        smallfry: config.smallfry.then(|| smallfry(pair)),
        correlation: cor,
        correlation_sigma: cor.map(cor_sigma),
        sharpen_correlation: config
            .sharpen_correlation
            .then(|| sharpen_correlation(pair, config.radius)),
        sharpen_bad: config.sharpen_bad.then(|| sharpen_bad(pair, config.radius)),
        sharpen_distance: config.sharpen_distance.then(|| sharpen_distance(pair)),
        ringing: config.ringing.then(|| ringing(pair)),
    }
}

/// Calculate the configured metrics between two luma buffers.
///
/// # Errors
///
/// Returns an error if either buffer does not match `width * height` or a
/// dimension is zero.
pub fn calculate_metrics(
    reference: &[u8],
    candidate: &[u8],
    width: usize,
    height: usize,
    config: &MetricConfig,
) -> Result<MetricResult> {
    let pair = LumaPair::new(reference, candidate, width, height)?;
    Ok(evaluate(&pair, config))
}
