//! Report type for one reference/candidate comparison.
//!
//! A report records what was measured and when, so results from a search
//! loop can be logged or archived as JSON.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::image::LumaPair;
use crate::metrics::{MetricConfig, MetricResult, evaluate};

/// Scores for a single image pair together with the inputs that produced them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// Library version that computed the scores.
    pub version: String,
    /// Metric selection and radius.
    pub config: MetricConfig,
    /// Computed scores.
    pub metrics: MetricResult,
    /// When the comparison ran.
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl ComparisonReport {
    /// Evaluate `config` on `pair` and record the result.
    #[must_use]
    pub fn compute(pair: &LumaPair<'_>, config: &MetricConfig) -> Self {
        Self {
            width: pair.width(),
            height: pair.height(),
            version: crate::version().to_string(),
            config: config.clone(),
            metrics: evaluate(pair, config),
            timestamp: chrono::Utc::now(),
        }
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a report previously written by [`Self::to_json`].
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
