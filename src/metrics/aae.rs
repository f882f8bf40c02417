//! AAE factor: blocking artifacts along the 8x8 JPEG block grid.
//!
//! For every sample that sits on the last column (or row) of a block, the
//! jump in error magnitude across the block edge is compared to the error
//! slope on either side of it. An edge jump much larger than its neighbours
//! is counted as a visible block boundary.

use log::debug;

use crate::error::Result;
use crate::image::{LumaPair, row};

use super::reduce::sum_rows;

/// JPEG block size.
const BLOCK: usize = 8;

/// Keeps the slope denominator away from zero.
const EPSILON: f64 = 0.0001;

/// Ratio above which a boundary counts as a full artifact.
const HIT_FULL: f64 = 5.0;

/// Ratio above which a boundary starts to count.
const HIT_START: f64 = 2.0;

/// Weight of one boundary sample given the four error magnitudes straddling
/// it: `d0` before the edge, `d1` on it, `d2` after it, `d3` one further.
fn edge_weight(d0: i32, d1: i32, d2: i32, d3: i32) -> f64 {
    let jump = f64::from((d1 - d2).abs());
    let slope = (EPSILON + f64::from((d0 - d1).abs()) + f64::from((d2 - d3).abs())) * 0.5;
    let calc = jump / slope;

    if calc > HIT_FULL {
        1.0
    } else if calc > HIT_START {
        (calc - HIT_START) / (HIT_FULL - HIT_START)
    } else {
        0.0
    }
}

/// Lines `7, 15, 23, …` that have two more lines after them.
fn grid_lines(len: usize) -> impl Iterator<Item = usize> {
    (BLOCK - 1..len.saturating_sub(2)).step_by(BLOCK)
}

/// Calculate the AAE factor of a validated pair.
///
/// Returns `1.0` when the image is too small to contain a block boundary
/// (`width < 10` and `height < 10`) or when no boundary artifact is found.
pub fn aae_factor(pair: &LumaPair<'_>, max: u8) -> f64 {
    let reference = pair.reference();
    let candidate = pair.candidate();
    let width = pair.width();

    let error = |y: usize, x: usize| -> i32 {
        i32::from(row(&reference, y)[x].abs_diff(row(&candidate, y)[x]))
    };

    // Vertical block edges, scanned along every row
    let [h_sum, h_cnt] = sum_rows(pair.height(), |y| {
        let mut sum = 0.0;
        let mut cnt = 0.0;
        for x in grid_lines(width) {
            sum += edge_weight(error(y, x - 1), error(y, x), error(y, x + 1), error(y, x + 2));
            cnt += 1.0;
        }
        [sum, cnt]
    });

    // Horizontal block edges, scanned along every column
    let edge_rows: Vec<usize> = grid_lines(pair.height()).collect();
    let [v_sum, v_cnt] = sum_rows(edge_rows.len(), |i| {
        let y = edge_rows[i];
        let mut sum = 0.0;
        for x in 0..width {
            sum += edge_weight(error(y - 1, x), error(y, x), error(y + 1, x), error(y + 2, x));
        }
        [sum, width as f64]
    });

    let sum = h_sum + v_sum;
    let cnt = h_cnt + v_cnt;

    if cnt == 0.0 {
        debug!("AAE: {}x{} image has no block boundaries", width, pair.height());
        return 1.0;
    }
    if sum == 0.0 {
        return 1.0;
    }

    let ret = 1.0 - sum / cnt;

    let cfmax = if max > 128 {
        0.65
    } else {
        1.0 - 0.35 * f64::from(max) / 128.0
    };
    let cf = (0.25 + 1000.0 * cnt / sum).min(1.0).max(cfmax);

    ret * cf
}

/// Calculate the AAE factor between two luma buffers.
///
/// # Returns
///
/// A factor in `[0, 1]`; `1.0` means no blocking was detected.
pub fn calculate_aae_factor(
    reference: &[u8],
    candidate: &[u8],
    width: usize,
    height: usize,
    max: u8,
) -> Result<f64> {
    let pair = LumaPair::new(reference, candidate, width, height)?;
    Ok(aae_factor(&pair, max))
}
