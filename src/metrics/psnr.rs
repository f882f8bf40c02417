//! PSNR factor: mean squared error mapped into `[0, 1]`.
//!
//! The decibel value is divided by a brightness-dependent ceiling so that
//! dark images, where small absolute errors are more visible, saturate
//! earlier.

use crate::error::Result;
use crate::image::{LumaPair, row};

use super::reduce::sum_rows;

/// Peak signal power for 8-bit samples (255²).
const PEAK_POWER: f64 = 65025.0;

/// Calculate the PSNR factor of a validated pair.
///
/// `max` is the peak luma of the reference, see [`super::max_luma`].
/// Identical images return exactly `1.0`.
pub fn psnr_factor(pair: &LumaPair<'_>, max: u8) -> f64 {
    let reference = pair.reference();
    let candidate = pair.candidate();

    let [sum] = sum_rows(pair.height(), |y| {
        let line: u64 = row(&reference, y)
            .iter()
            .zip(row(&candidate, y))
            .map(|(&a, &b)| {
                let d = u64::from(a.abs_diff(b));
                d * d
            })
            .sum();
        [line as f64]
    });

    let mse = sum / pair.pixel_count() as f64;
    if mse == 0.0 {
        return 1.0;
    }

    let psnr = 10.0 * (PEAK_POWER / mse).log10();
    (psnr / psnr_ceiling(max)).clamp(0.0, 1.0)
}

/// Decibel value that maps to a factor of 1.0 for a given peak luma.
fn psnr_ceiling(max: u8) -> f64 {
    if max > 128 {
        50.0
    } else {
        let m = f64::from(max);
        0.0016 * m * m - 0.38 * m + 72.5
    }
}

/// Calculate the PSNR factor between two luma buffers.
///
/// # Arguments
///
/// * `reference` - Original luma samples, row-major.
/// * `candidate` - Re-encoded luma samples, row-major.
/// * `width` - Image width in pixels.
/// * `height` - Image height in pixels.
/// * `max` - Peak luma of the reference.
///
/// # Returns
///
/// A factor in `[0, 1]`; higher is better.
pub fn calculate_psnr_factor(
    reference: &[u8],
    candidate: &[u8],
    width: usize,
    height: usize,
    max: u8,
) -> Result<f64> {
    let pair = LumaPair::new(reference, candidate, width, height)?;
    Ok(psnr_factor(&pair, max))
}
