//! Structural metrics over the local sharpen response.
//!
//! The sharpen response of a pixel is `n * v - sum(window)`: how far it
//! stands out from its clamped neighbourhood, scaled by the window size.

use std::f64::consts::E;

use crate::error::Result;
use crate::image::{LumaPair, row};

use super::reduce::sum_rows;
use super::window::IntegralImage;

/// Stabilizer added to both halves of the structural ratio.
const STABILIZER: f64 = 1.0;

/// Radius of the neighbourhood used by [`sharpen_distance`].
const DISTANCE_RADIUS: usize = 1;

/// SSIM-style agreement between the sharpen responses of both images.
///
/// Sums `2·s1·s2 + 1` over `s1² + s2² + 1` across all pixels. `1.0` means
/// identical local structure; a radius of 0 or less returns `0.0`.
pub fn sharpen_bad(pair: &LumaPair<'_>, radius: i32) -> f64 {
    if radius <= 0 {
        return 0.0;
    }
    let radius = radius as usize;
    let reference = pair.reference();
    let candidate = pair.candidate();
    let table1 = IntegralImage::new(&reference);
    let table2 = IntegralImage::new(&candidate);

    let [numerator, denominator] = sum_rows(pair.height(), |y| {
        let mut num = 0.0;
        let mut den = 0.0;
        for (x, (&a, &b)) in row(&reference, y).iter().zip(row(&candidate, y)).enumerate() {
            let w1 = table1.window(x, y, radius);
            let w2 = table2.window(x, y, radius);
            let s1 = (w1.count * u64::from(a)) as f64 - w1.sum as f64;
            let s2 = (w2.count * u64::from(b)) as f64 - w2.sum as f64;
            num += 2.0 * s1 * s2 + STABILIZER;
            den += s1 * s1 + s2 * s2 + STABILIZER;
        }
        [num, den]
    });

    numerator / denominator
}

/// Distance between the 3x3 unsharp-masked images, normalized by the
/// covariance of their local detail.
///
/// Identical images score `19/17`; the score drops as the sharpened
/// images drift apart relative to the detail they share.
pub fn sharpen_distance(pair: &LumaPair<'_>) -> f64 {
    const K255: f64 = 1.0 / 255.0;

    let reference = pair.reference();
    let candidate = pair.candidate();
    let table1 = IntegralImage::new(&reference);
    let table2 = IntegralImage::new(&candidate);

    let [mut sumd, sumd1, sumd2, sumdc] = sum_rows(pair.height(), |y| {
        let mut acc = [0.0; 4];
        for (x, (&a, &b)) in row(&reference, y).iter().zip(row(&candidate, y)).enumerate() {
            let (a, b) = (f64::from(a), f64::from(b));
            let detail1 = a - table1.window(x, y, DISTANCE_RADIUS).mean();
            let detail2 = b - table2.window(x, y, DISTANCE_RADIUS).mean();
            let diff = ((a + detail1) - (b + detail2)) * K255;
            let detail1 = detail1 * K255;
            let detail2 = detail2 * K255;
            acc[0] += diff * diff;
            acc[1] += detail1 * detail1;
            acc[2] += detail2 * detail2;
            acc[3] += detail1 * detail2;
        }
        acc
    });

    let energy = sumd1 * sumd2;
    if energy > 0.0 {
        sumd = 2.0 * sumd * sumdc / energy;
    } else {
        sumd /= pair.pixel_count() as f64;
    }

    let k332 = (3.0 * 3.0 * 2.0 + 1.0) / (3.0 * 3.0 * 2.0 - 1.0);
    k332 - sumd.abs().sqrt() / E
}

/// Calculate the windowed structural metric between two luma buffers.
///
/// # Arguments
///
/// * `radius` - Half-size of the sharpen window; `<= 0` yields `0.0`.
pub fn calculate_sharpen_bad(
    reference: &[u8],
    candidate: &[u8],
    width: usize,
    height: usize,
    radius: i32,
) -> Result<f64> {
    let pair = LumaPair::new(reference, candidate, width, height)?;
    Ok(sharpen_bad(&pair, radius))
}

/// Calculate the 3x3 sharpen distance between two luma buffers.
pub fn calculate_sharpen_distance(
    reference: &[u8],
    candidate: &[u8],
    width: usize,
    height: usize,
) -> Result<f64> {
    let pair = LumaPair::new(reference, candidate, width, height)?;
    Ok(sharpen_distance(&pair))
}
