//! Correlation metrics and the correlation-to-sigma transform.
//!
//! Both correlations run in two passes: global means first, then centered
//! cross products. The windowed variant feeds an unsharp-masked value
//! (`2 * v - local_mean`) into the second pass, centered on the raw image
//! mean.

use log::debug;

use crate::error::Result;
use crate::image::{LumaPair, row};

use super::reduce::sum_rows;
use super::window::IntegralImage;

/// Global means of reference and candidate.
fn means(pair: &LumaPair<'_>) -> (f64, f64) {
    let reference = pair.reference();
    let candidate = pair.candidate();

    let [sum1, sum2] = sum_rows(pair.height(), |y| {
        let a: u64 = row(&reference, y).iter().map(|&v| u64::from(v)).sum();
        let b: u64 = row(&candidate, y).iter().map(|&v| u64::from(v)).sum();
        [a as f64, b as f64]
    });

    let n = pair.pixel_count() as f64;
    (sum1 / n, sum2 / n)
}

/// `|sum12| / sqrt(sumq1 * sumq2)`, with constant fields handled explicitly.
///
/// Rounding can push a near-perfect correlation a few ulp past 1; the result
/// is capped there.
fn finish(sum12: f64, sumq1: f64, sumq2: f64) -> f64 {
    let sumq = (sumq1 * sumq2).sqrt();
    let cor = if sumq > 0.0 {
        sum12 / sumq
    } else {
        debug!("correlation: zero variance (sumq1 = {sumq1}, sumq2 = {sumq2})");
        if sumq1 == sumq2 { 1.0 } else { 0.0 }
    };
    cor.abs().min(1.0)
}

/// Pearson correlation magnitude of a validated pair.
///
/// Two constant images correlate at `1.0`; a constant image against a
/// textured one correlates at `0.0`.
pub fn correlation(pair: &LumaPair<'_>) -> f64 {
    let (mean1, mean2) = means(pair);
    let reference = pair.reference();
    let candidate = pair.candidate();

    let [sum12, sumq1, sumq2] = sum_rows(pair.height(), |y| {
        let mut acc = [0.0; 3];
        for (&a, &b) in row(&reference, y).iter().zip(row(&candidate, y)) {
            let a = f64::from(a) - mean1;
            let b = f64::from(b) - mean2;
            acc[0] += a * b;
            acc[1] += a * a;
            acc[2] += b * b;
        }
        acc
    });

    finish(sum12, sumq1, sumq2)
}

/// Correlation of the unsharp-masked images.
///
/// A negative radius is treated as its magnitude; radius 0 degenerates to
/// [`correlation`] since the local mean is the pixel itself.
pub fn sharpen_correlation(pair: &LumaPair<'_>, radius: i32) -> f64 {
    let radius = radius.unsigned_abs() as usize;
    let (mean1, mean2) = means(pair);
    let reference = pair.reference();
    let candidate = pair.candidate();
    let table1 = IntegralImage::new(&reference);
    let table2 = IntegralImage::new(&candidate);

    let [sum12, sumq1, sumq2] = sum_rows(pair.height(), |y| {
        let mut acc = [0.0; 3];
        for (x, (&a, &b)) in row(&reference, y).iter().zip(row(&candidate, y)).enumerate() {
            let a = 2.0 * f64::from(a) - table1.window(x, y, radius).mean() - mean1;
            let b = 2.0 * f64::from(b) - table2.window(x, y, radius).mean() - mean2;
            acc[0] += a * b;
            acc[1] += a * a;
            acc[2] += b * b;
        }
        acc
    });

    finish(sum12, sumq1, sumq2)
}

/// Map a correlation magnitude to `1 - sqrt(1 - cor²)`.
///
/// Magnitudes above 1 can only come from rounding; they are mapped through
/// their reciprocal and the result inverted, keeping the output finite and
/// positive.
pub fn cor_sigma(cor: f64) -> f64 {
    let cor = cor.abs();
    if cor > 1.0 {
        let inv = 1.0 / cor;
        1.0 / (1.0 - (1.0 - inv * inv).sqrt())
    } else {
        1.0 - (1.0 - cor * cor).sqrt()
    }
}

/// Calculate the global correlation between two luma buffers.
///
/// # Returns
///
/// Correlation magnitude in `[0, 1]`; `1.0` for identical images.
pub fn calculate_correlation(
    reference: &[u8],
    candidate: &[u8],
    width: usize,
    height: usize,
) -> Result<f64> {
    let pair = LumaPair::new(reference, candidate, width, height)?;
    Ok(correlation(&pair))
}

/// Calculate the unsharp-masked correlation between two luma buffers.
///
/// # Arguments
///
/// * `radius` - Half-size of the local mean window; the sign is ignored.
pub fn calculate_sharpen_correlation(
    reference: &[u8],
    candidate: &[u8],
    width: usize,
    height: usize,
    radius: i32,
) -> Result<f64> {
    let pair = LumaPair::new(reference, candidate, width, height)?;
    Ok(sharpen_correlation(&pair, radius))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: usize, height: usize) -> Vec<u8> {
        (0..height)
            .flat_map(|y| (0..width).map(move |x| (x * 9 + y * 5) as u8))
            .collect()
    }

    #[test]
    fn test_identical() {
        let data = gradient(16, 12);
        assert_eq!(calculate_correlation(&data, &data, 16, 12).unwrap(), 1.0);
        assert_eq!(calculate_sharpen_correlation(&data, &data, 16, 12, 2).unwrap(), 1.0);
    }

    #[test]
    fn test_constant_images() {
        let a = vec![40u8; 16];
        let b = vec![90u8; 16];
        assert_eq!(calculate_correlation(&a, &b, 4, 4).unwrap(), 1.0);
        assert_eq!(calculate_sharpen_correlation(&a, &b, 4, 4, 1).unwrap(), 1.0);
    }

    #[test]
    fn test_constant_against_textured() {
        let a = vec![40u8; 16];
        let b = gradient(4, 4);
        assert_eq!(calculate_correlation(&a, &b, 4, 4).unwrap(), 0.0);
    }

    #[test]
    fn test_inverted_image_correlates_fully() {
        let a = gradient(8, 8);
        let b: Vec<u8> = a.iter().map(|&v| 255 - v).collect();
        let cor = calculate_correlation(&a, &b, 8, 8).unwrap();
        assert!((cor - 1.0).abs() < 1e-12, "got {cor}");
    }

    #[test]
    fn test_symmetric() {
        let a = gradient(13, 7);
        let b: Vec<u8> = a.iter().enumerate().map(|(i, &v)| v ^ (i as u8 & 0x1f)).collect();
        assert_eq!(
            calculate_correlation(&a, &b, 13, 7).unwrap(),
            calculate_correlation(&b, &a, 13, 7).unwrap()
        );
        assert_eq!(
            calculate_sharpen_correlation(&a, &b, 13, 7, 2).unwrap(),
            calculate_sharpen_correlation(&b, &a, 13, 7, 2).unwrap()
        );
    }

    #[test]
    fn test_negative_radius_uses_magnitude() {
        let a = gradient(10, 10);
        let b: Vec<u8> = a.iter().map(|&v| v / 2 + (v % 7)).collect();
        assert_eq!(
            calculate_sharpen_correlation(&a, &b, 10, 10, -3).unwrap(),
            calculate_sharpen_correlation(&a, &b, 10, 10, 3).unwrap()
        );
    }

    #[test]
    fn test_radius_zero_matches_global() {
        let a = gradient(10, 10);
        let b: Vec<u8> = a.iter().map(|&v| v / 2 + (v % 7)).collect();
        let global = calculate_correlation(&a, &b, 10, 10).unwrap();
        let sharp = calculate_sharpen_correlation(&a, &b, 10, 10, 0).unwrap();
        assert!((global - sharp).abs() < 1e-12);
    }

    #[test]
    fn test_cor_sigma() {
        assert_eq!(cor_sigma(0.0), 0.0);
        assert_eq!(cor_sigma(1.0), 1.0);
        assert_eq!(cor_sigma(-1.0), 1.0);
        let mid = cor_sigma(0.6);
        assert!((mid - 0.2).abs() < 1e-12, "got {mid}");
    }

    #[test]
    fn test_cor_sigma_above_one() {
        // 1 / 0.8 maps through 0.8 → 0.4, then inverts
        let sigma = cor_sigma(1.25);
        assert!((sigma - 2.5).abs() < 1e-12, "got {sigma}");
        assert!(cor_sigma(1.0 + 1e-12).is_finite());
    }
}
