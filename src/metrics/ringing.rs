//! Ringing ("neatness"): pixel error weighted by how much the re-encode
//! changed the local sharpen response.
//!
//! Errors on pixels whose edge response is untouched do not count; errors
//! that come with new or lost edges (ringing around contours, smeared
//! detail) count in proportion to the change.

use log::debug;

use crate::error::Result;
use crate::image::{LumaPair, row};

use super::reduce::sum_rows;
use super::sharpen::sharpen3;

/// Response-weighted RMS error, normalized to `[0, 1]` by 255.
///
/// Returns `0.0` when no pixel's sharpen response changed, which includes
/// identical images.
pub fn ringing(pair: &LumaPair<'_>) -> f64 {
    let reference = pair.reference();
    let candidate = pair.candidate();

    let [amount, significance] = sum_rows(pair.height(), |y| {
        let mut amount = 0u64;
        let mut significance = 0u64;
        for (x, (&a, &b)) in row(&reference, y).iter().zip(row(&candidate, y)).enumerate() {
            let resd = u64::from(sharpen3(&candidate, x, y).abs_diff(sharpen3(&reference, x, y)));
            if resd > 0 {
                let delta = u64::from(a.abs_diff(b));
                amount += delta * delta * resd;
                significance += resd;
            }
        }
        [amount as f64, significance as f64]
    });

    if significance > 0.0 {
        (amount / significance).sqrt() / 255.0
    } else {
        debug!("ringing: sharpen response unchanged everywhere");
        0.0
    }
}

/// Calculate the ringing metric between two luma buffers.
///
/// # Returns
///
/// `0.0` for identical images, growing with visible edge damage.
pub fn calculate_ringing(
    reference: &[u8],
    candidate: &[u8],
    width: usize,
    height: usize,
) -> Result<f64> {
    let pair = LumaPair::new(reference, candidate, width, height)?;
    Ok(ringing(&pair))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_is_zero() {
        let data: Vec<u8> = (0..100).map(|i| (i * 13 % 256) as u8).collect();
        assert_eq!(calculate_ringing(&data, &data, 10, 10).unwrap(), 0.0);
    }

    #[test]
    fn test_uniform_offset_is_zero() {
        // A flat shift changes no sharpen response
        let a = vec![50u8; 64];
        let b = vec![90u8; 64];
        assert_eq!(calculate_ringing(&a, &b, 8, 8).unwrap(), 0.0);
    }

    #[test]
    fn test_single_pixel_change() {
        let a = vec![100u8; 25];
        let mut b = a.clone();
        b[12] = 150;
        // Center response changes by 400, its 8 neighbours by 50 each but
        // only the center carries error: sqrt(50² * 400 / 800) / 255
        let expected = (2500.0f64 * 400.0 / 800.0).sqrt() / 255.0;
        let score = calculate_ringing(&a, &b, 5, 5).unwrap();
        assert!((score - expected).abs() < 1e-12, "got {score}");
    }

    #[test]
    fn test_bounded_by_one() {
        let a: Vec<u8> = (0..64).map(|i| if i % 2 == 0 { 0 } else { 255 }).collect();
        let b: Vec<u8> = a.iter().map(|&v| 255 - v).collect();
        let score = calculate_ringing(&a, &b, 8, 8).unwrap();
        assert!(score > 0.0 && score <= 1.0, "got {score}");
    }
}
