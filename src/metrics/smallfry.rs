//! SmallFry: PSNR and blocking factors combined into one score.
//!
//! The weights were fit against human ratings of recompressed JPEGs. Scores
//! are unbounded; identical images land at the sum of both weights.

use imgref::{Img, ImgRef};

use crate::error::{Error, Result};
use crate::image::{LumaPair, row};

use super::aae::aae_factor;
use super::psnr::psnr_factor;

/// Weight of [`psnr_factor`] in the SmallFry score.
pub const PSNR_WEIGHT: f64 = 37.1891885161239;

/// Weight of [`aae_factor`] in the SmallFry score.
pub const AAE_WEIGHT: f64 = 78.5328607296973;

/// Brightest sample in `img`.
pub fn max_luma(img: &ImgRef<'_, u8>) -> u8 {
    (0..img.height())
        .filter_map(|y| row(img, y).iter().copied().max())
        .max()
        .unwrap_or(0)
}

/// Brightest sample in a row-major luma buffer.
///
/// # Errors
///
/// Returns [`Error::InvalidDimensions`] for a zero width or height and
/// [`Error::BufferSize`] when `buf` is not `width * height` long.
pub fn calculate_max_luma(buf: &[u8], width: usize, height: usize) -> Result<u8> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions { width, height });
    }
    let expected = width
        .checked_mul(height)
        .ok_or(Error::InvalidDimensions { width, height })?;
    if buf.len() != expected {
        return Err(Error::BufferSize {
            image: "luma",
            expected,
            actual: buf.len(),
        });
    }
    Ok(max_luma(&Img::new(buf, width, height)))
}

/// SmallFry score of a validated pair, calibrated on the reference's peak
/// luma. Higher is better.
pub fn smallfry(pair: &LumaPair<'_>) -> f64 {
    let max = max_luma(&pair.reference());
    let p = psnr_factor(pair, max);
    let a = aae_factor(pair, max);
    p * PSNR_WEIGHT + a * AAE_WEIGHT
}

/// Calculate the SmallFry score between two luma buffers.
///
/// # Arguments
///
/// * `reference` - Original luma samples, row-major.
/// * `candidate` - Re-encoded luma samples, row-major.
/// * `width` - Image width in pixels.
/// * `height` - Image height in pixels.
///
/// # Returns
///
/// Weighted score, about 115.7 for identical images and lower as quality
/// drops.
pub fn calculate_smallfry(
    reference: &[u8],
    candidate: &[u8],
    width: usize,
    height: usize,
) -> Result<f64> {
    let pair = LumaPair::new(reference, candidate, width, height)?;
    Ok(smallfry(&pair))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_luma() {
        let data = vec![3u8, 9, 200, 7, 0, 1];
        assert_eq!(max_luma(&Img::new(&data[..], 3, 2)), 200);
        let dark = vec![0u8; 4];
        assert_eq!(max_luma(&Img::new(&dark[..], 2, 2)), 0);
    }

    #[test]
    fn test_max_luma_ignores_stride_padding() {
        let data = vec![1u8, 2, 255, 3, 4, 255];
        assert_eq!(max_luma(&Img::new_stride(&data[..], 2, 2, 3)), 4);
    }

    #[test]
    fn test_calculate_max_luma() {
        let data = vec![3u8, 9, 200, 7, 0, 1];
        assert_eq!(calculate_max_luma(&data, 3, 2).unwrap(), 200);
        assert_eq!(calculate_max_luma(&data, 6, 1).unwrap(), 200);
    }

    #[test]
    fn test_calculate_max_luma_malformed() {
        let data = vec![3u8, 9, 200, 7, 0];
        assert!(matches!(
            calculate_max_luma(&data, 3, 2),
            Err(Error::BufferSize {
                image: "luma",
                expected: 6,
                actual: 5
            })
        ));
        assert!(matches!(
            calculate_max_luma(&[], 0, 2),
            Err(Error::InvalidDimensions { width: 0, height: 2 })
        ));
    }

    #[test]
    fn test_identical_score() {
        let data: Vec<u8> = (0..256).map(|i| i as u8).collect();
        let score = calculate_smallfry(&data, &data, 16, 16).unwrap();
        assert!((score - (PSNR_WEIGHT + AAE_WEIGHT)).abs() < 1e-9);
    }

    #[test]
    fn test_calibrated_on_reference() {
        let dark: Vec<u8> = (0..64).map(|i| (i % 50) as u8).collect();
        let bright: Vec<u8> = dark.iter().map(|&v| v + 100).collect();
        let pair = LumaPair::new(&dark, &bright, 8, 8).unwrap();

        assert_eq!(max_luma(&pair.reference()), 49);
        assert_eq!(max_luma(&pair.swapped().reference()), 149);
        assert_ne!(smallfry(&pair), smallfry(&pair.swapped()));
    }

    #[test]
    fn test_degradation_lowers_score() {
        let reference: Vec<u8> = (0..32 * 32).map(|i| ((i * 7) % 200) as u8).collect();
        let light: Vec<u8> = reference.iter().map(|&v| v.saturating_add(3)).collect();
        let heavy: Vec<u8> = reference.iter().map(|&v| v.saturating_add(40)).collect();

        let light_score = calculate_smallfry(&reference, &light, 32, 32).unwrap();
        let heavy_score = calculate_smallfry(&reference, &heavy, 32, 32).unwrap();
        assert!(light_score > heavy_score);
    }
}
