//! Validated views over a reference/candidate pair of luma buffers.

use imgref::{Img, ImgRef};

use crate::error::{Error, Result};

/// A reference image and its re-encoded candidate, checked to share the same
/// non-zero dimensions.
///
/// Both views borrow the caller's buffers; nothing is copied and nothing
/// outlives the metric call.
#[derive(Debug, Clone, Copy)]
pub struct LumaPair<'a> {
    reference: ImgRef<'a, u8>,
    candidate: ImgRef<'a, u8>,
}

impl<'a> LumaPair<'a> {
    /// Wrap two row-major 8-bit buffers with stride equal to `width`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] for a zero width or height and
    /// [`Error::BufferSize`] when either buffer is not `width * height` long.
    pub fn new(reference: &'a [u8], candidate: &'a [u8], width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let expected = width
            .checked_mul(height)
            .ok_or(Error::InvalidDimensions { width, height })?;
        check_len("reference", reference, expected)?;
        check_len("candidate", candidate, expected)?;

        Ok(Self {
            reference: Img::new(reference, width, height),
            candidate: Img::new(candidate, width, height),
        })
    }

    /// Pair two existing image views.
    ///
    /// Views may carry a stride larger than their width.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] for a zero width or height,
    /// [`Error::DimensionMismatch`] when the views differ in size and
    /// [`Error::BufferSize`] when a view's buffer ends before its last row.
    pub fn from_imgs(reference: ImgRef<'a, u8>, candidate: ImgRef<'a, u8>) -> Result<Self> {
        let expected = (reference.width(), reference.height());
        let actual = (candidate.width(), candidate.height());
        if expected.0 == 0 || expected.1 == 0 {
            return Err(Error::InvalidDimensions {
                width: expected.0,
                height: expected.1,
            });
        }
        if expected != actual {
            return Err(Error::DimensionMismatch { expected, actual });
        }
        check_view("reference", &reference)?;
        check_view("candidate", &candidate)?;
        Ok(Self { reference, candidate })
    }

    /// The original image.
    pub fn reference(&self) -> ImgRef<'a, u8> {
        self.reference
    }

    /// The re-encoded image under evaluation.
    pub fn candidate(&self) -> ImgRef<'a, u8> {
        self.candidate
    }

    pub fn width(&self) -> usize {
        self.reference.width()
    }

    pub fn height(&self) -> usize {
        self.reference.height()
    }

    /// Number of pixels in either image.
    pub fn pixel_count(&self) -> usize {
        self.width() * self.height()
    }

    /// The same pair with reference and candidate exchanged.
    #[must_use]
    pub fn swapped(&self) -> Self {
        Self {
            reference: self.candidate,
            candidate: self.reference,
        }
    }
}

fn check_len(image: &'static str, buf: &[u8], expected: usize) -> Result<()> {
    if buf.len() != expected {
        return Err(Error::BufferSize {
            image,
            expected,
            actual: buf.len(),
        });
    }
    Ok(())
}

/// A strided view needs `stride * (height - 1) + width` samples; padding
/// after the last row is optional.
fn check_view(image: &'static str, img: &ImgRef<'_, u8>) -> Result<()> {
    let (width, height) = (img.width(), img.height());
    let expected = img
        .stride()
        .checked_mul(height - 1)
        .and_then(|rows| rows.checked_add(width))
        .ok_or(Error::InvalidDimensions { width, height })?;
    let actual = img.buf().len();
    if actual < expected {
        return Err(Error::BufferSize {
            image,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Row `y` of `img`, exactly `width` samples long.
pub(crate) fn row<'b>(img: &'b ImgRef<'_, u8>, y: usize) -> &'b [u8] {
    let start = y * img.stride();
    &img.buf()[start..start + img.width()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_pair() {
        let a = vec![0u8; 12];
        let b = vec![1u8; 12];
        let pair = LumaPair::new(&a, &b, 4, 3).unwrap();
        assert_eq!(pair.width(), 4);
        assert_eq!(pair.height(), 3);
        assert_eq!(pair.pixel_count(), 12);
        assert_eq!(row(&pair.candidate(), 2), &[1, 1, 1, 1]);
    }

    #[test]
    fn test_zero_dimensions() {
        let result = LumaPair::new(&[], &[], 0, 4);
        assert!(matches!(
            result,
            Err(Error::InvalidDimensions { width: 0, height: 4 })
        ));
    }

    #[test]
    fn test_short_candidate() {
        let a = vec![0u8; 16];
        let b = vec![0u8; 15];
        let result = LumaPair::new(&a, &b, 4, 4);
        assert!(matches!(
            result,
            Err(Error::BufferSize {
                image: "candidate",
                expected: 16,
                actual: 15
            })
        ));
    }

    #[test]
    fn test_view_mismatch() {
        let a = vec![0u8; 16];
        let b = vec![0u8; 16];
        let result = LumaPair::from_imgs(Img::new(&a[..], 4, 4), Img::new(&b[..], 8, 2));
        assert!(matches!(result, Err(Error::DimensionMismatch { .. })));
    }

    #[test]
    fn test_strided_rows() {
        // 2x2 image stored with stride 3
        let a = vec![1u8, 2, 99, 3, 4, 99];
        let view = Img::new_stride(&a[..], 2, 2, 3);
        let pair = LumaPair::from_imgs(view, view).unwrap();
        assert_eq!(row(&pair.reference(), 1), &[3, 4]);
    }

    #[test]
    fn test_short_view() {
        let a = vec![0u8; 16];
        let result = LumaPair::from_imgs(Img::new(&a[..5], 4, 4), Img::new(&a[..5], 4, 4));
        assert!(matches!(
            result,
            Err(Error::BufferSize {
                image: "reference",
                expected: 16,
                actual: 5
            })
        ));
    }

    #[test]
    fn test_short_strided_candidate() {
        // 3x3 with stride 4 needs 4 * 2 + 3 = 11 samples
        let a = vec![7u8; 11];
        let reference = Img::new_stride(&a[..], 3, 3, 4);
        let candidate = Img::new_stride(&a[..10], 3, 3, 4);
        let result = LumaPair::from_imgs(reference, candidate);
        assert!(matches!(
            result,
            Err(Error::BufferSize {
                image: "candidate",
                expected: 11,
                actual: 10
            })
        ));
        assert!(LumaPair::from_imgs(reference, reference).is_ok());
    }
}
