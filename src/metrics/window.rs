//! Clamped square windows over a luma plane.
//!
//! Window sums come from a summed-area table, so the cost per pixel does not
//! grow with the radius. Sums are exact integers; a window never wraps and
//! shrinks at the image borders.

use imgref::ImgRef;

use crate::image::row;

/// Sum and sample count of one clamped window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct WindowSum {
    pub sum: u64,
    pub count: u64,
}

impl WindowSum {
    pub fn mean(self) -> f64 {
        self.sum as f64 / self.count as f64
    }
}

/// Summed-area table with a zero row and column in front.
pub(crate) struct IntegralImage {
    sums: Vec<u64>,
    width: usize,
    height: usize,
}

impl IntegralImage {
    pub fn new(img: &ImgRef<'_, u8>) -> Self {
        let width = img.width();
        let height = img.height();
        let iw = width + 1;
        let mut sums = vec![0u64; iw * (height + 1)];

        for y in 0..height {
            let mut row_sum = 0u64;
            for (x, &v) in row(img, y).iter().enumerate() {
                row_sum += u64::from(v);
                sums[(y + 1) * iw + x + 1] = row_sum + sums[y * iw + x + 1];
            }
        }

        Self { sums, width, height }
    }

    /// Window of `radius` around `(x, y)`, clipped to the image.
    pub fn window(&self, x: usize, y: usize, radius: usize) -> WindowSum {
        let x0 = x.saturating_sub(radius);
        let y0 = y.saturating_sub(radius);
        let x1 = x.saturating_add(radius).saturating_add(1).min(self.width);
        let y1 = y.saturating_add(radius).saturating_add(1).min(self.height);
        let iw = self.width + 1;

        let sum = self.sums[y1 * iw + x1] + self.sums[y0 * iw + x0]
            - self.sums[y0 * iw + x1]
            - self.sums[y1 * iw + x0];

        WindowSum {
            sum,
            count: ((x1 - x0) * (y1 - y0)) as u64,
        }
    }
}
