//! 3x3 sharpen kernel with replicate-clamped borders.

use imgref::ImgRef;

use crate::image::row;

/// Three-way clamp: `lo` if `i <= lo`, `hi` if `i >= hi`, otherwise `i`.
///
/// `lo` wins when the bounds are inverted.
#[inline]
pub fn index_clamp(i: isize, lo: isize, hi: isize) -> isize {
    if i <= lo {
        lo
    } else if i >= hi {
        hi
    } else {
        i
    }
}

/// Discrete 8-neighbour Laplacian at `(x, y)`: `8 * center - sum(neighbours)`.
///
/// Neighbours outside the image reuse the nearest row or column, so a flat
/// image answers 0 everywhere, borders included.
pub fn sharpen3(img: &ImgRef<'_, u8>, x: usize, y: usize) -> i32 {
    let last_x = img.width() as isize - 1;
    let last_y = img.height() as isize - 1;
    let (cx, cy) = (x as isize, y as isize);

    let center = i32::from(row(img, y)[x]);
    let mut neighbours = 0i32;
    for dy in -1..=1 {
        let line = row(img, index_clamp(cy + dy, 0, last_y) as usize);
        for dx in -1..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            neighbours += i32::from(line[index_clamp(cx + dx, 0, last_x) as usize]);
        }
    }

    (center << 3) - neighbours
}
