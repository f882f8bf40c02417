//! Row-wise accumulation shared by every metric.
//!
//! Each metric produces a fixed-size array of partial sums per row (or per
//! block-grid line). Partials are collected in row order and summed
//! sequentially, so the floating-point result does not depend on how rows
//! were scheduled.

/// Compute `row(i)` for every `i` in `0..rows` and sum the partials in order.
pub(crate) fn sum_rows<const N: usize, F>(rows: usize, row: F) -> [f64; N]
where
    F: Fn(usize) -> [f64; N] + Sync + Send,
{
    partials(rows, row)
        .into_iter()
        .fold([0.0; N], |mut acc, partial| {
            for (total, value) in acc.iter_mut().zip(partial) {
                *total += value;
            }
            acc
        })
}

#[cfg(feature = "parallel")]
fn partials<const N: usize, F>(rows: usize, row: F) -> Vec<[f64; N]>
where
    F: Fn(usize) -> [f64; N] + Sync + Send,
{
    use rayon::prelude::*;

    (0..rows).into_par_iter().map(row).collect()
}

#[cfg(not(feature = "parallel"))]
fn partials<const N: usize, F>(rows: usize, row: F) -> Vec<[f64; N]>
where
    F: Fn(usize) -> [f64; N] + Sync + Send,
{
    (0..rows).map(row).collect()
}
