//! Deterministic synthetic luma images for metric tests.
//!
//! Images come from an LCG PRNG so inputs are identical on every platform.

#![allow(dead_code)]

/// LCG pseudo-random number generator (deterministic)
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u8(&mut self) -> u8 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.state >> 33) & 0xFF) as u8
    }
}

/// Uniform image.
pub fn gen_uniform(width: usize, height: usize, value: u8) -> Vec<u8> {
    vec![value; width * height]
}

/// Diagonal gradient that stays below 256 for images up to 16x16.
pub fn gen_gradient(width: usize, height: usize) -> Vec<u8> {
    (0..height)
        .flat_map(|y| (0..width).map(move |x| ((x * 8 + y * 4) % 256) as u8))
        .collect()
}

/// Uniform noise.
pub fn gen_noise(width: usize, height: usize, seed: u64) -> Vec<u8> {
    let mut rng = Lcg::new(seed);
    (0..width * height).map(|_| rng.next_u8()).collect()
}

/// Smooth base plus low-amplitude noise, like a photo crop.
pub fn gen_photo_like(width: usize, height: usize, seed: u64) -> Vec<u8> {
    let mut rng = Lcg::new(seed);
    (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .map(|(x, y)| {
            let base = 60 + (x * 3 + y * 2) % 120;
            (base + usize::from(rng.next_u8() % 16)) as u8
        })
        .collect()
}

/// Add a signed offset to every pixel, saturating at the 8-bit range.
pub fn add_offset(data: &[u8], offset: i16) -> Vec<u8> {
    data.iter()
        .map(|&v| (i16::from(v) + offset).clamp(0, 255) as u8)
        .collect()
}

/// Add `offset` to every column whose 8-column stripe, counted from `phase`,
/// is odd.
pub fn add_column_stripes(data: &[u8], width: usize, phase: usize, offset: u8) -> Vec<u8> {
    data.iter()
        .enumerate()
        .map(|(i, &v)| {
            let x = i % width;
            if ((x + 8 - phase) / 8) % 2 == 1 {
                v.saturating_add(offset)
            } else {
                v
            }
        })
        .collect()
}

/// Quantize every pixel to a multiple of `step`, a crude lossy re-encode.
pub fn quantize(data: &[u8], step: u8) -> Vec<u8> {
    data.iter().map(|&v| v / step * step).collect()
}
