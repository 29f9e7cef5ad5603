//! frequency-weighted uniform quantiser

/// step for coefficient `index` in a block of `n`: higher frequencies get
/// proportionally coarser steps
fn step(base: f64, index: usize, n: usize) -> f64 {
    base * (1.0 + (index * 2) as f64 / n as f64)
}

/// divide each coefficient by its weighted step and round to the nearest
/// integer
pub fn quantize(coeffs: &[f64], base: f64) -> Vec<i32> {
    let n = coeffs.len();
    coeffs
        .iter()
        .enumerate()
        .map(|(i, &c)| (c / step(base, i, n)).round() as i32)
        .collect()
}

/// multiply back by the same weighted steps
pub fn dequantize(quantized: &[i32], base: f64) -> Vec<f64> {
    let n = quantized.len();
    quantized
        .iter()
        .enumerate()
        .map(|(i, &q)| q as f64 * step(base, i, n))
        .collect()
}
