//! orthonormal DCT-II / DCT-III transform pair, direct summation

use std::f64::consts::{FRAC_1_SQRT_2, PI};

/// forward DCT-II
///
/// `X[k] = sqrt(2/N) * a(k) * sum_n x[n] cos(pi k (2n+1) / 2N)` with
/// `a(0) = 1/sqrt(2)` and `a(k) = 1` otherwise.
pub fn forward(input: &[f64]) -> Vec<f64> {
    let n = input.len();
    let scale = (2.0 / n as f64).sqrt();

    (0..n)
        .map(|k| {
            let sum: f64 = input
                .iter()
                .enumerate()
                .map(|(i, &x)| {
                    x * (PI * k as f64 * (2 * i + 1) as f64 / (2.0 * n as f64)).cos()
                })
                .sum();
            let alpha = if k == 0 { FRAC_1_SQRT_2 } else { 1.0 };
            scale * alpha * sum
        })
        .collect()
}

/// inverse DCT-III, the exact inverse of [`forward`]
///
/// `y[n] = sqrt(2/N) * sum_k a(k) X[k] cos(pi k (n + 1/2) / N)`
pub fn inverse(coeffs: &[f64]) -> Vec<f64> {
    let n = coeffs.len();
    let scale = (2.0 / n as f64).sqrt();

    (0..n)
        .map(|i| {
            let sum: f64 = coeffs
                .iter()
                .enumerate()
                .map(|(k, &c)| {
                    let alpha = if k == 0 { FRAC_1_SQRT_2 } else { 1.0 };
                    alpha * c * (PI * k as f64 * (i as f64 + 0.5) / n as f64).cos()
                })
                .sum();
            scale * sum
        })
        .collect()
}
