// signal comparison helpers for lossy listening tests

/// mean squared error between two sample sequences
///
/// Sequences of different length are compared over the shorter prefix.
pub fn mse(reference: &[i16], test: &[i16]) -> f64 {
    let n = reference.len().min(test.len());
    if n == 0 {
        return 0.0;
    }

    let sum: f64 = reference
        .iter()
        .zip(test.iter())
        .map(|(&a, &b)| {
            let e = a as f64 - b as f64;
            e * e
        })
        .sum();

    sum / n as f64
}

/// largest absolute sample difference
pub fn max_abs_error(reference: &[i16], test: &[i16]) -> u32 {
    reference
        .iter()
        .zip(test.iter())
        .map(|(&a, &b)| (a as i32 - b as i32).unsigned_abs())
        .max()
        .unwrap_or(0)
}

/// signal-to-noise ratio in dB, infinite when the error energy is zero
pub fn snr_db(reference: &[i16], test: &[i16]) -> f64 {
    let signal: f64 = reference.iter().map(|&a| a as f64 * a as f64).sum();
    let noise: f64 = reference
        .iter()
        .zip(test.iter())
        .map(|(&a, &b)| {
            let e = a as f64 - b as f64;
            e * e
        })
        .sum();

    if noise == 0.0 {
        return f64::INFINITY;
    }
    10.0 * (signal / noise).log10()
}
