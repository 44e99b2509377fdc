//! Token measurement for drift detection.

/// Measure a text's token count with the usual 1 token ≈ 4 characters
/// approximation. Good enough for drift thresholds; never used for billing.
pub fn estimate_tokens(text: &str) -> u32 {
    (text.len() / 4) as u32
}

/// Relative deviation of a measured value from a declared one.
pub fn deviation(declared: u32, measured: u32) -> f64 {
    if declared == 0 {
        return if measured == 0 { 0.0 } else { 1.0 };
    }
    (measured as f64 - declared as f64).abs() / declared as f64
}
