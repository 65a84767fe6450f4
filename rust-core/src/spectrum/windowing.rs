//! Window normalization for spectral estimation

/// Window power sum, s2 = Σ w[n]²
///
/// Normalizes a windowed periodogram to a spectral density.
pub fn window_power_sum(window: &[f64]) -> f64 {
    window.iter().map(|&w| w * w).sum()
}
