//! Window functions for spectral estimation
//!
//! Symmetric tapers follow the usual scientific-Python definitions so that
//! spectra computed here line up with the lab's older scripts.

use std::f64::consts::PI;

use super::error::SpectrumError;

/// Decay time constant of the symmetric exponential window, as a fraction of
/// the window length
pub const SYMMETRIC_EXPONENTIAL_DECAY: f64 = 0.06;

/// Flat-top cosine-sum coefficients
const FLAT_TOP_COEFFS: [f64; 5] = [
    0.21557895,
    0.41663158,
    0.277263158,
    0.083578947,
    0.006947368,
];

/// Window function kinds
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum WindowKind {
    /// Rectangular window (no windowing)
    #[default]
    Rectangular,

    /// Hann window: w[n] = 0.5 - 0.5*cos(2πn/(M-1))
    Hann,

    /// Blackman window: w[n] = 0.42 - 0.5*cos(2πn/(M-1)) + 0.08*cos(4πn/(M-1))
    Blackman,

    /// 5-term flat-top window, symmetric, peak ~1.0
    /// Very low scalloping loss, wide mainlobe
    FlatTop,

    /// Exponential decay centred at (M-1)/2 with τ = 0.06*M
    ExponentialSymmetric,

    /// One-sided exponential decay from sample 0 with τ = decay*M
    ExponentialAsymmetric {
        /// Decay time as a fraction of the window length, in (0, 1)
        decay: f64,
    },
}

impl WindowKind {
    /// Resolve a window by name
    ///
    /// Names are case-insensitive and accept the spellings used by the older
    /// lab scripts (`"rectangle"`, `"exponential asym"`, ...).
    ///
    /// # Arguments
    /// * `name` - Window identifier
    /// * `param` - Decay fraction, required by the asymmetric exponential window
    ///   and ignored by every other kind
    pub fn from_name(name: &str, param: Option<f64>) -> Result<Self, SpectrumError> {
        let normalized = name.trim().to_ascii_lowercase();

        let kind = match normalized.as_str() {
            "rectangular" | "rectangle" | "boxcar" => WindowKind::Rectangular,
            "hann" | "hanning" => WindowKind::Hann,
            "blackman" => WindowKind::Blackman,
            "flattop" | "flat-top" | "flat top" => WindowKind::FlatTop,
            "exponential-symmetric" | "exponential sym" => WindowKind::ExponentialSymmetric,
            "exponential-asymmetric" | "exponential asym" => {
                let decay = param.ok_or_else(|| {
                    SpectrumError::Configuration(format!(
                        "window '{}' requires a decay parameter in (0, 1)",
                        name
                    ))
                })?;
                let kind = WindowKind::ExponentialAsymmetric { decay };
                kind.validate()?;
                return Ok(kind);
            }
            _ => {
                return Err(SpectrumError::Configuration(format!(
                    "unrecognized window kind '{}' (expected rectangular, hann, blackman, \
                     flattop, exponential-symmetric or exponential-asymmetric)",
                    name
                )))
            }
        };

        if let Some(value) = param {
            tracing::debug!(window = %name, param = value, "window parameter ignored");
        }

        Ok(kind)
    }

    /// Canonical identifier of this window kind
    pub fn name(&self) -> &'static str {
        match self {
            WindowKind::Rectangular => "rectangular",
            WindowKind::Hann => "hann",
            WindowKind::Blackman => "blackman",
            WindowKind::FlatTop => "flattop",
            WindowKind::ExponentialSymmetric => "exponential-symmetric",
            WindowKind::ExponentialAsymmetric { .. } => "exponential-asymmetric",
        }
    }

    /// Check the window parameter
    pub fn validate(&self) -> Result<(), SpectrumError> {
        if let WindowKind::ExponentialAsymmetric { decay } = *self {
            if !decay.is_finite() || decay <= 0.0 || decay >= 1.0 {
                return Err(SpectrumError::Configuration(format!(
                    "exponential-asymmetric decay must be strictly between 0 and 1 (got {})",
                    decay
                )));
            }
        }
        Ok(())
    }
}

/// Generate window coefficients
///
/// # Arguments
/// * `kind` - Type of window function
/// * `length` - Number of samples (M)
///
/// # Returns
/// Vector of window coefficients w[n] for n = 0..M-1
pub fn generate_window(kind: WindowKind, length: usize) -> Vec<f64> {
    // Degenerate lengths: the cosine forms divide by M-1
    if length <= 1 {
        return vec![1.0; length];
    }

    let m = length as f64;

    match kind {
        WindowKind::Rectangular => vec![1.0; length],

        WindowKind::Hann => (0..length)
            .map(|n| {
                let angle = 2.0 * PI * n as f64 / (m - 1.0);
                0.5 - 0.5 * angle.cos()
            })
            .collect(),

        WindowKind::Blackman => (0..length)
            .map(|n| {
                let angle1 = 2.0 * PI * n as f64 / (m - 1.0);
                let angle2 = 4.0 * PI * n as f64 / (m - 1.0);
                0.42 - 0.5 * angle1.cos() + 0.08 * angle2.cos()
            })
            .collect(),

        WindowKind::FlatTop => (0..length)
            .map(|n| {
                // Phase runs from -π to π across the window
                let phase = -PI + 2.0 * PI * n as f64 / (m - 1.0);
                FLAT_TOP_COEFFS
                    .iter()
                    .enumerate()
                    .map(|(k, &a)| a * (k as f64 * phase).cos())
                    .sum::<f64>()
            })
            .collect(),

        WindowKind::ExponentialSymmetric => {
            let center = (m - 1.0) / 2.0;
            let tau = SYMMETRIC_EXPONENTIAL_DECAY * m;
            (0..length)
                .map(|n| (-(n as f64 - center).abs() / tau).exp())
                .collect()
        }

        WindowKind::ExponentialAsymmetric { decay } => {
            let tau = decay * m;
            (0..length).map(|n| (-(n as f64) / tau).exp()).collect()
        }
    }
}
