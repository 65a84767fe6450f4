//! Averaged, windowed amplitude spectral density estimator
//!
//! The signal is AC-coupled, cut into contiguous equal-length segments, and
//! each segment is windowed and transformed. Per-segment amplitude spectra
//! are averaged bin by bin (incoherent averaging) and the one-sided half is
//! returned with its frequency axis.

use ndarray::{Array1, Array2, ArrayView2, Axis};

use super::error::SpectrumError;
use super::fft::FftEngine;
use super::windowing::window_power_sum;
use super::windows::{generate_window, WindowKind};

/// Estimator configuration
#[derive(Debug, Clone, PartialEq)]
pub struct EstimatorConfig {
    /// Number of segments averaged together (>= 1)
    pub averaging_count: usize,

    /// Sample rate in Sa/s
    pub sampling_rate: f64,

    /// Window applied to every segment
    pub window: WindowKind,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            averaging_count: 1,
            sampling_rate: 1.0,
            window: WindowKind::Rectangular,
        }
    }
}

impl EstimatorConfig {
    pub fn new(averaging_count: usize, sampling_rate: f64, window: WindowKind) -> Self {
        Self {
            averaging_count,
            sampling_rate,
            window,
        }
    }

    /// Check the parameters that do not depend on the signal
    pub fn validate(&self) -> Result<(), SpectrumError> {
        if self.averaging_count == 0 {
            return Err(SpectrumError::Configuration(
                "averaging_count must be a positive integer (got 0)".to_string(),
            ));
        }
        if !self.sampling_rate.is_finite() || self.sampling_rate <= 0.0 {
            return Err(SpectrumError::Configuration(format!(
                "sampling_rate must be a finite value > 0 Sa/s (got {})",
                self.sampling_rate
            )));
        }
        self.window.validate()
    }

    /// Samples per segment for a signal of `signal_len` samples
    pub fn segment_length(&self, signal_len: usize) -> usize {
        if self.averaging_count == 0 {
            return 0;
        }
        signal_len / self.averaging_count
    }
}

/// One-sided amplitude spectral density with its frequency axis
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralEstimate {
    /// Bin frequencies in Hz, starting at 0 with uniform spacing
    pub frequencies: Vec<f64>,

    /// Amplitude spectral density per bin (signal units / √Hz)
    pub amplitudes: Vec<f64>,

    /// Trailing samples dropped so the segments tile the signal exactly
    pub discarded_samples: usize,
}

impl SpectralEstimate {
    /// Frequency spacing between bins in Hz
    pub fn bin_width(&self) -> Option<f64> {
        self.frequencies.get(1).map(|&f| f - self.frequencies[0])
    }

    /// Bin with the largest amplitude as (frequency, amplitude)
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.frequencies
            .iter()
            .zip(self.amplitudes.iter())
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(&f, &a)| (f, a))
    }

    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }
}

/// Estimate the averaged one-sided amplitude spectral density of `signal`
///
/// # Arguments
/// * `signal` - Raw time-domain samples (non-empty, finite)
/// * `config` - Averaging count, sample rate and window
///
/// # Returns
/// `floor(segment_length / 2)` bins, where
/// `segment_length = floor(signal.len() / averaging_count)`. Bin `k` sits at
/// `k * sampling_rate / segment_length` Hz and holds
/// `mean over segments of sqrt(2|X[k]|² / (fs * Σw²))`.
pub fn estimate(signal: &[f64], config: &EstimatorConfig) -> Result<SpectralEstimate, SpectrumError> {
    config.validate()?;
    validate_signal(signal)?;

    let averaging_count = config.averaging_count;
    let segment_length = config.segment_length(signal.len());
    if segment_length == 0 {
        return Err(SpectrumError::Configuration(format!(
            "averaging_count ({}) must not exceed the signal length ({})",
            averaging_count,
            signal.len()
        )));
    }

    let window = generate_window(config.window, segment_length);
    let s2 = window_power_sum(&window);
    if !(s2 > 0.0) {
        return Err(SpectrumError::Configuration(format!(
            "{} window has no energy at segment length {}",
            config.window.name(),
            segment_length
        )));
    }

    let used = segment_length * averaging_count;
    let discarded_samples = signal.len() - used;
    tracing::debug!(
        segment_length,
        averaging_count,
        discarded_samples,
        window = config.window.name(),
        "estimating spectrum"
    );

    // AC coupling: the mean is taken over the whole signal, before truncation
    let mean = signal.iter().sum::<f64>() / signal.len() as f64;
    let centered: Vec<f64> = signal[..used].iter().map(|&x| x - mean).collect();

    // Row i holds samples [i*L, (i+1)*L)
    let segments = ArrayView2::from_shape((averaging_count, segment_length), &centered)?;
    let window = Array1::from(window);

    let half = segment_length / 2;
    let scale = 2.0 / (config.sampling_rate * s2);
    let mut engine = FftEngine::new(segment_length);
    let mut spectra = Array2::<f64>::zeros((averaging_count, half));

    for (segment, mut row) in segments.outer_iter().zip(spectra.outer_iter_mut()) {
        let windowed = (&segment * &window).to_vec();
        let power = engine.power_spectrum(&windowed)?;

        for (out, &p) in row.iter_mut().zip(power[..half].iter()) {
            *out = (p * scale).sqrt();
        }
    }

    let amplitudes = spectra
        .mean_axis(Axis(0))
        .ok_or_else(|| SpectrumError::Configuration("no segments to average".to_string()))?
        .to_vec();

    let bin = config.sampling_rate / segment_length as f64;
    let frequencies = (0..half).map(|k| bin * k as f64).collect();

    Ok(SpectralEstimate {
        frequencies,
        amplitudes,
        discarded_samples,
    })
}

fn validate_signal(signal: &[f64]) -> Result<(), SpectrumError> {
    if signal.is_empty() {
        return Err(SpectrumError::Input("signal must not be empty".to_string()));
    }
    if let Some((index, value)) = signal.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(SpectrumError::Input(format!(
            "signal must be finite, found {} at index {}",
            value, index
        )));
    }
    Ok(())
}
