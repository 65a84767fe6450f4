//! FFT engine using realfft for real-valued segments

use num_complex::Complex;
use realfft::{RealFftPlanner, RealToComplex};
use std::sync::Arc;

use super::error::SpectrumError;

/// FFT engine for real-valued signals
pub struct FftEngine {
    /// FFT size (number of samples)
    fft_size: usize,

    /// Real FFT processor
    r2c: Arc<dyn RealToComplex<f64>>,

    /// Reusable input buffer (realfft uses it as scratch)
    input_buffer: Vec<f64>,

    /// Reusable output buffer (complex spectrum)
    output_buffer: Vec<Complex<f64>>,
}

impl FftEngine {
    /// Create new FFT engine
    ///
    /// # Arguments
    /// * `fft_size` - FFT size (number of samples)
    pub fn new(fft_size: usize) -> Self {
        let mut planner = RealFftPlanner::<f64>::new();
        let r2c = planner.plan_fft_forward(fft_size);

        let input_buffer = r2c.make_input_vec();
        let output_buffer = r2c.make_output_vec();

        Self {
            fft_size,
            r2c,
            input_buffer,
            output_buffer,
        }
    }

    /// Compute the power spectrum |X[k]|² for k = 0..fft_size/2
    ///
    /// # Arguments
    /// * `segment` - Input samples (zero-padded if shorter than fft_size,
    ///   truncated if longer)
    pub fn power_spectrum(&mut self, segment: &[f64]) -> Result<Vec<f64>, SpectrumError> {
        self.transform(segment)?;
        Ok(self.output_buffer.iter().map(|c| c.norm_sqr()).collect())
    }

    fn transform(&mut self, segment: &[f64]) -> Result<(), SpectrumError> {
        let copy_len = segment.len().min(self.fft_size);
        self.input_buffer[..copy_len].copy_from_slice(&segment[..copy_len]);
        self.input_buffer[copy_len..].fill(0.0);

        self.r2c
            .process(&mut self.input_buffer, &mut self.output_buffer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_fft_dc_signal() {
        let mut fft = FftEngine::new(1024);

        // DC signal (constant), zero-padded to 1024
        let signal = vec![1.0; 100];
        let power = fft.power_spectrum(&signal).unwrap();

        assert_eq!(power.len(), 513);
        assert!((power[0] - 10_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_fft_sine_power() {
        let n = 1000;
        let mut fft = FftEngine::new(n);

        // Exactly 10 cycles over the frame
        let signal: Vec<f64> = (0..n)
            .map(|i| (2.0 * PI * 10.0 * i as f64 / n as f64).sin())
            .collect();

        let power = fft.power_spectrum(&signal).unwrap();
        let (peak_bin, &peak) = power
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
            .unwrap();

        assert_eq!(peak_bin, 10);
        // |X[k]| = N/2 for a unit sine on-bin
        assert!((peak - 250_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_odd_size_bins() {
        let mut fft = FftEngine::new(999);
        let power = fft.power_spectrum(&vec![0.5; 999]).unwrap();
        assert_eq!(power.len(), 500);
    }
}
