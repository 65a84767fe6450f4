//! Spectral estimation with windowed, averaged FFTs

pub mod error;
pub mod windows;
pub mod windowing;
pub mod fft;
pub mod estimator;

pub use error::SpectrumError;
pub use windows::{WindowKind, generate_window};
pub use windowing::window_power_sum;
pub use fft::FftEngine;
pub use estimator::{EstimatorConfig, SpectralEstimate, estimate};
