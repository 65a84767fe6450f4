//! Errors raised by the spectral estimator

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpectrumError {
    /// Invalid or inconsistent estimator parameters
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Malformed input signal
    #[error("Input error: {0}")]
    Input(String),

    #[error("FFT processing failed: {0}")]
    Transform(String),
}

impl SpectrumError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, SpectrumError::Configuration(_))
    }

    pub fn is_input(&self) -> bool {
        matches!(self, SpectrumError::Input(_))
    }
}

impl From<realfft::FftError> for SpectrumError {
    fn from(err: realfft::FftError) -> Self {
        SpectrumError::Transform(err.to_string())
    }
}

impl From<ndarray::ShapeError> for SpectrumError {
    fn from(err: ndarray::ShapeError) -> Self {
        SpectrumError::Input(format!("cannot arrange signal into segments: {}", err))
    }
}
