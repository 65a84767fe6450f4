//! Python bindings for spectral estimation

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::spectrum::{estimate, EstimatorConfig, SpectrumError, WindowKind};

impl From<SpectrumError> for PyErr {
    fn from(err: SpectrumError) -> Self {
        match err {
            SpectrumError::Transform(_) => PyRuntimeError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

/// Signal samples from a numpy array (any stride) or a number sequence
fn extract_signal(sig: &PyAny) -> PyResult<Vec<f64>> {
    if let Ok(array) = sig.extract::<PyReadonlyArray1<f64>>() {
        return Ok(match array.as_slice() {
            Ok(slice) => slice.to_vec(),
            Err(_) => array.as_array().to_vec(),
        });
    }
    sig.extract::<Vec<f64>>()
}

/// Averaged, windowed amplitude spectral density
///
/// Args:
///     sig: Signal as a 1D numpy array or a list of numbers
///     navg: Number of contiguous segments to average
///     sampling_freq: Sampling rate in Sa/s
///     window: "rectangle", "hann", "blackman", "flattop",
///         "exponential sym" or "exponential asym"
///     tau: Decay fraction in (0, 1), required for "exponential asym"
///
/// Returns:
///     (frequencies, amplitudes) as numpy arrays
#[pyfunction]
#[pyo3(signature = (sig, navg, sampling_freq, window="rectangle", tau=None))]
pub fn take_fft<'py>(
    py: Python<'py>,
    sig: &PyAny,
    navg: i64,
    sampling_freq: f64,
    window: &str,
    tau: Option<f64>,
) -> PyResult<(&'py PyArray1<f64>, &'py PyArray1<f64>)> {
    let averaging_count = usize::try_from(navg).map_err(|_| {
        SpectrumError::Configuration(format!(
            "averaging_count must be a positive integer (got {})",
            navg
        ))
    })?;
    let window = WindowKind::from_name(window, tau)?;
    let config = EstimatorConfig::new(averaging_count, sampling_freq, window);

    let signal = extract_signal(sig)?;

    let result = py.allow_threads(|| estimate(&signal, &config))?;

    Ok((
        PyArray1::from_vec(py, result.frequencies),
        PyArray1::from_vec(py, result.amplitudes),
    ))
}
