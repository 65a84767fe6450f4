//! Python bindings for psdata conversion

use std::path::PathBuf;

use pyo3::exceptions::PyRuntimeError;
use pyo3::prelude::*;

use crate::convert::{ConversionError, PsdataConversion};

impl From<ConversionError> for PyErr {
    fn from(err: ConversionError) -> Self {
        PyRuntimeError::new_err(err.to_string())
    }
}

/// Convert every .psdata file in a directory to CSV with PicoScope
///
/// Args:
///     all_waveforms: Export all buffered waveforms, not only the current one
///     program: PicoScope executable
///     directory: Directory holding the .psdata files (default: current)
#[pyfunction]
#[pyo3(signature = (all_waveforms=false, program="Picoscope", directory=None))]
pub fn psdata2csv(
    py: Python<'_>,
    all_waveforms: bool,
    program: &str,
    directory: Option<PathBuf>,
) -> PyResult<()> {
    let mut conversion = PsdataConversion::new()
        .program(program)
        .all_waveforms(all_waveforms);
    if let Some(dir) = directory {
        conversion = conversion.working_dir(dir);
    }

    py.allow_threads(|| conversion.run())?;
    Ok(())
}
