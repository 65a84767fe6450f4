//! Python bindings for ragged CSV tables

use std::path::PathBuf;

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;

use crate::table::{column_indices, read_ragged_columns, save_ragged_csv, TableError};

impl From<TableError> for PyErr {
    fn from(err: TableError) -> Self {
        match err {
            TableError::Io(_) => PyIOError::new_err(err.to_string()),
            TableError::Csv(ref csv_err) if csv_err.is_io_error() => {
                PyIOError::new_err(err.to_string())
            }
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

/// One numpy array, or a list of numpy arrays / float sequences
fn extract_columns(arrays: &PyAny) -> PyResult<Vec<Vec<f64>>> {
    if let Ok(single) = arrays.extract::<PyReadonlyArray1<f64>>() {
        return Ok(vec![single.as_array().to_vec()]);
    }

    arrays
        .extract::<Vec<&PyAny>>()?
        .into_iter()
        .map(|item| match item.extract::<PyReadonlyArray1<f64>>() {
            Ok(array) => Ok(array.as_array().to_vec()),
            Err(_) => item.extract::<Vec<f64>>(),
        })
        .collect()
}

/// Save arrays of different lengths as columns of a CSV file
///
/// Args:
///     arrays: List of 1D arrays (or a single array)
///     headers: List of column headers (or a single header)
///     filename: Destination path
#[pyfunction]
#[pyo3(signature = (arrays, headers, filename))]
pub fn save_to_csv(arrays: &PyAny, headers: &PyAny, filename: PathBuf) -> PyResult<()> {
    let columns = extract_columns(arrays)?;
    let headers: Vec<String> = match headers.extract::<String>() {
        Ok(single) => vec![single],
        Err(_) => headers.extract()?,
    };

    save_ragged_csv(&filename, &columns, &headers)?;
    Ok(())
}

/// Read columns of a CSV file written by `save_to_csv`
///
/// Args:
///     filename: CSV path
///     col_numbers: Column index or list of column indices
///
/// Returns:
///     List of 1D arrays with missing cells removed
#[pyfunction]
#[pyo3(signature = (filename, col_numbers))]
pub fn read_from_csv<'py>(
    py: Python<'py>,
    filename: PathBuf,
    col_numbers: &PyAny,
) -> PyResult<Vec<&'py PyArray1<f64>>> {
    let requested: Vec<i64> = match col_numbers.extract::<i64>() {
        Ok(single) => vec![single],
        Err(_) => col_numbers.extract()?,
    };
    let columns = column_indices(&requested)?;

    let arrays = read_ragged_columns(&filename, &columns)?;

    Ok(arrays
        .into_iter()
        .map(|values| PyArray1::from_vec(py, values))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_column_is_value_error() {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(|py| {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("cols.csv");
            save_ragged_csv(&path, &[vec![1.0, 2.0]], &["a"]).unwrap();

            let err = read_from_csv(py, path.clone(), (-1i64).into_py(py).as_ref(py)).unwrap_err();
            assert!(err.is_instance_of::<PyValueError>(py));
            assert!(err.to_string().contains("non-negative"));

            let columns = read_from_csv(py, path, 0i64.into_py(py).as_ref(py)).unwrap();
            assert_eq!(columns.len(), 1);
        });
    }
}
