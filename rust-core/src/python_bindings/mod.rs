//! PyO3 bindings for Python integration

use pyo3::prelude::*;

mod spectrum_bindings;
mod table_bindings;
mod convert_bindings;
mod hierarchy_bindings;

/// Python module definition
#[pymodule]
fn scope_toolkit(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(spectrum_bindings::take_fft, m)?)?;

    m.add_function(wrap_pyfunction!(table_bindings::save_to_csv, m)?)?;
    m.add_function(wrap_pyfunction!(table_bindings::read_from_csv, m)?)?;

    m.add_function(wrap_pyfunction!(convert_bindings::psdata2csv, m)?)?;

    m.add_function(wrap_pyfunction!(hierarchy_bindings::get_h5_tree, m)?)?;
    m.add_function(wrap_pyfunction!(hierarchy_bindings::print_h5_tree, m)?)?;

    Ok(())
}
