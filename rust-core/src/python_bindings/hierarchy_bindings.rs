//! Python bindings for hierarchy trees (h5py files and groups)

use pyo3::prelude::*;

use crate::hierarchy::{render_tree, Hierarchy, NodeKind};

/// Duck-typed h5py node: anything with `items()` is a group, anything else
/// is a dataset with a `shape`
struct PyNode<'py>(&'py PyAny);

impl<'py> Hierarchy for PyNode<'py> {
    type Error = PyErr;

    fn kind(&self) -> PyResult<NodeKind> {
        if self.0.hasattr("items")? {
            return Ok(NodeKind::Group);
        }
        let shape: Vec<usize> = self.0.getattr("shape")?.extract()?;
        Ok(NodeKind::Dataset { shape })
    }

    fn members(&self) -> PyResult<Vec<(String, Self)>> {
        let mut members = Vec::new();
        for item in self.0.call_method0("items")?.iter()? {
            let (name, value): (String, &PyAny) = item?.extract()?;
            members.push((name, PyNode(value)));
        }
        Ok(members)
    }
}

/// Tree structure of an h5py File or Group as a string
#[pyfunction]
pub fn get_h5_tree(val: &PyAny) -> PyResult<String> {
    render_tree(&PyNode(val))
}

/// Print the tree structure of an h5py File or Group
#[pyfunction]
pub fn print_h5_tree(py: Python<'_>, val: &PyAny) -> PyResult<()> {
    let tree = render_tree(&PyNode(val))?;
    if tree.is_empty() {
        return Ok(());
    }

    // Through Python's print so notebooks capture the output
    let print = py.import("builtins")?.getattr("print")?;
    print.call1((tree.trim_end_matches('\n'),))?;
    Ok(())
}
