//! Scope Toolkit - Oscilloscope Waveform Post-Processing
//! 
//! Averaged FFT spectral estimation, ragged CSV tables, PicoScope dump
//! conversion and hierarchy tree rendering, with optional Python bindings.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

pub mod spectrum;
pub mod table;
pub mod convert;
pub mod hierarchy;
#[cfg(feature = "python")]
pub mod python_bindings;

pub use spectrum::{EstimatorConfig, SpectralEstimate, SpectrumError, WindowKind, estimate};
pub use table::{RaggedTable, TableError};
pub use convert::{ConversionError, OutputFormat, PsdataConversion};
pub use hierarchy::{Hierarchy, NodeKind, TreeNode, TreeWriteError, print_tree, render_tree, write_tree};
