//! Tabular storage for waveform columns

pub mod ragged;

pub use ragged::{
    RaggedTable, TableError, column_indices, read_ragged, read_ragged_columns, read_ragged_csv,
    save_ragged_csv, write_ragged,
};
