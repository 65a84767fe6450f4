//! Ragged arrays in rectangular CSV files
//!
//! Columns of unequal length are stored side by side. Rows past the end of a
//! shorter column hold an empty cell, and empty or NaN-like cells are dropped
//! again on read. NaN values are refused on write.

use std::fs::File;
use std::io;
use std::path::Path;

use thiserror::Error;

/// Cell spellings treated as missing on read
const MISSING_MARKERS: [&str; 7] = ["", "nan", "NaN", "NA", "N/A", "null", "-nan"];

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Got {headers} headers for {arrays} arrays")]
    HeaderMismatch { headers: usize, arrays: usize },

    #[error("No arrays to write")]
    Empty,

    #[error("NaN value in column {column} at row {row}")]
    NaN { column: usize, row: usize },

    #[error("Column numbers must be non-negative (got {requested})")]
    NegativeColumn { requested: i64 },

    #[error("Column {requested} requested but the table has only {available} columns")]
    ColumnOutOfRange { requested: usize, available: usize },

    #[error("Cannot parse '{value}' as a number (line {line}, column {column})")]
    Parse {
        line: usize,
        column: usize,
        value: String,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Named columns of unequal length
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RaggedTable {
    pub headers: Vec<String>,
    pub columns: Vec<Vec<f64>>,
}

impl RaggedTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a named column
    pub fn push_column(&mut self, header: impl Into<String>, values: Vec<f64>) {
        self.headers.push(header.into());
        self.columns.push(values);
    }

    pub fn column(&self, index: usize) -> Option<&[f64]> {
        self.columns.get(index).map(Vec::as_slice)
    }

    /// First column whose header equals `name`
    pub fn column_by_name(&self, name: &str) -> Option<&[f64]> {
        self.headers
            .iter()
            .position(|h| h == name)
            .and_then(|index| self.column(index))
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Length of the longest column (number of data rows on disk)
    pub fn row_count(&self) -> usize {
        self.columns.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Clone out the requested columns, in the requested order
    pub fn select(&self, columns: &[usize]) -> Result<Vec<Vec<f64>>, TableError> {
        columns
            .iter()
            .map(|&index| {
                self.columns
                    .get(index)
                    .cloned()
                    .ok_or(TableError::ColumnOutOfRange {
                        requested: index,
                        available: self.columns.len(),
                    })
            })
            .collect()
    }

    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), TableError> {
        write_ragged(writer, &self.columns, &self.headers)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), TableError> {
        save_ragged_csv(path, &self.columns, &self.headers)
    }
}

/// Write arrays of unequal length as CSV columns
///
/// # Arguments
/// * `writer` - Destination
/// * `arrays` - One slice per column
/// * `headers` - One header per column
pub fn write_ragged<W, A, H>(writer: W, arrays: &[A], headers: &[H]) -> Result<(), TableError>
where
    W: io::Write,
    A: AsRef<[f64]>,
    H: AsRef<str>,
{
    check_arrays(arrays, headers)?;

    let rows = arrays.iter().map(|a| a.as_ref().len()).max().unwrap_or(0);
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(headers.iter().map(|h| h.as_ref()))?;

    let mut record = Vec::with_capacity(arrays.len());
    for row in 0..rows {
        record.clear();
        record.extend(arrays.iter().map(|a| format_cell(a.as_ref().get(row).copied())));
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write arrays of unequal length to a CSV file
pub fn save_ragged_csv<P, A, H>(path: P, arrays: &[A], headers: &[H]) -> Result<(), TableError>
where
    P: AsRef<Path>,
    A: AsRef<[f64]>,
    H: AsRef<str>,
{
    check_arrays(arrays, headers)?;
    let file = File::create(path.as_ref())?;
    write_ragged(io::BufWriter::new(file), arrays, headers)?;
    tracing::debug!(path = %path.as_ref().display(), columns = arrays.len(), "ragged table written");
    Ok(())
}

/// Read every column of a ragged CSV table, dropping missing cells
pub fn read_ragged<R: io::Read>(reader: R) -> Result<RaggedTable, TableError> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers: Vec<String> = csv_reader.headers()?.iter().map(String::from).collect();
    let mut columns = vec![Vec::new(); headers.len()];

    for (row, record) in csv_reader.records().enumerate() {
        let record = record?;
        for (column, (cell, values)) in record.iter().zip(columns.iter_mut()).enumerate() {
            let cell = cell.trim();
            if MISSING_MARKERS.contains(&cell) {
                continue;
            }
            let value = cell.parse::<f64>().map_err(|_| TableError::Parse {
                // Header is line 1
                line: row + 2,
                column,
                value: cell.to_string(),
            })?;
            if !value.is_nan() {
                values.push(value);
            }
        }
    }

    Ok(RaggedTable { headers, columns })
}

/// Read every column of a ragged CSV file
pub fn read_ragged_csv<P: AsRef<Path>>(path: P) -> Result<RaggedTable, TableError> {
    let file = File::open(path.as_ref())?;
    read_ragged(io::BufReader::new(file))
}

/// Read selected columns (by index) of a ragged CSV file
pub fn read_ragged_columns<P: AsRef<Path>>(
    path: P,
    columns: &[usize],
) -> Result<Vec<Vec<f64>>, TableError> {
    read_ragged_csv(path)?.select(columns)
}

/// Convert column numbers given as signed integers
pub fn column_indices(requested: &[i64]) -> Result<Vec<usize>, TableError> {
    requested
        .iter()
        .map(|&index| {
            usize::try_from(index).map_err(|_| TableError::NegativeColumn { requested: index })
        })
        .collect()
}

fn check_arrays<A, H>(arrays: &[A], headers: &[H]) -> Result<(), TableError>
where
    A: AsRef<[f64]>,
    H: AsRef<str>,
{
    if arrays.is_empty() {
        return Err(TableError::Empty);
    }
    if headers.len() != arrays.len() {
        return Err(TableError::HeaderMismatch {
            headers: headers.len(),
            arrays: arrays.len(),
        });
    }
    for (column, array) in arrays.iter().enumerate() {
        if let Some(row) = array.as_ref().iter().position(|v| v.is_nan()) {
            return Err(TableError::NaN { column, row });
        }
    }
    Ok(())
}

fn format_cell(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:?}", v),
        None => String::new(),
    }
}
