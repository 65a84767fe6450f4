//! Converted waveform CSV -> spectrum -> CSV, the way lab scripts chain it

use scope_toolkit::spectrum::{estimate, EstimatorConfig, WindowKind};
use scope_toolkit::table::{read_ragged_columns, read_ragged_csv, save_ragged_csv};
use std::f64::consts::PI;

#[test]
fn spectrum_appended_to_waveform_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("capture.csv");

    let fs = 100_000.0;
    let time: Vec<f64> = (0..10_000).map(|n| n as f64 / fs).collect();
    let volts: Vec<f64> = time
        .iter()
        .map(|t| 0.5 + 1.5 * (2.0 * PI * 2500.0 * t).sin())
        .collect();
    save_ragged_csv(&path, &[&time, &volts], &["time_s", "volts"]).unwrap();

    let signal = read_ragged_columns(&path, &[1]).unwrap().remove(0);
    assert_eq!(signal.len(), 10_000);

    let window = WindowKind::from_name("hann", None).unwrap();
    let result = estimate(&signal, &EstimatorConfig::new(10, fs, window)).unwrap();
    assert_eq!(result.len(), 500);
    assert_eq!(result.discarded_samples, 0);

    let (peak_freq, _) = result.peak().unwrap();
    assert!((peak_freq - 2500.0).abs() < 1e-6);

    let mut table = read_ragged_csv(&path).unwrap();
    table.push_column("frequency_hz", result.frequencies.clone());
    table.push_column("amplitude", result.amplitudes.clone());
    table.save(&path).unwrap();

    let reread = read_ragged_csv(&path).unwrap();
    assert_eq!(reread.headers, vec!["time_s", "volts", "frequency_hz", "amplitude"]);
    assert_eq!(reread.column(0).unwrap().len(), 10_000);
    assert_eq!(reread.column_by_name("frequency_hz").unwrap(), result.frequencies.as_slice());
    assert_eq!(reread.column_by_name("amplitude").unwrap(), result.amplitudes.as_slice());
}
