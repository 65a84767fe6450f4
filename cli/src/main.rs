//! Scope Toolkit Command-Line Interface
//!
//! This CLI provides tools for:
//! - Averaged FFT spectra of waveform columns from converted CSV files
//! - Batch conversion of PicoScope .psdata captures

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use scope_toolkit::convert::{OutputFormat, PsdataConversion};
use scope_toolkit::spectrum::{estimate, EstimatorConfig, WindowKind};
use scope_toolkit::table::{read_ragged_csv, RaggedTable};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "scope-toolkit")]
#[command(author, version, about = "Oscilloscope waveform post-processing", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Averaged amplitude spectral density of one CSV column
    Fft {
        /// Input CSV (ragged columns, first row is headers)
        #[arg(short, long)]
        input: PathBuf,

        /// Column index holding the signal
        #[arg(short, long, default_value = "0")]
        column: usize,

        /// Number of segments to average
        #[arg(short = 'n', long, default_value = "1")]
        averages: usize,

        /// Sampling rate in Sa/s
        #[arg(short, long)]
        sampling_rate: f64,

        /// Window (rectangular, hann, blackman, flattop,
        /// exponential-symmetric, exponential-asymmetric)
        #[arg(short, long, default_value = "rectangular")]
        window: String,

        /// Decay fraction for the asymmetric exponential window
        #[arg(long)]
        tau: Option<f64>,

        /// Output CSV for frequency_hz and amplitude columns
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Keep the input columns in front of the spectrum columns
        #[arg(long, requires = "output")]
        append: bool,
    },

    /// Convert .psdata captures with PicoScope
    Convert {
        /// Export every buffered waveform, not only the current one
        #[arg(long)]
        all: bool,

        /// PicoScope executable
        #[arg(long, default_value = "Picoscope")]
        program: PathBuf,

        /// Capture file pattern
        #[arg(long, default_value = "*.psdata")]
        pattern: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Csv)]
        format: Format,

        /// Directory holding the captures
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Txt,
    Mat,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => OutputFormat::Csv,
            Format::Txt => OutputFormat::Txt,
            Format::Mat => OutputFormat::Mat,
        }
    }
}

struct FftArgs {
    input: PathBuf,
    column: usize,
    averages: usize,
    sampling_rate: f64,
    window: String,
    tau: Option<f64>,
    output: Option<PathBuf>,
    append: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Fft {
            input,
            column,
            averages,
            sampling_rate,
            window,
            tau,
            output,
            append,
        } => cmd_fft(FftArgs {
            input,
            column,
            averages,
            sampling_rate,
            window,
            tau,
            output,
            append,
        }),

        Commands::Convert {
            all,
            program,
            pattern,
            format,
            dir,
        } => cmd_convert(all, program, pattern, format, dir),
    }
}

fn cmd_fft(args: FftArgs) -> Result<()> {
    let table = read_ragged_csv(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let signal = table.column(args.column).with_context(|| {
        format!(
            "Column {} not found in {} ({} columns)",
            args.column,
            args.input.display(),
            table.len()
        )
    })?;

    let window = WindowKind::from_name(&args.window, args.tau)?;
    let config = EstimatorConfig::new(args.averages, args.sampling_rate, window);
    let result = estimate(signal, &config).context("Spectral estimation failed")?;

    info!(
        bins = result.len(),
        discarded = result.discarded_samples,
        "spectrum estimated"
    );

    match args.output {
        Some(path) => {
            let mut out = if args.append { table } else { RaggedTable::new() };
            out.push_column("frequency_hz", result.frequencies);
            out.push_column("amplitude", result.amplitudes);
            out.save(&path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "spectrum written");
        }
        None => {
            println!("Bins:              {}", result.len());
            if let Some(bin) = result.bin_width() {
                println!("Bin width:         {:.6} Hz", bin);
            }
            if let Some((freq, amp)) = result.peak() {
                println!("Peak:              {:.6} Hz ({:.6e} /√Hz)", freq, amp);
            }
            println!("Discarded samples: {}", result.discarded_samples);
        }
    }

    Ok(())
}

fn cmd_convert(
    all: bool,
    program: PathBuf,
    pattern: String,
    format: Format,
    dir: Option<PathBuf>,
) -> Result<()> {
    let mut conversion = PsdataConversion::new()
        .program(program)
        .pattern(pattern)
        .format(format.into())
        .all_waveforms(all);
    if let Some(dir) = dir {
        conversion = conversion.working_dir(dir);
    }

    conversion.run().context("psdata conversion failed")?;
    info!("conversion finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scope_toolkit::table::save_ragged_csv;
    use std::f64::consts::PI;

    fn capture(dir: &std::path::Path) -> PathBuf {
        let fs = 10_000.0;
        let time: Vec<f64> = (0..2000).map(|n| n as f64 / fs).collect();
        let volts: Vec<f64> = time.iter().map(|t| (2.0 * PI * 500.0 * t).sin()).collect();

        let path = dir.join("capture.csv");
        save_ragged_csv(&path, &[&time, &volts], &["time_s", "volts"]).unwrap();
        path
    }

    fn fft_args(input: PathBuf, output: Option<PathBuf>, append: bool) -> FftArgs {
        FftArgs {
            input,
            column: 1,
            averages: 4,
            sampling_rate: 10_000.0,
            window: "hann".to_string(),
            tau: None,
            output,
            append,
        }
    }

    #[test]
    fn test_fft_append_keeps_input_columns() {
        let dir = tempfile::tempdir().unwrap();
        let input = capture(dir.path());
        let output = dir.path().join("spectrum.csv");

        cmd_fft(fft_args(input, Some(output.clone()), true)).unwrap();

        let table = read_ragged_csv(&output).unwrap();
        assert_eq!(table.headers, vec!["time_s", "volts", "frequency_hz", "amplitude"]);
        assert_eq!(table.column(0).unwrap().len(), 2000);
        assert_eq!(table.column_by_name("amplitude").unwrap().len(), 250);

        // 500 Hz at 20 Hz bins
        let freqs = table.column_by_name("frequency_hz").unwrap();
        let amps = table.column_by_name("amplitude").unwrap();
        let peak = amps
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(i, _)| i)
            .unwrap();
        assert!((freqs[peak] - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_fft_output_without_append() {
        let dir = tempfile::tempdir().unwrap();
        let input = capture(dir.path());
        let output = dir.path().join("spectrum.csv");

        cmd_fft(fft_args(input, Some(output.clone()), false)).unwrap();

        let table = read_ragged_csv(&output).unwrap();
        assert_eq!(table.headers, vec!["frequency_hz", "amplitude"]);
    }

    #[test]
    fn test_fft_summary() {
        let dir = tempfile::tempdir().unwrap();
        let input = capture(dir.path());
        assert!(cmd_fft(fft_args(input, None, false)).is_ok());
    }

    #[test]
    fn test_fft_missing_column() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = fft_args(capture(dir.path()), None, false);
        args.column = 5;

        let err = cmd_fft(args).unwrap_err();
        assert!(err.to_string().contains("Column 5 not found"));
    }

    #[test]
    fn test_fft_bad_window() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = fft_args(capture(dir.path()), None, false);
        args.window = "triangle".to_string();

        assert!(cmd_fft(args).is_err());
    }
}
