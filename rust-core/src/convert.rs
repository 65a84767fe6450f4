//! PicoScope waveform dump conversion
//!
//! Dispatches the PicoScope executable to batch-convert `.psdata` captures
//! into tabular files. No conversion happens in this crate.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Converter exited with {status}")]
    Failed { status: ExitStatus },
}

/// Output format understood by PicoScope's `/f` switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Csv,
    Txt,
    Mat,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Txt => "txt",
            OutputFormat::Mat => "mat",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Batch conversion of `.psdata` files
#[derive(Debug, Clone, PartialEq)]
pub struct PsdataConversion {
    /// Converter executable
    pub program: PathBuf,

    /// File pattern, expanded by the converter itself
    pub pattern: String,

    /// Target format
    pub format: OutputFormat,

    /// Export every buffered waveform instead of only the current one
    pub all_waveforms: bool,

    /// Directory to run in (current directory if None)
    pub working_dir: Option<PathBuf>,
}

impl Default for PsdataConversion {
    fn default() -> Self {
        Self {
            program: PathBuf::from("Picoscope"),
            pattern: "*.psdata".to_string(),
            format: OutputFormat::Csv,
            all_waveforms: false,
            working_dir: None,
        }
    }
}

impl PsdataConversion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn all_waveforms(mut self, all: bool) -> Self {
        self.all_waveforms = all;
        self
    }

    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Converter arguments: `/c <pattern> /f <format> [/b all]`
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            "/c".to_string(),
            self.pattern.clone(),
            "/f".to_string(),
            self.format.to_string(),
        ];
        if self.all_waveforms {
            args.push("/b".to_string());
            args.push("all".to_string());
        }
        args
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.args());
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }
        cmd
    }

    /// Run the converter and wait for it to finish
    pub fn run(&self) -> Result<(), ConversionError> {
        tracing::info!(
            program = %self.program.display(),
            args = ?self.args(),
            "dispatching psdata conversion"
        );

        let status = self
            .command()
            .status()
            .map_err(|source| ConversionError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        if !status.success() {
            tracing::warn!(%status, "psdata conversion failed");
            return Err(ConversionError::Failed { status });
        }
        Ok(())
    }
}
