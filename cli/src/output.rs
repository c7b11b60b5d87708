//! Reporting of conversion results.

use crate::convert::{ConvertError, ConvertReport};
use clap::ValueEnum;
use serde::Serialize;
use std::error::Error;
use std::io::{self, Write};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Readable summary
    #[default]
    Human,
    /// A single JSON object on stdout
    Json,
}

#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<JsonStats>,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    warnings: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonError>,
}

#[derive(Debug, Serialize)]
struct JsonStats {
    input_format: &'static str,
    input_files: usize,
    chapters: usize,
    images: usize,
    output_size: u64,
    duration_ms: u64,
}

#[derive(Debug, Serialize)]
struct JsonError {
    code: u8,
    message: String,
}

/// The error message followed by every underlying cause.
pub fn error_message(error: &ConvertError) -> String {
    let mut message = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Prints the result in `format` to the given streams.
pub fn report(
    format: OutputFormat,
    result: &Result<ConvertReport, ConvertError>,
    stdout: &mut impl Write,
    stderr: &mut impl Write,
) -> io::Result<()> {
    match format {
        OutputFormat::Human => write_human(result, stdout, stderr),
        OutputFormat::Json => write_json(result, stdout),
    }
}

pub fn write_human(
    result: &Result<ConvertReport, ConvertError>,
    stdout: &mut impl Write,
    stderr: &mut impl Write,
) -> io::Result<()> {
    match result {
        Ok(report) => {
            for warning in &report.warnings {
                writeln!(stderr, "⚠ Warning: {warning}")?;
            }
            writeln!(
                stdout,
                "✓ Created {} ({} KB)",
                report.output.display(),
                report.output_size.div_ceil(1024),
            )?;
            writeln!(stdout, "  - {} chapters", report.chapters)?;
            writeln!(stdout, "  - {} images", report.images)?;
            writeln!(stdout, "  - Duration: {:.1}s", report.duration.as_secs_f64())
        }
        Err(error) => writeln!(stderr, "✗ Error: {}", error_message(error)),
    }
}

pub fn write_json(
    result: &Result<ConvertReport, ConvertError>,
    stdout: &mut impl Write,
) -> io::Result<()> {
    let output = match result {
        Ok(report) => JsonOutput {
            success: true,
            output: Some(report.output.display().to_string()),
            stats: Some(JsonStats {
                input_format: "html",
                input_files: report.input_files,
                chapters: report.chapters,
                images: report.images,
                output_size: report.output_size,
                duration_ms: u64::try_from(report.duration.as_millis()).unwrap_or(u64::MAX),
            }),
            warnings: &report.warnings,
            error: None,
        },
        Err(error) => JsonOutput {
            success: false,
            output: None,
            stats: None,
            warnings: &[],
            error: Some(JsonError {
                code: error.exit_code(),
                message: error_message(error),
            }),
        },
    };

    serde_json::to_writer_pretty(&mut *stdout, &output)?;
    writeln!(stdout)
}
