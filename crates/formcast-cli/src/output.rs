//! Output formatting and writing utilities
//!
//! This module formats validation outcomes, model labels and schema check
//! reports as JSON, YAML or human-readable text.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use formcast_core::ValidationOutcome;
use serde::Serialize;
use std::io::{self, Write};
use tracing::debug;

/// Resolution status of one model referenced by a request schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelCheck {
    pub model: String,
    /// Error text when the model could not be resolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of loading a request schema and resolving its models
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaReport {
    pub schema: String,
    pub fields: usize,
    pub models: Vec<ModelCheck>,
}

impl SchemaReport {
    pub fn missing(&self) -> impl Iterator<Item = &ModelCheck> {
        self.models.iter().filter(|m| m.error.is_some())
    }
}

/// Trait for formatting output with specialized support for common types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format a validation outcome: errors, or the clean parameters
    fn format_outcome(&self, outcome: &ValidationOutcome, use_color: bool) -> Result<String>;

    /// Format a schema check report
    fn format_schema_report(&self, report: &SchemaReport, use_color: bool) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty | OutputFormat::Human => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
        }
    }

    fn format_outcome(&self, outcome: &ValidationOutcome, use_color: bool) -> Result<String> {
        match self {
            OutputFormat::Human => format_outcome_human(outcome, use_color),
            _ => self.format(outcome),
        }
    }

    fn format_schema_report(&self, report: &SchemaReport, use_color: bool) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_schema_report_human(report, use_color)),
            _ => self.format(report),
        }
    }
}

fn format_outcome_human(outcome: &ValidationOutcome, use_color: bool) -> Result<String> {
    let mut lines = Vec::new();

    if let Some(clean) = outcome.clean_parameters() {
        let header = "✓ Parameters are valid";
        lines.push(if use_color { header.green().bold().to_string() } else { header.to_string() });
        lines.push(serde_json::to_string_pretty(clean)?);
        return Ok(lines.join("\n"));
    }

    let header = format!("✗ {} parameter error(s)", outcome.errors().len());
    lines.push(if use_color { header.red().bold().to_string() } else { header });

    for error in outcome.errors() {
        let path = if use_color { error.path.cyan().to_string() } else { error.path.clone() };
        lines.push(format!("  {} {}", path, error.message));
    }

    Ok(lines.join("\n"))
}

fn format_schema_report_human(report: &SchemaReport, use_color: bool) -> String {
    let mut lines = vec![format!(
        "{}: {} field(s), {} model(s)",
        report.schema,
        report.fields,
        report.models.len()
    )];

    for check in &report.models {
        let line = match &check.error {
            None if use_color => format!("  {} {}", "✓".green(), check.model),
            None => format!("  ok      {}", check.model),
            Some(error) if use_color => format!("  {} {} ({})", "✗".red(), check.model, error),
            Some(error) => format!("  missing {} ({})", check.model, error),
        };
        lines.push(line);
    }

    lines.join("\n")
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self::with_writer(format, use_color, quiet, Box::new(io::stdout()))
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(format: OutputFormat, use_color: bool, quiet: bool, writer: Box<dyn Write>) -> Self {
        Self {
            format,
            use_color,
            quiet,
            writer,
        }
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message (human format only)
    pub fn info(&mut self, message: &str) -> Result<()> {
        debug!("Output info: {}", message);

        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a serializable value in the configured format
    pub fn value<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let content = self.format.format(value)?;
        self.writeln(content.trim_end())
    }

    /// Write a validation outcome
    pub fn outcome(&mut self, outcome: &ValidationOutcome) -> Result<()> {
        let content = self.format.format_outcome(outcome, self.use_color)?;
        self.writeln(content.trim_end())
    }

    /// Write a schema check report
    pub fn schema_report(&mut self, report: &SchemaReport) -> Result<()> {
        let content = self.format.format_schema_report(report, self.use_color)?;
        self.writeln(content.trim_end())
    }
}

#[cfg(test)]
mod tests;
