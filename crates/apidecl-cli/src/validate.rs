//! # Validate Subcommand
//!
//! Validates one or more document files against a named schema and prints a
//! report per file. Validation options come from an optional config file,
//! then the `--strict` and `--semantic` flags are applied on top.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, ValueEnum};
use serde_json::json;

use apidecl_schema::{Registry, Report, SchemaName, UnknownFields, ValidationOptions};

use crate::input::load_document;

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Schema to validate against, e.g. `ResourceListing` or `APIDeclaration`.
    #[arg(long, short, default_value = "APIDeclaration")]
    pub schema: SchemaName,

    /// Reject fields the schema does not declare.
    #[arg(long)]
    pub strict: bool,

    /// Run the cross-field semantic checks after structural validation.
    #[arg(long)]
    pub semantic: bool,

    /// Validation options file (YAML or JSON).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Document files. `.yaml`/`.yml` are read as YAML, anything else as JSON.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

/// How reports are written.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable, one block per file.
    Text,
    /// One JSON object per line per file.
    Json,
}

/// Counts of valid and invalid files from one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ValidateSummary {
    pub valid: usize,
    pub invalid: usize,
}

impl ValidateSummary {
    pub fn all_valid(&self) -> bool {
        self.invalid == 0
    }
}

impl ValidateArgs {
    /// Resolve the effective options: config file first, flags override.
    pub fn options(&self) -> anyhow::Result<ValidationOptions> {
        let mut options = match &self.config {
            Some(path) => ValidationOptions::from_path(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => ValidationOptions::default(),
        };
        if self.strict {
            options.unknown_fields = UnknownFields::Reject;
        }
        if self.semantic {
            options.semantic_checks = true;
        }
        Ok(options)
    }
}

/// Validate every file in `args`, writing reports to `out`.
///
/// # Errors
///
/// Fails on the first file that cannot be read or parsed, or if the config
/// file is unusable. Invalid documents are not errors; they are counted in
/// the returned summary.
pub fn run_validate(args: &ValidateArgs, out: &mut dyn Write) -> anyhow::Result<ValidateSummary> {
    let options = args.options()?;
    tracing::debug!(schema = %args.schema, ?options, "validating {} file(s)", args.files.len());

    let registry = Registry::global();
    let mut summary = ValidateSummary::default();
    for path in &args.files {
        let document = load_document(path)
            .with_context(|| format!("failed to load {}", path.display()))?;
        let report = registry.validate_with(args.schema, &document, &options);
        if report.is_valid() {
            tracing::info!(file = %path.display(), "valid");
            summary.valid += 1;
        } else {
            tracing::warn!(
                file = %path.display(),
                violations = report.violations().len(),
                "invalid"
            );
            summary.invalid += 1;
        }
        write_report(out, path, args.schema, &report, args.format)?;
    }
    Ok(summary)
}

fn write_report(
    out: &mut dyn Write,
    path: &Path,
    schema: SchemaName,
    report: &Report,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{}: {report}", path.display())?,
        OutputFormat::Json => {
            let line = json!({
                "file": path.display().to_string(),
                "schema": schema,
                "report": report,
            });
            writeln!(out, "{line}")?;
        }
    }
    Ok(())
}
