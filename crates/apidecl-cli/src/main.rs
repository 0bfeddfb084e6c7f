//! # apidecl CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use std::process::ExitCode;

use clap::Parser;

/// Swagger 1.2 resource listing and API declaration validator.
///
/// Validates documents against the built-in schema registry, lists the
/// registered schemas, and exports them as JSON Schema.
#[derive(Parser, Debug)]
#[command(name = "apidecl", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Validate documents against a schema.
    Validate(apidecl_cli::validate::ValidateArgs),
    /// List registered schema names.
    Schemas,
    /// Print a schema as JSON Schema.
    Export(apidecl_cli::export::ExportArgs),
}

fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr so reports on stdout stay machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Validate(args) => {
            let summary = apidecl_cli::validate::run_validate(&args, &mut stdout)?;
            if !summary.all_valid() {
                tracing::warn!(
                    valid = summary.valid,
                    invalid = summary.invalid,
                    "validation failed"
                );
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Schemas => apidecl_cli::schemas::run_schemas(&mut stdout)?,
        Commands::Export(args) => apidecl_cli::export::run_export(&args, &mut stdout)?,
    }

    Ok(ExitCode::SUCCESS)
}
