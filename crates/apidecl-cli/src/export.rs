//! # Export Subcommand
//!
//! Prints a registered schema as a JSON Schema (Draft 2020-12) document.

use std::io::Write;

use clap::Args;

use apidecl_schema::export::to_json_schema;
use apidecl_schema::{Registry, SchemaName, ValidationOptions};

/// Arguments for the export subcommand.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Schema to export.
    pub schema: SchemaName,

    /// Close every object with `additionalProperties: false`.
    #[arg(long)]
    pub strict: bool,
}

/// Write the pretty-printed export to `out`.
pub fn run_export(args: &ExportArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let options = if args.strict {
        ValidationOptions::strict()
    } else {
        ValidationOptions::permissive()
    };
    let schema = to_json_schema(Registry::global(), args.schema, &options);
    serde_json::to_writer_pretty(&mut *out, &schema)?;
    writeln!(out)?;
    Ok(())
}
