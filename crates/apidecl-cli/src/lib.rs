//! # apidecl-cli: Command-Line Interface
//!
//! Wraps the validation engine for use on files. The CLI owns the two
//! collaborators the engine deliberately leaves out: reading documents from
//! disk into the value model, and presenting reports.
//!
//! ## Subcommands
//!
//! - `validate`: validate JSON/YAML documents against a named schema
//! - `schemas`: list the registered schema names
//! - `export`: print a schema as a JSON Schema document
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handlers; handlers write to a
//!   caller-supplied writer so they can be tested without a process.
//! - No validation logic here. Everything delegates to `apidecl-schema`.

pub mod export;
pub mod input;
pub mod schemas;
pub mod validate;
