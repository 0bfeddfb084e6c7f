//! # apidecl-core: Foundational Types
//!
//! The leaf of the apidecl crate DAG. Defines the generic value model that
//! every schema validates against, and the error type for faults that are
//! not document violations.
//!
//! ## Key Design Principles
//!
//! 1. **Closed value model.** [`Value`] has exactly six variants. Whatever
//!    wire format a document arrived in, it must be converted into this shape
//!    before validation. Conversions that cannot produce it fail at the
//!    ingestion boundary, never inside the validator.
//!
//! 2. **Violations are data, faults are errors.** A document that does not
//!    match its schema is reported as a list of violations. [`ApiDeclError`]
//!    is reserved for misuse of the API (unknown schema names, unconvertible
//!    input trees) so the two can never be confused.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `apidecl-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod value;

pub use error::ApiDeclError;
pub use value::{Value, ValueKind};
