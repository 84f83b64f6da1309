//! Command implementations for the `tonelt` CLI.

pub mod validate;

pub use validate::{run_validate, ValidateArgs, ValidateOutcome};
