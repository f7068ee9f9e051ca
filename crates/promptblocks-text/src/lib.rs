//! Text contracts shared by single-block and workflow execution.
//!
//! - [`InputValidator`] enforces the non-empty, length-bounded input contract.
//! - [`sanitize`] turns a raw model response into plain readable text.

mod sanitize;
mod validate;

pub use sanitize::sanitize;
pub use validate::{DEFAULT_MAX_INPUT_LENGTH, InputValidator, ValidationError};
