use thiserror::Error;

/// Errors that can occur when modifying the block registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
  /// A required block field was empty.
  #[error("Block must have id, name, description, and prompt properties (missing: {field})")]
  InvalidBlock { field: &'static str },
}
