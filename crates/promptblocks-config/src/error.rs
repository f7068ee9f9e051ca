use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading configuration or saved workflows.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read {}: {source}", .path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to write {}: {source}", .path.display())]
  Write {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse {}: {source}", .path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("failed to serialize {}: {source}", .path.display())]
  Serialize {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("Please select at least one block to save.")]
  EmptyWorkflow,

  #[error("Invalid selection.")]
  InvalidSelection { index: usize },
}
