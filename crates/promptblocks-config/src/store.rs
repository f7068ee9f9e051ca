//! Saved workflows, persisted as a JSON array in the data directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::fs;

use crate::error::ConfigError;
use crate::workflow::WorkflowDef;

const FILE_NAME: &str = "saved_workflows.json";

/// File-backed list of saved workflows, kept in save order.
pub struct WorkflowStore {
  path: PathBuf,
}

impl WorkflowStore {
  /// Create a store that keeps its file inside `data_dir`.
  pub fn new(data_dir: impl AsRef<Path>) -> Self {
    Self {
      path: data_dir.as_ref().join(FILE_NAME),
    }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// All saved workflows. A missing file means none have been saved yet.
  pub async fn list(&self) -> Result<Vec<WorkflowDef>, ConfigError> {
    let content = match fs::read_to_string(&self.path).await {
      Ok(content) => content,
      Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
      Err(source) => {
        return Err(ConfigError::Read {
          path: self.path.clone(),
          source,
        });
      }
    };

    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
      path: self.path.clone(),
      source,
    })
  }

  /// Append a workflow, stamping it with the current time.
  pub async fn save(&self, mut workflow: WorkflowDef) -> Result<WorkflowDef, ConfigError> {
    if workflow.blocks.is_empty() {
      return Err(ConfigError::EmptyWorkflow);
    }

    let mut saved = self.list().await?;
    workflow.saved_at = Some(Utc::now());
    saved.push(workflow.clone());

    if let Some(parent) = self.path.parent() {
      fs::create_dir_all(parent)
        .await
        .map_err(|source| ConfigError::Write {
          path: parent.to_path_buf(),
          source,
        })?;
    }

    let content =
      serde_json::to_string_pretty(&saved).map_err(|source| ConfigError::Serialize {
        path: self.path.clone(),
        source,
      })?;
    fs::write(&self.path, content)
      .await
      .map_err(|source| ConfigError::Write {
        path: self.path.clone(),
        source,
      })?;

    Ok(workflow)
  }

  /// Load a saved workflow by its 1-based position.
  pub async fn get(&self, index: usize) -> Result<WorkflowDef, ConfigError> {
    let saved = self.list().await?;
    index
      .checked_sub(1)
      .and_then(|i| saved.into_iter().nth(i))
      .ok_or(ConfigError::InvalidSelection { index })
  }
}
