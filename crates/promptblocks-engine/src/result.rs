//! Workflow execution results.

use promptblocks_registry::Block;
use serde::{Deserialize, Serialize};

/// Record of one block's execution within a workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepResult {
  pub block_id: String,
  pub block_name: String,
  /// Text the block received.
  pub input: String,
  /// Sanitized block output; empty when the step failed.
  pub output: String,
  pub success: bool,
  /// User-facing failure message.
  pub error: Option<String>,
}

impl StepResult {
  pub(crate) fn succeeded(block: &Block, input: String, output: String) -> Self {
    Self {
      block_id: block.id.clone(),
      block_name: block.name.clone(),
      input,
      output,
      success: true,
      error: None,
    }
  }

  pub(crate) fn failed(block: &Block, input: String, error: String) -> Self {
    Self {
      block_id: block.id.clone(),
      block_name: block.name.clone(),
      input,
      output: String::new(),
      success: false,
      error: Some(error),
    }
  }
}

/// Result of a fully successful workflow execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowResult {
  /// Unique execution ID.
  pub execution_id: String,
  /// One entry per block, in execution order.
  pub steps: Vec<StepResult>,
  /// Output of the last step.
  pub final_output: String,
}
