//! Error types for workflow execution.

use promptblocks_invoker::InvokeError;
use promptblocks_text::ValidationError;
use thiserror::Error;

use crate::result::StepResult;

/// Errors that can occur during workflow execution.
///
/// Everything except [`WorkflowError::StepFailed`] is raised before the
/// first step runs.
#[derive(Debug, Error)]
pub enum WorkflowError {
  /// The initial input failed validation.
  #[error(transparent)]
  Validation(#[from] ValidationError),

  /// No blocks were selected.
  #[error("Please select at least one block for the workflow.")]
  EmptySelection,

  /// A requested block id is not registered.
  #[error("Block not found: {block_id}")]
  BlockNotFound { block_id: String },

  /// A step failed; the remaining steps were not run.
  #[error("Workflow failed at step {step} ({block_name}): {message}")]
  StepFailed {
    /// 1-based index of the failing step.
    step: usize,
    block_name: String,
    message: String,
    /// Every step that ran, ending with the failed one.
    steps: Vec<StepResult>,
    #[source]
    source: InvokeError,
  },
}

impl WorkflowError {
  /// Steps that ran before (and including) the failure, if any ran at all.
  pub fn partial_results(&self) -> Option<&[StepResult]> {
    match self {
      WorkflowError::StepFailed { steps, .. } => Some(steps),
      _ => None,
    }
  }

  /// 1-based index of the failing step.
  pub fn failed_step(&self) -> Option<usize> {
    match self {
      WorkflowError::StepFailed { step, .. } => Some(*step),
      _ => None,
    }
  }
}
