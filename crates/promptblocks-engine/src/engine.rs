//! Workflow engine implementation.

use std::sync::Arc;

use promptblocks_invoker::BlockExecutor;
use promptblocks_registry::{Block, BlockRegistry};
use promptblocks_text::InputValidator;
use tracing::{error, info, instrument};

use crate::error::WorkflowError;
use crate::events::{ExecutionEvent, ExecutionNotifier, NoopNotifier};
use crate::result::{StepResult, WorkflowResult};

/// Runs workflows: ordered block lists whose steps are chained output to input.
///
/// Generic over `N: ExecutionNotifier` to allow different notification
/// strategies. Use `WorkflowEngine::new()` for an engine with no-op
/// notifications, or `WorkflowEngine::with_notifier()` to observe events.
pub struct WorkflowEngine<E: BlockExecutor, N: ExecutionNotifier = NoopNotifier> {
  registry: Arc<BlockRegistry>,
  validator: InputValidator,
  executor: E,
  notifier: N,
}

impl<E: BlockExecutor> WorkflowEngine<E, NoopNotifier> {
  /// Create a workflow engine with no-op notifications.
  pub fn new(registry: Arc<BlockRegistry>, validator: InputValidator, executor: E) -> Self {
    Self::with_notifier(registry, validator, executor, NoopNotifier)
  }
}

impl<E: BlockExecutor, N: ExecutionNotifier> WorkflowEngine<E, N> {
  /// Create a workflow engine with a custom notifier.
  pub fn with_notifier(
    registry: Arc<BlockRegistry>,
    validator: InputValidator,
    executor: E,
    notifier: N,
  ) -> Self {
    Self {
      registry,
      validator,
      executor,
      notifier,
    }
  }

  pub fn registry(&self) -> &BlockRegistry {
    &self.registry
  }

  /// Execute `block_ids` in order, starting from `initial_input`.
  ///
  /// The input and every block id are checked before any step runs. Steps
  /// then run one at a time; the first failure stops the workflow and is
  /// returned as [`WorkflowError::StepFailed`] carrying the steps that ran.
  /// Outputs passed between steps are not re-validated here; the executor
  /// validates whatever input it receives.
  #[instrument(
    name = "workflow_execute",
    skip(self, block_ids, initial_input),
    fields(block_count = block_ids.len())
  )]
  pub async fn execute_workflow<S>(
    &self,
    block_ids: &[S],
    initial_input: &str,
  ) -> Result<WorkflowResult, WorkflowError>
  where
    S: AsRef<str> + Sync,
  {
    let text = self.validator.validate(initial_input)?;

    if block_ids.is_empty() {
      return Err(WorkflowError::EmptySelection);
    }

    let blocks = self.resolve_blocks(block_ids)?;
    let execution_id = uuid::Uuid::new_v4().to_string();

    info!(execution_id = %execution_id, "workflow_started");
    self.notifier.notify(ExecutionEvent::WorkflowStarted {
      execution_id: execution_id.clone(),
      block_ids: blocks.iter().map(|b| b.id.clone()).collect(),
    });

    let result = self.run_steps(&blocks, text, &execution_id).await;

    match &result {
      Ok(_) => {
        info!(execution_id = %execution_id, "workflow_completed");
        self.notifier.notify(ExecutionEvent::WorkflowCompleted {
          execution_id: execution_id.clone(),
        });
      }
      Err(e) => {
        error!(execution_id = %execution_id, error = %e, "workflow_failed");
        self.notifier.notify(ExecutionEvent::WorkflowFailed {
          execution_id: execution_id.clone(),
          error: e.to_string(),
        });
      }
    }

    result
  }

  /// Resolve every id up front so an unknown block fails before step 1.
  fn resolve_blocks<S: AsRef<str>>(&self, block_ids: &[S]) -> Result<Vec<&Block>, WorkflowError> {
    block_ids
      .iter()
      .map(|id| {
        let id = id.as_ref();
        self
          .registry
          .get(id)
          .ok_or_else(|| WorkflowError::BlockNotFound {
            block_id: id.to_string(),
          })
      })
      .collect()
  }

  /// Run the steps in order, threading each output into the next input.
  async fn run_steps(
    &self,
    blocks: &[&Block],
    text: String,
    execution_id: &str,
  ) -> Result<WorkflowResult, WorkflowError> {
    let mut steps = Vec::with_capacity(blocks.len());
    let mut current_input = text;

    for (index, block) in blocks.iter().enumerate() {
      let step = index + 1;

      info!(execution_id = %execution_id, step, block_id = %block.id, "step_started");
      self.notifier.notify(ExecutionEvent::StepStarted {
        execution_id: execution_id.to_string(),
        step,
        block_id: block.id.clone(),
      });

      match self.executor.execute_block(&block.id, &current_input).await {
        Ok(output) => {
          info!(execution_id = %execution_id, step, block_id = %block.id, "step_completed");
          self.notifier.notify(ExecutionEvent::StepCompleted {
            execution_id: execution_id.to_string(),
            step,
            block_id: block.id.clone(),
            output: output.clone(),
          });

          steps.push(StepResult::succeeded(block, current_input, output.clone()));
          current_input = output;
        }
        Err(source) => {
          let message = source.to_string();
          error!(
            execution_id = %execution_id,
            step,
            block_id = %block.id,
            error = %message,
            "step_failed"
          );
          self.notifier.notify(ExecutionEvent::StepFailed {
            execution_id: execution_id.to_string(),
            step,
            block_id: block.id.clone(),
            error: message.clone(),
          });

          steps.push(StepResult::failed(block, current_input, message.clone()));
          return Err(WorkflowError::StepFailed {
            step,
            block_name: block.name.clone(),
            message,
            steps,
            source,
          });
        }
      }
    }

    Ok(WorkflowResult {
      execution_id: execution_id.to_string(),
      steps,
      final_output: current_input,
    })
  }
}
