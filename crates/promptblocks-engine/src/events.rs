//! Execution events and notifiers for observability.
//!
//! Events are emitted as a workflow progresses so callers can show progress,
//! stream steps to a UI, etc.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Events emitted during workflow execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExecutionEvent {
  /// All pre-checks passed and step 1 is about to run.
  WorkflowStarted {
    execution_id: String,
    block_ids: Vec<String>,
  },

  /// A step has started executing.
  StepStarted {
    execution_id: String,
    step: usize,
    block_id: String,
  },

  /// A step has completed successfully.
  StepCompleted {
    execution_id: String,
    step: usize,
    block_id: String,
    output: String,
  },

  /// A step has failed.
  StepFailed {
    execution_id: String,
    step: usize,
    block_id: String,
    error: String,
  },

  /// Every step completed.
  WorkflowCompleted { execution_id: String },

  /// A step failed and the workflow stopped.
  WorkflowFailed { execution_id: String, error: String },
}

/// Trait for receiving execution events.
///
/// The engine calls `notify` for each event; implementations decide what to
/// do with them.
pub trait ExecutionNotifier: Send + Sync {
  fn notify(&self, event: ExecutionEvent);
}

/// A no-op notifier that discards all events.
#[derive(Debug, Clone, Default)]
pub struct NoopNotifier;

impl ExecutionNotifier for NoopNotifier {
  fn notify(&self, _event: ExecutionEvent) {}
}

/// A notifier that sends events to an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
  sender: mpsc::UnboundedSender<ExecutionEvent>,
}

impl ChannelNotifier {
  pub fn new(sender: mpsc::UnboundedSender<ExecutionEvent>) -> Self {
    Self { sender }
  }
}

impl ExecutionNotifier for ChannelNotifier {
  fn notify(&self, event: ExecutionEvent) {
    // Receiver may have been dropped
    let _ = self.sender.send(event);
  }
}
