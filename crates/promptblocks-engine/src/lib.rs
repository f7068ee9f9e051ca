//! Promptblocks Workflow Engine
//!
//! Runs an ordered list of blocks as a pipeline: each step's output is the
//! next step's input, and the first failing step stops the run.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      WorkflowEngine                         │
//! │  - execute_workflow(block_ids, input) → WorkflowResult      │
//! │  - validates input and every block id before step 1        │
//! │  - strictly sequential, output threaded to next input       │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  BlockExecutor (BlockInvoker)               │
//! │  - one completion call per block, timeout + 429 backoff     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let invoker = BlockInvoker::new(registry.clone(), validator, credentials, client, settings);
//! let engine = WorkflowEngine::new(registry, validator, invoker);
//!
//! match engine.execute_workflow(&["summarizeText", "translateText"], text).await {
//!     Ok(result) => println!("{}", result.final_output),
//!     Err(e) => {
//!         eprintln!("{e}");
//!         if let Some(steps) = e.partial_results() {
//!             // render what ran before the failure
//!         }
//!     }
//! }
//! ```

mod engine;
mod error;
mod events;
mod report;
mod result;

pub use engine::WorkflowEngine;
pub use error::WorkflowError;
pub use events::{ChannelNotifier, ExecutionEvent, ExecutionNotifier, NoopNotifier};
pub use report::{render_markdown, render_plain};
pub use result::{StepResult, WorkflowResult};
