//! Single-block execution for promptblocks.
//!
//! [`BlockInvoker`] runs exactly one block against one input: it validates
//! the text, resolves the block and credential, sends a two-message chat
//! completion request through a [`CompletionClient`], and sanitizes the
//! reply. Rate-limited responses are retried with exponential backoff
//! ([`RetryPolicy`]); every attempt is bounded by a fixed timeout.
//!
//! [`BlockExecutor`] is the seam the workflow engine drives, so the engine
//! can be exercised without any HTTP at all.

mod client;
mod error;
mod invoker;
mod request;
mod retry;

pub use client::{CompletionClient, HttpCompletionClient};
pub use error::{CompletionError, InvokeError};
pub use invoker::{BlockExecutor, BlockInvoker};
pub use request::{ChatMessage, Choice, CompletionRequest, CompletionResponse, ResponseMessage};
pub use retry::RetryPolicy;
