//! Invocation error types.

use promptblocks_text::ValidationError;
use thiserror::Error;

/// Outcome of a single failed HTTP attempt, before retry policy is applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
  /// The service answered with a non-success status.
  #[error("completion service returned status {status}")]
  Status {
    status: u16,
    /// `error.message` from the response body, when present.
    message: Option<String>,
  },

  /// The request never produced a response.
  #[error("transport error: {message}")]
  Transport { message: String },

  /// A success status with a body that is not a completion response.
  #[error("malformed response: {message}")]
  Malformed { message: String },
}

/// Errors that can occur while executing a single block.
///
/// Display strings are user-facing; the extra fields carry detail for logs.
#[derive(Debug, Error)]
pub enum InvokeError {
  /// Input text failed validation.
  #[error(transparent)]
  Validation(#[from] ValidationError),

  /// No block is registered under this id.
  #[error("Block not found: {block_id}")]
  BlockNotFound { block_id: String },

  /// No API key is configured.
  #[error("API key not configured. Please configure OpenRouter API key.")]
  MissingCredential,

  /// The service rejected the API key.
  #[error("API key invalid. Please configure OpenRouter API key.")]
  InvalidCredential,

  /// Still rate limited after every retry.
  #[error("Too many requests. Please wait a moment and try again.")]
  RateLimited { attempts: u32 },

  /// An attempt exceeded its wall-clock budget.
  #[error("Request timed out. Please try again with shorter text.")]
  Timeout { timeout_ms: u64 },

  /// The service could not be reached.
  #[error("Unable to connect to AI service. Please check your connection.")]
  Network { message: String },

  /// The service answered successfully but not with usable text.
  #[error("Unexpected response from AI service. Please try again.")]
  UnexpectedResponse { message: String },

  /// Any other error status.
  #[error("{message}")]
  Api { status: u16, message: String },
}
