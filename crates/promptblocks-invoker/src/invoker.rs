//! Single-block invoker.

use std::sync::Arc;

use async_trait::async_trait;
use promptblocks_config::{CompletionSettings, CredentialSource};
use promptblocks_registry::BlockRegistry;
use promptblocks_text::{InputValidator, sanitize};
use tracing::{error, info, instrument, warn};

use crate::client::CompletionClient;
use crate::error::{CompletionError, InvokeError};
use crate::request::{ChatMessage, CompletionRequest, CompletionResponse};
use crate::retry::RetryPolicy;

/// Executes one block against one input string.
///
/// Implemented by [`BlockInvoker`]; the workflow engine only depends on this
/// trait.
#[async_trait]
pub trait BlockExecutor: Send + Sync {
  /// Run `block_id` on `input`, returning the sanitized model output.
  async fn execute_block(&self, block_id: &str, input: &str) -> Result<String, InvokeError>;
}

/// Runs blocks through a [`CompletionClient`].
pub struct BlockInvoker<C: CompletionClient> {
  registry: Arc<BlockRegistry>,
  validator: InputValidator,
  credentials: Arc<dyn CredentialSource>,
  client: C,
  settings: CompletionSettings,
  retry: RetryPolicy,
}

impl<C: CompletionClient> BlockInvoker<C> {
  /// Create an invoker. The retry policy is derived from `settings`.
  pub fn new(
    registry: Arc<BlockRegistry>,
    validator: InputValidator,
    credentials: Arc<dyn CredentialSource>,
    client: C,
    settings: CompletionSettings,
  ) -> Self {
    let retry = RetryPolicy::from_settings(&settings);
    Self {
      registry,
      validator,
      credentials,
      client,
      settings,
      retry,
    }
  }

  pub fn registry(&self) -> &Arc<BlockRegistry> {
    &self.registry
  }

  pub fn retry_policy(&self) -> RetryPolicy {
    self.retry
  }

  /// Execute a single block.
  #[instrument(
    name = "block_execute",
    skip(self, block_id, input_text),
    fields(block_id = %block_id)
  )]
  pub async fn execute_block(&self, block_id: &str, input_text: &str) -> Result<String, InvokeError> {
    info!(input_chars = input_text.chars().count(), "block started");

    let result = self.execute_inner(block_id, input_text).await;

    match &result {
      Ok(output) => {
        info!(output_chars = output.chars().count(), "block completed");
      }
      Err(e) => {
        error!(error = ?e, "block failed");
      }
    }

    result
  }

  async fn execute_inner(&self, block_id: &str, input_text: &str) -> Result<String, InvokeError> {
    let text = self.validator.validate(input_text)?;

    let block = self
      .registry
      .get(block_id)
      .ok_or_else(|| InvokeError::BlockNotFound {
        block_id: block_id.to_string(),
      })?;

    let api_key = self
      .credentials
      .api_key()
      .ok_or(InvokeError::MissingCredential)?;

    let request = CompletionRequest {
      model: self.settings.model.clone(),
      messages: vec![
        ChatMessage::system(block.prompt_template.clone()),
        ChatMessage::user(text),
      ],
      temperature: self.settings.temperature,
      max_tokens: self.settings.max_tokens,
    };

    let response = self.send_with_retry(&request, &api_key).await?;

    let content = response
      .content()
      .ok_or_else(|| InvokeError::UnexpectedResponse {
        message: "response has no choices[0].message.content".to_string(),
      })?;

    Ok(sanitize(content))
  }

  /// Send the request, retrying only on rate limiting.
  async fn send_with_retry(
    &self,
    request: &CompletionRequest,
    api_key: &str,
  ) -> Result<CompletionResponse, InvokeError> {
    let timeout = self.settings.timeout();
    let mut attempts: u32 = 0;

    loop {
      attempts += 1;

      // Dropping the in-flight future on timeout aborts the request.
      let outcome = tokio::time::timeout(timeout, self.client.complete(request, api_key))
        .await
        .map_err(|_| InvokeError::Timeout {
          timeout_ms: self.settings.timeout_ms,
        })?;

      match outcome {
        Ok(response) => return Ok(response),
        Err(CompletionError::Status { status: 429, .. }) => {
          let Some(delay) = self.retry.delay_before_retry(attempts) else {
            return Err(InvokeError::RateLimited { attempts });
          };
          warn!(
            attempt = attempts,
            max_retries = self.retry.max_retries,
            delay_ms = delay.as_millis() as u64,
            "rate limited, retrying"
          );
          tokio::time::sleep(delay).await;
        }
        Err(e) => return Err(classify(e)),
      }
    }
  }
}

/// Map a non-retryable attempt failure onto the invocation taxonomy.
///
/// 429 never reaches here; `send_with_retry` handles it.
fn classify(error: CompletionError) -> InvokeError {
  match error {
    CompletionError::Status { status: 401, .. } => InvokeError::InvalidCredential,
    CompletionError::Status { status, message } => InvokeError::Api {
      status,
      message: message.unwrap_or_else(|| format!("API request failed with status {}", status)),
    },
    CompletionError::Transport { message } => InvokeError::Network { message },
    CompletionError::Malformed { message } => InvokeError::UnexpectedResponse { message },
  }
}

#[async_trait]
impl<C: CompletionClient> BlockExecutor for BlockInvoker<C> {
  async fn execute_block(&self, block_id: &str, input: &str) -> Result<String, InvokeError> {
    BlockInvoker::execute_block(self, block_id, input).await
  }
}
