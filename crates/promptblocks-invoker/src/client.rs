//! Completion service clients.

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::error::CompletionError;
use crate::request::{CompletionRequest, CompletionResponse};

/// Performs one completion request. Retry and timeout policy live in the
/// caller; implementations make exactly one attempt per call.
#[async_trait]
pub trait CompletionClient: Send + Sync {
  async fn complete(
    &self,
    request: &CompletionRequest,
    api_key: &str,
  ) -> Result<CompletionResponse, CompletionError>;
}

/// Chat completions over HTTPS with bearer authentication.
#[derive(Debug, Clone)]
pub struct HttpCompletionClient {
  client: Client,
  endpoint: Url,
}

impl HttpCompletionClient {
  pub fn new(endpoint: &str) -> Result<Self, url::ParseError> {
    Ok(Self {
      client: Client::new(),
      endpoint: Url::parse(endpoint)?,
    })
  }

  pub fn endpoint(&self) -> &Url {
    &self.endpoint
  }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
  async fn complete(
    &self,
    request: &CompletionRequest,
    api_key: &str,
  ) -> Result<CompletionResponse, CompletionError> {
    let response = self
      .client
      .post(self.endpoint.clone())
      .bearer_auth(api_key)
      .json(request)
      .send()
      .await
      .map_err(|e| CompletionError::Transport {
        message: e.to_string(),
      })?;

    let status = response.status();
    let body = response
      .text()
      .await
      .map_err(|e| CompletionError::Transport {
        message: e.to_string(),
      })?;

    if !status.is_success() {
      return Err(CompletionError::Status {
        status: status.as_u16(),
        message: api_error_message(&body),
      });
    }

    parse_response(&body)
  }
}

/// Extract `error.message` from an error response body.
fn api_error_message(body: &str) -> Option<String> {
  let value: serde_json::Value = serde_json::from_str(body).ok()?;
  value
    .get("error")?
    .get("message")?
    .as_str()
    .map(str::to_string)
}

fn parse_response(body: &str) -> Result<CompletionResponse, CompletionError> {
  serde_json::from_str(body).map_err(|e| CompletionError::Malformed {
    message: format!("invalid JSON: {}", e),
  })
}
