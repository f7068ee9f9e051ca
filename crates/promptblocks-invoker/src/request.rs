//! Chat completion wire types.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
  pub role: String,
  pub content: String,
}

impl ChatMessage {
  pub fn system(content: impl Into<String>) -> Self {
    Self {
      role: "system".to_string(),
      content: content.into(),
    }
  }

  pub fn user(content: impl Into<String>) -> Self {
    Self {
      role: "user".to_string(),
      content: content.into(),
    }
  }
}

/// Request body for the chat completions endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
  pub model: String,
  pub messages: Vec<ChatMessage>,
  pub temperature: f32,
  pub max_tokens: u32,
}

/// Response body from the chat completions endpoint. Only the fields we
/// read are modelled; anything else is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
  #[serde(default)]
  pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
  #[serde(default)]
  pub message: Option<ResponseMessage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseMessage {
  #[serde(default)]
  pub content: Option<String>,
}

impl CompletionResponse {
  /// A response with a single choice carrying `content`.
  pub fn with_content(content: impl Into<String>) -> Self {
    Self {
      choices: vec![Choice {
        message: Some(ResponseMessage {
          content: Some(content.into()),
        }),
      }],
    }
  }

  /// Generated text of the first choice.
  pub fn content(&self) -> Option<&str> {
    self
      .choices
      .first()?
      .message
      .as_ref()?
      .content
      .as_deref()
  }
}
