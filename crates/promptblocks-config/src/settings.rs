use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level settings. Every field has a default, so an empty JSON object
/// (or no file at all) is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
  pub completion: CompletionSettings,
  pub input: InputSettings,
  pub credentials: CredentialSettings,
}

impl Settings {
  /// Load settings from a JSON file.
  pub async fn load(path: &Path) -> Result<Self, ConfigError> {
    let content = tokio::fs::read_to_string(path)
      .await
      .map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
      })?;

    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Load settings from `path` if given, otherwise use the defaults.
  pub async fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
    match path {
      Some(path) => Self::load(path).await,
      None => Ok(Self::default()),
    }
  }
}

/// Fixed parameters of the completion call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionSettings {
  /// Chat completions endpoint.
  pub endpoint: String,
  /// Model identifier sent with every request.
  pub model: String,
  pub temperature: f32,
  /// Output length cap, in tokens.
  pub max_tokens: u32,
  /// Wall-clock budget for a single attempt.
  pub timeout_ms: u64,
  /// Additional attempts allowed after a rate-limited response.
  pub max_retries: u32,
  /// Delay before the first retry; doubles for every later retry.
  pub initial_retry_delay_ms: u64,
}

impl CompletionSettings {
  pub fn timeout(&self) -> Duration {
    Duration::from_millis(self.timeout_ms)
  }

  pub fn initial_retry_delay(&self) -> Duration {
    Duration::from_millis(self.initial_retry_delay_ms)
  }
}

impl Default for CompletionSettings {
  fn default() -> Self {
    Self {
      endpoint: "https://openrouter.ai/api/v1/chat/completions".to_string(),
      model: "nousresearch/hermes-3-llama-3.1-70b".to_string(),
      temperature: 0.7,
      max_tokens: 1000,
      timeout_ms: 30_000,
      max_retries: 3,
      initial_retry_delay_ms: 2_000,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
  /// Maximum input length in characters, after trimming.
  pub max_length: usize,
}

impl Default for InputSettings {
  fn default() -> Self {
    Self { max_length: 10_000 }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialSettings {
  /// Environment variable holding the API key.
  pub env_var: String,
}

impl Default for CredentialSettings {
  fn default() -> Self {
    Self {
      env_var: "OPENROUTER_API_KEY".to_string(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_empty_object_uses_defaults() {
    let settings: Settings = serde_json::from_str("{}").unwrap();
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.completion.max_retries, 3);
    assert_eq!(settings.completion.timeout(), Duration::from_secs(30));
    assert_eq!(settings.input.max_length, 10_000);
  }

  #[test]
  fn test_partial_override() {
    let settings: Settings = serde_json::from_str(
      r#"{ "completion": { "model": "test/model", "max_retries": 5 } }"#,
    )
    .unwrap();
    assert_eq!(settings.completion.model, "test/model");
    assert_eq!(settings.completion.max_retries, 5);
    assert_eq!(settings.completion.max_tokens, 1000);
    assert_eq!(settings.credentials.env_var, "OPENROUTER_API_KEY");
  }

  #[tokio::test]
  async fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{ "input": { "max_length": 42 } }"#).unwrap();

    let settings = Settings::load_or_default(Some(&path)).await.unwrap();
    assert_eq!(settings.input.max_length, 42);
  }

  #[tokio::test]
  async fn test_load_reports_parse_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "not json").unwrap();

    let err = Settings::load(&path).await.unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
  }
}
