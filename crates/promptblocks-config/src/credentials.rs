//! Sources for the completion service API key.

/// Supplies the bearer credential for the completion service.
///
/// A missing credential is reported by the caller as an error, so
/// implementations return `None` rather than failing.
pub trait CredentialSource: Send + Sync {
  fn api_key(&self) -> Option<String>;
}

/// Reads the API key from an environment variable on every call.
#[derive(Debug, Clone)]
pub struct EnvCredentials {
  var: String,
}

impl EnvCredentials {
  pub fn new(var: impl Into<String>) -> Self {
    Self { var: var.into() }
  }
}

impl CredentialSource for EnvCredentials {
  fn api_key(&self) -> Option<String> {
    std::env::var(&self.var)
      .ok()
      .map(|key| key.trim().to_string())
      .filter(|key| !key.is_empty())
  }
}

/// A fixed credential, or none at all.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials(Option<String>);

impl StaticCredentials {
  pub fn new(api_key: impl Into<String>) -> Self {
    Self(Some(api_key.into()))
  }

  pub fn none() -> Self {
    Self(None)
  }
}

impl CredentialSource for StaticCredentials {
  fn api_key(&self) -> Option<String> {
    self.0.clone()
  }
}
