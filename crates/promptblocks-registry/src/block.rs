use serde::{Deserialize, Serialize};

/// A reusable text transformation applied through a model completion call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
  /// Unique key, e.g. `summarizeText`.
  pub id: String,
  /// Display name.
  pub name: String,
  /// One-line description shown in selectors.
  pub description: String,
  /// System instruction sent with every invocation of this block.
  pub prompt_template: String,
  /// Example input for trying the block out.
  #[serde(default)]
  pub sample_input: String,
}

impl Block {
  pub fn new(
    id: impl Into<String>,
    name: impl Into<String>,
    description: impl Into<String>,
    prompt_template: impl Into<String>,
  ) -> Self {
    Self {
      id: id.into(),
      name: name.into(),
      description: description.into(),
      prompt_template: prompt_template.into(),
      sample_input: String::new(),
    }
  }

  pub fn with_sample_input(mut self, sample_input: impl Into<String>) -> Self {
    self.sample_input = sample_input.into();
    self
  }
}
