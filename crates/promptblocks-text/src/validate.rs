//! Input validation.

use thiserror::Error;

/// Default maximum input length, in characters.
pub const DEFAULT_MAX_INPUT_LENGTH: usize = 10_000;

/// Reasons an input text is rejected.
///
/// The display strings are shown to end users verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  /// Input was empty or whitespace only.
  #[error("Please enter some text to transform.")]
  Empty,

  /// Trimmed input is longer than the configured maximum.
  #[error("Input text exceeds maximum length ({} characters).", group_thousands(.max))]
  TooLong { max: usize },
}

/// Validates user-supplied text before it is sent to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputValidator {
  max_length: usize,
}

impl InputValidator {
  /// Create a validator that accepts at most `max_length` characters.
  pub fn new(max_length: usize) -> Self {
    Self { max_length }
  }

  pub fn max_length(&self) -> usize {
    self.max_length
  }

  /// Validate `text`, returning the trimmed text on success.
  ///
  /// Length is counted in characters after trimming, so surrounding
  /// whitespace never counts against the limit.
  pub fn validate(&self, text: &str) -> Result<String, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
      return Err(ValidationError::Empty);
    }

    if trimmed.chars().count() > self.max_length {
      return Err(ValidationError::TooLong {
        max: self.max_length,
      });
    }

    Ok(trimmed.to_string())
  }
}

impl Default for InputValidator {
  fn default() -> Self {
    Self::new(DEFAULT_MAX_INPUT_LENGTH)
  }
}

/// Render `n` with comma thousands separators (10000 -> "10,000").
fn group_thousands(n: &usize) -> String {
  let digits = n.to_string();
  let mut out = String::with_capacity(digits.len() + digits.len() / 3);
  for (i, ch) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      out.push(',');
    }
    out.push(ch);
  }
  out
}
