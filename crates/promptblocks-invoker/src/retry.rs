use std::time::Duration;

use promptblocks_config::CompletionSettings;

/// Exponential backoff for rate-limited requests.
///
/// The delay before retry `n` (1-based) is `initial_delay * 2^(n-1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
  pub max_retries: u32,
  pub initial_delay: Duration,
}

impl RetryPolicy {
  pub fn new(max_retries: u32, initial_delay: Duration) -> Self {
    Self {
      max_retries,
      initial_delay,
    }
  }

  pub fn from_settings(settings: &CompletionSettings) -> Self {
    Self::new(settings.max_retries, settings.initial_retry_delay())
  }

  /// Delay to wait after `attempts_made` rate-limited attempts, or `None`
  /// once the retry budget is spent.
  pub fn delay_before_retry(&self, attempts_made: u32) -> Option<Duration> {
    if attempts_made == 0 || attempts_made > self.max_retries {
      return None;
    }
    let factor = 2u32.saturating_pow(attempts_made - 1);
    Some(self.initial_delay.saturating_mul(factor))
  }
}
