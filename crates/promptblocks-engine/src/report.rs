//! Plain-text and markdown renderings of step results, for copying and export.

use chrono::{DateTime, TimeZone};

use crate::result::StepResult;

const SEPARATOR: &str = "\n\n---\n\n";

/// Outputs of the successful steps, separated by horizontal rules.
pub fn render_plain(steps: &[StepResult]) -> String {
  steps
    .iter()
    .filter(|s| s.success)
    .map(|s| s.output.as_str())
    .collect::<Vec<_>>()
    .join(SEPARATOR)
}

/// Markdown export: a header with the generation time, then one section per
/// successful step.
pub fn render_markdown<Tz>(steps: &[StepResult], generated_at: &DateTime<Tz>) -> String
where
  Tz: TimeZone,
  Tz::Offset: std::fmt::Display,
{
  let mut out = String::from("# Workflow Results\n\n");
  out.push_str(&format!(
    "Generated: {}\n\n",
    generated_at.format("%Y-%m-%d %H:%M:%S")
  ));

  for step in steps.iter().filter(|s| s.success) {
    out.push_str(&format!("## {}\n\n{}{}", step.block_name, step.output, SEPARATOR));
  }

  out
}
