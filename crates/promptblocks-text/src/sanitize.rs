//! Model output sanitization.
//!
//! Models are asked for plain text but occasionally wrap the answer in a JSON
//! envelope or a fenced code block. [`sanitize`] peels those wrappers off.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// A whole fence line: the marker, an optional language tag, and the newline.
static FENCE_LINE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?m)^[ \t]*```[\w+.\-]*[ \t]*\r?$\n?").expect("fence line pattern is valid")
});

/// Leftover inline fence marker.
const FENCE_MARKER: &str = "```";

/// Fields checked, in order, when unwrapping a JSON object envelope.
const TEXT_FIELDS: [&str; 4] = ["text", "content", "output", "result"];

/// Normalize a raw model response into plain human-readable text.
///
/// A response that is a complete JSON object or array is unwrapped: the first
/// non-empty `text`, `content`, `output` or `result` field wins, arrays are
/// joined with newlines, and any other object is pretty-printed. Text that
/// only looks like JSON but does not parse is left alone. Fence lines (with
/// their language tag) are then dropped, and any inline marker is removed
/// without touching the text around it.
///
/// The pass repeats until the text stops changing, which makes the function
/// idempotent even for nested wrappers (a fenced JSON envelope, say).
pub fn sanitize(text: &str) -> String {
  let mut current = sanitize_once(text);
  loop {
    let next = sanitize_once(&current);
    if next == current {
      return current;
    }
    current = next;
  }
}

fn sanitize_once(text: &str) -> String {
  let trimmed = text.trim();

  let unwrapped = if looks_like_json(trimmed) {
    match serde_json::from_str::<Value>(trimmed) {
      Ok(value) => unwrap_json(value),
      Err(_) => trimmed.to_string(),
    }
  } else {
    trimmed.to_string()
  };

  FENCE_LINE
    .replace_all(&unwrapped, "")
    .replace(FENCE_MARKER, "")
    .trim()
    .to_string()
}

fn looks_like_json(text: &str) -> bool {
  (text.starts_with('{') && text.ends_with('}')) || (text.starts_with('[') && text.ends_with(']'))
}

fn unwrap_json(value: Value) -> String {
  if let Value::Object(map) = &value {
    for field in TEXT_FIELDS {
      if let Some(inner) = map.get(field)
        && is_truthy(inner)
      {
        return value_to_text(inner);
      }
    }
  }

  match value {
    Value::Array(items) => items
      .iter()
      .map(array_item_to_text)
      .collect::<Vec<_>>()
      .join("\n"),
    other => serde_json::to_string_pretty(&other).unwrap_or_else(|_| other.to_string()),
  }
}

/// Whether a field value counts as present (non-empty, non-zero, non-null).
fn is_truthy(value: &Value) -> bool {
  match value {
    Value::Null => false,
    Value::Bool(b) => *b,
    Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
    Value::String(s) => !s.is_empty(),
    Value::Array(_) | Value::Object(_) => true,
  }
}

fn value_to_text(value: &Value) -> String {
  match value {
    Value::String(s) => s.clone(),
    other => other.to_string(),
  }
}

fn array_item_to_text(value: &Value) -> String {
  match value {
    Value::Null => String::new(),
    other => value_to_text(other),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_unwraps_result_field() {
    assert_eq!(sanitize(r#"{"result":"hello"}"#), "hello");
  }

  #[test]
  fn test_plain_text_is_trimmed_only() {
    assert_eq!(sanitize("not json"), "not json");
    assert_eq!(sanitize("  not json \n"), "not json");
  }

  #[test]
  fn test_field_precedence() {
    let raw = r#"{"result":"r","output":"o","content":"c","text":"t"}"#;
    assert_eq!(sanitize(raw), "t");

    let raw = r#"{"result":"r","output":"o","text":""}"#;
    assert_eq!(sanitize(raw), "o");
  }

  #[test]
  fn test_array_joined_with_newlines() {
    assert_eq!(sanitize(r#"["one", "two", "three"]"#), "one\ntwo\nthree");
  }

  #[test]
  fn test_other_object_pretty_printed() {
    let out = sanitize(r#"{"name":"Ada","age":36}"#);
    assert_eq!(out, "{\n  \"name\": \"Ada\",\n  \"age\": 36\n}");
  }

  #[test]
  fn test_invalid_json_left_unchanged() {
    assert_eq!(sanitize("{not really json}"), "{not really json}");
    assert_eq!(sanitize("[1, 2"), "[1, 2");
  }

  #[test]
  fn test_strips_code_fences() {
    assert_eq!(sanitize("```\nplain body\n```"), "plain body");
    assert_eq!(sanitize("```markdown\n| a | b |\n```"), "| a | b |");
    assert_eq!(sanitize("  ```rust  \r\nfn main() {}\r\n```"), "fn main() {}");
  }

  #[test]
  fn test_inline_fence_keeps_words() {
    assert_eq!(sanitize("Run ```ls -la``` now"), "Run ls -la now");
    assert_eq!(
      sanitize("Use the word```important``` here"),
      "Use the wordimportant here"
    );
  }

  #[test]
  fn test_fenced_json_envelope() {
    let raw = "```json\n{\"text\": \"inside\"}\n```";
    assert_eq!(sanitize(raw), "inside");
  }

  #[test]
  fn test_empty_input() {
    assert_eq!(sanitize(""), "");
    assert_eq!(sanitize("   "), "");
  }

  #[test]
  fn test_idempotent() {
    let samples = [
      "",
      "plain text",
      r#"{"result":"hello"}"#,
      r#"{"text":"{\"result\":\"nested\"}"}"#,
      r#"["{\"a\":1}", "b"]"#,
      r#"{"a":{"b":[1,2,3]}}"#,
      "```json\n[\"x\", null, 3]\n```",
      "{broken",
      "text with ``` in the middle",
      "Run ```ls -la``` now",
      "```python\nprint(1)\n```\nthen ```inline```",
    ];

    for raw in samples {
      let once = sanitize(raw);
      assert_eq!(sanitize(&once), once, "not idempotent for {raw:?}");
    }
  }
}
