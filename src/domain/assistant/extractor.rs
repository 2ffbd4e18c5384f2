//! Structured payload extraction from assistant text.
//!
//! Assistant replies may embed machine-readable data, usually in a fenced
//! ```json block and occasionally as a bare object. Extraction never fails:
//! text without recoverable JSON simply has no payload.

use serde_json::Value;

const FENCE: &str = "```";

/// Returns the first structured payload found in `text`.
///
/// Fenced blocks tagged `json` are tried first, in order. When none parse,
/// each balanced top-level `{...}` span is tried in order and the first
/// one that parses as a JSON object wins.
pub fn extract_payload(text: &str) -> Option<Value> {
    fenced_json_blocks(text)
        .find_map(|block| serde_json::from_str::<Value>(block.trim()).ok())
        .or_else(|| {
            balanced_object_spans(text)
                .into_iter()
                .filter_map(|span| serde_json::from_str::<Value>(span).ok())
                .find(Value::is_object)
        })
}

/// Bodies of fenced blocks whose info string is `json`.
fn fenced_json_blocks(text: &str) -> impl Iterator<Item = &str> + '_ {
    let mut rest = text;
    std::iter::from_fn(move || loop {
        let open = rest.find(FENCE)?;
        let after_marker = &rest[open + FENCE.len()..];
        let line_end = after_marker.find('\n').unwrap_or(after_marker.len());
        let info = after_marker[..line_end].trim();
        let body_start = (line_end + 1).min(after_marker.len());
        let body = &after_marker[body_start..];
        let close = body.find(FENCE)?;
        rest = &body[close + FENCE.len()..];

        if info.eq_ignore_ascii_case("json") {
            return Some(&body[..close]);
        }
    })
}

/// Balanced `{...}` spans at nesting depth zero, in order of appearance.
///
/// Braces inside JSON string literals are ignored. Text outside a span is
/// prose and is not string-tracked.
fn balanced_object_spans(text: &str) -> Vec<&str> {
    let mut spans = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if depth == 0 {
            if c == '{' {
                depth = 1;
                start = i;
                in_string = false;
                escaped = false;
            }
            continue;
        }

        if escaped {
            escaped = false;
            continue;
        }

        match c {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            _ if in_string => {}
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    spans.push(&text[start..=i]);
                }
            }
            _ => {}
        }
    }
    spans
}
