//! Response extraction — recovers a JSON value from an LLM's free-text reply.

use serde_json::Value;
use thiserror::Error;

/// How hard the extractor tries before giving up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strictness {
    /// Fenced block, then the whole text.
    Strict,
    /// Fenced block, then the whole text, then a greedy brace scan.
    Lenient,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    /// A ```json block was present but its contents did not parse.
    /// Terminal: the remaining strategies are NOT attempted.
    #[error("Found a JSON block, but it contained invalid JSON: {0}")]
    MalformedFencedBlock(String),

    #[error("Could not find a valid JSON object in the model's response")]
    NotFound,
}

/// Extracts a JSON value from raw model output.
///
/// Strategy order, first success wins:
/// 1. A ```json fenced block (nearest closing fence). If the block is
///    present but malformed, fail immediately — the surrounding text is
///    never retried.
/// 2. The entire trimmed text.
/// 3. (`Lenient` only) the substring from the first `{` to the last `}`.
///    Deliberately greedy: two independent objects over-capture and fail.
pub fn extract_json(text: &str, strictness: Strictness) -> Result<Value, ExtractError> {
    if let Some(inner) = fenced_json_block(text) {
        return serde_json::from_str(inner)
            .map_err(|e| ExtractError::MalformedFencedBlock(e.to_string()));
    }

    if let Ok(value) = serde_json::from_str(text.trim()) {
        return Ok(value);
    }

    if strictness == Strictness::Lenient {
        if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
            if start < end {
                if let Ok(value) = serde_json::from_str(&text[start..=end]) {
                    return Ok(value);
                }
            }
        }
    }

    Err(ExtractError::NotFound)
}

/// Returns the trimmed interior of the first ```json ... ``` block, if any.
fn fenced_json_block(text: &str) -> Option<&str> {
    let start = text.find("```json")?;
    let rest = &text[start + "```json".len()..];
    let end = rest.find("```")?;
    Some(rest[..end].trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fenced_block_round_trips() {
        let value = json!({"keywords": ["Go", "Kubernetes"], "count": 2});
        let text = format!("```json\n{}\n```", serde_json::to_string(&value).unwrap());
        assert_eq!(extract_json(&text, Strictness::Strict).unwrap(), value);
    }

    #[test]
    fn test_fenced_block_with_surrounding_prose() {
        let text = "Here is the result:\n```json\n{\"a\": 1}\n```\nLet me know!";
        assert_eq!(
            extract_json(text, Strictness::Strict).unwrap(),
            json!({"a": 1})
        );
    }

    #[test]
    fn test_bare_json_round_trips() {
        let value = json!({"answer": "Use the STAR method", "nested": {"x": [1, 2, 3]}});
        let text = serde_json::to_string(&value).unwrap();
        assert_eq!(extract_json(&text, Strictness::Strict).unwrap(), value);
    }

    #[test]
    fn test_bare_json_with_whitespace_round_trips() {
        let text = "  \n {\"a\": 1} \n ";
        assert_eq!(
            extract_json(text, Strictness::Strict).unwrap(),
            json!({"a": 1})
        );
    }

    #[test]
    fn test_malformed_fenced_block_is_terminal() {
        // The text outside the fence is irrelevant; a bad fence never falls
        // through to the whole-text or brace-scan strategies.
        let text = "```json\n{not valid}\n```";
        let err = extract_json(text, Strictness::Strict).unwrap_err();
        assert!(matches!(err, ExtractError::MalformedFencedBlock(_)));
    }

    #[test]
    fn test_malformed_fenced_block_is_terminal_even_when_lenient() {
        let text = "{\"valid\": true} ```json\n{oops\n``` {\"also\": \"valid\"}";
        let err = extract_json(text, Strictness::Lenient).unwrap_err();
        assert!(matches!(err, ExtractError::MalformedFencedBlock(_)));
    }

    #[test]
    fn test_no_json_anywhere_is_not_found() {
        let err = extract_json("no json here at all", Strictness::Strict).unwrap_err();
        assert_eq!(err, ExtractError::NotFound);
    }

    #[test]
    fn test_strict_mode_does_not_brace_scan() {
        let text = "The answer is {\"a\": 1} as requested.";
        let err = extract_json(text, Strictness::Strict).unwrap_err();
        assert_eq!(err, ExtractError::NotFound);
    }

    #[test]
    fn test_lenient_brace_scan_recovers_embedded_object() {
        let text = "Sure! Here you go: {\"keywords\": [\"Rust\"]} — hope that helps.";
        assert_eq!(
            extract_json(text, Strictness::Lenient).unwrap(),
            json!({"keywords": ["Rust"]})
        );
    }

    #[test]
    fn test_lenient_brace_scan_is_greedy_across_two_objects() {
        // First-{ to last-} spans both objects, so the parse fails. This
        // over-capture is intentional and must stay.
        let text = "prefix {\"a\":1} suffix {\"b\":2}";
        let err = extract_json(text, Strictness::Lenient).unwrap_err();
        assert_eq!(err, ExtractError::NotFound);
    }

    #[test]
    fn test_first_fenced_block_wins() {
        let text = "```json\n{\"first\": true}\n```\n```json\n{\"second\": true}\n```";
        assert_eq!(
            extract_json(text, Strictness::Strict).unwrap(),
            json!({"first": true})
        );
    }

    #[test]
    fn test_fenced_array_round_trips() {
        let text = "```json\n[1, 2, 3]\n```";
        assert_eq!(extract_json(text, Strictness::Strict).unwrap(), json!([1, 2, 3]));
    }

    #[test]
    fn test_error_messages_are_distinguishable() {
        let malformed = extract_json("```json\n{bad\n```", Strictness::Strict).unwrap_err();
        let not_found = extract_json("nothing", Strictness::Strict).unwrap_err();
        assert!(malformed.to_string().contains("JSON block"));
        assert!(not_found.to_string().contains("Could not find"));
        assert_ne!(malformed.to_string(), not_found.to_string());
    }
}
