//! Structured-response extraction
//!
//! Turns the model's free-text reply into a [`ResearchResult`]. Replies are
//! often fenced in a markdown code block, so the text is normalized first;
//! anything that still fails to decode degrades to a deterministic fallback
//! record instead of an error. Extraction is total: no input makes it fail.

use serde::{Deserialize, Serialize};

/// Structured research answer returned by the `/research` endpoint
///
/// `topic` and `summary` are always present; the list fields default to
/// empty rather than being absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchResult {
    pub topic: String,
    pub summary: String,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub tools_used: Vec<String>,
}

/// Strip surrounding markdown code fences and whitespace
///
/// Removes a leading ```` ```json ```` or ```` ``` ```` opener and a
/// trailing ```` ``` ```` closer. Runs to a fixpoint, so the function is
/// idempotent even on pathological doubly-fenced input:
/// `normalize_fences(normalize_fences(s)) == normalize_fences(s)`.
pub fn normalize_fences(text: &str) -> &str {
    let mut current = text.trim();
    loop {
        let before = current;

        if let Some(rest) = current.strip_prefix("```json") {
            current = rest;
        } else if let Some(rest) = current.strip_prefix("```") {
            current = rest;
        }

        if let Some(rest) = current.strip_suffix("```") {
            current = rest;
        }

        current = current.trim();
        if current == before {
            return current;
        }
    }
}

/// Decode the model's reply into a [`ResearchResult`]
///
/// Strict decode first: the normalized text must be a JSON object carrying
/// at least `topic` and `summary` (extra fields are tolerated, missing list
/// fields default to empty). On any decode failure (non-JSON text as well
/// as valid JSON of the wrong shape) the fallback record is built from the
/// ORIGINAL unnormalized text:
///
/// `{ topic: query, summary: text, sources: [lookup_label], tools_used: [lookup_label] }`
pub fn extract_research_result(text: &str, query: &str, lookup_label: &str) -> ResearchResult {
    let normalized = normalize_fences(text);

    match serde_json::from_str::<ResearchResult>(normalized) {
        Ok(result) => result,
        Err(decode_error) => {
            tracing::debug!(
                error = %decode_error,
                reply_length = text.len(),
                "Model reply is not schema JSON, building fallback record"
            );
            ResearchResult {
                topic: query.to_string(),
                summary: text.to_string(),
                sources: vec![lookup_label.to_string()],
                tools_used: vec![lookup_label.to_string()],
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_extract_parses_fenced_json() {
        let text = "```json\n{\"topic\":\"Cats\",\"summary\":\"Cats are mammals.\",\"sources\":[\"Wikipedia\"],\"tools_used\":[\"WikipediaQueryRun\"]}\n```";
        let result = extract_research_result(text, "Cats", "Wikipedia");
        assert_eq!(result.topic, "Cats");
        assert_eq!(result.summary, "Cats are mammals.");
        assert_eq!(result.sources, vec!["Wikipedia"]);
        assert_eq!(result.tools_used, vec!["WikipediaQueryRun"]);
    }

    #[test]
    fn test_extract_parses_unfenced_json() {
        let text = r#"{"topic":"Rust","summary":"A systems language."}"#;
        let result = extract_research_result(text, "ignored", "ignored");
        assert_eq!(result.topic, "Rust");
        assert_eq!(result.summary, "A systems language.");
        assert!(result.sources.is_empty());
        assert!(result.tools_used.is_empty());
    }

    #[test]
    fn test_extract_defaults_missing_list_fields() {
        let text = r#"{"topic":"Dogs","summary":"Loyal.","sources":["a"]}"#;
        let result = extract_research_result(text, "q", "L");
        assert_eq!(result.sources, vec!["a"]);
        assert!(result.tools_used.is_empty());
    }

    #[test]
    fn test_extract_tolerates_extra_fields() {
        let text = r#"{"topic":"Dogs","summary":"Loyal.","confidence":0.9}"#;
        let result = extract_research_result(text, "q", "L");
        assert_eq!(result.topic, "Dogs");
    }

    #[test]
    fn test_extract_handles_nested_braces_in_strings() {
        let text = r#"{"topic":"JSON","summary":"Objects look like {\"key\": {\"nested\": 1}}."}"#;
        let result = extract_research_result(text, "q", "L");
        assert_eq!(result.topic, "JSON");
        assert!(result.summary.contains("nested"));
    }

    #[test]
    fn test_extract_falls_back_on_free_text() {
        let result =
            extract_research_result("I couldn't find structured data.", "Dogs", "Wikipedia");
        assert_eq!(result.topic, "Dogs");
        assert_eq!(result.summary, "I couldn't find structured data.");
        assert_eq!(result.sources, vec!["Wikipedia"]);
        assert_eq!(result.tools_used, vec!["Wikipedia"]);
    }

    #[test]
    fn test_extract_falls_back_on_json_missing_summary() {
        // Valid JSON of the wrong shape is a decode failure, not a partial
        // record.
        let text = r#"{"topic":"Dogs"}"#;
        let result = extract_research_result(text, "Dogs", "Wikipedia");
        assert_eq!(result.topic, "Dogs");
        assert_eq!(result.summary, text);
        assert_eq!(result.sources, vec!["Wikipedia"]);
    }

    #[test]
    fn test_extract_falls_back_on_non_object_json() {
        let result = extract_research_result("[1, 2, 3]", "Lists", "Wikipedia");
        assert_eq!(result.topic, "Lists");
        assert_eq!(result.summary, "[1, 2, 3]");
    }

    #[test]
    fn test_extract_never_fails_on_empty_text() {
        let result = extract_research_result("", "Dogs", "Wikipedia");
        assert_eq!(result.topic, "Dogs");
        assert_eq!(result.summary, "");
        assert_eq!(result.sources, vec!["Wikipedia"]);
    }

    #[test]
    fn test_fallback_summary_keeps_original_fences() {
        // The fallback carries the unnormalized reply, fences included.
        let text = "```\nnot json at all\n```";
        let result = extract_research_result(text, "q", "L");
        assert_eq!(result.summary, text);
    }

    #[test]
    fn test_normalize_strips_json_fence() {
        assert_eq!(
            normalize_fences("```json\n{\"a\":1}\n```"),
            "{\"a\":1}"
        );
    }

    #[test]
    fn test_normalize_strips_bare_fence() {
        assert_eq!(normalize_fences("```\nhello\n```"), "hello");
    }

    #[test]
    fn test_normalize_leaves_unfenced_text_alone() {
        assert_eq!(normalize_fences("  plain text  "), "plain text");
    }

    #[test]
    fn test_normalize_handles_opener_only() {
        assert_eq!(normalize_fences("```json\n{\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn test_normalize_handles_closer_only() {
        assert_eq!(normalize_fences("{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn test_normalize_empty_input() {
        assert_eq!(normalize_fences(""), "");
        assert_eq!(normalize_fences("```"), "");
        assert_eq!(normalize_fences("```json```"), "");
    }

    proptest! {
        #[test]
        fn test_normalize_is_idempotent(s in "\\PC*") {
            let once = normalize_fences(&s);
            prop_assert_eq!(normalize_fences(once), once);
        }

        #[test]
        fn test_extract_is_total(s in "\\PC*", q in "\\PC*") {
            // No input may panic, and the serialized record always carries
            // all four fields.
            let result = extract_research_result(&s, &q, "Wikipedia");
            let value = serde_json::to_value(&result).expect("record serializes");
            prop_assert!(value.get("topic").is_some());
            prop_assert!(value.get("summary").is_some());
            prop_assert!(value.get("sources").is_some());
            prop_assert!(value.get("tools_used").is_some());
        }
    }
}
