//! Shared JSON extraction (spec §4.6).
//!
//! LLM output is treated as untrusted text: it may be wrapped in Markdown
//! code fences or preceded/followed by preface text. This extractor strips
//! the wrapping and recovers the JSON array payload.

use crate::errors::CoreError;

/// Strips leading/trailing whitespace and ```` ```json ```` / ```` ``` ````
/// fences, scans for the first `[`, finds its matching `]` by bracket-depth
/// counting (honoring string literals and escapes), and parses the slice.
///
/// Returns [`CoreError::JsonExtraction`] with the offending text attached if
/// no balanced array can be found, or [`CoreError::JsonParse`] if the slice
/// found is not valid JSON.
pub fn extract_json_array(raw: &str) -> Result<serde_json::Value, CoreError> {
    let stripped = strip_fences(raw.trim());
    let slice = find_array_slice(stripped).ok_or_else(|| CoreError::JsonExtraction {
        reason: "no balanced JSON array found".to_string(),
        excerpt: excerpt(stripped),
    })?;
    serde_json::from_str(slice).map_err(CoreError::JsonParse)
}

fn strip_fences(s: &str) -> &str {
    let s = s.trim();
    let Some(rest) = s.strip_prefix("```") else {
        return s;
    };
    // Drop an optional language tag on the fence's opening line (e.g. `json`).
    let rest = rest
        .strip_prefix("json")
        .unwrap_or(rest)
        .trim_start_matches('\n');
    rest.rfind("```").map(|end| &rest[..end]).unwrap_or(rest).trim()
}

/// Scans for the first `[` and returns the slice up to (and including) its
/// matching `]`, tracking string literals and escapes so brackets inside
/// strings never affect the depth count.
fn find_array_slice(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    let start = s.find('[')?;

    let mut depth = 0i32;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&s[start..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

fn excerpt(s: &str) -> String {
    s.chars().take(240).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_bare_array() {
        let v = extract_json_array(r#"[{"a": 1}]"#).unwrap();
        assert_eq!(v, serde_json::json!([{"a": 1}]));
    }

    #[test]
    fn strips_json_fence_and_preface() {
        let raw = "Here is the result:\n```json\n[{\"concern\": \"correctness\"}]\n```\nThanks!";
        let v = extract_json_array(raw).unwrap();
        assert_eq!(v, serde_json::json!([{"concern": "correctness"}]));
    }

    #[test]
    fn strips_plain_fence() {
        let raw = "```\n[1, 2, 3]\n```";
        let v = extract_json_array(raw).unwrap();
        assert_eq!(v, serde_json::json!([1, 2, 3]));
    }

    #[test]
    fn honors_brackets_inside_strings() {
        let raw = r#"[{"guideline": "use a Vec<[T]> sparingly"}]"#;
        let v = extract_json_array(raw).unwrap();
        assert_eq!(v[0]["guideline"], "use a Vec<[T]> sparingly");
    }

    #[test]
    fn no_array_is_an_error() {
        let err = extract_json_array("not json at all").unwrap_err();
        assert!(matches!(err, CoreError::JsonExtraction { .. }));
    }

    // P8: extraction succeeds for `prefix + <valid JSON array> + suffix`
    // when the array contains no unescaped brackets inside strings.
    proptest! {
        #[test]
        fn extracts_through_arbitrary_wrapping(
            prefix in "[^\\[\\]]{0,20}",
            suffix in "[^\\[\\]]{0,20}",
            tags in proptest::collection::vec("[a-z-]{1,12}", 0..6),
        ) {
            let array = serde_json::Value::Array(
                tags.iter().cloned().map(serde_json::Value::String).collect(),
            );
            let array_text = serde_json::to_string(&array).unwrap();
            let wrapped = format!("{prefix}{array_text}{suffix}");
            let parsed = extract_json_array(&wrapped).unwrap();
            prop_assert_eq!(parsed, array);
        }
    }
}
