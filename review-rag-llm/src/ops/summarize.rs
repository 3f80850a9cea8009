//! Summarization (spec §4.2): ask the slow profile for a 4-6 sentence
//! distilled rationale, plus best-effort supporting evidence quotes
//! (SPEC_FULL.md's resolution of the `evidence` Open Question).

use tracing::warn;

use crate::error::LlmError;
use crate::service_profiles::LlmServiceProfiles;

const SYSTEM_PROMPT: &str = "\
You are an expert code reviewer distilling a review comment into an \
architectural rationale. Respond with ONLY a JSON object of the shape \
{\"summary\": string, \"evidence\": string[]}. `summary` must be 4 to 6 \
sentences explaining the architectural reasoning behind the comment. \
`evidence` is 0 to 3 short verbatim quotes from the comment that support \
the summary; use an empty array if none are appropriate.";

pub struct Summary {
    pub text: String,
    pub evidence: Option<Vec<String>>,
}

/// Calls the slow profile to summarize `reduced_comment` in light of
/// `diff_context` and the already-classified `concerns`.
pub async fn summarize(
    llm: &LlmServiceProfiles,
    reduced_comment: &str,
    diff_context: Option<&str>,
    concerns: &[String],
) -> Result<Summary, LlmError> {
    let mut prompt = format!("Concerns: {}\n\nComment:\n{}", concerns.join(", "), reduced_comment);
    if let Some(diff) = diff_context {
        prompt.push_str("\n\nDiff context:\n");
        prompt.push_str(diff);
    }

    let raw = llm.generate_slow(&prompt, Some(SYSTEM_PROMPT)).await?;

    Ok(match extract_json_object(&raw) {
        Some(obj) => Summary {
            text: obj
                .get("summary")
                .and_then(|v| v.as_str())
                .unwrap_or(raw.trim())
                .to_string(),
            evidence: obj.get("evidence").and_then(|v| v.as_array()).map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            }),
        },
        None => {
            warn!(response = %raw, "summarization response was not a JSON object; using raw text");
            Summary {
                text: raw.trim().to_string(),
                evidence: None,
            }
        }
    })
}

/// Bracket-depth scan for a `{ ... }` object, mirroring
/// `review_rag_core::extract_json_array`'s array scan but for objects. Kept
/// local: the shared extractor's contract (spec §4.6) is array-specific.
fn extract_json_object(raw: &str) -> Option<serde_json::Map<String, serde_json::Value>> {
    let s = raw.trim();
    let s = s
        .strip_prefix("```json")
        .or_else(|| s.strip_prefix("```"))
        .map(|r| r.trim_start_matches('\n'))
        .unwrap_or(s);
    let s = s.rfind("```").map(|end| &s[..end]).unwrap_or(s).trim();

    let bytes = s.as_bytes();
    let start = s.find('{')?;
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
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    let slice = &s[start..=i];
                    return serde_json::from_str::<serde_json::Value>(slice)
                        .ok()
                        .and_then(|v| v.as_object().cloned());
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_object_through_fence_and_preface() {
        let raw = "Sure, here you go:\n```json\n{\"summary\": \"x\", \"evidence\": [\"a\"]}\n```";
        let obj = extract_json_object(raw).unwrap();
        assert_eq!(obj.get("summary").unwrap(), "x");
    }
}
