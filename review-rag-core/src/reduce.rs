//! Comment reduction (spec §4.2): strips fenced code blocks and
//! block-quoted lines, then collapses whitespace, before a comment is sent
//! to the LLM for classification/summarization.
//!
//! Rationale: code already lives in `diff_context`; what gets embedded is
//! the reviewer's natural-language reasoning.

/// Strips fenced code blocks (```` ``` ````-delimited), strips
/// block-quoted lines (leading `>`), and collapses whitespace.
///
/// Idempotent (P7): reducing an already-reduced comment returns the same
/// string, since the output contains no fences, no quote markers, and no
/// run of more than one space.
pub fn reduce_comment(comment: &str) -> String {
    let without_fences = strip_fenced_blocks(comment);
    let without_quotes = strip_blockquotes(&without_fences);
    collapse_whitespace(&without_quotes)
}

fn strip_fenced_blocks(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_fence = false;
    for line in s.lines() {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        out.push_str(line);
        out.push('\n');
    }
    out
}

fn strip_blockquotes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for line in s.lines() {
        if line.trim_start().starts_with('>') {
            continue;
        }
        out.push_str(line);
        out.push('\n');
    }
    out
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn strips_fenced_code_and_quotes_and_collapses_spaces() {
        let raw = "Please   fix this.\n```rust\nfn foo() {}\n```\n> previously we said X\nThanks.";
        let reduced = reduce_comment(raw);
        assert_eq!(reduced, "Please fix this. Thanks.");
    }

    #[test]
    fn plain_text_collapses_whitespace_only() {
        assert_eq!(reduce_comment("a\n\nb   c"), "a b c");
    }

    // P7: reduction is idempotent.
    #[test]
    fn idempotent_on_known_inputs() {
        let inputs = [
            "Please   fix this.\n```rust\nfn foo() {}\n```\n> quoted\nDone.",
            "no special formatting here",
            "",
        ];
        for input in inputs {
            let once = reduce_comment(input);
            let twice = reduce_comment(&once);
            assert_eq!(once, twice);
        }
    }

    proptest! {
        #[test]
        fn idempotent_for_arbitrary_text(s in ".{0,200}") {
            let once = reduce_comment(&s);
            let twice = reduce_comment(&once);
            prop_assert_eq!(once, twice);
        }
    }
}
