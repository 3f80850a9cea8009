//! Relevance filter (spec §4.1): a comment is kept iff at least one
//! configured architectural keyword appears, case-insensitively, in either
//! the PR title/body or the comment text itself.

/// Case-insensitive substring match of any `keyword` in `haystack`.
pub fn any_keyword_matches(haystack: &str, keywords: &[String]) -> bool {
    let haystack = haystack.to_lowercase();
    keywords.iter().any(|k| haystack.contains(&k.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_case_insensitively() {
        assert!(any_keyword_matches(
            "This COUPLING looks fragile",
            &["coupling".to_string()]
        ));
    }

    #[test]
    fn no_match_without_keyword() {
        assert!(!any_keyword_matches("looks fine to me", &["coupling".to_string()]));
    }

    #[test]
    fn empty_keywords_never_match() {
        assert!(!any_keyword_matches("anything at all", &[]));
    }
}
