//! Controlled-vocabulary enforcement (spec §9): the LLM returns free text,
//! the core accepts only tags that were declared in configuration.

use std::collections::HashSet;

/// An ordered list of architectural concern tags, with O(1) membership checks.
#[derive(Clone, Debug)]
pub struct Vocabulary {
    ordered: Vec<String>,
    known: HashSet<String>,
}

impl Vocabulary {
    pub fn new(concerns: Vec<String>) -> Self {
        let known = concerns.iter().cloned().collect();
        Self {
            ordered: concerns,
            known,
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.known.contains(tag)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.ordered
    }

    /// Keeps only tags present in the vocabulary (I3); unknown tags are
    /// silently dropped, never stored. Preserves the LLM's emission order
    /// but removes duplicates.
    pub fn filter_known(&self, tags: impl IntoIterator<Item = String>) -> Vec<String> {
        let mut seen = HashSet::new();
        tags.into_iter()
            .filter(|t| self.known.contains(t))
            .filter(|t| seen.insert(t.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_unknown_tags_and_dedupes() {
        let vocab = Vocabulary::new(vec!["upgrade-safety".into(), "correctness".into()]);
        let filtered = vocab.filter_known(vec![
            "correctness".to_string(),
            "vibes".to_string(),
            "correctness".to_string(),
        ]);
        assert_eq!(filtered, vec!["correctness".to_string()]);
    }
}
