//! `Guideline`: the consumable artifact Distill emits (spec §3, §4.4, §4.5).

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Guideline {
    /// Short label; one of the controlled vocabulary.
    pub concern: String,
    /// Imperative rule.
    pub guideline: String,
    /// 2-4 sentences.
    pub rationale: String,
    /// Concrete patterns; free text.
    pub examples: String,
    /// Source cluster label, present only for the clustered strategy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<u32>,
}
