use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-field multipliers applied to term frequencies when scoring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldWeights {
    pub title: f32,
    pub excerpt: f32,
    pub tags: f32,
    /// Added once for every matched query term beyond the first.
    pub match_boost: f32,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self { title: 2.0, excerpt: 1.0, tags: 3.0, match_boost: 1.0 }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Drop common English stopwords.
    pub stopwords: bool,
    /// Apply English Snowball stemming.
    pub stem: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub weights: FieldWeights,
    pub tokenizer: TokenizerConfig,
    pub time_budget_ms: Option<u64>,
}

impl SearchConfig {
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    pub fn time_budget(&self) -> Option<Duration> {
        self.time_budget_ms.map(Duration::from_millis)
    }
}
