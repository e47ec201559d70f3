use serde::{Deserialize, Serialize};

pub mod config;
pub mod engine;
pub mod error;
pub mod index;
pub mod query;
pub mod store;
pub mod tokenizer;

pub use config::{FieldWeights, SearchConfig, TokenizerConfig};
pub use engine::{EngineStats, SearchEngine, Snapshot};
pub use error::{BuildError, NotFoundError, SearchError};
pub use index::InvertedIndex;
pub use query::{search, search_within, SearchHit};
pub use store::DocumentStore;
pub use tokenizer::{tokenize, Analyzer};

pub type DocId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: DocId,
    pub title: String,
    pub excerpt: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    pub url: String,
    #[serde(default)]
    pub teaser: Option<String>,
}

/// Fields that contribute terms to the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Excerpt,
    Tags,
}

/// Occurrences of a term in each searchable field of one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldFrequencies {
    pub title: u32,
    pub excerpt: u32,
    pub tags: u32,
}

impl FieldFrequencies {
    pub fn bump(&mut self, field: Field) {
        match field {
            Field::Title => self.title += 1,
            Field::Excerpt => self.excerpt += 1,
            Field::Tags => self.tags += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.title + self.excerpt + self.tags
    }

    pub fn weighted(&self, weights: &FieldWeights) -> f32 {
        self.title as f32 * weights.title
            + self.excerpt as f32 * weights.excerpt
            + self.tags as f32 * weights.tags
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posting {
    pub doc_id: DocId,
    pub freq: FieldFrequencies,
}
