//! Published search state.
//!
//! A [`Snapshot`] pairs a document store with the index built from it. The
//! engine keeps the active snapshot behind an `Arc` and replaces it wholesale
//! on rebuild; readers that already hold the old `Arc` finish against it.

use crate::config::SearchConfig;
use crate::error::{BuildError, SearchError};
use crate::index::InvertedIndex;
use crate::query::{search_within, SearchHit};
use crate::store::DocumentStore;
use crate::tokenizer::Analyzer;
use crate::DocumentRecord;
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug)]
pub struct Snapshot {
    pub store: DocumentStore,
    pub index: InvertedIndex,
    pub analyzer: Analyzer,
    pub generation: u64,
}

impl Snapshot {
    /// Populate the store first, then index the validated records.
    pub fn build(records: Vec<DocumentRecord>, analyzer: Analyzer, generation: u64) -> Result<Self, BuildError> {
        let store = DocumentStore::new(records)?;
        let index = InvertedIndex::build(store.all(), &analyzer)?;
        Ok(Self { store, index, analyzer, generation })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineStats {
    pub num_docs: usize,
    pub num_terms: usize,
    pub num_postings: usize,
    pub generation: u64,
}

#[derive(Debug)]
pub struct SearchEngine {
    active: RwLock<Arc<Snapshot>>,
    next_generation: AtomicU64,
    config: SearchConfig,
}

impl SearchEngine {
    pub fn new(records: Vec<DocumentRecord>, config: SearchConfig) -> Result<Self, BuildError> {
        let snapshot = Snapshot::build(records, Analyzer::new(config.tokenizer), 1)?;
        tracing::info!(num_docs = snapshot.store.len(), num_terms = snapshot.index.num_terms(), "search index ready");
        Ok(Self { active: RwLock::new(Arc::new(snapshot)), next_generation: AtomicU64::new(2), config })
    }

    /// The currently published snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.active.read())
    }

    /// Build a replacement snapshot and publish it. On error the active snapshot is untouched.
    pub fn rebuild(&self, records: Vec<DocumentRecord>) -> Result<(), BuildError> {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let snapshot = match Snapshot::build(records, Analyzer::new(self.config.tokenizer), generation) {
            Ok(s) => s,
            Err(err) => {
                tracing::warn!(%err, "rebuild rejected; keeping previous index");
                return Err(err);
            }
        };
        let num_docs = snapshot.store.len();
        let fresh = Arc::new(snapshot);
        let mut active = self.active.write();
        // A slower concurrent rebuild must not overwrite a newer one.
        if active.generation < generation {
            *active = fresh;
            tracing::info!(generation, num_docs, "published rebuilt index");
        } else {
            tracing::debug!(generation, active = active.generation, "rebuild superseded by a newer index; not published");
        }
        Ok(())
    }

    pub fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>, SearchError> {
        let snap = self.snapshot();
        search_within(
            &snap.index,
            &snap.store,
            &snap.analyzer,
            &self.config.weights,
            query,
            limit,
            self.config.time_budget(),
        )
    }

    pub fn stats(&self) -> EngineStats {
        let snap = self.snapshot();
        EngineStats {
            num_docs: snap.store.len(),
            num_terms: snap.index.num_terms(),
            num_postings: snap.index.num_postings(),
            generation: snap.generation,
        }
    }
}
