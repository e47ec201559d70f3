//! Query evaluation over an [`InvertedIndex`].
//!
//! Retrieval is OR across query terms: a document matching any term is a
//! candidate. Each matched term adds its field-weighted frequency to the
//! document's score, and every matched term beyond the first adds
//! [`FieldWeights::match_boost`]. Ties rank by ascending document id.

use crate::config::FieldWeights;
use crate::error::SearchError;
use crate::index::InvertedIndex;
use crate::store::DocumentStore;
use crate::tokenizer::Analyzer;
use crate::{DocId, DocumentRecord};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub record: DocumentRecord,
    pub score: f32,
}

pub fn search(
    index: &InvertedIndex,
    store: &DocumentStore,
    analyzer: &Analyzer,
    weights: &FieldWeights,
    query: &str,
    limit: usize,
) -> Result<Vec<SearchHit>, SearchError> {
    search_within(index, store, analyzer, weights, query, limit, None)
}

/// Like [`search`], but fails with [`SearchError::Timeout`] once `budget` has elapsed.
pub fn search_within(
    index: &InvertedIndex,
    store: &DocumentStore,
    analyzer: &Analyzer,
    weights: &FieldWeights,
    query: &str,
    limit: usize,
    budget: Option<Duration>,
) -> Result<Vec<SearchHit>, SearchError> {
    let start = Instant::now();
    let check_budget = || match budget {
        Some(budget) if start.elapsed() >= budget => Err(SearchError::Timeout { budget }),
        _ => Ok(()),
    };

    if limit == 0 {
        return Ok(vec![]);
    }
    let mut seen = HashSet::new();
    let terms: Vec<String> = analyzer.analyze(query).into_iter().filter(|t| seen.insert(t.clone())).collect();
    if terms.is_empty() {
        return Ok(vec![]);
    }

    // doc -> (weighted frequency sum, matched term count)
    let mut acc: HashMap<DocId, (f32, u32)> = HashMap::new();
    for term in &terms {
        check_budget()?;
        tracing::debug!(term = term.as_str(), df = index.df(term), "query term");
        let Some(postings) = index.postings_for(term) else { continue };
        for p in postings {
            let entry = acc.entry(p.doc_id).or_insert((0.0, 0));
            entry.0 += p.freq.weighted(weights);
            entry.1 += 1;
        }
    }
    check_budget()?;

    let mut scored: Vec<(DocId, f32)> = acc
        .into_iter()
        .map(|(doc_id, (sum, matched))| (doc_id, sum + weights.match_boost * matched.saturating_sub(1) as f32))
        .collect();
    let total_hits = scored.len();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    scored.truncate(limit);

    let mut hits = Vec::with_capacity(scored.len());
    for (doc_id, score) in scored {
        let record = store.get(doc_id).map_err(|err| {
            tracing::error!(doc_id, query, "posting references a document missing from the store");
            err
        })?;
        hits.push(SearchHit { record: record.clone(), score });
    }
    tracing::debug!(query, terms = terms.len(), total_hits, returned = hits.len(), took_us = start.elapsed().as_micros() as u64, "search complete");
    Ok(hits)
}
