use crate::error::BuildError;
use crate::tokenizer::Analyzer;
use crate::{DocId, DocumentRecord, Field, FieldFrequencies, Posting};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Default)]
pub struct InvertedIndex {
    pub postings: HashMap<String, Vec<Posting>>, // postings sorted by doc_id
    pub num_docs: u32,
}

impl InvertedIndex {
    /// Build an index over the title, excerpt and tags of `records`.
    ///
    /// Either every record is indexed or a `BuildError` is returned and nothing is.
    pub fn build<'a, I>(records: I, analyzer: &Analyzer) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = &'a DocumentRecord>,
    {
        let mut seen: HashSet<DocId> = HashSet::new();
        let mut raw: HashMap<String, HashMap<DocId, FieldFrequencies>> = HashMap::new();
        for rec in records {
            if !seen.insert(rec.id) {
                return Err(BuildError::DuplicateId(rec.id));
            }
            let mut add = |field: Field, text: &str| {
                for term in analyzer.analyze(text) {
                    raw.entry(term).or_default().entry(rec.id).or_default().bump(field);
                }
            };
            add(Field::Title, &rec.title);
            add(Field::Excerpt, &rec.excerpt);
            for tag in &rec.tags {
                add(Field::Tags, tag);
            }
        }

        let postings: HashMap<String, Vec<Posting>> = raw
            .into_iter()
            .map(|(term, docs)| {
                let mut plist: Vec<Posting> = docs.into_iter().map(|(doc_id, freq)| Posting { doc_id, freq }).collect();
                plist.sort_by_key(|p| p.doc_id);
                (term, plist)
            })
            .collect();

        let num_docs = seen.len() as u32;
        tracing::debug!(num_docs, num_terms = postings.len(), "built inverted index");
        Ok(Self { postings, num_docs })
    }

    pub fn postings_for(&self, term: &str) -> Option<&[Posting]> {
        self.postings.get(term).map(Vec::as_slice)
    }

    pub fn num_terms(&self) -> usize {
        self.postings.len()
    }

    pub fn num_postings(&self) -> usize {
        self.postings.values().map(Vec::len).sum()
    }

    /// Number of documents containing `term`.
    pub fn df(&self, term: &str) -> usize {
        self.postings_for(term).map_or(0, <[Posting]>::len)
    }
}
