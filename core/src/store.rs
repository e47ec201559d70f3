use crate::error::{BuildError, NotFoundError};
use crate::{DocId, DocumentRecord};
use std::collections::HashMap;

/// Original records in load order, addressable by id.
#[derive(Debug, Default)]
pub struct DocumentStore {
    records: Vec<DocumentRecord>,
    by_id: HashMap<DocId, usize>,
}

impl DocumentStore {
    /// Validate and take ownership of `records`.
    ///
    /// Ids and urls must be unique; title, excerpt and url must be non-blank.
    pub fn new(records: Vec<DocumentRecord>) -> Result<Self, BuildError> {
        let mut by_id: HashMap<DocId, usize> = HashMap::with_capacity(records.len());
        {
            let mut by_url: HashMap<&str, DocId> = HashMap::with_capacity(records.len());
            for (pos, rec) in records.iter().enumerate() {
                if by_id.insert(rec.id, pos).is_some() {
                    return Err(BuildError::DuplicateId(rec.id));
                }
                for (field, value) in [("title", &rec.title), ("excerpt", &rec.excerpt), ("url", &rec.url)] {
                    if value.trim().is_empty() {
                        return Err(BuildError::EmptyField { id: rec.id, field });
                    }
                }
                if let Some(first) = by_url.insert(rec.url.as_str(), rec.id) {
                    return Err(BuildError::DuplicateUrl { url: rec.url.clone(), first, second: rec.id });
                }
            }
        }
        Ok(Self { records, by_id })
    }

    pub fn get(&self, id: DocId) -> Result<&DocumentRecord, NotFoundError> {
        self.by_id
            .get(&id)
            .map(|&pos| &self.records[pos])
            .ok_or(NotFoundError(id))
    }

    /// Every record in load order. Call again to restart.
    pub fn all(&self) -> impl Iterator<Item = &DocumentRecord> + '_ {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
