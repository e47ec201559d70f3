//! Error types for index builds and queries.

use crate::DocId;
use std::time::Duration;
use thiserror::Error;

/// Rejected input. The build that produced it installs nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("duplicate document id {0}")]
    DuplicateId(DocId),

    #[error("duplicate url {url} (documents {first} and {second})")]
    DuplicateUrl { url: String, first: DocId, second: DocId },

    #[error("document {id} has an empty {field}")]
    EmptyField { id: DocId, field: &'static str },
}

/// A posting referenced a document the store does not hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("document {0} not found in store")]
pub struct NotFoundError(pub DocId);

/// A query that failed, as opposed to one that matched nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error("search exceeded its time budget of {budget:?}")]
    Timeout { budget: Duration },
}
