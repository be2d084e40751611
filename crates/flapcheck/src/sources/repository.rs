//! Source repository seam and an in-memory implementation.

use std::cmp::Reverse;

use super::types::MedicalSource;
use crate::error::RepositoryError;

/// Supplies candidate sources, newest first.
pub trait SourceRepository {
    fn fetch_active_sources(&self, limit: usize) -> Result<Vec<MedicalSource>, RepositoryError>;
}

impl<R: SourceRepository + ?Sized> SourceRepository for &R {
    fn fetch_active_sources(&self, limit: usize) -> Result<Vec<MedicalSource>, RepositoryError> {
        (**self).fetch_active_sources(limit)
    }
}

/// Sources held in memory, e.g. loaded from a catalog file.
#[derive(Clone, Debug, Default)]
pub struct InMemorySourceRepository {
    sources: Vec<MedicalSource>,
}

impl InMemorySourceRepository {
    pub fn new(sources: Vec<MedicalSource>) -> Self {
        Self { sources }
    }

    pub fn push(&mut self, source: MedicalSource) {
        self.sources.push(source);
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl From<Vec<MedicalSource>> for InMemorySourceRepository {
    fn from(sources: Vec<MedicalSource>) -> Self {
        Self::new(sources)
    }
}

impl SourceRepository for InMemorySourceRepository {
    /// Active sources by `created_at` descending, undated last, insertion order on ties.
    fn fetch_active_sources(&self, limit: usize) -> Result<Vec<MedicalSource>, RepositoryError> {
        let mut out: Vec<MedicalSource> =
            self.sources.iter().filter(|s| s.is_active).cloned().collect();
        out.sort_by_key(|s| Reverse(s.created_at));
        out.truncate(limit);
        Ok(out)
    }
}
