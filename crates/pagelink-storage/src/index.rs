use crate::memory::InMemoryDocumentStore;
use async_trait::async_trait;
use dashmap::DashMap;
use pagelink_core::error::Result;
use pagelink_core::store::{IndexedMapping, SearchIndex};
use pagelink_core::{Document, DocumentRef, PageId};
use std::collections::HashSet;
use tracing::debug;

/// In-memory stand-in for the eventually consistent search index.
///
/// The index holds one row per document with the page ids that were on it
/// when it was last indexed. Nothing changes until [`index_document`] or
/// [`refresh_from`] is called, which makes the lag between store and index
/// explicit and controllable.
///
/// [`index_document`]: InMemorySearchIndex::index_document
/// [`refresh_from`]: InMemorySearchIndex::refresh_from
#[derive(Debug, Default)]
pub struct InMemorySearchIndex {
    rows: DashMap<DocumentRef, Vec<PageId>>,
}

impl InMemorySearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes (or reindexes) one document.
    pub fn index_document(&self, document: &Document) {
        let page_ids: Vec<PageId> = document.mappings.iter().map(|m| m.page_id.clone()).collect();
        if page_ids.is_empty() {
            self.rows.remove(&document.reference);
        } else {
            self.rows.insert(document.reference.clone(), page_ids);
        }
    }

    /// Rebuilds the whole index from the store, as a completed reindex would.
    ///
    /// Rows are replaced in place and stale rows dropped afterwards, so a
    /// document indexed before and after the refresh stays visible to
    /// concurrent readers throughout.
    pub fn refresh_from(&self, store: &InMemoryDocumentStore) {
        let documents = store.documents();
        let mut seen = HashSet::with_capacity(documents.len());
        for document in &documents {
            self.index_document(document);
            seen.insert(&document.reference);
        }
        self.rows.retain(|reference, _| seen.contains(reference));
        debug!(documents = documents.len(), rows = self.rows.len(), "search index refreshed");
    }

    fn sorted_rows(&self) -> Vec<IndexedMapping> {
        let mut rows: Vec<IndexedMapping> = self
            .rows
            .iter()
            .flat_map(|entry| {
                let document = entry.key().clone();
                entry
                    .value()
                    .iter()
                    .map(move |page_id| IndexedMapping {
                        page_id: page_id.clone(),
                        document: document.clone(),
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
        rows.sort();
        rows
    }
}

#[async_trait]
impl SearchIndex for InMemorySearchIndex {
    async fn find_by_page_id(&self, page_id: &PageId, limit: Option<usize>) -> Result<Vec<DocumentRef>> {
        let mut found: Vec<DocumentRef> = self
            .rows
            .iter()
            .filter(|entry| entry.value().contains(page_id))
            .map(|entry| entry.key().clone())
            .collect();
        found.sort();
        found.truncate(limit.unwrap_or(usize::MAX));
        Ok(found)
    }

    async fn scan(&self, limit: Option<usize>) -> Result<Vec<IndexedMapping>> {
        let mut rows = self.sorted_rows();
        rows.truncate(limit.unwrap_or(usize::MAX));
        Ok(rows)
    }
}
