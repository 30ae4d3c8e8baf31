use crate::document::{Document, DocumentRef, SaveMode, TenantId};
use crate::error::Result;
use crate::page_id::PageId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Read and write access to the host's documents.
///
/// Implementations provide single-document atomicity: one `save_document`
/// replaces the stored document as a whole (last writer wins).
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// Loads a document. Returns `None` if it does not exist.
    async fn get_document(&self, reference: &DocumentRef) -> Result<Option<Document>>;

    /// Persists a document, recording a history entry unless `mode` is
    /// [`SaveMode::Silent`].
    async fn save_document(&self, document: Document, message: &str, mode: SaveMode) -> Result<()>;

    /// Checks whether a document exists.
    async fn document_exists(&self, reference: &DocumentRef) -> Result<bool>;
}

/// Structured queries against the authoritative store.
///
/// Results are strongly consistent but cover a single tenant per query.
#[async_trait]
pub trait MappingQuery: Send + Sync + 'static {
    /// Finds the documents carrying a mapping with `page_id`.
    ///
    /// `tenant` selects the tenant to query; `None` means the store's
    /// default tenant. At most `limit` references are returned when a limit
    /// is given.
    async fn find_by_page_id(
        &self,
        page_id: &PageId,
        tenant: Option<&TenantId>,
        limit: Option<usize>,
    ) -> Result<Vec<DocumentRef>>;
}

/// One row of the secondary index: a page id seen on a document.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IndexedMapping {
    pub page_id: PageId,
    pub document: DocumentRef,
}

/// The eventually consistent, cross-tenant search index.
///
/// Contents may lag the authoritative store: fresh mappings can be missing
/// and removed ones can still be reported until reindexing catches up.
#[async_trait]
pub trait SearchIndex: Send + Sync + 'static {
    /// Finds indexed documents carrying `page_id`, across all tenants.
    async fn find_by_page_id(
        &self,
        page_id: &PageId,
        limit: Option<usize>,
    ) -> Result<Vec<DocumentRef>>;

    /// Returns every indexed mapping, up to `limit` rows.
    async fn scan(&self, limit: Option<usize>) -> Result<Vec<IndexedMapping>>;
}
