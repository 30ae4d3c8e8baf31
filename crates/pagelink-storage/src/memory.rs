use async_trait::async_trait;
use dashmap::DashMap;
use pagelink_core::error::{Result, StorageError};
use pagelink_core::store::{DocumentStore, MappingQuery};
use pagelink_core::{Document, DocumentRef, PageId, SaveMode, TenantId};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

/// In-memory implementation of the authoritative document store.
///
/// DashMap shards its locks, so writes to different documents do not block
/// each other and a single `save_document` replaces one document
/// atomically. Queries without an explicit tenant run against the main
/// tenant, like the host's default context.
#[derive(Debug)]
pub struct InMemoryDocumentStore {
    documents: DashMap<DocumentRef, Document>,
    main_tenant: TenantId,
    writes: AtomicU64,
}

impl InMemoryDocumentStore {
    /// Creates an empty store whose default tenant is `main_tenant`.
    pub fn new(main_tenant: TenantId) -> Self {
        Self {
            documents: DashMap::new(),
            main_tenant,
            writes: AtomicU64::new(0),
        }
    }

    pub fn main_tenant(&self) -> &TenantId {
        &self.main_tenant
    }

    /// Puts a document in place without counting it as a write. Meant for
    /// seeding fixtures.
    pub fn insert(&self, document: Document) {
        self.documents.insert(document.reference.clone(), document);
    }

    /// Creates an empty document, as a user creating a page would.
    pub fn create(&self, reference: DocumentRef) -> Document {
        let document = Document::new(reference);
        self.insert(document.clone());
        document
    }

    /// Returns a copy of the stored document.
    pub fn document(&self, reference: &DocumentRef) -> Option<Document> {
        self.documents.get(reference).map(|entry| entry.clone())
    }

    /// Returns a copy of every stored document.
    pub fn documents(&self) -> Vec<Document> {
        self.documents.iter().map(|entry| entry.value().clone()).collect()
    }

    /// Number of `save_document` calls and host mutations performed so far.
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }

    /// Duplicates `source` (mappings included) under `target`.
    ///
    /// This is the host's copy: the duplicated mapping is exactly what the
    /// lifecycle guard has to clean up afterwards.
    pub fn copy_document(&self, source: &DocumentRef, target: DocumentRef) -> Result<Document> {
        let mut copy = self
            .document(source)
            .ok_or_else(|| StorageError::Operation(format!("no document to copy at {}", source)))?;
        copy.reference = target;
        copy.revision = 1;
        self.insert(copy.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(copy)
    }

    /// Moves `source` to `target`, keeping its mappings.
    pub fn rename_document(&self, source: &DocumentRef, target: DocumentRef) -> Result<Document> {
        let (_, mut moved) = self
            .documents
            .remove(source)
            .ok_or_else(|| StorageError::Operation(format!("no document to rename at {}", source)))?;
        moved.reference = target;
        moved.revision += 1;
        self.insert(moved.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(moved)
    }

    /// Deletes a document. Returns `true` if it existed.
    pub fn delete_document(&self, reference: &DocumentRef) -> bool {
        let removed = self.documents.remove(reference).is_some();
        if removed {
            self.writes.fetch_add(1, Ordering::SeqCst);
        }
        removed
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get_document(&self, reference: &DocumentRef) -> Result<Option<Document>> {
        Ok(self.document(reference))
    }

    async fn save_document(&self, mut document: Document, message: &str, mode: SaveMode) -> Result<()> {
        if mode == SaveMode::Versioned {
            document.revision += 1;
        }
        trace!(document = %document.reference, revision = document.revision, ?mode, change = message, "saving document");
        self.insert(document);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn document_exists(&self, reference: &DocumentRef) -> Result<bool> {
        Ok(self.documents.contains_key(reference))
    }
}

#[async_trait]
impl MappingQuery for InMemoryDocumentStore {
    async fn find_by_page_id(
        &self,
        page_id: &PageId,
        tenant: Option<&TenantId>,
        limit: Option<usize>,
    ) -> Result<Vec<DocumentRef>> {
        let tenant = tenant.unwrap_or(&self.main_tenant);

        let mut found: Vec<DocumentRef> = self
            .documents
            .iter()
            .filter(|entry| entry.key().tenant() == tenant)
            .filter(|entry| entry.mappings.iter().any(|m| &m.page_id == page_id))
            .map(|entry| entry.key().clone())
            .collect();
        // DashMap iteration order is arbitrary; sort so repeated queries agree.
        found.sort();
        found.truncate(limit.unwrap_or(usize::MAX));
        Ok(found)
    }
}
