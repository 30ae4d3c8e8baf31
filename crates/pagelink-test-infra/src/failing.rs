use async_trait::async_trait;
use pagelink_core::error::{Result, StorageError};
use pagelink_core::{
    Document, DocumentRef, DocumentStore, IndexedMapping, MappingQuery, PageId, SaveMode,
    SearchIndex, TenantId,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A switchable failure: `None` passes calls through.
#[derive(Debug, Default)]
struct Fault(Mutex<Option<StorageError>>);

impl Fault {
    fn set(&self, error: StorageError) {
        *self.0.lock() = Some(error);
    }

    fn clear(&self) {
        *self.0.lock() = None;
    }

    fn check(&self) -> Result<()> {
        match self.0.lock().as_ref() {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

/// Wraps a store and fails its reads, writes or queries on demand.
#[derive(Debug)]
pub struct FailingStore<S> {
    inner: Arc<S>,
    reads: Fault,
    writes: Fault,
    queries: Fault,
    attempted_writes: AtomicUsize,
}

impl<S> FailingStore<S> {
    pub fn new(inner: Arc<S>) -> Self {
        Self {
            inner,
            reads: Fault::default(),
            writes: Fault::default(),
            queries: Fault::default(),
            attempted_writes: AtomicUsize::new(0),
        }
    }

    pub fn inner(&self) -> &Arc<S> {
        &self.inner
    }

    pub fn fail_reads(&self, error: StorageError) {
        self.reads.set(error);
    }

    pub fn fail_writes(&self, error: StorageError) {
        self.writes.set(error);
    }

    pub fn fail_queries(&self, error: StorageError) {
        self.queries.set(error);
    }

    /// Lets every call through again.
    pub fn heal(&self) {
        self.reads.clear();
        self.writes.clear();
        self.queries.clear();
    }

    /// Number of `save_document` calls, failed ones included.
    pub fn attempted_writes(&self) -> usize {
        self.attempted_writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<S: DocumentStore> DocumentStore for FailingStore<S> {
    async fn get_document(&self, reference: &DocumentRef) -> Result<Option<Document>> {
        self.reads.check()?;
        self.inner.get_document(reference).await
    }

    async fn save_document(&self, document: Document, message: &str, mode: SaveMode) -> Result<()> {
        self.attempted_writes.fetch_add(1, Ordering::SeqCst);
        self.writes.check()?;
        self.inner.save_document(document, message, mode).await
    }

    async fn document_exists(&self, reference: &DocumentRef) -> Result<bool> {
        self.reads.check()?;
        self.inner.document_exists(reference).await
    }
}

#[async_trait]
impl<S: MappingQuery> MappingQuery for FailingStore<S> {
    async fn find_by_page_id(
        &self,
        page_id: &PageId,
        tenant: Option<&TenantId>,
        limit: Option<usize>,
    ) -> Result<Vec<DocumentRef>> {
        self.queries.check()?;
        self.inner.find_by_page_id(page_id, tenant, limit).await
    }
}

/// Wraps a search index and fails its queries on demand.
#[derive(Debug)]
pub struct FailingIndex<I> {
    inner: Arc<I>,
    queries: Fault,
}

impl<I> FailingIndex<I> {
    pub fn new(inner: Arc<I>) -> Self {
        Self {
            inner,
            queries: Fault::default(),
        }
    }

    pub fn inner(&self) -> &Arc<I> {
        &self.inner
    }

    pub fn fail_queries(&self, error: StorageError) {
        self.queries.set(error);
    }

    pub fn heal(&self) {
        self.queries.clear();
    }
}

#[async_trait]
impl<I: SearchIndex> SearchIndex for FailingIndex<I> {
    async fn find_by_page_id(&self, page_id: &PageId, limit: Option<usize>) -> Result<Vec<DocumentRef>> {
        self.queries.check()?;
        self.inner.find_by_page_id(page_id, limit).await
    }

    async fn scan(&self, limit: Option<usize>) -> Result<Vec<IndexedMapping>> {
        self.queries.check()?;
        self.inner.scan(limit).await
    }
}
