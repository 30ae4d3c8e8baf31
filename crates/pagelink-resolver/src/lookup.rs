use async_trait::async_trait;
use pagelink_core::error::Result;
use pagelink_core::{DocumentRef, LookupSource, MappingQuery, PageId, SearchIndex, TenantId};
use std::sync::Arc;
use tracing::trace;

/// One way of finding the document that carries a page id.
#[async_trait]
pub trait Lookup: Send + Sync + 'static {
    /// Identifies the strategy in resolutions and logs.
    fn source(&self) -> LookupSource;

    /// Returns the first document found for `page_id`, if any.
    ///
    /// `tenant` is the caller's scope hint; strategies that are not
    /// tenant-scoped ignore it.
    async fn lookup(&self, page_id: &PageId, tenant: Option<&TenantId>) -> Result<Option<DocumentRef>>;
}

/// Queries the authoritative store within one tenant.
///
/// Without a hint the store's default tenant is queried.
#[derive(Clone)]
pub struct StoreLookup {
    query: Arc<dyn MappingQuery>,
}

impl StoreLookup {
    pub fn new(query: Arc<dyn MappingQuery>) -> Self {
        Self { query }
    }
}

#[async_trait]
impl Lookup for StoreLookup {
    fn source(&self) -> LookupSource {
        LookupSource::Store
    }

    async fn lookup(&self, page_id: &PageId, tenant: Option<&TenantId>) -> Result<Option<DocumentRef>> {
        trace!(page_id = %page_id, tenant = ?tenant.map(TenantId::as_str), "querying store");
        let found = self.query.find_by_page_id(page_id, tenant, Some(1)).await?;
        Ok(found.into_iter().next())
    }
}

/// Queries the global search index, across every tenant.
///
/// Freshly minted ids may be missing until the index catches up.
#[derive(Clone)]
pub struct IndexLookup {
    index: Arc<dyn SearchIndex>,
}

impl IndexLookup {
    pub fn new(index: Arc<dyn SearchIndex>) -> Self {
        Self { index }
    }
}

#[async_trait]
impl Lookup for IndexLookup {
    fn source(&self) -> LookupSource {
        LookupSource::Index
    }

    async fn lookup(&self, page_id: &PageId, _tenant: Option<&TenantId>) -> Result<Option<DocumentRef>> {
        trace!(page_id = %page_id, "querying search index");
        let found = self.index.find_by_page_id(page_id, Some(1)).await?;
        Ok(found.into_iter().next())
    }
}
