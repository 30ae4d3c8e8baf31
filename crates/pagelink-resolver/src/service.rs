use crate::lookup::{IndexLookup, Lookup, StoreLookup};
use pagelink_core::{LinkError, MappingQuery, PageId, Resolution, SearchIndex, TenantId};
use std::sync::Arc;
use tracing::{debug, trace};

/// Resolves page ids by trying each lookup strategy in order.
///
/// When several documents share a page id, the first one the answering
/// strategy returns wins. Which one that is depends on the backend and can
/// change as the index reorders results.
#[derive(Clone)]
pub struct FallbackResolver {
    strategies: Vec<Arc<dyn Lookup>>,
}

impl FallbackResolver {
    /// The default chain: tenant-scoped store first, then the global index.
    pub fn new(query: Arc<dyn MappingQuery>, index: Arc<dyn SearchIndex>) -> Self {
        Self::with_strategies(vec![
            Arc::new(StoreLookup::new(query)),
            Arc::new(IndexLookup::new(index)),
        ])
    }

    /// A resolver over an explicit chain of strategies.
    pub fn with_strategies(strategies: Vec<Arc<dyn Lookup>>) -> Self {
        Self { strategies }
    }

    /// Resolves a page id to a document.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(resolution))` - the document and the strategy that found it
    /// * `Ok(None)` - no strategy knows the page id
    /// * `Err(LinkError::LookupFailed)` - a strategy failed; later strategies
    ///   are not consulted
    pub async fn resolve(
        &self,
        page_id: &PageId,
        tenant: Option<&TenantId>,
    ) -> Result<Option<Resolution>, LinkError> {
        for strategy in &self.strategies {
            let source = strategy.source();
            match strategy.lookup(page_id, tenant).await? {
                Some(document) => {
                    debug!(page_id = %page_id, document = %document, %source, "resolved page id");
                    return Ok(Some(Resolution { document, source }));
                }
                None => trace!(page_id = %page_id, %source, "no match, falling back"),
            }
        }

        debug!(page_id = %page_id, "page id not found");
        Ok(None)
    }
}
