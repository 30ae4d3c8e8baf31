use pagelink_core::{Authorizer, DocumentStore, MappingQuery, SearchIndex};
use std::sync::Arc;

/// The host platform's collaborators, as seen by the service.
#[derive(Clone)]
pub struct Host {
    pub store: Arc<dyn DocumentStore>,
    pub query: Arc<dyn MappingQuery>,
    pub index: Arc<dyn SearchIndex>,
    pub authorizer: Arc<dyn Authorizer>,
}

impl Host {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        query: Arc<dyn MappingQuery>,
        index: Arc<dyn SearchIndex>,
        authorizer: Arc<dyn Authorizer>,
    ) -> Self {
        Self {
            store,
            query,
            index,
            authorizer,
        }
    }

    /// Uses one backend as both the document store and its query engine.
    pub fn from_store<S>(store: Arc<S>, index: Arc<dyn SearchIndex>, authorizer: Arc<dyn Authorizer>) -> Self
    where
        S: DocumentStore + MappingQuery,
    {
        Self::new(store.clone(), store, index, authorizer)
    }
}
