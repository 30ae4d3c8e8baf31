use pagelink_core::{
    AccessPolicy, Capability, Document, DocumentRef, PageId, TenantId, ViewUrlBuilder,
};
use pagelink_storage::{InMemoryDocumentStore, InMemorySearchIndex};
use std::sync::Arc;
use typed_builder::TypedBuilder;

#[derive(Debug, TypedBuilder)]
pub struct FixtureConfig {
    #[builder(default = "wiki".to_string(), setter(into))]
    main_tenant: String,
    /// Capability everyone holds unless a test grants otherwise.
    #[builder(default = Some(Capability::Edit))]
    default_access: Option<Capability>,
    #[builder(default = "https://wiki.example.com".to_string(), setter(into))]
    base_url: String,
}

/// An in-memory host: store, lagging index, access policy and URL builder.
pub struct Fixture {
    pub store: Arc<InMemoryDocumentStore>,
    pub index: Arc<InMemorySearchIndex>,
    pub policy: Arc<AccessPolicy>,
    pub urls: Arc<ViewUrlBuilder>,
}

impl Fixture {
    pub fn new(config: FixtureConfig) -> Self {
        let main_tenant = TenantId::new(&config.main_tenant).expect("valid main tenant");
        Self {
            store: Arc::new(InMemoryDocumentStore::new(main_tenant)),
            index: Arc::new(InMemorySearchIndex::new()),
            policy: Arc::new(AccessPolicy::new(config.default_access)),
            urls: Arc::new(ViewUrlBuilder::parse(&config.base_url).expect("valid base url")),
        }
    }

    /// A fixture with the default configuration: main tenant `wiki`,
    /// everyone may edit everything.
    pub fn start() -> Self {
        Self::new(FixtureConfig::builder().build())
    }

    pub fn doc(&self, path: &str) -> DocumentRef {
        path.parse().expect("valid document reference")
    }

    /// Creates an empty document.
    pub fn create(&self, path: &str) -> DocumentRef {
        self.store.create(self.doc(path)).reference
    }

    /// Creates a document carrying the given page ids, bypassing the
    /// allocator the way an import or a manual edit would.
    pub fn create_mapped(&self, path: &str, page_ids: &[&str]) -> DocumentRef {
        let mut document = Document::new(self.doc(path));
        for page_id in page_ids {
            document.add_mapping(PageId::new_unchecked(page_id));
        }
        let reference = document.reference.clone();
        self.store.insert(document);
        reference
    }

    /// Brings the search index up to date with the store.
    pub fn reindex(&self) {
        self.index.refresh_from(&self.store);
    }

    /// The page ids currently stored on a document.
    pub fn page_ids(&self, path: &str) -> Vec<String> {
        self.store
            .document(&self.doc(path))
            .map(|document| {
                document
                    .mappings
                    .iter()
                    .map(|m| m.page_id.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }
}
