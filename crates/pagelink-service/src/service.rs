use crate::allocator::AllocatorSettings;
use crate::guard::LifecycleGuard;
use crate::host::Host;
use crate::manager::MappingManager;
use crate::reconciler::{ConflictReconciler, ReconcilerSettings};
use crate::Result;
use async_trait::async_trait;
use pagelink_core::{
    ConflictReport, DocumentRef, PageId, Principal, Resolution, ShortLinks, TenantId,
};
use pagelink_generator::Generator;
use pagelink_resolver::FallbackResolver;
use std::sync::Arc;
use typed_builder::TypedBuilder;

#[derive(Debug, Clone, Default, TypedBuilder)]
pub struct ServiceSettings {
    #[builder(default)]
    pub allocator: AllocatorSettings,
    #[builder(default)]
    pub reconciler: ReconcilerSettings,
}

/// The short-link service over one host.
pub struct ShortLinkService<G> {
    manager: Arc<MappingManager<G>>,
    resolver: FallbackResolver,
    reconciler: ConflictReconciler<G>,
    guard: LifecycleGuard,
}

impl<G: Generator> ShortLinkService<G> {
    pub fn new(host: Host, generator: G, settings: ServiceSettings) -> Self {
        let resolver = FallbackResolver::new(host.query.clone(), host.index.clone());
        let guard = LifecycleGuard::new(host.store.clone());
        let index = host.index.clone();
        let manager = Arc::new(MappingManager::new(host, generator, settings.allocator));
        let reconciler = ConflictReconciler::new(index, manager.clone(), settings.reconciler);
        Self {
            manager,
            resolver,
            reconciler,
            guard,
        }
    }

    /// The hook to register for document lifecycle events.
    pub fn guard(&self) -> &LifecycleGuard {
        &self.guard
    }
}

#[async_trait]
impl<G: Generator> ShortLinks for ShortLinkService<G> {
    async fn create_or_get(&self, document: &DocumentRef, principal: &Principal) -> Result<PageId> {
        self.manager.create_or_get(document, principal).await
    }

    async fn regenerate(
        &self,
        document: &DocumentRef,
        old: &PageId,
        principal: &Principal,
    ) -> Result<PageId> {
        self.manager.regenerate(document, old, principal).await
    }

    async fn resolve(&self, page_id: &PageId, tenant: Option<&TenantId>) -> Result<Option<Resolution>> {
        self.resolver.resolve(page_id, tenant).await
    }

    async fn list_conflicts(&self) -> Result<ConflictReport> {
        self.reconciler.list_conflicts().await
    }

    async fn resolve_conflict(
        &self,
        page_id: &PageId,
        document: &DocumentRef,
        principal: &Principal,
    ) -> Result<PageId> {
        self.reconciler.resolve(page_id, document, principal).await
    }
}
