use crate::Result;
use pagelink_core::{LinkError, MappingQuery, PageId, SearchIndex, TenantId};
use pagelink_generator::Generator;
use std::sync::Arc;
use tracing::{debug, warn};
use typed_builder::TypedBuilder;

/// Consecutive collisions between two warnings.
const COLLISION_WARN_INTERVAL: u64 = 16;

#[derive(Debug, Clone, TypedBuilder)]
pub struct AllocatorSettings {
    /// Give up after this many candidates. `None` retries until a free id
    /// is found.
    #[builder(default, setter(strip_option))]
    pub max_attempts: Option<u64>,
    /// Also reject candidates the search index already knows, which catches
    /// ids used in other tenants.
    #[builder(default = true)]
    pub check_index: bool,
}

impl Default for AllocatorSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Draws candidate page ids until one is not in use.
///
/// The check is read-then-write with nothing in between: two concurrent
/// allocations can both see a candidate as free and both use it. Such
/// collisions surface later in the conflict report.
pub struct IdAllocator<G> {
    generator: G,
    query: Arc<dyn MappingQuery>,
    index: Arc<dyn SearchIndex>,
    settings: AllocatorSettings,
}

impl<G: Generator> IdAllocator<G> {
    pub fn new(
        generator: G,
        query: Arc<dyn MappingQuery>,
        index: Arc<dyn SearchIndex>,
        settings: AllocatorSettings,
    ) -> Self {
        Self {
            generator,
            query,
            index,
            settings,
        }
    }

    /// Returns a page id no document of `tenant` carries.
    ///
    /// Query failures are returned as [`LinkError::LookupFailed`]; they are
    /// never taken to mean the candidate is free.
    pub async fn allocate(&self, tenant: &TenantId) -> Result<PageId> {
        let mut attempts: u64 = 0;
        loop {
            attempts += 1;
            let candidate: PageId = self.generator.generate().into();

            if !self.is_taken(&candidate, tenant).await? {
                debug!(page_id = %candidate, tenant = %tenant, attempts, "allocated page id");
                return Ok(candidate);
            }

            debug!(page_id = %candidate, tenant = %tenant, attempts, "page id already in use, drawing again");
            if attempts % COLLISION_WARN_INTERVAL == 0 {
                warn!(tenant = %tenant, attempts, "page id space is getting crowded");
            }
            if self.settings.max_attempts.is_some_and(|max| attempts >= max) {
                return Err(LinkError::GenerationFailed(format!(
                    "no free page id after {} attempts",
                    attempts
                )));
            }
        }
    }

    async fn is_taken(&self, candidate: &PageId, tenant: &TenantId) -> Result<bool> {
        let in_store = self
            .query
            .find_by_page_id(candidate, Some(tenant), Some(1))
            .await?;
        if !in_store.is_empty() {
            return Ok(true);
        }

        if self.settings.check_index {
            let in_index = self.index.find_by_page_id(candidate, Some(1)).await?;
            return Ok(!in_index.is_empty());
        }

        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagelink_core::StorageError;
    use pagelink_test_infra::{FailingStore, Fixture, ScriptedGenerator};

    fn tenant(s: &str) -> TenantId {
        TenantId::new(s).unwrap()
    }

    fn allocator(fixture: &Fixture, script: &[&str], settings: AllocatorSettings) -> IdAllocator<ScriptedGenerator> {
        IdAllocator::new(
            ScriptedGenerator::new(script.iter().copied()),
            fixture.store.clone(),
            fixture.index.clone(),
            settings,
        )
    }

    #[tokio::test]
    async fn returns_first_free_candidate() {
        let fixture = Fixture::start();
        let allocator = allocator(&fixture, &["abcde"], AllocatorSettings::default());

        let id = allocator.allocate(&tenant("wiki")).await.unwrap();
        assert_eq!(id.as_str(), "abcde");
    }

    #[tokio::test]
    async fn skips_ids_taken_in_store() {
        let fixture = Fixture::start();
        fixture.create_mapped("wiki/Space/A", &["taken"]);
        let allocator = allocator(&fixture, &["taken", "abcde"], AllocatorSettings::default());

        let id = allocator.allocate(&tenant("wiki")).await.unwrap();
        assert_eq!(id.as_str(), "abcde");
    }

    #[tokio::test]
    async fn skips_ids_taken_in_other_tenant_once_indexed() {
        let fixture = Fixture::start();
        fixture.create_mapped("sub/Space/A", &["taken"]);
        fixture.reindex();
        let allocator = allocator(&fixture, &["taken", "abcde"], AllocatorSettings::default());

        let id = allocator.allocate(&tenant("wiki")).await.unwrap();
        assert_eq!(id.as_str(), "abcde");
    }

    #[tokio::test]
    async fn index_check_can_be_disabled() {
        let fixture = Fixture::start();
        fixture.create_mapped("sub/Space/A", &["taken"]);
        fixture.reindex();
        let settings = AllocatorSettings::builder().check_index(false).build();
        let allocator = allocator(&fixture, &["taken"], settings);

        let id = allocator.allocate(&tenant("wiki")).await.unwrap();
        assert_eq!(id.as_str(), "taken");
    }

    #[tokio::test]
    async fn survives_long_collision_runs() {
        let fixture = Fixture::start();
        fixture.create_mapped("wiki/Space/A", &["taken"]);
        let script: Vec<&str> = std::iter::repeat("taken").take(100).chain(["fresh", "spare"]).collect();
        let generator = Arc::new(ScriptedGenerator::new(script));
        let allocator = IdAllocator::new(
            generator.clone(),
            fixture.store.clone(),
            fixture.index.clone(),
            AllocatorSettings::default(),
        );

        let id = allocator.allocate(&tenant("wiki")).await.unwrap();
        assert_eq!(id.as_str(), "fresh");
        assert_eq!(generator.remaining(), 1);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let fixture = Fixture::start();
        fixture.create_mapped("wiki/Space/A", &["taken"]);
        let settings = AllocatorSettings::builder().max_attempts(3).build();
        let allocator = allocator(&fixture, &["taken", "taken", "taken", "fresh"], settings);

        let err = allocator.allocate(&tenant("wiki")).await.unwrap_err();
        assert!(matches!(err, LinkError::GenerationFailed(_)));
    }

    #[tokio::test]
    async fn query_errors_propagate() {
        let fixture = Fixture::start();
        let store = Arc::new(FailingStore::new(fixture.store.clone()));
        store.fail_queries(StorageError::Query("boom".into()));
        let allocator = IdAllocator::new(
            ScriptedGenerator::new(["abcde"]),
            store,
            fixture.index.clone(),
            AllocatorSettings::default(),
        );

        let err = allocator.allocate(&tenant("wiki")).await.unwrap_err();
        assert!(matches!(err, LinkError::LookupFailed(StorageError::Query(_))));
    }
}
