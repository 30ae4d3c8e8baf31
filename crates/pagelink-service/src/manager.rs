use crate::allocator::{AllocatorSettings, IdAllocator};
use crate::host::Host;
use crate::Result;
use pagelink_core::{
    Capability, Document, DocumentRef, LinkError, PageId, Principal, SaveMode,
};
use pagelink_generator::Generator;
use tracing::{error, info};

const CREATED_MESSAGE: &str = "Created URL Shortener.";
const REGENERATED_MESSAGE: &str = "Regenerated URL Shortener.";

/// Owns the mapping stored on each document.
pub struct MappingManager<G> {
    host: Host,
    allocator: IdAllocator<G>,
}

impl<G: Generator> MappingManager<G> {
    pub fn new(host: Host, generator: G, settings: AllocatorSettings) -> Self {
        let allocator = IdAllocator::new(generator, host.query.clone(), host.index.clone(), settings);
        Self { host, allocator }
    }

    /// The page id stored on `document`, without minting one.
    pub async fn get(&self, document: &DocumentRef, principal: &Principal) -> Result<Option<PageId>> {
        self.require(principal, Capability::View, document).await?;
        let document = self.load(document).await?;
        Ok(document.mapping().map(|m| m.page_id.clone()))
    }

    /// Returns the page id of `document`, minting and saving one if the
    /// document has none yet.
    ///
    /// Two concurrent calls on a document without a mapping may both mint;
    /// the last save wins.
    pub async fn create_or_get(&self, document: &DocumentRef, principal: &Principal) -> Result<PageId> {
        self.require(principal, Capability::View, document).await?;
        let mut stored = self.load(document).await?;

        if let Some(mapping) = stored.mapping() {
            return Ok(mapping.page_id.clone());
        }

        let page_id = self.allocator.allocate(document.tenant()).await?;
        stored.add_mapping(page_id.clone());
        self.save(stored, CREATED_MESSAGE).await?;

        info!(document = %document, page_id = %page_id, principal = %principal, "created page id");
        Ok(page_id)
    }

    /// Replaces `old` on `document` with a freshly minted page id.
    ///
    /// Nothing is written unless `document` exists and carries `old`.
    pub async fn regenerate(
        &self,
        document: &DocumentRef,
        old: &PageId,
        principal: &Principal,
    ) -> Result<PageId> {
        self.require(principal, Capability::Edit, document).await?;
        let mut stored = self.load(document).await?;

        if !stored.mappings.iter().any(|m| &m.page_id == old) {
            return Err(LinkError::NotFound(format!(
                "document {} has no page id {}",
                document, old
            )));
        }

        let page_id = self.allocator.allocate(document.tenant()).await?;
        stored.replace_page_id(old, page_id.clone());
        self.save(stored, REGENERATED_MESSAGE).await?;

        info!(document = %document, old = %old, page_id = %page_id, "regenerated page id");
        Ok(page_id)
    }

    async fn require(
        &self,
        principal: &Principal,
        capability: Capability,
        document: &DocumentRef,
    ) -> Result<()> {
        if self
            .host
            .authorizer
            .has_capability(principal, capability, document)
            .await
        {
            return Ok(());
        }
        Err(LinkError::AccessDenied(format!(
            "{} lacks {:?} on {}",
            principal, capability, document
        )))
    }

    async fn load(&self, document: &DocumentRef) -> Result<Document> {
        match self.host.store.get_document(document).await {
            Ok(Some(stored)) => Ok(stored),
            Ok(None) => Err(LinkError::NotFound(format!("document {} does not exist", document))),
            Err(e) => {
                error!(document = %document, error = %e, "failed to load document");
                Err(e.into())
            }
        }
    }

    async fn save(&self, document: Document, message: &str) -> Result<()> {
        let reference = document.reference.clone();
        self.host
            .store
            .save_document(document, message, SaveMode::Silent)
            .await
            .map_err(|e| {
                error!(document = %reference, error = %e, "failed to save page id");
                LinkError::GenerationFailed(e.to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagelink_core::{AccessPolicy, StorageError};
    use pagelink_generator::UuidPrefixGenerator;
    use pagelink_test_infra::{FailingStore, Fixture, FixtureConfig, ScriptedGenerator};
    use std::sync::Arc;

    fn host(fixture: &Fixture) -> Host {
        Host::from_store(fixture.store.clone(), fixture.index.clone(), fixture.policy.clone())
    }

    fn manager(fixture: &Fixture, script: &[&str]) -> MappingManager<ScriptedGenerator> {
        MappingManager::new(
            host(fixture),
            ScriptedGenerator::new(script.iter().copied()),
            AllocatorSettings::default(),
        )
    }

    #[tokio::test]
    async fn create_or_get_mints_once() {
        let fixture = Fixture::start();
        let doc = fixture.create("wiki/Space/Page");
        let manager = manager(&fixture, &["abcde", "fghij"]);

        let first = manager.create_or_get(&doc, &Principal::guest()).await.unwrap();
        let second = manager.create_or_get(&doc, &Principal::guest()).await.unwrap();

        assert_eq!(first.as_str(), "abcde");
        assert_eq!(first, second);
        assert_eq!(fixture.page_ids("wiki/Space/Page"), vec!["abcde"]);
        assert_eq!(fixture.store.write_count(), 1);
    }

    #[tokio::test]
    async fn create_or_get_saves_silently() {
        let fixture = Fixture::start();
        let doc = fixture.create("wiki/Space/Page");
        let manager = manager(&fixture, &["abcde"]);

        manager.create_or_get(&doc, &Principal::guest()).await.unwrap();

        let stored = fixture.store.document(&doc).unwrap();
        assert_eq!(stored.revision, 0);
    }

    #[tokio::test]
    async fn create_or_get_never_reuses_a_stored_id() {
        let fixture = Fixture::start();
        fixture.create_mapped("wiki/Space/Other", &["abcde"]);
        let doc = fixture.create("wiki/Space/Page");
        let manager = manager(&fixture, &["abcde", "fghij"]);

        let id = manager.create_or_get(&doc, &Principal::guest()).await.unwrap();
        assert_eq!(id.as_str(), "fghij");
    }

    #[tokio::test]
    async fn create_or_get_requires_view() {
        let fixture = Fixture::new(FixtureConfig::builder().default_access(None).build());
        let doc = fixture.create("wiki/Space/Page");
        let manager = manager(&fixture, &["abcde"]);

        let err = manager.create_or_get(&doc, &Principal::guest()).await.unwrap_err();
        assert!(matches!(err, LinkError::AccessDenied(_)));
        assert!(fixture.page_ids("wiki/Space/Page").is_empty());
    }

    #[tokio::test]
    async fn create_or_get_on_missing_document() {
        let fixture = Fixture::start();
        let manager = manager(&fixture, &["abcde"]);

        let err = manager
            .create_or_get(&fixture.doc("wiki/Space/Missing"), &Principal::guest())
            .await
            .unwrap_err();
        assert!(matches!(err, LinkError::NotFound(_)));
        assert_eq!(fixture.store.write_count(), 0);
    }

    #[tokio::test]
    async fn failed_save_is_a_generation_failure() {
        let fixture = Fixture::start();
        let doc = fixture.create("wiki/Space/Page");
        let store = Arc::new(FailingStore::new(fixture.store.clone()));
        store.fail_writes(StorageError::Unavailable("read-only".into()));
        let host = Host::from_store(store.clone(), fixture.index.clone(), fixture.policy.clone());
        let manager = MappingManager::new(host, ScriptedGenerator::new(["abcde"]), AllocatorSettings::default());

        let err = manager.create_or_get(&doc, &Principal::guest()).await.unwrap_err();
        assert!(matches!(err, LinkError::GenerationFailed(_)));
        assert_eq!(store.attempted_writes(), 1);
        assert!(fixture.page_ids("wiki/Space/Page").is_empty());
    }

    #[tokio::test]
    async fn regenerate_replaces_the_old_id() {
        let fixture = Fixture::start();
        let doc = fixture.create_mapped("wiki/Space/Page", &["abcde"]);
        let manager = manager(&fixture, &["abcde", "fghij"]);

        let id = manager
            .regenerate(&doc, &PageId::new_unchecked("abcde"), &Principal::guest())
            .await
            .unwrap();

        assert_eq!(id.as_str(), "fghij");
        assert_eq!(fixture.page_ids("wiki/Space/Page"), vec!["fghij"]);
    }

    #[tokio::test]
    async fn regenerate_requires_edit() {
        let fixture = Fixture::new(
            FixtureConfig::builder()
                .default_access(Some(Capability::View))
                .build(),
        );
        let doc = fixture.create_mapped("wiki/Space/Page", &["abcde"]);
        let manager = manager(&fixture, &["fghij"]);

        let err = manager
            .regenerate(&doc, &PageId::new_unchecked("abcde"), &Principal::guest())
            .await
            .unwrap_err();
        assert!(matches!(err, LinkError::AccessDenied(_)));
        assert_eq!(fixture.page_ids("wiki/Space/Page"), vec!["abcde"]);
    }

    #[tokio::test]
    async fn regenerate_without_the_old_id_writes_nothing() {
        let fixture = Fixture::start();
        let doc = fixture.create_mapped("wiki/Space/Page", &["abcde"]);
        let manager = manager(&fixture, &["fghij"]);

        let err = manager
            .regenerate(&doc, &PageId::new_unchecked("zzzzz"), &Principal::guest())
            .await
            .unwrap_err();
        assert!(matches!(err, LinkError::NotFound(_)));
        assert_eq!(fixture.store.write_count(), 0);
        assert_eq!(fixture.page_ids("wiki/Space/Page"), vec!["abcde"]);
    }

    #[tokio::test]
    async fn regenerate_on_document_without_mapping() {
        let fixture = Fixture::start();
        let doc = fixture.create("wiki/Space/Page");
        let manager = manager(&fixture, &["fghij"]);

        let err = manager
            .regenerate(&doc, &PageId::new_unchecked("abcde"), &Principal::guest())
            .await
            .unwrap_err();
        assert!(matches!(err, LinkError::NotFound(_)));
        assert_eq!(fixture.store.write_count(), 0);
    }

    #[tokio::test]
    async fn per_principal_grants_apply() {
        let fixture = Fixture::new(FixtureConfig::builder().default_access(None).build());
        let doc = fixture.create("wiki/Space/Page");
        let policy = Arc::new(AccessPolicy::new(None));
        policy.grant(Principal::new("alice"), Some(Capability::View));
        let host = Host::from_store(fixture.store.clone(), fixture.index.clone(), policy);
        let manager = MappingManager::new(host, ScriptedGenerator::new(["abcde"]), AllocatorSettings::default());

        assert!(manager.create_or_get(&doc, &Principal::guest()).await.is_err());
        let id = manager.create_or_get(&doc, &Principal::new("alice")).await.unwrap();
        assert_eq!(id.as_str(), "abcde");
    }

    #[tokio::test]
    async fn get_does_not_mint() {
        let fixture = Fixture::start();
        let doc = fixture.create("wiki/Space/Page");
        let manager = MappingManager::new(host(&fixture), UuidPrefixGenerator::new(), AllocatorSettings::default());

        assert_eq!(manager.get(&doc, &Principal::guest()).await.unwrap(), None);
        let id = manager.create_or_get(&doc, &Principal::guest()).await.unwrap();
        assert_eq!(manager.get(&doc, &Principal::guest()).await.unwrap(), Some(id));
    }
}
