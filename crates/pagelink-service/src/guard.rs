use pagelink_core::{DocumentRef, DocumentStore, SaveMode};
use std::sync::Arc;
use tracing::{debug, info, warn};

const STRIPPED_MESSAGE: &str = "Removed the URL Shortener object specific to the source page.";

/// A document lifecycle notification from the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LifecycleEvent {
    Created { document: DocumentRef },
    Copied { source: DocumentRef, target: DocumentRef },
}

impl LifecycleEvent {
    /// The document the event produced.
    pub fn target(&self) -> &DocumentRef {
        match self {
            LifecycleEvent::Created { document } => document,
            LifecycleEvent::Copied { target, .. } => target,
        }
    }
}

/// What the host was doing when the event fired.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LifecycleContext {
    /// The event is one half of a rename; the mapping moves with the page.
    pub renaming: bool,
}

impl LifecycleContext {
    pub fn renaming() -> Self {
        Self { renaming: true }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    /// The new document carries no mapping, or no longer exists.
    Untouched,
    /// The document came from a rename and keeps its mapping.
    Preserved,
    /// The inherited mappings were removed.
    Stripped { removed: usize },
    /// Loading or saving failed; the error was logged.
    Failed,
}

/// Keeps copies from inheriting the page id of their source.
///
/// A copied page id would resolve to two documents. Renames are exempt
/// since the source document goes away.
#[derive(Clone)]
pub struct LifecycleGuard {
    store: Arc<dyn DocumentStore>,
}

impl LifecycleGuard {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Handles one event. Never fails: lifecycle hooks must not abort the
    /// host operation, so errors are logged and reported as
    /// [`GuardOutcome::Failed`].
    pub async fn on_event(&self, event: &LifecycleEvent, context: LifecycleContext) -> GuardOutcome {
        let target = event.target();

        let mut document = match self.store.get_document(target).await {
            Ok(Some(document)) => document,
            Ok(None) => {
                debug!(document = %target, "lifecycle target vanished, nothing to strip");
                return GuardOutcome::Untouched;
            }
            Err(e) => {
                warn!(document = %target, error = %e, "failed to load document for page id cleanup");
                return GuardOutcome::Failed;
            }
        };

        if !document.has_mapping() {
            return GuardOutcome::Untouched;
        }
        if context.renaming {
            debug!(document = %target, "renamed document keeps its page id");
            return GuardOutcome::Preserved;
        }

        let removed = document.remove_mappings();
        if let Err(e) = self
            .store
            .save_document(document, STRIPPED_MESSAGE, SaveMode::Silent)
            .await
        {
            warn!(document = %target, error = %e, "failed to strip inherited page id");
            return GuardOutcome::Failed;
        }

        info!(document = %target, removed, "stripped inherited page id");
        GuardOutcome::Stripped { removed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagelink_core::StorageError;
    use pagelink_test_infra::{FailingStore, Fixture};

    #[tokio::test]
    async fn copy_strips_the_mapping() {
        let fixture = Fixture::start();
        let source = fixture.create_mapped("wiki/Space/A", &["abcde"]);
        let target = fixture.doc("wiki/Space/B");
        fixture.store.copy_document(&source, target.clone()).unwrap();
        let guard = LifecycleGuard::new(fixture.store.clone());

        let outcome = guard
            .on_event(&LifecycleEvent::Copied { source, target }, LifecycleContext::default())
            .await;

        assert_eq!(outcome, GuardOutcome::Stripped { removed: 1 });
        assert!(fixture.page_ids("wiki/Space/B").is_empty());
        assert_eq!(fixture.page_ids("wiki/Space/A"), vec!["abcde"]);
    }

    #[tokio::test]
    async fn strip_does_not_bump_the_revision() {
        let fixture = Fixture::start();
        let source = fixture.create_mapped("wiki/Space/A", &["abcde"]);
        let target = fixture.doc("wiki/Space/B");
        let copy = fixture.store.copy_document(&source, target.clone()).unwrap();
        let guard = LifecycleGuard::new(fixture.store.clone());

        guard
            .on_event(&LifecycleEvent::Copied { source, target: target.clone() }, LifecycleContext::default())
            .await;

        assert_eq!(fixture.store.document(&target).unwrap().revision, copy.revision);
    }

    #[tokio::test]
    async fn rename_preserves_the_mapping() {
        let fixture = Fixture::start();
        let source = fixture.create_mapped("wiki/Space/A", &["abcde"]);
        let target = fixture.doc("wiki/Space/B");
        fixture.store.rename_document(&source, target.clone()).unwrap();
        let guard = LifecycleGuard::new(fixture.store.clone());
        let writes = fixture.store.write_count();

        let outcome = guard
            .on_event(&LifecycleEvent::Created { document: target }, LifecycleContext::renaming())
            .await;

        assert_eq!(outcome, GuardOutcome::Preserved);
        assert_eq!(fixture.page_ids("wiki/Space/B"), vec!["abcde"]);
        assert_eq!(fixture.store.write_count(), writes);
    }

    #[tokio::test]
    async fn created_with_mapping_outside_rename_is_stripped() {
        let fixture = Fixture::start();
        let document = fixture.create_mapped("wiki/Space/A", &["abcde", "fghij"]);
        let guard = LifecycleGuard::new(fixture.store.clone());

        let outcome = guard
            .on_event(&LifecycleEvent::Created { document }, LifecycleContext::default())
            .await;

        assert_eq!(outcome, GuardOutcome::Stripped { removed: 2 });
    }

    #[tokio::test]
    async fn documents_without_mapping_are_untouched() {
        let fixture = Fixture::start();
        let document = fixture.create("wiki/Space/A");
        let guard = LifecycleGuard::new(fixture.store.clone());

        let outcome = guard
            .on_event(&LifecycleEvent::Created { document }, LifecycleContext::default())
            .await;

        assert_eq!(outcome, GuardOutcome::Untouched);
        assert_eq!(fixture.store.write_count(), 0);
    }

    #[tokio::test]
    async fn save_failure_is_swallowed() {
        let fixture = Fixture::start();
        let document = fixture.create_mapped("wiki/Space/A", &["abcde"]);
        let store = Arc::new(FailingStore::new(fixture.store.clone()));
        store.fail_writes(StorageError::Timeout("slow disk".into()));
        let guard = LifecycleGuard::new(store);

        let outcome = guard
            .on_event(&LifecycleEvent::Created { document }, LifecycleContext::default())
            .await;

        assert_eq!(outcome, GuardOutcome::Failed);
        assert_eq!(fixture.page_ids("wiki/Space/A"), vec!["abcde"]);
    }

    #[tokio::test]
    async fn load_failure_is_swallowed() {
        let fixture = Fixture::start();
        let document = fixture.create_mapped("wiki/Space/A", &["abcde"]);
        let store = Arc::new(FailingStore::new(fixture.store.clone()));
        store.fail_reads(StorageError::Unavailable("down".into()));
        let guard = LifecycleGuard::new(store.clone());
        let event = LifecycleEvent::Created { document };

        assert_eq!(guard.on_event(&event, LifecycleContext::default()).await, GuardOutcome::Failed);

        store.heal();
        assert_eq!(
            guard.on_event(&event, LifecycleContext::default()).await,
            GuardOutcome::Stripped { removed: 1 }
        );
    }

    #[tokio::test]
    async fn deleted_target_is_untouched() {
        let fixture = Fixture::start();
        let document = fixture.create_mapped("wiki/Space/A", &["abcde"]);
        assert!(fixture.store.delete_document(&document));
        let guard = LifecycleGuard::new(fixture.store.clone());

        let outcome = guard
            .on_event(&LifecycleEvent::Created { document }, LifecycleContext::default())
            .await;

        assert_eq!(outcome, GuardOutcome::Untouched);
    }
}
