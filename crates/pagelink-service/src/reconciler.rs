use crate::manager::MappingManager;
use crate::Result;
use pagelink_core::{ConflictReport, DocumentRef, PageId, Principal, SearchIndex};
use pagelink_generator::Generator;
use std::sync::Arc;
use tracing::{info, warn};
use typed_builder::TypedBuilder;

#[derive(Debug, Clone, Default, TypedBuilder)]
pub struct ReconcilerSettings {
    /// Upper bound on the index rows read per report. `None` reads them all.
    #[builder(default, setter(strip_option))]
    pub scan_limit: Option<usize>,
}

/// Finds page ids shared by several documents and breaks them apart.
pub struct ConflictReconciler<G> {
    index: Arc<dyn SearchIndex>,
    manager: Arc<MappingManager<G>>,
    settings: ReconcilerSettings,
}

impl<G: Generator> ConflictReconciler<G> {
    pub fn new(
        index: Arc<dyn SearchIndex>,
        manager: Arc<MappingManager<G>>,
        settings: ReconcilerSettings,
    ) -> Self {
        Self {
            index,
            manager,
            settings,
        }
    }

    /// Groups indexed mappings by page id and keeps the shared ones.
    ///
    /// The index lags behind the store, so a fresh collision may be missing
    /// and a resolved one may still show up.
    ///
    /// When the scan limit cuts through a group, that group is left out of
    /// the report: its documents past the limit are unknown, so neither its
    /// members nor its severity can be trusted.
    pub async fn list_conflicts(&self) -> Result<ConflictReport> {
        let limit = self.settings.scan_limit;
        let mut rows = self.index.scan(limit.map(|l| l.saturating_add(1))).await?;

        let truncated = limit.is_some_and(|l| rows.len() > l);
        if let Some(l) = limit.filter(|_| truncated) {
            let boundary = rows.get(l).map(|row| row.page_id.clone());
            rows.truncate(l);
            rows.retain(|row| Some(&row.page_id) != boundary.as_ref());
        }
        if truncated {
            warn!(scan_limit = ?limit, "conflict scan hit its limit, report is partial");
        }

        let report = ConflictReport::from_mappings(rows, truncated);
        info!(
            groups = report.len(),
            critical = report.critical().count(),
            "listed page id conflicts"
        );
        Ok(report)
    }

    /// Gives `document` a new page id in place of the shared `page_id`.
    pub async fn resolve(
        &self,
        page_id: &PageId,
        document: &DocumentRef,
        principal: &Principal,
    ) -> Result<PageId> {
        self.manager.regenerate(document, page_id, principal).await
    }

    /// Like [`resolve`](Self::resolve), then drops `document` from the
    /// matching group of `report`.
    pub async fn resolve_in(
        &self,
        report: &mut ConflictReport,
        page_id: &PageId,
        document: &DocumentRef,
        principal: &Principal,
    ) -> Result<PageId> {
        let new = self.resolve(page_id, document, principal).await?;
        report.forget(page_id, document);
        Ok(new)
    }
}
