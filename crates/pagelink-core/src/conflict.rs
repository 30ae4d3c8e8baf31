use crate::document::DocumentRef;
use crate::page_id::PageId;
use crate::store::IndexedMapping;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// How harmful a shared page id is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Every document sits in one tenant: resolution cannot tell them apart.
    Critical,
    /// The documents span tenants: a tenant-scoped lookup may still route
    /// each request correctly.
    Potential,
}

impl Severity {
    /// Classifies a group of documents sharing one page id.
    pub fn classify<'a>(documents: impl IntoIterator<Item = &'a DocumentRef>) -> Self {
        let mut tenants = documents.into_iter().map(DocumentRef::tenant);
        let Some(first) = tenants.next() else {
            return Severity::Critical;
        };
        if tenants.all(|tenant| tenant == first) {
            Severity::Critical
        } else {
            Severity::Potential
        }
    }
}

/// Documents sharing one page id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConflictGroup {
    #[serde(rename = "pageID")]
    pub page_id: PageId,
    pub severity: Severity,
    pub documents: BTreeSet<DocumentRef>,
}

/// The page ids found on more than one document in the search index.
///
/// The report reflects the index at scan time: conflicts not yet indexed
/// are missing, and conflicts resolved since then remain until the next
/// scan or an explicit [`ConflictReport::forget`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ConflictReport {
    pub groups: BTreeMap<PageId, ConflictGroup>,
    /// Set when the scan stopped at its row limit.
    pub truncated: bool,
}

impl ConflictReport {
    /// Groups index rows by page id, keeping groups of two or more documents.
    pub fn from_mappings(mappings: impl IntoIterator<Item = IndexedMapping>, truncated: bool) -> Self {
        let mut by_page_id: BTreeMap<PageId, BTreeSet<DocumentRef>> = BTreeMap::new();
        for IndexedMapping { page_id, document } in mappings {
            by_page_id.entry(page_id).or_default().insert(document);
        }

        let groups = by_page_id
            .into_iter()
            .filter(|(_, documents)| documents.len() >= 2)
            .map(|(page_id, documents)| {
                let group = ConflictGroup {
                    page_id: page_id.clone(),
                    severity: Severity::classify(&documents),
                    documents,
                };
                (page_id, group)
            })
            .collect();

        Self { groups, truncated }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn get(&self, page_id: &PageId) -> Option<&ConflictGroup> {
        self.groups.get(page_id)
    }

    pub fn critical(&self) -> impl Iterator<Item = &ConflictGroup> {
        self.groups
            .values()
            .filter(|group| group.severity == Severity::Critical)
    }

    pub fn potential(&self) -> impl Iterator<Item = &ConflictGroup> {
        self.groups
            .values()
            .filter(|group| group.severity == Severity::Potential)
    }

    /// Drops `document` from the group of `page_id`, typically after its id
    /// was regenerated. A group left with fewer than two documents is no
    /// longer a conflict and is removed; otherwise it is reclassified.
    ///
    /// Returns `true` if the document was part of the group.
    pub fn forget(&mut self, page_id: &PageId, document: &DocumentRef) -> bool {
        let Some(group) = self.groups.get_mut(page_id) else {
            return false;
        };
        if !group.documents.remove(document) {
            return false;
        }
        if group.documents.len() < 2 {
            self.groups.remove(page_id);
        } else {
            group.severity = Severity::classify(&group.documents);
        }
        true
    }
}
