use crate::auth::Principal;
use crate::conflict::ConflictReport;
use crate::document::{DocumentRef, TenantId};
use crate::error::LinkError;
use crate::page_id::PageId;
use async_trait::async_trait;
use serde::Serialize;
use std::fmt::Display;

type Result<T> = std::result::Result<T, LinkError>;

/// Which lookup strategy answered a resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupSource {
    /// The tenant-scoped, strongly consistent store query.
    Store,
    /// The global, eventually consistent search index.
    Index,
}

impl Display for LookupSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupSource::Store => f.write_str("store"),
            LookupSource::Index => f.write_str("index"),
        }
    }
}

/// A page id resolved to a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub document: DocumentRef,
    pub source: LookupSource,
}

/// The operations the short-link service exposes to its callers.
#[async_trait]
pub trait ShortLinks: Send + Sync + 'static {
    /// Returns the page id of `document`, minting one if it has none.
    /// Requires view capability.
    async fn create_or_get(&self, document: &DocumentRef, principal: &Principal) -> Result<PageId>;

    /// Replaces `old` on `document` with a freshly minted page id.
    /// Requires edit capability.
    async fn regenerate(
        &self,
        document: &DocumentRef,
        old: &PageId,
        principal: &Principal,
    ) -> Result<PageId>;

    /// Resolves a page id to a document. Returns `None` if no document is
    /// associated to it.
    async fn resolve(&self, page_id: &PageId, tenant: Option<&TenantId>) -> Result<Option<Resolution>>;

    /// Lists the page ids shared by more than one indexed document.
    async fn list_conflicts(&self) -> Result<ConflictReport>;

    /// Breaks a conflict by regenerating the page id of `document`.
    /// Requires edit capability.
    async fn resolve_conflict(
        &self,
        page_id: &PageId,
        document: &DocumentRef,
        principal: &Principal,
    ) -> Result<PageId>;
}
