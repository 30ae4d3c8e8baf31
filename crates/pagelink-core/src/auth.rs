use crate::document::DocumentRef;
use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt::Display;

/// A right a requester may hold on a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    View,
    Edit,
}

/// The identity a request is performed as.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(SmolStr);

const GUEST: &str = "guest";

impl Principal {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(SmolStr::new(name.as_ref()))
    }

    /// The unauthenticated principal.
    pub fn guest() -> Self {
        Self(SmolStr::new_static(GUEST))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Capability checks, answered by the host platform.
#[async_trait]
pub trait Authorizer: Send + Sync + 'static {
    async fn has_capability(
        &self,
        principal: &Principal,
        capability: Capability,
        document: &DocumentRef,
    ) -> bool;
}

/// A table-driven [`Authorizer`].
///
/// Grants are looked up per document first, then per principal, then the
/// default applies. `Edit` implies `View`; `None` as a grant denies both.
#[derive(Debug, Default)]
pub struct AccessPolicy {
    default: Option<Capability>,
    principals: DashMap<Principal, Option<Capability>>,
    documents: DashMap<(Principal, DocumentRef), Option<Capability>>,
}

impl AccessPolicy {
    /// A policy that grants `default` to everyone unless overridden.
    pub fn new(default: Option<Capability>) -> Self {
        Self {
            default,
            ..Self::default()
        }
    }

    /// Grants `capability` on every document to `principal`.
    pub fn grant(&self, principal: Principal, capability: Option<Capability>) {
        self.principals.insert(principal, capability);
    }

    /// Grants `capability` on one document to `principal`.
    pub fn grant_on(
        &self,
        principal: Principal,
        document: DocumentRef,
        capability: Option<Capability>,
    ) {
        self.documents.insert((principal, document), capability);
    }

    fn effective(&self, principal: &Principal, document: &DocumentRef) -> Option<Capability> {
        if let Some(grant) = self.documents.get(&(principal.clone(), document.clone())) {
            return *grant;
        }
        if let Some(grant) = self.principals.get(principal) {
            return *grant;
        }
        self.default
    }
}

#[async_trait]
impl Authorizer for AccessPolicy {
    async fn has_capability(
        &self,
        principal: &Principal,
        capability: Capability,
        document: &DocumentRef,
    ) -> bool {
        self.effective(principal, document)
            .is_some_and(|granted| granted >= capability)
    }
}
