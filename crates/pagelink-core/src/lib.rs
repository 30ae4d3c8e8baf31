//! Core types and traits for the pagelink short-link service.
//!
//! This crate provides the domain types shared by every other crate
//! (page ids, document references, mappings), the error taxonomy, and the
//! traits through which the service talks to its host platform: the
//! document store, the secondary search index, authorization and URL
//! building.

pub mod auth;
pub mod conflict;
pub mod document;
pub mod error;
pub mod page_id;
pub mod short_link;
pub mod shortlinks;
pub mod store;
pub mod urls;

pub use auth::{AccessPolicy, Authorizer, Capability, Principal};
pub use conflict::{ConflictGroup, ConflictReport, Severity};
pub use document::{Document, DocumentRef, Mapping, SaveMode, TenantId};
pub use error::{CoreError, LinkError, StorageError};
pub use page_id::PageId;
pub use short_link::ShortLink;
pub use shortlinks::{LookupSource, Resolution, ShortLinks};
pub use store::{DocumentStore, IndexedMapping, MappingQuery, SearchIndex};
pub use urls::{UrlBuilder, ViewUrlBuilder};
