//! Resolution of page ids back to documents.
//!
//! A [`FallbackResolver`] walks an ordered chain of [`Lookup`] strategies:
//! by default the tenant-scoped, strongly consistent [`StoreLookup`] and
//! then the global, eventually consistent [`IndexLookup`]. The first
//! strategy that finds a document wins.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use pagelink_core::{PageId, TenantId};
//! use pagelink_resolver::FallbackResolver;
//! use pagelink_storage::{InMemoryDocumentStore, InMemorySearchIndex};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(InMemoryDocumentStore::new(TenantId::new("wiki")?));
//! let index = Arc::new(InMemorySearchIndex::new());
//! let resolver = FallbackResolver::new(store, index);
//!
//! if let Some(found) = resolver.resolve(&PageId::new("abcde")?, None).await? {
//!     println!("{} (via {})", found.document, found.source);
//! }
//! # Ok(())
//! # }
//! ```

pub mod lookup;
pub mod redirect;
pub mod service;

pub use lookup::{IndexLookup, Lookup, StoreLookup};
pub use redirect::{parse_query, redirect_location};
pub use service::FallbackResolver;
