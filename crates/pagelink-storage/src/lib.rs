//! In-memory host collaborators.
//!
//! [`InMemoryDocumentStore`] plays the authoritative document store and its
//! structured query engine; [`InMemorySearchIndex`] plays the eventually
//! consistent search index, which only changes when it is explicitly
//! refreshed.

pub mod error;
pub mod index;
pub mod memory;
pub mod seed;

pub use error::SeedError;
pub use index::InMemorySearchIndex;
pub use memory::InMemoryDocumentStore;
pub use pagelink_core::error::{Result, StorageError};
pub use pagelink_core::store::{DocumentStore, IndexedMapping, MappingQuery, SearchIndex};
pub use seed::SeedDocument;
