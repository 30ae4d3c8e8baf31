//! Candidate page id generators.
//!
//! Generators are pure: they never look at storage. Checking a candidate
//! against the documents that already carry it is the job of the
//! allocator in `pagelink-service`.

pub mod seq;
pub mod uuid_prefix;

pub use seq::SeqGenerator;
pub use uuid_prefix::UuidPrefixGenerator;

use pagelink_core::PageId;

/// Trait for generating candidate page ids.
///
/// Implementations can vary from random draws to deterministic sequences.
/// A candidate is not guaranteed to be free; callers must check it.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<PageId>;

    /// Draws the next candidate.
    fn generate(&self) -> Self::Output;
}

impl<G: Generator> Generator for std::sync::Arc<G> {
    type Output = G::Output;

    fn generate(&self) -> Self::Output {
        (**self).generate()
    }
}
