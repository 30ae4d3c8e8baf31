use crate::Generator;
use pagelink_core::PageId;
use std::sync::atomic::{AtomicU64, Ordering};

/// A deterministic generator producing `prefix000000`, `prefix000001`, ...
///
/// Useful for tests and for migrations that need reproducible ids. Two
/// instances with the same prefix produce the same ids, so the allocator's
/// collision check is what keeps them apart.
#[derive(Debug)]
pub struct SeqGenerator {
    counter: AtomicU64,
    prefix: String,
}

impl Clone for SeqGenerator {
    fn clone(&self) -> Self {
        Self {
            counter: AtomicU64::new(self.counter.load(Ordering::SeqCst)),
            prefix: self.prefix.clone(),
        }
    }
}

impl SeqGenerator {
    /// Creates a new sequential generator with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self::with_offset(prefix, 0)
    }

    /// Creates a new sequential generator starting from a specific counter value.
    pub fn with_offset(prefix: impl Into<String>, offset: u64) -> Self {
        Self {
            counter: AtomicU64::new(offset),
            prefix: prefix.into(),
        }
    }
}

impl Generator for SeqGenerator {
    type Output = PageId;

    fn generate(&self) -> PageId {
        let count = self.counter.fetch_add(1, Ordering::SeqCst);
        PageId::new_unchecked(format!("{}{:06}", self.prefix, count))
    }
}
