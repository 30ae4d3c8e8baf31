use pagelink_core::PageId;
use pagelink_generator::{Generator, SeqGenerator};
use parking_lot::Mutex;
use std::collections::VecDeque;

/// Yields a scripted list of candidates, then falls back to a sequence.
///
/// Lets tests force collisions: script an id that is already taken and the
/// allocator has to draw again.
#[derive(Debug)]
pub struct ScriptedGenerator {
    script: Mutex<VecDeque<PageId>>,
    fallback: SeqGenerator,
}

impl ScriptedGenerator {
    pub fn new<I, S>(script: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            script: Mutex::new(script.into_iter().map(PageId::new_unchecked).collect()),
            fallback: SeqGenerator::with_prefix("seq"),
        }
    }

    /// Candidates left in the script.
    pub fn remaining(&self) -> usize {
        self.script.lock().len()
    }
}

impl Generator for ScriptedGenerator {
    type Output = PageId;

    fn generate(&self) -> PageId {
        match self.script.lock().pop_front() {
            Some(page_id) => page_id,
            None => self.fallback.generate(),
        }
    }
}
