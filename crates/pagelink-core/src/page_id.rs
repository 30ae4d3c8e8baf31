use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt::Display;

/// The public token of a short link, bound to one document.
///
/// Page ids are case-sensitive. Ids produced by a generator are trusted and
/// wrapped with [`PageId::new_unchecked`]; ids arriving from a request go
/// through [`PageId::new`] and must be 1-64 characters of `[a-zA-Z0-9_-]`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(SmolStr);

const MIN_LENGTH: usize = 1;
const MAX_LENGTH: usize = 64;

impl PageId {
    /// Creates a new `PageId` after validating the input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, CoreError> {
        let id = id.as_ref();
        Self::validate(id)?;
        Ok(Self(SmolStr::new(id)))
    }

    /// Creates a `PageId` without validation.
    ///
    /// Use this only for ids produced by trusted internal sources
    /// (generators, values read back from the store).
    pub fn new_unchecked(id: impl AsRef<str>) -> Self {
        Self(SmolStr::new(id.as_ref()))
    }

    /// Returns the page id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(id: &str) -> Result<(), CoreError> {
        if id.len() < MIN_LENGTH || id.len() > MAX_LENGTH {
            return Err(CoreError::InvalidPageId(format!(
                "length must be between {} and {}, got {}",
                MIN_LENGTH,
                MAX_LENGTH,
                id.len()
            )));
        }

        if !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(CoreError::InvalidPageId(format!(
                "must contain only alphanumeric characters, hyphens, or underscores: '{}'",
                id
            )));
        }

        Ok(())
    }
}

impl Display for PageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for PageId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
