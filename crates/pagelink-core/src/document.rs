use crate::error::CoreError;
use crate::page_id::PageId;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt::Display;
use std::str::FromStr;

/// An isolated sub-partition of the document store (one co-hosted wiki).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(SmolStr);

impl TenantId {
    pub fn new(id: impl AsRef<str>) -> Result<Self, CoreError> {
        let id = id.as_ref();
        if id.is_empty() || id.contains('/') {
            return Err(CoreError::InvalidDocumentRef(format!(
                "tenant must be a non-empty segment without '/': '{}'",
                id
            )));
        }
        Ok(Self(SmolStr::new(id)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TenantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hierarchical reference to a document: tenant, one or more spaces, name.
///
/// The textual form is `tenant/Space[/Sub...]/Name`; a leading `/` is
/// accepted when parsing.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct DocumentRef {
    tenant: TenantId,
    spaces: Vec<String>,
    name: String,
}

impl DocumentRef {
    pub fn new(
        tenant: TenantId,
        spaces: impl IntoIterator<Item = impl Into<String>>,
        name: impl Into<String>,
    ) -> Result<Self, CoreError> {
        let spaces: Vec<String> = spaces.into_iter().map(Into::into).collect();
        let name = name.into();

        if spaces.is_empty() {
            return Err(CoreError::InvalidDocumentRef(
                "at least one space is required".to_string(),
            ));
        }
        if spaces.iter().chain(std::iter::once(&name)).any(|s| s.is_empty() || s.contains('/')) {
            return Err(CoreError::InvalidDocumentRef(format!(
                "segments must be non-empty and must not contain '/': {:?}/{}",
                spaces, name
            )));
        }

        Ok(Self {
            tenant,
            spaces,
            name,
        })
    }

    pub fn tenant(&self) -> &TenantId {
        &self.tenant
    }

    pub fn spaces(&self) -> &[String] {
        &self.spaces
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for DocumentRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tenant)?;
        for space in &self.spaces {
            write!(f, "/{}", space)?;
        }
        write!(f, "/{}", self.name)
    }
}

impl FromStr for DocumentRef {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.strip_prefix('/').unwrap_or(s);
        let segments: Vec<&str> = trimmed.split('/').collect();

        let [tenant, spaces @ .., name] = segments.as_slice() else {
            return Err(CoreError::InvalidDocumentRef(s.to_string()));
        };
        if spaces.is_empty() {
            return Err(CoreError::InvalidDocumentRef(format!(
                "expected tenant/Space/Name, got '{}'",
                s
            )));
        }

        Self::new(TenantId::new(tenant)?, spaces.iter().copied(), *name)
    }
}

impl From<DocumentRef> for String {
    fn from(value: DocumentRef) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for DocumentRef {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// The short-link attribute attached to a document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
    #[serde(rename = "pageID")]
    pub page_id: PageId,
}

impl Mapping {
    pub fn new(page_id: PageId) -> Self {
        Self { page_id }
    }
}

/// How a document write is recorded by the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveMode {
    /// A regular edit: creates a history entry.
    Versioned,
    /// A metadata-only write that leaves the history untouched.
    Silent,
}

/// A document as loaded from the host store.
///
/// Only the parts the short-link service cares about are modelled: the
/// reference, the attached mappings, and the history revision.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub reference: DocumentRef,
    #[serde(default)]
    pub mappings: Vec<Mapping>,
    #[serde(default)]
    pub revision: u64,
}

impl Document {
    pub fn new(reference: DocumentRef) -> Self {
        Self {
            reference,
            mappings: Vec::new(),
            revision: 0,
        }
    }

    /// The first attached mapping, if any.
    pub fn mapping(&self) -> Option<&Mapping> {
        self.mappings.first()
    }

    pub fn has_mapping(&self) -> bool {
        !self.mappings.is_empty()
    }

    pub fn add_mapping(&mut self, page_id: PageId) {
        self.mappings.push(Mapping::new(page_id));
    }

    /// Removes every mapping, returning how many were attached.
    pub fn remove_mappings(&mut self) -> usize {
        let removed = self.mappings.len();
        self.mappings.clear();
        removed
    }

    /// Replaces every mapping carrying `old` with a single mapping carrying
    /// `new`, kept at the position of the first match.
    ///
    /// Returns `false` (and leaves the document untouched) if no mapping
    /// carries `old`.
    pub fn replace_page_id(&mut self, old: &PageId, new: PageId) -> bool {
        let Some(first) = self.mappings.iter().position(|m| &m.page_id == old) else {
            return false;
        };

        let mut index = 0;
        self.mappings.retain(|m| {
            let keep = index == first || &m.page_id != old;
            index += 1;
            keep
        });
        self.mappings[first].page_id = new;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_ref(s: &str) -> DocumentRef {
        s.parse().unwrap()
    }

    #[test]
    fn parse_with_and_without_leading_slash() {
        let a = doc_ref("/wiki/Space/Page");
        let b = doc_ref("wiki/Space/Page");
        assert_eq!(a, b);
        assert_eq!(a.tenant().as_str(), "wiki");
        assert_eq!(a.spaces(), ["Space".to_string()]);
        assert_eq!(a.name(), "Page");
        assert_eq!(a.to_string(), "wiki/Space/Page");
    }

    #[test]
    fn parse_nested_spaces() {
        let r = doc_ref("sub/A/B/C/Page");
        assert_eq!(r.spaces().len(), 3);
        assert_eq!(r.to_string(), "sub/A/B/C/Page");
    }

    #[test]
    fn parse_rejects_short_or_empty_segments() {
        assert!("wiki/Page".parse::<DocumentRef>().is_err());
        assert!("".parse::<DocumentRef>().is_err());
        assert!("wiki//Page".parse::<DocumentRef>().is_err());
        assert!("/wiki/Space/".parse::<DocumentRef>().is_err());
    }

    #[test]
    fn replace_page_id_collapses_duplicates() {
        let mut doc = Document::new(doc_ref("wiki/Space/Page"));
        doc.add_mapping(PageId::new_unchecked("old01"));
        doc.add_mapping(PageId::new_unchecked("keep1"));
        doc.add_mapping(PageId::new_unchecked("old01"));

        assert!(doc.replace_page_id(&PageId::new_unchecked("old01"), PageId::new_unchecked("new01")));
        let ids: Vec<&str> = doc.mappings.iter().map(|m| m.page_id.as_str()).collect();
        assert_eq!(ids, ["new01", "keep1"]);
    }

    #[test]
    fn replace_page_id_without_match_is_noop() {
        let mut doc = Document::new(doc_ref("wiki/Space/Page"));
        doc.add_mapping(PageId::new_unchecked("abcde"));
        assert!(!doc.replace_page_id(&PageId::new_unchecked("zzzzz"), PageId::new_unchecked("new01")));
        assert_eq!(doc.mapping().unwrap().page_id.as_str(), "abcde");
    }

    #[test]
    fn document_ref_serializes_as_string() {
        let r = doc_ref("wiki/Space/Page");
        assert_eq!(serde_json::to_string(&r).unwrap(), "\"wiki/Space/Page\"");
        let back: DocumentRef = serde_json::from_str("\"/wiki/Space/Page\"").unwrap();
        assert_eq!(back, r);
    }
}
