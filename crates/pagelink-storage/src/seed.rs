use crate::error::SeedError;
use crate::memory::InMemoryDocumentStore;
use pagelink_core::{Document, DocumentRef, PageId};
use serde::Deserialize;
use std::path::Path;

/// One document of a JSON seed file.
///
/// ```json
/// [{ "reference": "wiki/Space/Page", "pageIDs": ["abcde"] }]
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct SeedDocument {
    pub reference: String,
    #[serde(default, rename = "pageIDs")]
    pub page_ids: Vec<String>,
}

impl SeedDocument {
    pub fn into_document(self) -> Result<Document, SeedError> {
        let reference: DocumentRef = self.reference.parse()?;
        let mut document = Document::new(reference);
        for page_id in self.page_ids {
            document.add_mapping(PageId::new(page_id)?);
        }
        Ok(document)
    }
}

/// Parses a JSON array of [`SeedDocument`]s.
pub fn parse_seed(json: &str) -> Result<Vec<Document>, SeedError> {
    let entries: Vec<SeedDocument> = serde_json::from_str(json)?;
    entries.into_iter().map(SeedDocument::into_document).collect()
}

impl InMemoryDocumentStore {
    /// Loads a seed file into the store. Returns the number of documents
    /// loaded.
    pub fn load_seed_file(&self, path: impl AsRef<Path>) -> Result<usize, SeedError> {
        let json = std::fs::read_to_string(path)?;
        let documents = parse_seed(&json)?;
        let count = documents.len();
        for document in documents {
            self.insert(document);
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_documents_with_and_without_ids() {
        let documents = parse_seed(
            r#"[
                {"reference": "wiki/Space/Page", "pageIDs": ["abcde"]},
                {"reference": "sub/Space/Other"}
            ]"#,
        )
        .unwrap();

        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].mapping().unwrap().page_id.as_str(), "abcde");
        assert!(!documents[1].has_mapping());
    }

    #[test]
    fn rejects_invalid_ids_and_references() {
        assert!(matches!(
            parse_seed(r#"[{"reference": "wiki/Space/Page", "pageIDs": ["a b"]}]"#),
            Err(SeedError::Invalid(_))
        ));
        assert!(matches!(
            parse_seed(r#"[{"reference": "Page"}]"#),
            Err(SeedError::Invalid(_))
        ));
        assert!(matches!(parse_seed("{"), Err(SeedError::Parse(_))));
    }
}
