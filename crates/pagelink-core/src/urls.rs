use crate::document::DocumentRef;
use url::Url;

/// Builds the canonical view URL of a document.
pub trait UrlBuilder: Send + Sync + 'static {
    fn view_url(&self, document: &DocumentRef) -> String;
}

/// Renders `{base}/{tenant}/view/{space...}/{name}` with every segment
/// percent-encoded.
#[derive(Debug, Clone)]
pub struct ViewUrlBuilder {
    base: Url,
}

impl ViewUrlBuilder {
    pub fn new(base: Url) -> Self {
        Self { base }
    }

    pub fn parse(base: &str) -> Result<Self, url::ParseError> {
        Url::parse(base).map(Self::new)
    }
}

impl UrlBuilder for ViewUrlBuilder {
    fn view_url(&self, document: &DocumentRef) -> String {
        let mut url = self.base.clone();
        // Base URLs that cannot carry a path (e.g. `mailto:`) are rejected by
        // `path_segments_mut`; fall back to the bare base in that case.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push(document.tenant().as_str())
                .push("view")
                .extend(document.spaces())
                .push(document.name());
        }
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_view_url() {
        let builder = ViewUrlBuilder::parse("https://wiki.example.com/xwiki/").unwrap();
        let doc: DocumentRef = "wiki/Space/Page".parse().unwrap();
        assert_eq!(
            builder.view_url(&doc),
            "https://wiki.example.com/xwiki/wiki/view/Space/Page"
        );
    }

    #[test]
    fn encodes_segments() {
        let builder = ViewUrlBuilder::parse("https://wiki.example.com").unwrap();
        let doc: DocumentRef = "wiki/My Space/Page?1".parse().unwrap();
        assert_eq!(
            builder.view_url(&doc),
            "https://wiki.example.com/wiki/view/My%20Space/Page%3F1"
        );
    }
}
