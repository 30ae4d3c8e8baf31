use pagelink_core::{DocumentRef, UrlBuilder};
use url::form_urlencoded;

/// Decodes a raw query string into ordered key/value pairs.
///
/// Repeated keys are kept, in order.
pub fn parse_query(raw: Option<&str>) -> Vec<(String, String)> {
    raw.map(|query| form_urlencoded::parse(query.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

/// Builds the redirect target for a resolved document: its view URL with the
/// request's query parameters re-encoded onto it.
pub fn redirect_location(
    urls: &dyn UrlBuilder,
    document: &DocumentRef,
    params: &[(String, String)],
) -> String {
    let mut location = urls.view_url(document);
    if params.is_empty() {
        return location;
    }

    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();
    location.push(if location.contains('?') { '&' } else { '?' });
    location.push_str(&query);
    location
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagelink_core::ViewUrlBuilder;

    fn doc() -> DocumentRef {
        "wiki/Space/Page".parse().unwrap()
    }

    fn urls() -> ViewUrlBuilder {
        ViewUrlBuilder::parse("https://wiki.example.com").unwrap()
    }

    #[test]
    fn no_params_keeps_view_url() {
        assert_eq!(
            redirect_location(&urls(), &doc(), &[]),
            "https://wiki.example.com/wiki/view/Space/Page"
        );
    }

    #[test]
    fn params_are_reencoded_in_order() {
        let params = parse_query(Some("viewer=comments&tag=a%20b&tag=c&x=%26"));
        assert_eq!(
            params,
            vec![
                ("viewer".to_string(), "comments".to_string()),
                ("tag".to_string(), "a b".to_string()),
                ("tag".to_string(), "c".to_string()),
                ("x".to_string(), "&".to_string()),
            ]
        );
        assert_eq!(
            redirect_location(&urls(), &doc(), &params),
            "https://wiki.example.com/wiki/view/Space/Page?viewer=comments&tag=a+b&tag=c&x=%26"
        );
    }

    #[test]
    fn empty_query_string_has_no_params() {
        assert!(parse_query(None).is_empty());
        assert!(parse_query(Some("")).is_empty());
    }
}
