use crate::document::TenantId;
use crate::error::CoreError;
use crate::page_id::PageId;
use std::fmt::Display;

/// Path prefix under which short links are served.
pub const PATH_PREFIX: &str = "p";

/// A short link as it appears in a URL: an optional tenant and a page id.
///
/// The tenant segment is only present for links minted outside the main
/// tenant, to keep links on the main tenant as short as possible.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ShortLink {
    pub tenant: Option<TenantId>,
    pub page_id: PageId,
}

impl ShortLink {
    pub fn new(tenant: Option<TenantId>, page_id: PageId) -> Self {
        Self { tenant, page_id }
    }

    /// Decodes the path segments following [`PATH_PREFIX`].
    ///
    /// One segment is `pageId`, two are `tenant/pageId`. Anything else is
    /// rejected.
    pub fn parse_segments<S: AsRef<str>>(segments: &[S]) -> Result<Self, CoreError> {
        match segments {
            [page_id] => Ok(Self::new(None, PageId::new(page_id)?)),
            [tenant, page_id] => Ok(Self::new(
                Some(TenantId::new(tenant).map_err(|e| CoreError::InvalidShortLink(e.to_string()))?),
                PageId::new(page_id)?,
            )),
            _ => Err(CoreError::InvalidShortLink(format!(
                "expected 1 or 2 path segments, got {}",
                segments.len()
            ))),
        }
    }

    /// Generates the full short URL based on the provided base URL.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self)
    }
}

impl Display for ShortLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.tenant {
            Some(tenant) => write!(f, "{}/{}/{}", PATH_PREFIX, tenant, self.page_id),
            None => write!(f, "{}/{}", PATH_PREFIX, self.page_id),
        }
    }
}
