use std::sync::Arc;

use pagelink_core::{ShortLinks, UrlBuilder};

#[derive(Clone)]
pub struct AppState {
    links: Arc<dyn ShortLinks>,
    urls: Arc<dyn UrlBuilder>,
}

impl AppState {
    pub fn new(links: Arc<dyn ShortLinks>, urls: Arc<dyn UrlBuilder>) -> Self {
        Self { links, urls }
    }

    pub fn links(&self) -> &dyn ShortLinks {
        self.links.as_ref()
    }

    pub fn urls(&self) -> &dyn UrlBuilder {
        self.urls.as_ref()
    }
}
