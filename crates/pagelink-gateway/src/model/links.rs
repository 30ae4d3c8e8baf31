use pagelink_core::PageId;
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct CreateParams {
    #[serde(rename = "currentDocRef")]
    pub current_doc_ref: String,
}

#[derive(Deserialize)]
pub struct RegenerateParams {
    #[serde(rename = "currentDocRef")]
    pub current_doc_ref: String,
    #[serde(rename = "oldPageID")]
    pub old_page_id: String,
}

#[derive(Serialize)]
pub struct PageIdResponse {
    #[serde(rename = "pageID")]
    pub page_id: PageId,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
