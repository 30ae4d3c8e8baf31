use pagelink_core::{ConflictGroup, ConflictReport};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct ResolveConflictParams {
    #[serde(rename = "pageID")]
    pub page_id: String,
    #[serde(rename = "currentDocRef")]
    pub current_doc_ref: String,
}

/// The conflict report, critical groups first.
#[derive(Serialize)]
pub struct ConflictsResponse {
    pub critical: Vec<ConflictGroup>,
    pub potential: Vec<ConflictGroup>,
    pub truncated: bool,
}

impl From<ConflictReport> for ConflictsResponse {
    fn from(report: ConflictReport) -> Self {
        let critical = report.critical().cloned().collect();
        let potential = report.potential().cloned().collect();
        Self {
            critical,
            potential,
            truncated: report.truncated,
        }
    }
}
