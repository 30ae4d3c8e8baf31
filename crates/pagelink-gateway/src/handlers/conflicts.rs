use crate::error::Result;
use crate::extract::Requester;
use crate::model::{ConflictsResponse, PageIdResponse, ResolveConflictParams};
use crate::state::AppState;
use axum::extract::{Query, State};
use axum::Json;
use pagelink_core::{DocumentRef, PageId};

pub async fn list_conflicts_handler(State(state): State<AppState>) -> Result<Json<ConflictsResponse>> {
    let report = state.links().list_conflicts().await?;
    Ok(Json(report.into()))
}

pub async fn resolve_conflict_handler(
    State(state): State<AppState>,
    Requester(principal): Requester,
    Query(params): Query<ResolveConflictParams>,
) -> Result<Json<PageIdResponse>> {
    let page_id = PageId::new(&params.page_id)?;
    let document: DocumentRef = params.current_doc_ref.parse()?;
    let page_id = state
        .links()
        .resolve_conflict(&page_id, &document, &principal)
        .await?;
    Ok(Json(PageIdResponse { page_id }))
}
