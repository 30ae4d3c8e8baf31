use crate::error::{AppError, Result};
use crate::extract::Requester;
use crate::model::{CreateParams, PageIdResponse, RegenerateParams};
use crate::state::AppState;
use axum::extract::{Path, Query, RawQuery, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use pagelink_core::{DocumentRef, PageId, ShortLink};
use pagelink_resolver::{parse_query, redirect_location};
use tracing::debug;

/// `GET /p/{page_id}`: links minted before tenants appeared in the path.
pub async fn redirect_handler(
    State(state): State<AppState>,
    Path(page_id): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Response> {
    redirect(&state, &[page_id], query, StatusCode::MOVED_PERMANENTLY).await
}

/// `GET /p/{tenant}/{page_id}`.
pub async fn redirect_tenant_handler(
    State(state): State<AppState>,
    Path((tenant, page_id)): Path<(String, String)>,
    RawQuery(query): RawQuery,
) -> Result<Response> {
    redirect(&state, &[tenant, page_id], query, StatusCode::FOUND).await
}

async fn redirect(
    state: &AppState,
    segments: &[String],
    query: Option<String>,
    status: StatusCode,
) -> Result<Response> {
    let link = ShortLink::parse_segments(segments)?;
    let Some(resolution) = state
        .links()
        .resolve(&link.page_id, link.tenant.as_ref())
        .await?
    else {
        return Err(AppError::UnknownPageId(link.page_id));
    };

    let location = redirect_location(
        state.urls(),
        &resolution.document,
        &parse_query(query.as_deref()),
    );
    debug!(link = %link, source = %resolution.source, location = %location, "redirecting");
    Ok((status, [(header::LOCATION, location)]).into_response())
}

pub async fn create_handler(
    State(state): State<AppState>,
    Requester(principal): Requester,
    Query(params): Query<CreateParams>,
) -> Result<Json<PageIdResponse>> {
    let document: DocumentRef = params.current_doc_ref.parse()?;
    let page_id = state.links().create_or_get(&document, &principal).await?;
    Ok(Json(PageIdResponse { page_id }))
}

pub async fn regenerate_handler(
    State(state): State<AppState>,
    Requester(principal): Requester,
    Query(params): Query<RegenerateParams>,
) -> Result<Json<PageIdResponse>> {
    let document: DocumentRef = params.current_doc_ref.parse()?;
    let old = PageId::new(&params.old_page_id)?;
    let page_id = state.links().regenerate(&document, &old, &principal).await?;
    Ok(Json(PageIdResponse { page_id }))
}
