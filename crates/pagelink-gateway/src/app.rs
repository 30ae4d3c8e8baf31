use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    create_handler, health_handler, list_conflicts_handler, redirect_handler,
    redirect_tenant_handler, regenerate_handler, resolve_conflict_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/p/create", post(create_handler))
            .route("/p/regenerate", post(regenerate_handler))
            .route("/p/{page_id}", get(redirect_handler))
            .route("/p/{tenant}/{page_id}", get(redirect_tenant_handler))
            .route("/conflicts", get(list_conflicts_handler))
            .route("/conflicts/resolve", post(resolve_conflict_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
