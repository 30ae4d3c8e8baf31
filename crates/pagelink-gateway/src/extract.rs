use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use pagelink_core::Principal;

/// Header carrying the requester's identity, set by the fronting proxy.
pub const USER_HEADER: &str = "x-pagelink-user";

/// The principal a request is performed as. Requests without a usable
/// user header run as guest.
#[derive(Debug, Clone)]
pub struct Requester(pub Principal);

impl<S: Send + Sync> FromRequestParts<S> for Requester {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let principal = parts
            .headers
            .get(USER_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(Principal::new)
            .unwrap_or_else(Principal::guest);
        Ok(Requester(principal))
    }
}
