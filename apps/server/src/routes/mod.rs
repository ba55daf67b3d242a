//! Router assembly and shared middleware.

use axum::Router;
use http::{HeaderName, HeaderValue};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::state::AppState;

pub mod bills;
pub mod dashboard;
pub mod health;
pub mod items;

/// Request ID generator: a fresh UUID per request.
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state).
pub fn build_router() -> Router<AppState> {
    Router::new()
        .merge(items::router())
        .merge(bills::router())
        .merge(dashboard::router())
        .merge(health::router())
}

/// Build the fully configured application with middleware and state.
pub fn build_app(state: AppState) -> Router {
    build_router()
        // CORS - the terminal UI is served from elsewhere in dev
        .layer(CorsLayer::permissive())
        // Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Unique ID per request, propagated to the response
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        .with_state(state)
}
