//! # Bill Routes
//!
//! Sale creation and bill history. POST runs the atomic sale
//! transaction; any business failure (unknown item, insufficient stock)
//! comes back as a 400 with nothing persisted.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;
use atrium_core::validation::validate_bill_request;
use atrium_core::{Bill, BillWithLines, CreateBillRequest};

pub fn router() -> Router<AppState> {
    Router::new().route("/api/bills", get(list).post(create))
}

/// GET /api/bills - all bills newest-first, lines attached.
async fn list(State(state): State<AppState>) -> Result<Json<Vec<BillWithLines>>, ApiError> {
    let bills = state.store.get_bills().await?;
    Ok(Json(bills))
}

/// POST /api/bills - 201 with the persisted bill header.
async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateBillRequest>,
) -> Result<(StatusCode, Json<Bill>), ApiError> {
    let draft = validate_bill_request(&payload)?;
    debug!(
        customer = %draft.customer_name,
        lines = draft.lines.len(),
        "Creating bill"
    );

    let bill = state.store.create_bill(draft).await?;
    Ok((StatusCode::CREATED, Json(bill)))
}
