//! # Dashboard Route
//!
//! Server-side aggregates for the dashboard: today's revenue, stock
//! valuation and the low-stock list, computed by the pure report
//! helpers over freshly loaded rows.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;
use atrium_core::{reports, Item, Money};

pub fn router() -> Router<AppState> {
    Router::new().route("/api/dashboard", get(dashboard))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    /// Revenue from bills committed today (UTC).
    pub todays_revenue: Money,

    /// Sum of price x quantity over the whole catalog.
    pub stock_value: Money,

    /// Catalog size.
    pub item_count: usize,

    /// Items at or below their reorder threshold.
    pub low_stock_items: Vec<Item>,
}

/// GET /api/dashboard
async fn dashboard(State(state): State<AppState>) -> Result<Json<DashboardResponse>, ApiError> {
    let items = state.store.get_items().await?;
    let bills = state.store.get_bills().await?;

    let headers: Vec<_> = bills.into_iter().map(|b| b.bill).collect();
    let low_stock_items = reports::low_stock(&items).into_iter().cloned().collect();

    Ok(Json(DashboardResponse {
        todays_revenue: reports::todays_revenue(&headers, Utc::now()),
        stock_value: reports::stock_value(&items),
        item_count: items.len(),
        low_stock_items,
    }))
}
