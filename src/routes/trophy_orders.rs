use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Json,
};

use crate::db;
use crate::error::ApiError;
use crate::models::{Document, ListQuery, Record, TrophyOrder, TrophyOrderCreated, TROPHY_UNIT_PRICE};
use crate::routes::{list_kind, ValidatedJson};
use crate::state::AppState;

/// POST /api/trophy-orders - Store a trophy pack order and price it
pub async fn create_trophy_order(
    State(state): State<AppState>,
    ValidatedJson(order): ValidatedJson<TrophyOrder>,
) -> Result<Json<TrophyOrderCreated>, ApiError> {
    let pool = state.pool()?;
    let id = db::create_document(pool, TrophyOrder::KIND, &order.to_document()?).await?;
    let total = order.total();

    tracing::info!(%id, quantity = order.quantity, total, "Trophy order created");

    Ok(Json(TrophyOrderCreated {
        ok: true,
        id,
        unit_price: TROPHY_UNIT_PRICE,
        total,
    }))
}

/// GET /api/trophy-orders - List stored trophy orders
pub async fn list_trophy_orders(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<Document>>, ApiError> {
    list_kind(&state, query, TrophyOrder::KIND).await
}
