use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Json,
};

use crate::db;
use crate::error::ApiError;
use crate::models::{Booking, BookingCreated, Document, ListQuery, Record, BOOKING_CONFIRMATION};
use crate::routes::{list_kind, ValidatedJson};
use crate::state::AppState;

/// POST /api/bookings - Store a trivia event booking
pub async fn create_booking(
    State(state): State<AppState>,
    ValidatedJson(booking): ValidatedJson<Booking>,
) -> Result<Json<BookingCreated>, ApiError> {
    let pool = state.pool()?;
    let id = db::create_document(pool, Booking::KIND, &booking.to_document()?).await?;

    tracing::info!(%id, date = %booking.date, location = %booking.location, "Booking created");

    Ok(Json(BookingCreated {
        ok: true,
        id,
        auto_email: BOOKING_CONFIRMATION,
    }))
}

/// GET /api/bookings - List stored bookings
///
/// Query params:
/// - limit: maximum number of bookings returned (default 50)
pub async fn list_bookings(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<Document>>, ApiError> {
    list_kind(&state, query, Booking::KIND).await
}
