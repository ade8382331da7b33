use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, Query, Request,
    },
    response::Json,
    routing::get,
    Router,
};
use serde::de::DeserializeOwned;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use validator::Validate;

use crate::db;
use crate::error::ApiError;
use crate::models::{Document, ListQuery};
use crate::state::AppState;

pub mod bookings;
pub mod health;
pub mod trophy_orders;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Root and health
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .route("/test", get(health::test_database))

        // Bookings
        .route(
            "/api/bookings",
            get(bookings::list_bookings).post(bookings::create_booking),
        )

        // Trophy orders
        .route(
            "/api/trophy-orders",
            get(trophy_orders::list_trophy_orders).post(trophy_orders::create_trophy_order),
        )

        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// JSON body that has passed its `validator` rules.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

async fn list_kind(
    state: &AppState,
    query: Result<Query<ListQuery>, QueryRejection>,
    kind: &str,
) -> Result<Json<Vec<Document>>, ApiError> {
    let Query(params) = query?;
    let pool = state.pool()?;
    let documents = db::list_documents(pool, kind, &Document::new(), params.limit()).await?;
    Ok(Json(documents))
}
