pub mod category;
pub mod product;

use axum::{http::StatusCode, middleware::from_fn, response::Response, Json, Router};
use sea_orm::DatabaseConnection;
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use validator::ValidationError;

use category::category_router;
use product::product_router;

use crate::middleware::logging::{logging_middleware, to_response, ApiError};
use crate::service::ServiceError;

pub fn create_api_router(shared_db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .merge(product_router(shared_db.clone()))
        .merge(category_router(shared_db))
        .layer(from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Maps a service failure onto its status code and an `{"error": ...}` body.
pub(crate) fn error_response(err: ServiceError) -> Response {
    match err {
        ServiceError::InvalidInput(message) => bad_request(message),
        ServiceError::NotFound(message) => not_found(message),
        ServiceError::Database(err) => internal_error(ApiError::DbError(err.to_string())),
    }
}

pub(crate) fn bad_request(message: String) -> Response {
    to_response(
        (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": message.clone()
            })),
        ),
        Err(ApiError::ValidationFail(message)),
    )
}

pub(crate) fn not_found(message: String) -> Response {
    to_response(
        (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": message.clone()
            })),
        ),
        Err(ApiError::NotFound(message)),
    )
}

pub(crate) fn internal_error(ext: ApiError) -> Response {
    to_response(
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Internal server error"
            })),
        ),
        Err(ext),
    )
}

/// Rejects names made only of whitespace.
pub(crate) fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank"))
    } else {
        Ok(())
    }
}
