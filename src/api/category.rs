use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Extension, Path,
    },
    http::StatusCode,
    response::Response,
    routing::{get, post},
    Json, Router,
};
use sea_orm::{DatabaseConnection, TransactionTrait};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::api::{bad_request, error_response, internal_error, not_found, validate_not_blank};
use crate::entities::category;
use crate::middleware::logging::{to_response, ApiError};
use crate::service::category as category_service;

pub fn category_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/categorias/", post(create_category))
        .route(
            "/categorias/:id/",
            get(get_category).delete(delete_category),
        )
        .layer(Extension(db))
}

async fn create_category(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    payload: Result<Json<CreateCategoryPayload>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => return bad_request(rejection.body_text()),
    };
    if let Err(errors) = payload.validate() {
        return bad_request(errors.to_string());
    }

    match category_service::create_category(db.as_ref(), payload.nombre, payload.descripcion).await
    {
        Ok(created) => to_response(
            (StatusCode::CREATED, Json(CategoryResponse::new(created))),
            Ok(()),
        ),
        Err(err) => error_response(err),
    }
}

async fn get_category(
    id: Result<Path<i32>, PathRejection>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Response {
    let Ok(Path(id)) = id else {
        return not_found("category not found".to_owned());
    };
    match category_service::get_category(db.as_ref(), id).await {
        Ok(found) => to_response((StatusCode::OK, Json(CategoryResponse::new(found))), Ok(())),
        Err(err) => error_response(err),
    }
}

/// Removes the category and, with it, all of its products.
async fn delete_category(
    id: Result<Path<i32>, PathRejection>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Response {
    let Ok(Path(id)) = id else {
        return not_found("category not found".to_owned());
    };
    let txn = match db.begin().await {
        Ok(txn) => txn,
        Err(_) => return internal_error(ApiError::TransactionCreationFailed),
    };

    match category_service::delete_category(&txn, id).await {
        Ok(true) => match txn.commit().await {
            Ok(_) => to_response(StatusCode::NO_CONTENT, Ok(())),
            Err(err) => internal_error(ApiError::DbError(err.to_string())),
        },
        Ok(false) => {
            let _ = txn.rollback().await;
            not_found("category not found".to_owned())
        }
        Err(err) => {
            let _ = txn.rollback().await;
            error_response(err)
        }
    }
}

#[derive(Deserialize, Validate, Debug)]
struct CreateCategoryPayload {
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    nombre: String,
    descripcion: Option<String>,
}

#[derive(Serialize, Debug)]
struct CategoryResponse {
    id: i32,
    nombre: String,
    descripcion: Option<String>,
}

impl CategoryResponse {
    fn new(value: category::Model) -> CategoryResponse {
        CategoryResponse {
            id: value.id,
            nombre: value.name,
            descripcion: value.description,
        }
    }
}
