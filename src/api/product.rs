use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Extension, Path, Query,
    },
    http::StatusCode,
    response::Response,
    routing::get,
    Json, Router,
};
use sea_orm::{DatabaseConnection, TransactionTrait};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::{Validate, ValidateUrl, ValidationError};

use crate::api::{bad_request, error_response, internal_error, not_found, validate_not_blank};
use crate::middleware::logging::{to_response, ApiError};
use crate::repository::product::{ProductChanges, ProductRecord};
use crate::service::product::{self as product_service, CategoryRef, ProductDraft};
use crate::service::ServiceError;

//ROUTERS
pub fn product_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/productos/", get(get_products).post(create_product))
        .route(
            "/productos/:id/",
            get(get_product).patch(patch_product).delete(delete_product),
        )
        .layer(Extension(db))
}

//ROUTES
async fn get_products(
    Query(params): Query<GetProductsQuery>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Response {
    let category_id = match params.category_id() {
        Ok(category_id) => category_id,
        Err(message) => return bad_request(message),
    };

    let result = match category_id {
        Some(category_id) => product_service::list_by_category(db.as_ref(), category_id).await,
        None => product_service::list_products(db.as_ref()).await,
    };

    match result {
        Ok(products) => {
            let response: Vec<ProductResponse> =
                products.into_iter().map(ProductResponse::new).collect();
            to_response((StatusCode::OK, Json(response)), Ok(()))
        }
        Err(ServiceError::Database(err)) => internal_error(ApiError::DbError(err.to_string())),
        // Any other failure answers 404.
        Err(err) => not_found(err.to_string()),
    }
}

async fn create_product(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    payload: Result<Json<CreateProductPayload>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => return bad_request(rejection.body_text()),
    };
    if let Err(errors) = payload.validate() {
        return bad_request(errors.to_string());
    }

    let txn = match db.begin().await {
        Ok(txn) => txn,
        Err(_) => return internal_error(ApiError::TransactionCreationFailed),
    };

    match product_service::create_product(&txn, payload.into_draft()).await {
        Ok(record) => match txn.commit().await {
            Ok(_) => to_response(
                (StatusCode::CREATED, Json(ProductResponse::new(record))),
                Ok(()),
            ),
            Err(err) => internal_error(ApiError::DbError(err.to_string())),
        },
        Err(err) => {
            let _ = txn.rollback().await;
            error_response(err)
        }
    }
}

async fn get_product(
    id: Result<Path<i32>, PathRejection>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Response {
    let Ok(Path(id)) = id else {
        return not_found("product not found".to_owned());
    };
    match product_service::get_product(db.as_ref(), id).await {
        Ok(record) => to_response((StatusCode::OK, Json(ProductResponse::new(record))), Ok(())),
        Err(err) => error_response(err),
    }
}

async fn patch_product(
    id: Result<Path<i32>, PathRejection>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    payload: Result<Json<PatchProductPayload>, JsonRejection>,
) -> Response {
    let Ok(Path(id)) = id else {
        return not_found("product not found".to_owned());
    };
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => return bad_request(rejection.body_text()),
    };
    if let Err(errors) = payload.validate() {
        return bad_request(errors.to_string());
    }

    let txn = match db.begin().await {
        Ok(txn) => txn,
        Err(_) => return internal_error(ApiError::TransactionCreationFailed),
    };

    match product_service::update_product(&txn, id, payload.into_changes()).await {
        Ok(Some(record)) => match txn.commit().await {
            Ok(_) => to_response((StatusCode::OK, Json(ProductResponse::new(record))), Ok(())),
            Err(err) => internal_error(ApiError::DbError(err.to_string())),
        },
        Ok(None) => {
            let _ = txn.rollback().await;
            not_found("product not found".to_owned())
        }
        Err(err) => {
            let _ = txn.rollback().await;
            error_response(err)
        }
    }
}

async fn delete_product(
    id: Result<Path<i32>, PathRejection>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Response {
    let Ok(Path(id)) = id else {
        return not_found("product not found".to_owned());
    };
    let txn = match db.begin().await {
        Ok(txn) => txn,
        Err(_) => return internal_error(ApiError::TransactionCreationFailed),
    };

    match product_service::delete_product(&txn, id).await {
        Ok(true) => match txn.commit().await {
            Ok(_) => to_response(StatusCode::NO_CONTENT, Ok(())),
            Err(err) => internal_error(ApiError::DbError(err.to_string())),
        },
        Ok(false) => {
            let _ = txn.rollback().await;
            not_found("product not found".to_owned())
        }
        Err(err) => {
            let _ = txn.rollback().await;
            error_response(err)
        }
    }
}

//Structs
#[derive(Deserialize)]
struct GetProductsQuery {
    categoria: Option<String>,
}

impl GetProductsQuery {
    /// An empty `categoria` means no filter.
    fn category_id(&self) -> Result<Option<i32>, String> {
        match self.categoria.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse::<i32>()
                .map(Some)
                .map_err(|_| format!("invalid category id: {raw}")),
        }
    }
}

#[derive(Deserialize, Validate, Debug)]
struct CreateProductPayload {
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    nombre: String,
    descripcion: Option<String>,
    precio: i64,
    #[validate(range(min = 0))]
    stock: Option<i32>,
    #[validate(custom(function = "validate_image_url"))]
    imagen_url: Option<String>,
    categoria_id: Option<i32>,
}

impl CreateProductPayload {
    fn into_draft(self) -> ProductDraft {
        ProductDraft {
            name: self.nombre,
            description: self.descripcion,
            price: self.precio,
            stock: self.stock,
            image_url: self.imagen_url,
            category: self.categoria_id.map(CategoryRef::Id),
        }
    }
}

#[derive(Deserialize, Validate, Debug)]
struct PatchProductPayload {
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    nombre: Option<String>,
    descripcion: Option<String>,
    precio: Option<i64>,
    #[validate(range(min = 0))]
    stock: Option<i32>,
    #[validate(custom(function = "validate_image_url"))]
    imagen_url: Option<String>,
    categoria_id: Option<i32>,
}

impl PatchProductPayload {
    fn into_changes(self) -> ProductChanges {
        ProductChanges {
            name: self.nombre,
            description: self.descripcion,
            price: self.precio,
            stock: self.stock,
            image_url: self.imagen_url,
            category_id: self.categoria_id,
        }
    }
}

// Blank is allowed, anything else has to parse as a URL.
fn validate_image_url(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.validate_url() {
        Ok(())
    } else {
        Err(ValidationError::new("url"))
    }
}

#[derive(Serialize, Debug)]
struct ProductResponse {
    id: i32,
    nombre: String,
    descripcion: String,
    precio: i64,
    stock: i32,
    imagen_url: String,
    categoria: Option<CategorySummary>,
}

#[derive(Serialize, Debug)]
struct CategorySummary {
    id: i32,
    nombre: String,
}

impl ProductResponse {
    fn new(value: ProductRecord) -> ProductResponse {
        let ProductRecord { product, category } = value;
        ProductResponse {
            id: product.id,
            nombre: product.name,
            descripcion: product.description,
            precio: product.price,
            stock: product.stock,
            imagen_url: product.image_url,
            categoria: category.map(|category| CategorySummary {
                id: category.id,
                nombre: category.name,
            }),
        }
    }
}
