use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::time::Instant;
use thiserror::Error;
use tracing::{error, info, warn};

/// Logs every request once it has been answered.
///
/// Handlers attach a `Result<(), ApiError>` extension through [`to_response`];
/// its outcome picks the log level.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let start = Instant::now();

    let response = next.run(req).await;

    let status = response.status();
    let elapsed = start.elapsed();

    match response.extensions().get::<Result<(), ApiError>>() {
        Some(Ok(_)) => info!(
            method = %method,
            uri = %uri,
            status = %status,
            elapsed = ?elapsed,
            "Processed request"
        ),
        Some(Err(value)) if status.is_server_error() => error!(
            method = %method,
            uri = %uri,
            status = %status,
            elapsed = ?elapsed,
            value = %value,
            "Failed to process request"
        ),
        Some(Err(value)) => warn!(
            method = %method,
            uri = %uri,
            status = %status,
            elapsed = ?elapsed,
            value = %value,
            "Rejected request"
        ),
        None => warn!(
            method = %method,
            uri = %uri,
            status = %status,
            elapsed = ?elapsed,
            "Processed request, but no Response extension is set"
        ),
    }

    response
}

#[derive(Clone, Debug, Error)]
pub enum ApiError {
    #[error("Failed to create transaction")]
    TransactionCreationFailed,
    #[error("Database error: {0}")]
    DbError(String),
    #[error("Failed to validate: {0}")]
    ValidationFail(String),
    #[error("Not found: {0}")]
    NotFound(String),
}

pub fn to_response<T: IntoResponse>(
    response: T,               //The response that we are sending + StatusCode
    ext: Result<(), ApiError>, //The extension, that we want to give logging middleware
) -> Response {
    let mut response = response.into_response();

    response.extensions_mut().insert(ext);

    response
}
