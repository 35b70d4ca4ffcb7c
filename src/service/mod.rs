//! Business rules sitting between the HTTP layer and the stores.

pub mod category;
pub mod product;

use sea_orm::DbErr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    /// User supplied data broke a business rule.
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

impl ServiceError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ServiceError::InvalidInput(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ServiceError::NotFound(message.into())
    }
}
