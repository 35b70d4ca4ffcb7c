use sea_orm::{ConnectionTrait, TransactionTrait};

use crate::entities::category;
use crate::repository::category as store;
use crate::service::ServiceError;

pub async fn create_category<C: ConnectionTrait>(
    db: &C,
    name: String,
    description: Option<String>,
) -> Result<category::Model, ServiceError> {
    Ok(store::create(db, name, description).await?)
}

pub async fn get_category<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<category::Model, ServiceError> {
    store::get(db, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("category not found"))
}

pub async fn delete_category<C>(db: &C, id: i32) -> Result<bool, ServiceError>
where
    C: ConnectionTrait + TransactionTrait,
{
    Ok(store::delete(db, id).await?)
}
