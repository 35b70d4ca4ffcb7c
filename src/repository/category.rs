use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};

use crate::entities::{category, product};

pub async fn create<C: ConnectionTrait>(
    db: &C,
    name: String,
    description: Option<String>,
) -> Result<category::Model, DbErr> {
    category::ActiveModel {
        name: Set(name),
        description: Set(description),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn get<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<category::Model>, DbErr> {
    category::Entity::find_by_id(id).one(db).await
}

pub async fn find_by_name<C: ConnectionTrait>(
    db: &C,
    name: &str,
) -> Result<Option<category::Model>, DbErr> {
    category::Entity::find()
        .filter(category::Column::Name.eq(name))
        .one(db)
        .await
}

/// Returns the first category called `name`, creating it when there is none.
/// The flag is `true` when a row was inserted.
pub async fn get_or_create<C: ConnectionTrait>(
    db: &C,
    name: &str,
    description: Option<String>,
) -> Result<(category::Model, bool), DbErr> {
    match find_by_name(db, name).await? {
        Some(existing) => Ok((existing, false)),
        None => Ok((create(db, name.to_owned(), description).await?, true)),
    }
}

/// Deletes the category together with every product that references it.
///
/// Both deletes run in one transaction (a savepoint when `db` is already one), so
/// the foreign-key cascade holds even on backends with foreign keys switched off.
pub async fn delete<C>(db: &C, id: i32) -> Result<bool, DbErr>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;

    product::Entity::delete_many()
        .filter(product::Column::CategoryId.eq(id))
        .exec(&txn)
        .await?;
    let result = category::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    Ok(result.rows_affected > 0)
}
