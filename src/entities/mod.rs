pub mod category;
pub mod product;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};
use tracing::info;

use crate::config::Config;
use crate::entities::{category::Entity as Category, product::Entity as Product};

pub async fn connect(config: &Config) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.database_url.clone());
    if let Some(max) = config.max_connections {
        options.max_connections(max);
    }
    options.sqlx_logging(false);

    Database::connect(options).await
}

/// Creates the `categorias` and `productos` tables when they are missing.
///
/// Categories go first so the product foreign key has something to point at.
pub async fn setup_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut create_category_table = schema.create_table_from_entity(Category);
    create_category_table.if_not_exists();
    let mut create_product_table = schema.create_table_from_entity(Product);
    create_product_table.if_not_exists();

    db.execute(backend.build(&create_category_table)).await?;
    db.execute(backend.build(&create_product_table)).await?;

    info!("Catalog schema ready");
    Ok(())
}

#[cfg(test)]
pub(crate) async fn memory_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    setup_schema(&db).await.expect("Failed to create schema");
    db
}
