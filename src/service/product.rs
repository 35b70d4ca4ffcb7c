use sea_orm::ConnectionTrait;
use tracing::debug;

use crate::entities::category;
use crate::repository::category as category_store;
use crate::repository::product::{self as store, NewProduct, ProductChanges, ProductRecord};
use crate::service::ServiceError;

/// How a new product names its category: by id, or with a row the caller already holds.
#[derive(Clone, Debug, PartialEq)]
pub enum CategoryRef {
    Id(i32),
    Resolved(category::Model),
}

impl From<i32> for CategoryRef {
    fn from(id: i32) -> Self {
        CategoryRef::Id(id)
    }
}

impl From<category::Model> for CategoryRef {
    fn from(model: category::Model) -> Self {
        CategoryRef::Resolved(model)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub stock: Option<i32>,
    pub image_url: Option<String>,
    pub category: Option<CategoryRef>,
}

pub async fn list_products<C: ConnectionTrait>(db: &C) -> Result<Vec<ProductRecord>, ServiceError> {
    Ok(store::list(db).await?)
}

pub async fn list_by_category<C: ConnectionTrait>(
    db: &C,
    category_id: i32,
) -> Result<Vec<ProductRecord>, ServiceError> {
    Ok(store::list_by_category(db, category_id).await?)
}

/// Checks the price and the category reference, then persists the product.
/// Nothing is written when a check fails.
pub async fn create_product<C: ConnectionTrait>(
    db: &C,
    draft: ProductDraft,
) -> Result<ProductRecord, ServiceError> {
    if draft.price < 0 {
        return Err(ServiceError::invalid_input("price must not be negative"));
    }

    let category = match draft.category {
        Some(CategoryRef::Id(id)) => category_store::get(db, id)
            .await?
            .ok_or_else(|| ServiceError::invalid_input("category not found"))?,
        Some(CategoryRef::Resolved(model)) => model,
        None => return Err(ServiceError::invalid_input("category not found")),
    };

    let product = store::create(
        db,
        NewProduct {
            name: draft.name,
            description: draft.description.unwrap_or_default(),
            price: draft.price,
            stock: draft.stock.unwrap_or_default(),
            image_url: draft.image_url.unwrap_or_default(),
            category_id: category.id,
        },
    )
    .await?;
    debug!(product_id = product.id, category_id = category.id, "Product created");

    Ok(ProductRecord {
        product,
        category: Some(category),
    })
}

pub async fn get_product<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<ProductRecord, ServiceError> {
    store::get(db, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("product not found"))
}

// No price or category check here, unlike create_product.
pub async fn update_product<C: ConnectionTrait>(
    db: &C,
    id: i32,
    changes: ProductChanges,
) -> Result<Option<ProductRecord>, ServiceError> {
    Ok(store::update(db, id, changes).await?)
}

pub async fn delete_product<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, ServiceError> {
    Ok(store::delete(db, id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::memory_db;
    use sea_orm::DatabaseConnection;

    async fn with_categories() -> (DatabaseConnection, category::Model, category::Model) {
        let db = memory_db().await;
        let electronics = category_store::create(&db, "Electrónica".into(), None)
            .await
            .unwrap();
        let clothing = category_store::create(&db, "Ropa".into(), None).await.unwrap();
        (db, electronics, clothing)
    }

    fn draft(name: &str, price: i64, category: impl Into<CategoryRef>) -> ProductDraft {
        ProductDraft {
            name: name.to_owned(),
            price,
            category: Some(category.into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn creates_with_category_id() {
        let (db, electronics, _) = with_categories().await;

        let record = create_product(
            &db,
            ProductDraft {
                description: Some("Monitor 4K".into()),
                stock: Some(5),
                image_url: Some("https://example.com/monitor.jpg".into()),
                ..draft("Monitor", 300, electronics.id)
            },
        )
        .await
        .unwrap();

        assert!(record.product.id > 0);
        assert_eq!(record.product.name, "Monitor");
        assert_eq!(record.product.description, "Monitor 4K");
        assert_eq!(record.product.price, 300);
        assert_eq!(record.product.stock, 5);
        assert_eq!(record.product.image_url, "https://example.com/monitor.jpg");
        assert_eq!(record.category, Some(electronics));
    }

    #[tokio::test]
    async fn creates_with_resolved_category() {
        let (db, _, clothing) = with_categories().await;

        let record = create_product(&db, draft("Camiseta", 20, clothing.clone()))
            .await
            .unwrap();

        assert_eq!(record.product.category_id, clothing.id);
        assert_eq!(record.product.stock, 0);
    }

    #[tokio::test]
    async fn zero_price_is_fine() {
        let (db, electronics, _) = with_categories().await;

        let record = create_product(&db, draft("Producto Gratis", 0, electronics.id))
            .await
            .unwrap();

        assert_eq!(record.product.price, 0);
    }

    #[tokio::test]
    async fn negative_price_is_rejected_before_writing() {
        let (db, electronics, _) = with_categories().await;

        let err = create_product(&db, draft("Producto Inválido", -1, electronics.id))
            .await
            .unwrap_err();

        assert!(
            matches!(err, ServiceError::InvalidInput(ref msg) if msg == "price must not be negative")
        );
        assert!(list_products(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_category_is_rejected_before_writing() {
        let (db, _, _) = with_categories().await;

        let err = create_product(&db, draft("Producto Inválido", 100, 9999))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::InvalidInput(ref msg) if msg == "category not found"));
        assert!(list_products(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_category_is_rejected() {
        let (db, _, _) = with_categories().await;

        let err = create_product(
            &db,
            ProductDraft {
                name: "Huérfano".into(),
                price: 10,
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ServiceError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn get_turns_absence_into_not_found() {
        let (db, electronics, _) = with_categories().await;
        let created = create_product(&db, draft("Laptop", 1500, electronics.id))
            .await
            .unwrap();

        let fetched = get_product(&db, created.product.id).await.unwrap();
        assert_eq!(fetched, created);

        let err = get_product(&db, 9999).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref msg) if msg == "product not found"));
    }

    #[tokio::test]
    async fn list_by_category_delegates() {
        let (db, electronics, clothing) = with_categories().await;
        create_product(&db, draft("Laptop", 1500, electronics.id))
            .await
            .unwrap();
        create_product(&db, draft("Camiseta", 20, clothing.id))
            .await
            .unwrap();

        let listed = list_by_category(&db, electronics.id).await.unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].product.name, "Laptop");
        assert_eq!(list_products(&db).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn update_skips_price_validation() {
        let (db, electronics, _) = with_categories().await;
        let created = create_product(&db, draft("Laptop", 1500, electronics.id))
            .await
            .unwrap();

        let updated = update_product(
            &db,
            created.product.id,
            ProductChanges {
                price: Some(-5),
                stock: Some(20),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(updated.product.price, -5);
        assert_eq!(updated.product.stock, 20);
        assert!(update_product(&db, 9999, ProductChanges::default())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn delete_returns_store_result() {
        let (db, electronics, _) = with_categories().await;
        let created = create_product(&db, draft("Laptop", 1500, electronics.id))
            .await
            .unwrap();

        assert!(delete_product(&db, created.product.id).await.unwrap());
        assert!(!delete_product(&db, created.product.id).await.unwrap());
        assert!(matches!(
            get_product(&db, created.product.id).await,
            Err(ServiceError::NotFound(_))
        ));
    }
}
