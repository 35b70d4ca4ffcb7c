use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::{category, product};

/// A product row together with the category it points at.
#[derive(Clone, Debug, PartialEq)]
pub struct ProductRecord {
    pub product: product::Model,
    pub category: Option<category::Model>,
}

impl From<(product::Model, Option<category::Model>)> for ProductRecord {
    fn from((product, category): (product::Model, Option<category::Model>)) -> Self {
        ProductRecord { product, category }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: i64,
    pub stock: i32,
    pub image_url: String,
    pub category_id: i32,
}

impl NewProduct {
    fn into_active_model(self) -> product::ActiveModel {
        product::ActiveModel {
            name: Set(self.name),
            description: Set(self.description),
            price: Set(self.price),
            stock: Set(self.stock),
            image_url: Set(self.image_url),
            category_id: Set(self.category_id),
            ..Default::default()
        }
    }
}

/// Fields to overwrite on an existing product. `None` leaves the column untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub stock: Option<i32>,
    pub image_url: Option<String>,
    pub category_id: Option<i32>,
}

impl ProductChanges {
    pub fn is_empty(&self) -> bool {
        self == &ProductChanges::default()
    }
}

pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<ProductRecord>, DbErr> {
    let rows = product::Entity::find()
        .find_also_related(category::Entity)
        .order_by_asc(product::Column::Id)
        .all(db)
        .await?;

    Ok(rows.into_iter().map(ProductRecord::from).collect())
}

pub async fn list_by_category<C: ConnectionTrait>(
    db: &C,
    category_id: i32,
) -> Result<Vec<ProductRecord>, DbErr> {
    let rows = product::Entity::find()
        .filter(product::Column::CategoryId.eq(category_id))
        .find_also_related(category::Entity)
        .order_by_asc(product::Column::Id)
        .all(db)
        .await?;

    Ok(rows.into_iter().map(ProductRecord::from).collect())
}

pub async fn get<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<ProductRecord>, DbErr> {
    let row = product::Entity::find_by_id(id)
        .find_also_related(category::Entity)
        .one(db)
        .await?;

    Ok(row.map(ProductRecord::from))
}

/// Persists the product as given. No business rule is checked here.
pub async fn create<C: ConnectionTrait>(
    db: &C,
    new_product: NewProduct,
) -> Result<product::Model, DbErr> {
    new_product.into_active_model().insert(db).await
}

pub async fn insert_many<C: ConnectionTrait>(
    db: &C,
    products: Vec<NewProduct>,
) -> Result<u64, DbErr> {
    if products.is_empty() {
        return Ok(0);
    }
    let count = products.len() as u64;

    product::Entity::insert_many(products.into_iter().map(NewProduct::into_active_model))
        .exec(db)
        .await?;

    Ok(count)
}

pub async fn update<C: ConnectionTrait>(
    db: &C,
    id: i32,
    changes: ProductChanges,
) -> Result<Option<ProductRecord>, DbErr> {
    let Some(existing) = product::Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };

    let updated = if changes.is_empty() {
        existing
    } else {
        let mut active: product::ActiveModel = existing.into();

        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(description) = changes.description {
            active.description = Set(description);
        }
        if let Some(price) = changes.price {
            active.price = Set(price);
        }
        if let Some(stock) = changes.stock {
            active.stock = Set(stock);
        }
        if let Some(image_url) = changes.image_url {
            active.image_url = Set(image_url);
        }
        if let Some(category_id) = changes.category_id {
            active.category_id = Set(category_id);
        }

        active.update(db).await?
    };

    let category = updated.find_related(category::Entity).one(db).await?;
    Ok(Some(ProductRecord {
        product: updated,
        category,
    }))
}

pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, DbErr> {
    let result = product::Entity::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}
