use sea_orm::entity::prelude::*;
use crate::entities::category::Entity as Category;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "productos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub price: i64,
    pub stock: i32,
    pub image_url: String,
    pub category_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Category",
        from = "crate::entities::product::Column::CategoryId",
        to = "crate::entities::category::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade",
    )]
    Category,
}

impl Related<Category> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
