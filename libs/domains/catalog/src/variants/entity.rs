use crate::variants::models::Variant;
use sea_orm::entity::prelude::*;

/// Sea-ORM Entity for the variants table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "variants")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub product_id: i64,
    #[sea_orm(unique)]
    pub sku: String,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    pub stock_quantity: i32,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::products::entity::Entity",
        from = "Column::ProductId",
        to = "crate::products::entity::Column::Id",
        on_delete = "Cascade"
    )]
    Product,
}

impl Related<crate::products::entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Variant {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            product_id: model.product_id,
            sku: model.sku,
            price: model.price,
            stock_quantity: model.stock_quantity,
            is_active: model.is_active,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}
