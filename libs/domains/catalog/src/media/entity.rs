use crate::media::models::Media;
use sea_orm::entity::prelude::*;

/// Sea-ORM Entity for the media table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "media")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub product_id: i64,
    pub variant_id: Option<i64>,
    pub media_type: String,
    pub url: String,
    pub alt: String,
    pub position: i32,
    pub is_primary: bool,
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
    #[sea_orm(
        belongs_to = "crate::variants::entity::Entity",
        from = "Column::VariantId",
        to = "crate::variants::entity::Column::Id",
        on_delete = "SetNull"
    )]
    Variant,
}

impl Related<crate::products::entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<crate::variants::entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Variant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Media {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            product_id: model.product_id,
            variant_id: model.variant_id,
            media_type: model.media_type,
            url: model.url,
            alt: model.alt,
            position: model.position,
            is_primary: model.is_primary,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}
