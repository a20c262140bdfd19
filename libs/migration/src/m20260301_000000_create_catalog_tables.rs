use sea_orm_migration::{prelude::*, schema::*};

const CHECK_CONSTRAINTS: [&str; 5] = [
    "ALTER TABLE products ADD CONSTRAINT chk_products_status CHECK (status IN ('active', 'inactive'))",
    "ALTER TABLE categories ADD CONSTRAINT chk_categories_depth CHECK (depth IN (0, 1) AND (depth = 0) = (parent_id IS NULL))",
    "ALTER TABLE variants ADD CONSTRAINT chk_variants_price CHECK (price >= 0)",
    "ALTER TABLE variants ADD CONSTRAINT chk_variants_stock_quantity CHECK (stock_quantity >= 0)",
    "ALTER TABLE media ADD CONSTRAINT chk_media_position CHECK (position >= 0)",
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(big_integer(Products::Id).auto_increment().primary_key())
                    .col(string_len(Products::Name, 255))
                    .col(text(Products::Description).default(""))
                    .col(string_len(Products::ShortDescription, 255).default(""))
                    .col(string_len(Products::Status, 20).default("active"))
                    .col(
                        timestamp_with_time_zone(Products::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Products::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(big_integer(Categories::Id).auto_increment().primary_key())
                    .col(string_len(Categories::Name, 255))
                    .col(text(Categories::Description).default(""))
                    .col(small_integer(Categories::Depth).default(0))
                    .col(big_integer_null(Categories::ParentId))
                    .col(
                        timestamp_with_time_zone(Categories::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Categories::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_categories_parent_id")
                            .from(Categories::Table, Categories::ParentId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_categories_parent_id")
                    .table(Categories::Table)
                    .col(Categories::ParentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Variants::Table)
                    .if_not_exists()
                    .col(big_integer(Variants::Id).auto_increment().primary_key())
                    .col(big_integer(Variants::ProductId))
                    .col(string_len_uniq(Variants::Sku, 100))
                    .col(double(Variants::Price))
                    .col(integer(Variants::StockQuantity).default(0))
                    .col(boolean(Variants::IsActive).default(true))
                    .col(
                        timestamp_with_time_zone(Variants::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Variants::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_variants_product_id")
                            .from(Variants::Table, Variants::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_variants_product_id")
                    .table(Variants::Table)
                    .col(Variants::ProductId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Media::Table)
                    .if_not_exists()
                    .col(big_integer(Media::Id).auto_increment().primary_key())
                    .col(big_integer(Media::ProductId))
                    .col(big_integer_null(Media::VariantId))
                    .col(string_len(Media::MediaType, 50))
                    .col(string_len(Media::Url, 500))
                    .col(string_len(Media::Alt, 255).default(""))
                    .col(integer(Media::Position).default(0))
                    .col(boolean(Media::IsPrimary).default(false))
                    .col(
                        timestamp_with_time_zone(Media::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Media::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_media_product_id")
                            .from(Media::Table, Media::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_media_variant_id")
                            .from(Media::Table, Media::VariantId)
                            .to(Variants::Table, Variants::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_media_product_id_position")
                    .table(Media::Table)
                    .col(Media::ProductId)
                    .col(Media::Position)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_media_variant_id")
                    .table(Media::Table)
                    .col(Media::VariantId)
                    .to_owned(),
            )
            .await?;

        // One primary media item per product
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE UNIQUE INDEX uq_media_primary_per_product
                    ON media (product_id)
                    WHERE is_primary
                "#,
            )
            .await?;

        for constraint in CHECK_CONSTRAINTS {
            manager.get_connection().execute_unprepared(constraint).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Media::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Variants::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Categories::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Products::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Products {
    Table,
    Id,
    Name,
    Description,
    ShortDescription,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
    Name,
    Description,
    Depth,
    ParentId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Variants {
    Table,
    Id,
    ProductId,
    Sku,
    Price,
    StockQuantity,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Media {
    Table,
    Id,
    ProductId,
    VariantId,
    MediaType,
    Url,
    Alt,
    Position,
    IsPrimary,
    CreatedAt,
    UpdatedAt,
}
