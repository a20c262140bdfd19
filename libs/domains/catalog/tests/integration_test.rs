//! Integration tests for the catalog domain
//!
//! These use real PostgreSQL via testcontainers to check what the in-memory
//! repositories cannot:
//! - Migrations create the schema the entities expect
//! - Foreign keys, cascades and unique indexes are enforced
//! - Primary media switching is transactional
//!
//! Run with `cargo test -p domain_catalog -- --ignored` (needs Docker).

use axum_helpers::{AppError, ErrorCode, PageRequest};
use domain_catalog::categories::{CategoryService, CreateCategory, PgCategoryRepository};
use domain_catalog::media::{CreateMedia, MediaRepository, MediaService, PgMediaRepository};
use domain_catalog::products::{CreateProduct, PgProductRepository, ProductService};
use domain_catalog::variants::{CreateVariant, PgVariantRepository, VariantService};
use domain_catalog::{CatalogError, Resource};
use test_utils::{TestDataBuilder, TestDatabase, assertions::*};

async fn product(db: &TestDatabase, name: String) -> i64 {
    let service = ProductService::new(PgProductRepository::new(db.connection()));
    service
        .create_product(CreateProduct {
            name: Some(name),
            ..Default::default()
        })
        .await
        .unwrap()
        .id
}

fn image(product_id: i64, url: String, is_primary: bool) -> CreateMedia {
    CreateMedia {
        product_id: Some(product_id),
        media_type: Some("image".into()),
        url: Some(url),
        is_primary: Some(is_primary),
        ..Default::default()
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_product_crud_round_trip() {
    let db = TestDatabase::new().await;
    let service = ProductService::new(PgProductRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("product_crud");

    let created = service
        .create_product(CreateProduct {
            name: Some(builder.name("product", "main")),
            description: Some("Waterproof".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(created.description, "Waterproof");

    let (items, total) = service.list_products(PageRequest::default()).await.unwrap();
    assert_eq!(total, 1);
    assert_ids(&items.iter().map(|p| p.id).collect::<Vec<_>>(), &[created.id], "products");

    service.delete_product(created.id).await.unwrap();
    let result = service.get_product(created.id).await;
    assert!(matches!(
        result,
        Err(CatalogError::NotFound {
            resource: Resource::Product,
            ..
        })
    ));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_category_delete_is_restricted_by_children() {
    let db = TestDatabase::new().await;
    let service = CategoryService::new(PgCategoryRepository::new(db.connection()));

    let root = service
        .create_category(CreateCategory {
            name: Some("Shoes".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    let child = service
        .create_category(CreateCategory {
            name: Some("Boots".into()),
            parent_id: Some(root.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(child.depth, 1);

    let result = service.delete_category(root.id).await;
    assert!(matches!(result, Err(CatalogError::CategoryHasSubcategories)));

    let (children, total) = service
        .list_subcategories(root.id, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(children[0].id, child.id);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_variant_for_missing_product_is_fk_violation() {
    let db = TestDatabase::new().await;
    let service = VariantService::new(PgVariantRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("variant_fk");

    let err = service
        .create_variant(CreateVariant {
            product_id: Some(9_999),
            sku: Some(builder.sku("a")),
            price: Some(10.0),
            stock_quantity: None,
            is_active: None,
        })
        .await
        .unwrap_err();

    let classified = AppError::from(err).classify();
    assert_eq!(classified.code, ErrorCode::DbForeignKeyViolation);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_deleting_product_cascades_to_variants_and_media() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("cascade");
    let product_id = product(&db, builder.name("product", "cascade")).await;

    let variants = VariantService::new(PgVariantRepository::new(db.connection()));
    let media = MediaService::new(PgMediaRepository::new(db.connection()));
    let variant = variants
        .create_variant(CreateVariant {
            product_id: Some(product_id),
            sku: Some(builder.sku("cascade")),
            price: Some(5.0),
            stock_quantity: Some(2),
            is_active: Some(true),
        })
        .await
        .unwrap();
    let item = media
        .create_media(image(product_id, builder.media_url("a.jpg"), true))
        .await
        .unwrap();

    ProductService::new(PgProductRepository::new(db.connection()))
        .delete_product(product_id)
        .await
        .unwrap();

    assert!(variants.get_variant(variant.id).await.is_err());
    assert!(media.get_media(item.id).await.is_err());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_primary_media_switch_keeps_one_primary() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("primary_switch");
    let product_id = product(&db, builder.name("product", "media")).await;

    let repo = PgMediaRepository::new(db.connection());
    let service = MediaService::new(repo.clone());

    let first = service
        .create_media(image(product_id, builder.media_url("1.jpg"), true))
        .await
        .unwrap();
    let second = service
        .create_media(image(product_id, builder.media_url("2.jpg"), true))
        .await
        .unwrap();

    let primary = assert_some(repo.get_primary(product_id).await.unwrap(), "primary");
    assert_eq!(primary.id, second.id);

    service.set_primary_media(product_id, first.id).await.unwrap();
    service.set_primary_media(product_id, first.id).await.unwrap();

    let (items, _) = repo
        .list_by_product(product_id, PageRequest::default())
        .await
        .unwrap();
    let primaries: Vec<i64> = items.iter().filter(|m| m.is_primary).map(|m| m.id).collect();
    assert_ids(&primaries, &[first.id], "primary media");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_duplicate_sku_is_rejected() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("duplicate_sku");
    let product_id = product(&db, builder.name("product", "sku")).await;
    let service = VariantService::new(PgVariantRepository::new(db.connection()));

    let input = CreateVariant {
        product_id: Some(product_id),
        sku: Some(builder.sku("dup")),
        price: Some(1.0),
        stock_quantity: None,
        is_active: None,
    };
    service.create_variant(input.clone()).await.unwrap();

    let result = service.create_variant(input).await;
    assert!(matches!(result, Err(CatalogError::DuplicateSku(_))));

    db.truncate_all().await;
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_far_page_returns_empty_list() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("far_page");
    for i in 0..3 {
        product(&db, builder.name("product", &i.to_string())).await;
    }

    let service = ProductService::new(PgProductRepository::new(db.connection()));
    let far = PageRequest::from_raw(Some("4611686018427387905"), Some("4"));
    let (items, total) = service.list_products(far).await.unwrap();
    assert!(items.is_empty());
    assert_eq!(total, 3);

    let beyond = PageRequest::new(2, 10);
    let (items, total) = service.list_products(beyond).await.unwrap();
    assert!(items.is_empty());
    assert_eq!(total, 3);
}
