use rust_decimal::Decimal;
use uuid::Uuid;

use axum_storefront_api::{
    config::MediaConfig,
    db::{create_orm_conn, create_pool},
    dto::{
        categories::{CreateCategoryRequest, CreateSubcategoryRequest},
        notifications::RegisterTokenRequest,
        products::{BulkDeleteRequest, NewImage, NewProductSubmission, StockEntryInput, VariantInput},
    },
    error::AppError,
    media::MediaClient,
    push::PushClient,
    routes::params::{CatalogQuery, DashboardProductQuery},
    services::{catalog_service, category_service, notification_service, product_service, statistics_service},
    state::AppState,
};

// Integration flow: category/subcategory setup -> product submission ->
// featured toggle -> storefront and statistics views -> bulk delete.
#[tokio::test]
async fn product_lifecycle_flow() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    let state = setup_state(&database_url).await?;

    // Category and subcategory setup
    let category = category_service::create_category(
        &state,
        CreateCategoryRequest {
            name: "Women".into(),
            slug: "women".into(),
            description: Some("Trendy fashion for women".into()),
            image_url: None,
        },
    )
    .await?
    .data
    .unwrap();

    let subcategory = category_service::create_subcategory(
        &state,
        CreateSubcategoryRequest {
            name: "Dresses".into(),
            slug: "dresses".into(),
            description: None,
            icon_url: None,
            category_id: category.id,
        },
    )
    .await?
    .data
    .unwrap();

    // A second subcategory with the same slug in the same category conflicts.
    let duplicate = category_service::create_subcategory(
        &state,
        CreateSubcategoryRequest {
            name: "Dresses Again".into(),
            slug: "dresses".into(),
            description: None,
            icon_url: None,
            category_id: category.id,
        },
    )
    .await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));

    // Product submission: two variants, quantities 3 and 8.
    let detail = product_service::create_product(
        &state,
        submission(category.id, Some(subcategory.id)),
    )
    .await?
    .data
    .unwrap();

    assert_eq!(detail.product.base_price, Decimal::new(5999, 2));
    assert_eq!(detail.variants.len(), 2);
    assert_eq!(detail.images.len(), 1);
    assert!(!detail.product.is_featured);
    let product_id = detail.product.id;

    // Submissions pointing at a foreign subcategory are rejected.
    let other = category_service::create_category(
        &state,
        CreateCategoryRequest {
            name: "Men".into(),
            slug: "men".into(),
            description: None,
            image_url: None,
        },
    )
    .await?
    .data
    .unwrap();
    let mut mismatched = submission(other.id, Some(subcategory.id));
    mismatched.slug = "mismatched-dress".into();
    let rejected = product_service::create_product(&state, mismatched).await;
    assert!(matches!(rejected, Err(AppError::BadRequest(_))));

    // Dashboard listing carries the derived stock figures.
    let listed = product_service::list_products(
        &state,
        DashboardProductQuery {
            category_id: Some(category.id),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(listed.items.len(), 1);
    assert_eq!(listed.items[0].total_stock, 11);
    assert_eq!(listed.items[0].stock_count, 2);

    // Featured toggle is idempotent.
    product_service::set_featured(&state, product_id, true).await?;
    let toggled = product_service::set_featured(&state, product_id, true)
        .await?
        .data
        .unwrap();
    assert!(toggled.is_featured);

    // The storefront now sees it, with sizes that are actually in stock.
    let featured = catalog_service::featured_products(&state, CatalogQuery::default())
        .await?
        .data
        .unwrap();
    assert_eq!(featured.items.len(), 1);
    let card = &featured.items[0];
    assert!(card.is_in_stock);
    assert_eq!(card.total_stock, 11);
    let mut sizes = card.available_sizes.clone();
    sizes.sort();
    assert_eq!(sizes, ["L", "M"]);
    assert!(card.image.is_some());

    // Statistics agree with the listing, and both variants are low on stock.
    let stats = statistics_service::get_statistics(&state).await?.data.unwrap();
    assert_eq!(stats.overview.product_count, 1);
    assert_eq!(stats.overview.total_stock, 11);
    assert_eq!(stats.stock_by_category.len(), 1);
    assert_eq!(stats.stock_by_category[0].name, "Women");
    assert_eq!(stats.stock_by_category[0].stock, 11);
    assert_eq!(stats.low_stock.len(), 1);
    assert_eq!(stats.low_stock[0].variants.len(), 2);

    // The category cannot go while the product references it.
    let blocked = category_service::delete_category(&state, category.id).await;
    assert!(matches!(blocked, Err(AppError::Conflict(_))));

    // Push token registration is independent of the catalog.
    let token = notification_service::register_token(
        &state,
        RegisterTokenRequest {
            token: "ExponentPushToken[test]".into(),
            user_id: "user-1".into(),
            platform: "ios".into(),
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(token.user_id, "user-1");

    // Bulk delete removes the product and its children.
    let empty = product_service::delete_products(
        &state,
        BulkDeleteRequest { product_ids: vec![] },
    )
    .await;
    assert!(matches!(empty, Err(AppError::BadRequest(_))));

    let deleted = product_service::delete_products(
        &state,
        BulkDeleteRequest {
            product_ids: vec![product_id, Uuid::new_v4()],
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(deleted.count, 1);

    let gone = product_service::get_product(&state, product_id).await;
    assert!(matches!(gone, Err(AppError::NotFound)));

    // With the product gone the category can be removed.
    category_service::delete_category(&state, category.id).await?;

    Ok(())
}

fn submission(category_id: Uuid, subcategory_id: Option<Uuid>) -> NewProductSubmission {
    NewProductSubmission {
        name: "Summer Floral Dress".into(),
        slug: "summer-floral-dress".into(),
        description: "Lightweight dress with floral pattern".into(),
        base_price: Decimal::new(5999, 2),
        category_id,
        subcategory_id,
        variants: vec![
            VariantInput {
                name: "M".into(),
                price_offset: Decimal::ZERO,
                stocks: vec![StockEntryInput {
                    quantity: 3,
                    location: Some("WH-A1-10".into()),
                    sku: Some("SFDR-M".into()),
                    barcode: None,
                }],
            },
            VariantInput {
                name: "L".into(),
                price_offset: Decimal::new(500, 2),
                stocks: vec![StockEntryInput {
                    quantity: 8,
                    location: Some("WH-A1-11".into()),
                    sku: Some("SFDR-L".into()),
                    barcode: None,
                }],
            },
        ],
        images: vec![NewImage {
            url: "https://img.example.com/upload/v1/shop/products/dress.webp".into(),
            alt_text: Some("Front view".into()),
            is_primary: true,
        }],
    }
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let pool = create_pool(database_url).await?;
    let orm = create_orm_conn(database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    // Clean tables between runs
    sqlx::query(
        "TRUNCATE TABLE stocks, product_variants, product_images, products, subcategories, categories, sliders, push_tokens CASCADE",
    )
    .execute(&pool)
    .await?;

    Ok(AppState {
        pool,
        orm,
        media: MediaClient::new(MediaConfig {
            cloud_name: "test".into(),
            api_key: "key".into(),
            api_secret: "secret".into(),
            folder: "test".into(),
        }),
        push: PushClient::new("http://127.0.0.1:9".into()),
    })
}
