use std::collections::HashMap;

use sea_orm::{ColumnTrait, EntityTrait, LoaderTrait, QueryFilter};
use uuid::Uuid;

use crate::{
    dto::products::{CatalogItem, CatalogList, CategoryRef},
    entity::{
        categories::Entity as Categories,
        product_images::Entity as ProductImages,
        products::{Column as ProductCol, Entity as Products},
        stocks::Entity as Stocks,
        subcategories::Entity as Subcategories,
    },
    error::AppResult,
    response::{ApiResponse, Meta},
    routes::params::CatalogQuery,
    state::AppState,
};

/// Storefront catalog: featured products that have at least one in-stock
/// entry, newest first. The page is selected with raw SQL (the in-stock
/// check is an EXISTS subquery) and then decorated through the ORM loaders.
pub async fn featured_products(
    state: &AppState,
    query: CatalogQuery,
) -> AppResult<ApiResponse<CatalogList>> {
    let (page, limit, offset) = query.normalize();
    let category = query.category.as_ref().filter(|c| !c.is_empty()).cloned();

    let ids: Vec<(Uuid,)> = sqlx::query_as(
        r#"
        SELECT p.id
        FROM products p
        WHERE p.is_featured
          AND EXISTS (SELECT 1 FROM stocks s WHERE s.product_id = p.id AND s.quantity > 0)
          AND ($1::text IS NULL
               OR EXISTS (SELECT 1 FROM categories c WHERE c.id = p.category_id AND c.name ILIKE $1))
        ORDER BY p.created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(category.as_deref())
    .bind(limit)
    .bind(offset)
    .fetch_all(&state.pool)
    .await?;

    let total: (i64,) = sqlx::query_as(
        r#"
        SELECT count(*)
        FROM products p
        WHERE p.is_featured
          AND EXISTS (SELECT 1 FROM stocks s WHERE s.product_id = p.id AND s.quantity > 0)
          AND ($1::text IS NULL
               OR EXISTS (SELECT 1 FROM categories c WHERE c.id = p.category_id AND c.name ILIKE $1))
        "#,
    )
    .bind(category.as_deref())
    .fetch_one(&state.pool)
    .await?;

    let ids: Vec<Uuid> = ids.into_iter().map(|(id,)| id).collect();
    let mut products = Products::find()
        .filter(ProductCol::Id.is_in(ids.clone()))
        .all(&state.orm)
        .await?;

    // `is_in` loses the page ordering; restore it.
    let position: HashMap<Uuid, usize> =
        ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();
    products.sort_by_key(|p| position.get(&p.id).copied().unwrap_or(usize::MAX));

    let stocks = products.load_many(Stocks, &state.orm).await?;
    let images = products.load_many(ProductImages, &state.orm).await?;
    let categories = products.load_one(Categories, &state.orm).await?;
    let subcategories = products.load_one(Subcategories, &state.orm).await?;
    let variant_names =
        super::product_service::variant_name_map(state, stocks.iter().flatten()).await?;

    let items = products
        .into_iter()
        .zip(stocks)
        .zip(images)
        .zip(categories)
        .zip(subcategories)
        .map(|((((product, stocks), images), category), subcategory)| {
            let total_stock: i64 = stocks.iter().map(|s| i64::from(s.quantity)).sum();
            let available_sizes = stocks
                .iter()
                .filter(|s| s.quantity > 0)
                .filter_map(|s| variant_names.get(&s.variant_id).cloned())
                .collect();

            // Primary image first, any image as fallback.
            let primary = images
                .iter()
                .find(|img| img.is_primary)
                .or_else(|| images.first());

            CatalogItem {
                id: product.id,
                name: product.name.clone(),
                slug: product.slug,
                description: product.description,
                is_featured: product.is_featured,
                base_price: product.base_price,
                image: primary.map(|img| img.url.clone()),
                image_alt: primary
                    .map(|img| img.alt_text.clone().unwrap_or_else(|| product.name.clone())),
                total_stock,
                available_sizes,
                is_in_stock: total_stock > 0,
                category: category.map(|c| CategoryRef {
                    id: c.id,
                    name: c.name,
                }),
                subcategory: subcategory.map(|s| CategoryRef {
                    id: s.id,
                    name: s.name,
                }),
            }
        })
        .collect();

    let meta = Meta::new(page, limit, total.0);
    Ok(ApiResponse::success(
        "Featured products",
        CatalogList { items },
        Some(meta),
    ))
}
