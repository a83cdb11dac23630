use std::collections::HashMap;

use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, LoaderTrait, ModelTrait, QueryFilter,
    QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::products::{
        BulkDeleteRequest, CategoryRef, DeleteResult, ImageView, NewProductSubmission,
        ProductDetail, ProductSummary, ProductSummaryList, StockView, VariantRef,
        VariantWithStocks,
    },
    entity::{
        categories::Entity as Categories,
        product_images::{ActiveModel as ImageActive, Entity as ProductImages},
        product_variants::{
            ActiveModel as VariantActive, Column as VariantCol, Entity as ProductVariants,
            Model as VariantModel,
        },
        products::{
            ActiveModel as ProductActive, Column as ProductCol, Entity as Products,
            Model as ProductModel,
        },
        stocks::{ActiveModel as StockActive, Entity as Stocks, Model as StockModel},
        subcategories::Entity as Subcategories,
    },
    error::{AppError, AppResult},
    models::{Product, ProductImage, Stock},
    response::{ApiResponse, Meta},
    routes::params::DashboardProductQuery,
    state::AppState,
};

pub async fn list_products(
    state: &AppState,
    query: DashboardProductQuery,
) -> AppResult<ApiResponse<ProductSummaryList>> {
    let mut condition = Condition::all();
    if let Some(category_id) = query.category_id {
        condition = condition.add(ProductCol::CategoryId.eq(category_id));
    }
    if let Some(subcategory_id) = query.subcategory_id {
        condition = condition.add(ProductCol::SubcategoryId.eq(subcategory_id));
    }
    if let Some(name) = query.name.as_ref().filter(|n| !n.is_empty()) {
        let pattern = format!("%{}%", name);
        condition = condition.add(Expr::col(ProductCol::Name).ilike(pattern));
    }

    let mut finder = Products::find().filter(condition);
    if let Some(limit) = query.limit {
        finder = finder.limit(limit.max(0) as u64);
    }
    let products = finder.all(&state.orm).await?;

    let stocks = products.load_many(Stocks, &state.orm).await?;
    let images = products.load_many(ProductImages, &state.orm).await?;
    let categories = products.load_one(Categories, &state.orm).await?;
    let subcategories = products.load_one(Subcategories, &state.orm).await?;
    let variant_names = variant_name_map(state, stocks.iter().flatten()).await?;

    let items = products
        .into_iter()
        .zip(stocks)
        .zip(images)
        .zip(categories)
        .zip(subcategories)
        .map(|((((product, stocks), images), category), subcategory)| {
            summarize_product(product, stocks, images, category, subcategory, &variant_names)
        })
        .collect();

    Ok(ApiResponse::success(
        "Products",
        ProductSummaryList { items },
        Some(Meta::empty()),
    ))
}

pub async fn get_product(state: &AppState, id: Uuid) -> AppResult<ApiResponse<ProductDetail>> {
    let product = Products::find_by_id(id).one(&state.orm).await?;
    let product = match product {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };

    let detail = load_detail(state, product).await?;
    Ok(ApiResponse::success("Product", detail, None))
}

/// Persist a validated submission: product, variants, their stock entries and
/// images as one atomic unit. Image files must already be uploaded; this
/// function only ever sees their URLs.
pub async fn create_product(
    state: &AppState,
    payload: NewProductSubmission,
) -> AppResult<ApiResponse<ProductDetail>> {
    payload.validate()?;

    let category = Categories::find_by_id(payload.category_id)
        .one(&state.orm)
        .await?;
    if category.is_none() {
        return Err(AppError::BadRequest("category not found".into()));
    }

    // A product's subcategory must belong to the product's own category.
    if let Some(subcategory_id) = payload.subcategory_id {
        let subcategory = Subcategories::find_by_id(subcategory_id)
            .one(&state.orm)
            .await?;
        match subcategory {
            None => return Err(AppError::BadRequest("subcategory not found".into())),
            Some(sub) if sub.category_id != payload.category_id => {
                return Err(AppError::BadRequest(
                    "subcategory does not belong to the selected category".into(),
                ));
            }
            Some(_) => {}
        }
    }

    let txn = state.orm.begin().await?;

    let product_id = Uuid::new_v4();
    let product = ProductActive {
        id: Set(product_id),
        name: Set(payload.name),
        slug: Set(payload.slug),
        description: Set(payload.description),
        base_price: Set(payload.base_price),
        category_id: Set(payload.category_id),
        subcategory_id: Set(payload.subcategory_id),
        is_featured: Set(false),
        created_at: NotSet,
    }
    .insert(&txn)
    .await?;

    for variant in payload.variants {
        let inserted = VariantActive {
            id: Set(Uuid::new_v4()),
            name: Set(variant.name),
            price_offset: Set(variant.price_offset),
            product_id: Set(product.id),
            created_at: NotSet,
        }
        .insert(&txn)
        .await?;

        for stock in variant.stocks {
            StockActive {
                id: Set(Uuid::new_v4()),
                quantity: Set(stock.quantity),
                location: Set(stock.location.unwrap_or_default()),
                sku: Set(stock.sku),
                barcode: Set(stock.barcode),
                product_id: Set(product.id),
                variant_id: Set(inserted.id),
                created_at: NotSet,
            }
            .insert(&txn)
            .await?;
        }
    }

    for image in payload.images {
        ImageActive {
            id: Set(Uuid::new_v4()),
            url: Set(image.url),
            alt_text: Set(image.alt_text),
            is_primary: Set(image.is_primary),
            product_id: Set(product.id),
            created_at: NotSet,
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;

    let created = Products::find_by_id(product_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    let detail = load_detail(state, created).await?;

    Ok(ApiResponse::success(
        "Product created",
        detail,
        Some(Meta::empty()),
    ))
}

/// Flip the featured flag. Last write wins; repeating the same value is a
/// no-op that still reports success.
pub async fn set_featured(
    state: &AppState,
    id: Uuid,
    is_featured: bool,
) -> AppResult<ApiResponse<Product>> {
    let existing = Products::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };

    let mut active: ProductActive = existing.into();
    active.is_featured = Set(is_featured);
    let product = active.update(&state.orm).await?;

    tracing::info!(product_id = %product.id, is_featured, "featured flag updated");

    Ok(ApiResponse::success(
        "Updated",
        product_from_entity(product),
        Some(Meta::empty()),
    ))
}

/// Bulk delete; variants, stock entries and images go with their products via
/// the cascade rules.
pub async fn delete_products(
    state: &AppState,
    payload: BulkDeleteRequest,
) -> AppResult<ApiResponse<DeleteResult>> {
    if payload.product_ids.is_empty() {
        return Err(AppError::BadRequest("productIds must not be empty".into()));
    }

    let result = Products::delete_many()
        .filter(ProductCol::Id.is_in(payload.product_ids))
        .exec(&state.orm)
        .await?;

    Ok(ApiResponse::success(
        "Deleted",
        DeleteResult {
            count: result.rows_affected,
        },
        Some(Meta::empty()),
    ))
}

async fn load_detail(state: &AppState, product: ProductModel) -> AppResult<ProductDetail> {
    let category = product
        .find_related(Categories)
        .one(&state.orm)
        .await?
        .map(|c| CategoryRef {
            id: c.id,
            name: c.name,
        });

    let variants = product.find_related(ProductVariants).all(&state.orm).await?;
    let stocks = variants.load_many(Stocks, &state.orm).await?;
    let images = product.find_related(ProductImages).all(&state.orm).await?;

    let variants = variants
        .into_iter()
        .zip(stocks)
        .map(|(variant, stocks)| variant_with_stocks(variant, stocks))
        .collect();

    Ok(ProductDetail {
        product: product_from_entity(product),
        category,
        variants,
        images: images.into_iter().map(image_from_entity).collect(),
    })
}

pub(crate) async fn variant_name_map<'a>(
    state: &AppState,
    stocks: impl Iterator<Item = &'a StockModel>,
) -> AppResult<HashMap<Uuid, String>> {
    let variant_ids: Vec<Uuid> = stocks.map(|stock| stock.variant_id).collect();
    if variant_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let variants = ProductVariants::find()
        .filter(VariantCol::Id.is_in(variant_ids))
        .all(&state.orm)
        .await?;
    Ok(variants.into_iter().map(|v| (v.id, v.name)).collect())
}

fn summarize_product(
    product: ProductModel,
    stocks: Vec<StockModel>,
    images: Vec<crate::entity::product_images::Model>,
    category: Option<crate::entity::categories::Model>,
    subcategory: Option<crate::entity::subcategories::Model>,
    variant_names: &HashMap<Uuid, String>,
) -> ProductSummary {
    let total_stock = stocks.iter().map(|s| i64::from(s.quantity)).sum();
    let stock_count = stocks.len() as i64;

    let stocks = stocks
        .into_iter()
        .map(|stock| StockView {
            id: stock.id,
            quantity: stock.quantity,
            location: stock.location,
            sku: stock.sku,
            barcode: stock.barcode,
            variant: variant_names.get(&stock.variant_id).map(|name| VariantRef {
                name: name.clone(),
            }),
        })
        .collect();

    ProductSummary {
        id: product.id,
        name: product.name,
        slug: product.slug,
        description: product.description,
        base_price: product.base_price,
        is_featured: product.is_featured,
        images: images
            .into_iter()
            .map(|image| ImageView {
                url: image.url,
                alt_text: image.alt_text,
                is_primary: image.is_primary,
            })
            .collect(),
        total_stock,
        stock_count,
        stocks,
        category: category.map(|c| CategoryRef {
            id: c.id,
            name: c.name,
        }),
        subcategory: subcategory.map(|s| CategoryRef {
            id: s.id,
            name: s.name,
        }),
    }
}

fn variant_with_stocks(variant: VariantModel, stocks: Vec<StockModel>) -> VariantWithStocks {
    VariantWithStocks {
        id: variant.id,
        name: variant.name,
        price_offset: variant.price_offset,
        product_id: variant.product_id,
        stocks: stocks.into_iter().map(stock_from_entity).collect(),
    }
}

pub fn product_from_entity(model: ProductModel) -> Product {
    Product {
        id: model.id,
        name: model.name,
        slug: model.slug,
        description: model.description,
        base_price: model.base_price,
        category_id: model.category_id,
        subcategory_id: model.subcategory_id,
        is_featured: model.is_featured,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn stock_from_entity(model: StockModel) -> Stock {
    Stock {
        id: model.id,
        quantity: model.quantity,
        location: model.location,
        sku: model.sku,
        barcode: model.barcode,
        product_id: model.product_id,
        variant_id: model.variant_id,
    }
}

fn image_from_entity(model: crate::entity::product_images::Model) -> ProductImage {
    ProductImage {
        id: model.id,
        url: model.url,
        alt_text: model.alt_text,
        is_primary: model.is_primary,
        product_id: model.product_id,
    }
}
