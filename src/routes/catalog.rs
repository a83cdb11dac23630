use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{delete, get},
};
use uuid::Uuid;

use crate::{
    dto::{
        categories::CategoryList,
        products::{BulkDeleteRequest, CatalogList, DeleteResult, ProductDetail},
    },
    error::AppResult,
    response::ApiResponse,
    routes::params::CatalogQuery,
    services::{catalog_service, category_service, product_service},
    state::AppState,
};

/// Storefront-facing product endpoints.
pub fn product_router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(get_product))
        .route("/{id}", delete(delete_products))
}

#[utoipa::path(
    get,
    path = "/api/v1/featuredProducts",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("limit" = Option<i64>, Query, description = "Items per page, default 10"),
        ("category" = Option<String>, Query, description = "Filter by category name"),
    ),
    responses(
        (status = 200, description = "Featured, in-stock products for the homepage", body = ApiResponse<CatalogList>)
    ),
    tag = "Catalog"
)]
pub async fn featured_products(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> AppResult<Json<ApiResponse<CatalogList>>> {
    let resp = catalog_service::featured_products(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/categories",
    responses(
        (status = 200, description = "Categories with subcategories and product refs", body = ApiResponse<CategoryList>)
    ),
    tag = "Catalog"
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CategoryList>>> {
    let resp = category_service::list_categories(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product with variants, stock entries and images", body = ApiResponse<ProductDetail>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Catalog"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ProductDetail>>> {
    let resp = product_service::get_product(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    params(("id" = Uuid, Path, description = "Any product ID; the body lists the full set to remove")),
    request_body = BulkDeleteRequest,
    responses(
        (status = 200, description = "Bulk delete products", body = ApiResponse<DeleteResult>),
        (status = 400, description = "Empty id list"),
    ),
    tag = "Catalog"
)]
pub async fn delete_products(
    State(state): State<AppState>,
    Path(_id): Path<Uuid>,
    Json(payload): Json<BulkDeleteRequest>,
) -> AppResult<Json<ApiResponse<DeleteResult>>> {
    let resp = product_service::delete_products(&state, payload).await?;
    Ok(Json(resp))
}
