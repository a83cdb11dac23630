use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{delete, get, post},
};
use uuid::Uuid;

use crate::{
    dto::categories::{
        CategoryList, CreateCategoryRequest, CreateSubcategoryRequest, SubcategoryList,
    },
    error::AppResult,
    models::{Category, Subcategory},
    response::ApiResponse,
    routes::params::SubcategoryQuery,
    services::category_service,
    state::AppState,
};

pub fn category_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories))
        .route("/", post(create_category))
        .route("/{id}", delete(delete_category))
}

pub fn subcategory_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_subcategories))
        .route("/", post(create_subcategory))
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard/categories",
    responses(
        (status = 200, description = "Categories with children", body = ApiResponse<CategoryList>)
    ),
    tag = "Categories"
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CategoryList>>> {
    let resp = category_service::list_categories(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/v1/dashboard/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 200, description = "Create category", body = ApiResponse<Category>),
        (status = 400, description = "Validation failed"),
    ),
    tag = "Categories"
)]
pub async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<CreateCategoryRequest>,
) -> AppResult<Json<ApiResponse<Category>>> {
    let resp = category_service::create_category(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/v1/dashboard/categories/{id}",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category deleted"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category still has products"),
    ),
    tag = "Categories"
)]
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = category_service::delete_category(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard/subcategories",
    params(("categoryId" = Option<Uuid>, Query, description = "Filter by owning category")),
    responses(
        (status = 200, description = "Subcategories with category refs", body = ApiResponse<SubcategoryList>)
    ),
    tag = "Categories"
)]
pub async fn list_subcategories(
    State(state): State<AppState>,
    Query(query): Query<SubcategoryQuery>,
) -> AppResult<Json<ApiResponse<SubcategoryList>>> {
    let resp = category_service::list_subcategories(&state, query.category_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/v1/dashboard/subcategories",
    request_body = CreateSubcategoryRequest,
    responses(
        (status = 200, description = "Create subcategory", body = ApiResponse<Subcategory>),
        (status = 400, description = "Validation failed or unknown category"),
        (status = 409, description = "Duplicate slug within the category"),
    ),
    tag = "Categories"
)]
pub async fn create_subcategory(
    State(state): State<AppState>,
    Json(payload): Json<CreateSubcategoryRequest>,
) -> AppResult<Json<ApiResponse<Subcategory>>> {
    let resp = category_service::create_subcategory(&state, payload).await?;
    Ok(Json(resp))
}
