use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, LoaderTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        categories::{
            CategoryList, CategoryWithChildren, CreateCategoryRequest, CreateSubcategoryRequest,
            ProductRef, SubcategoryList, SubcategoryWithCategory,
        },
        products::CategoryRef,
    },
    entity::{
        categories::{
            ActiveModel as CategoryActive, Entity as Categories, Model as CategoryModel,
        },
        products::{Column as ProductCol, Entity as Products},
        subcategories::{
            ActiveModel as SubcategoryActive, Column as SubcategoryCol, Entity as Subcategories,
            Model as SubcategoryModel,
        },
    },
    error::{AppError, AppResult},
    models::{Category, Subcategory},
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Categories with their subcategories and slim product refs, newest first.
pub async fn list_categories(state: &AppState) -> AppResult<ApiResponse<CategoryList>> {
    let categories = Categories::find()
        .order_by_desc(crate::entity::categories::Column::CreatedAt)
        .all(&state.orm)
        .await?;

    let subcategories = categories.load_many(Subcategories, &state.orm).await?;
    let products = categories.load_many(Products, &state.orm).await?;

    let items = categories
        .into_iter()
        .zip(subcategories)
        .zip(products)
        .map(|((category, subcategories), products)| CategoryWithChildren {
            category: category_from_entity(category),
            subcategories: subcategories
                .into_iter()
                .map(subcategory_from_entity)
                .collect(),
            products: products
                .into_iter()
                .map(|p| ProductRef {
                    id: p.id,
                    name: p.name,
                    slug: p.slug,
                })
                .collect(),
        })
        .collect();

    Ok(ApiResponse::success(
        "Categories",
        CategoryList { items },
        Some(Meta::empty()),
    ))
}

pub async fn create_category(
    state: &AppState,
    payload: CreateCategoryRequest,
) -> AppResult<ApiResponse<Category>> {
    payload.validate()?;

    let category = CategoryActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        slug: Set(payload.slug),
        description: Set(payload.description),
        image_url: Set(payload.image_url),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(ApiResponse::success(
        "Category created",
        category_from_entity(category),
        Some(Meta::empty()),
    ))
}

/// Deleting a category is refused while products still reference it; its
/// subcategories go with it.
pub async fn delete_category(
    state: &AppState,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let existing = Categories::find_by_id(id).one(&state.orm).await?;
    if existing.is_none() {
        return Err(AppError::NotFound);
    }

    let product_count = Products::find()
        .filter(ProductCol::CategoryId.eq(id))
        .count(&state.orm)
        .await?;
    if product_count > 0 {
        return Err(AppError::Conflict(format!(
            "category still has {product_count} products"
        )));
    }

    Categories::delete_by_id(id).exec(&state.orm).await?;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn list_subcategories(
    state: &AppState,
    category_id: Option<Uuid>,
) -> AppResult<ApiResponse<SubcategoryList>> {
    let mut condition = Condition::all();
    if let Some(category_id) = category_id {
        condition = condition.add(SubcategoryCol::CategoryId.eq(category_id));
    }

    let subcategories = Subcategories::find()
        .filter(condition)
        .order_by_desc(SubcategoryCol::CreatedAt)
        .all(&state.orm)
        .await?;
    let categories = subcategories.load_one(Categories, &state.orm).await?;

    let items = subcategories
        .into_iter()
        .zip(categories)
        .map(|(subcategory, category)| SubcategoryWithCategory {
            subcategory: subcategory_from_entity(subcategory),
            category: category.map(|c| CategoryRef {
                id: c.id,
                name: c.name,
            }),
        })
        .collect();

    Ok(ApiResponse::success(
        "Subcategories",
        SubcategoryList { items },
        Some(Meta::empty()),
    ))
}

pub async fn create_subcategory(
    state: &AppState,
    payload: CreateSubcategoryRequest,
) -> AppResult<ApiResponse<Subcategory>> {
    payload.validate()?;

    let category = Categories::find_by_id(payload.category_id)
        .one(&state.orm)
        .await?;
    if category.is_none() {
        return Err(AppError::BadRequest("category not found".into()));
    }

    // Slug must be unique within its category; checked here so the caller
    // gets a conflict instead of a bare constraint violation.
    let duplicate = Subcategories::find()
        .filter(
            Condition::all()
                .add(SubcategoryCol::CategoryId.eq(payload.category_id))
                .add(SubcategoryCol::Slug.eq(payload.slug.clone())),
        )
        .count(&state.orm)
        .await?;
    if duplicate > 0 {
        return Err(AppError::Conflict(format!(
            "subcategory slug '{}' already exists in this category",
            payload.slug
        )));
    }

    let subcategory = SubcategoryActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        slug: Set(payload.slug),
        description: Set(payload.description),
        icon_url: Set(payload.icon_url),
        category_id: Set(payload.category_id),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(ApiResponse::success(
        "Subcategory created",
        subcategory_from_entity(subcategory),
        Some(Meta::empty()),
    ))
}

fn category_from_entity(model: CategoryModel) -> Category {
    Category {
        id: model.id,
        name: model.name,
        slug: model.slug,
        description: model.description,
        image_url: model.image_url,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn subcategory_from_entity(model: SubcategoryModel) -> Subcategory {
    Subcategory {
        id: model.id,
        name: model.name,
        slug: model.slug,
        description: model.description,
        icon_url: model.icon_url,
        category_id: model.category_id,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
