use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::dto::products::CategoryRef;
use crate::models::{Category, Subcategory};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, message = "category name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "slug is required"))]
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubcategoryRequest {
    #[validate(length(min = 1, message = "subcategory name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "slug is required"))]
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon_url: Option<String>,
    pub category_id: Uuid,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductRef {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

/// Category with its children, the dashboard/storefront listing shape.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithChildren {
    #[serde(flatten)]
    pub category: Category,
    pub subcategories: Vec<Subcategory>,
    pub products: Vec<ProductRef>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubcategoryWithCategory {
    #[serde(flatten)]
    pub subcategory: Subcategory,
    pub category: Option<CategoryRef>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct CategoryList {
    #[schema(value_type = Vec<CategoryWithChildren>)]
    pub items: Vec<CategoryWithChildren>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct SubcategoryList {
    #[schema(value_type = Vec<SubcategoryWithCategory>)]
    pub items: Vec<SubcategoryWithCategory>,
}
