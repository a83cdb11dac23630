use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub product_count: i64,
    pub category_count: i64,
    pub variant_count: i64,
    pub total_stock: i64,
}

/// One chart slice: total units on hand for a category.
#[derive(Debug, Serialize, PartialEq, ToSchema)]
pub struct CategoryStock {
    pub name: String,
    pub stock: i64,
}

#[derive(Debug, Serialize, PartialEq, ToSchema)]
pub struct LowStockVariant {
    pub name: String,
    pub quantity: i32,
}

/// Product flagged by the low-stock report; `variants` holds only the stock
/// rows below the threshold, not the product's full inventory.
#[derive(Debug, Serialize, PartialEq, ToSchema)]
pub struct LowStockProduct {
    pub id: Uuid,
    pub name: String,
    pub variants: Vec<LowStockVariant>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsResponse {
    pub overview: Overview,
    pub stock_by_category: Vec<CategoryStock>,
    pub low_stock: Vec<LowStockProduct>,
}
