use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Filters accepted by the dashboard product listing. Field names follow the
/// frontend's camelCase query strings.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardProductQuery {
    pub category_id: Option<Uuid>,
    pub subcategory_id: Option<Uuid>,
    pub name: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CatalogQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub category: Option<String>,
}

impl CatalogQuery {
    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self.limit.unwrap_or(10).clamp(1, 100);
        let offset = (page - 1) * limit;
        (page, limit, offset)
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubcategoryQuery {
    pub category_id: Option<Uuid>,
}
