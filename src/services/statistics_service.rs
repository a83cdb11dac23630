use uuid::Uuid;

use crate::{
    dto::statistics::{CategoryStock, LowStockProduct, LowStockVariant, Overview, StatisticsResponse},
    error::AppResult,
    response::{ApiResponse, Meta},
    state::AppState,
};

/// A stock entry is "low" when it drops below this many units.
pub const LOW_STOCK_THRESHOLD: i32 = 10;

/// Flat join row the aggregations reduce over: one stock entry with its
/// owning product, variant and (optional) category.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StockRow {
    pub quantity: i32,
    pub product_id: Uuid,
    pub product_name: String,
    pub variant_name: String,
    pub category_name: Option<String>,
}

pub async fn get_statistics(state: &AppState) -> AppResult<ApiResponse<StatisticsResponse>> {
    let (product_count,): (i64,) = sqlx::query_as("SELECT count(*) FROM products")
        .fetch_one(&state.pool)
        .await?;
    let (category_count,): (i64,) = sqlx::query_as("SELECT count(*) FROM categories")
        .fetch_one(&state.pool)
        .await?;
    let (variant_count,): (i64,) = sqlx::query_as("SELECT count(*) FROM product_variants")
        .fetch_one(&state.pool)
        .await?;

    let rows = fetch_stock_rows(state).await?;

    let overview = Overview {
        product_count,
        category_count,
        variant_count,
        total_stock: total_stock(&rows),
    };
    let data = StatisticsResponse {
        overview,
        stock_by_category: stock_by_category(&rows),
        low_stock: low_stock_report(&rows),
    };

    Ok(ApiResponse::success("Statistics", data, Some(Meta::empty())))
}

async fn fetch_stock_rows(state: &AppState) -> AppResult<Vec<StockRow>> {
    let rows = sqlx::query_as::<_, StockRow>(
        r#"
        SELECT s.quantity,
               p.id   AS product_id,
               p.name AS product_name,
               v.name AS variant_name,
               c.name AS category_name
        FROM stocks s
        JOIN products p ON p.id = s.product_id
        JOIN product_variants v ON v.id = s.variant_id
        LEFT JOIN categories c ON c.id = p.category_id
        ORDER BY p.created_at, s.created_at
        "#,
    )
    .fetch_all(&state.pool)
    .await?;
    Ok(rows)
}

/// Grand total of units on hand across every stock entry.
pub fn total_stock(rows: &[StockRow]) -> i64 {
    rows.iter().map(|row| i64::from(row.quantity)).sum()
}

/// Sum quantities per category name, first-seen order, with rows whose
/// product has no category grouped under "Uncategorized".
pub fn stock_by_category(rows: &[StockRow]) -> Vec<CategoryStock> {
    let mut groups: Vec<CategoryStock> = Vec::new();
    for row in rows {
        let name = row.category_name.as_deref().unwrap_or("Uncategorized");
        match groups.iter_mut().find(|group| group.name == name) {
            Some(group) => group.stock += i64::from(row.quantity),
            None => groups.push(CategoryStock {
                name: name.to_string(),
                stock: i64::from(row.quantity),
            }),
        }
    }
    groups
}

/// Products with at least one stock entry under the threshold. Each report
/// lists only the offending entries, keyed by variant name.
pub fn low_stock_report(rows: &[StockRow]) -> Vec<LowStockProduct> {
    let mut report: Vec<LowStockProduct> = Vec::new();
    for row in rows {
        if row.quantity >= LOW_STOCK_THRESHOLD {
            continue;
        }
        let entry = LowStockVariant {
            name: row.variant_name.clone(),
            quantity: row.quantity,
        };
        match report.iter_mut().find(|product| product.id == row.product_id) {
            Some(product) => product.variants.push(entry),
            None => report.push(LowStockProduct {
                id: row.product_id,
                name: row.product_name.clone(),
                variants: vec![entry],
            }),
        }
    }
    report
}
