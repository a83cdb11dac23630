use uuid::Uuid;

use axum_storefront_api::services::statistics_service::{
    LOW_STOCK_THRESHOLD, StockRow, low_stock_report, stock_by_category, total_stock,
};

fn row(quantity: i32, product: (Uuid, &str), variant: &str, category: Option<&str>) -> StockRow {
    StockRow {
        quantity,
        product_id: product.0,
        product_name: product.1.to_string(),
        variant_name: variant.to_string(),
        category_name: category.map(str::to_string),
    }
}

#[test]
fn total_stock_sums_every_entry() {
    let product = (Uuid::new_v4(), "Summer Floral Dress");
    let rows = vec![
        row(3, product, "M", Some("Women")),
        row(8, product, "L", Some("Women")),
    ];

    assert_eq!(total_stock(&rows), 11);
}

#[test]
fn total_stock_of_nothing_is_zero() {
    assert_eq!(total_stock(&[]), 0);
}

#[test]
fn stock_by_category_groups_in_first_seen_order() {
    let dress = (Uuid::new_v4(), "Summer Floral Dress");
    let tee = (Uuid::new_v4(), "Classic White T-Shirt");
    let orphan = (Uuid::new_v4(), "Mystery Box");
    let rows = vec![
        row(10, dress, "M", Some("Women")),
        row(5, tee, "L", Some("Men")),
        row(7, orphan, "N/A", None),
        row(4, dress, "L", Some("Women")),
    ];

    let groups = stock_by_category(&rows);
    let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, ["Women", "Men", "Uncategorized"]);
    assert_eq!(groups[0].stock, 14);
    assert_eq!(groups[1].stock, 5);
    assert_eq!(groups[2].stock, 7);
}

#[test]
fn category_totals_add_up_to_the_grand_total() {
    let a = (Uuid::new_v4(), "A");
    let b = (Uuid::new_v4(), "B");
    let rows = vec![
        row(12, a, "S", Some("Women")),
        row(9, a, "M", None),
        row(30, b, "L", Some("Men")),
    ];

    let grouped: i64 = stock_by_category(&rows).iter().map(|g| g.stock).sum();
    assert_eq!(grouped, total_stock(&rows));
}

#[test]
fn low_stock_reports_only_entries_under_the_threshold() {
    let dress = (Uuid::new_v4(), "Summer Floral Dress");
    let tee = (Uuid::new_v4(), "Classic White T-Shirt");
    let rows = vec![
        row(3, dress, "M", Some("Women")),
        row(8, dress, "L", Some("Women")),
        row(25, tee, "M", Some("Men")),
        row(LOW_STOCK_THRESHOLD, tee, "L", Some("Men")),
    ];

    let report = low_stock_report(&rows);
    assert_eq!(report.len(), 1);
    assert_eq!(report[0].id, dress.0);
    assert_eq!(report[0].variants.len(), 2);
    assert_eq!(report[0].variants[0].name, "M");
    assert_eq!(report[0].variants[0].quantity, 3);
    assert_eq!(report[0].variants[1].quantity, 8);
}

#[test]
fn fully_stocked_catalog_yields_an_empty_report() {
    let tee = (Uuid::new_v4(), "Classic White T-Shirt");
    let rows = vec![row(25, tee, "M", Some("Men")), row(40, tee, "L", Some("Men"))];

    assert!(low_stock_report(&rows).is_empty());
}
