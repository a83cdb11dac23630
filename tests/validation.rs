use rust_decimal::Decimal;
use uuid::Uuid;
use validator::Validate;

use axum_storefront_api::{
    dto::products::{NewImage, NewProductSubmission, StockEntryInput, VariantInput},
    media::extract_public_id,
    routes::{params::CatalogQuery, products::parse_decimal},
};

fn valid_submission() -> NewProductSubmission {
    NewProductSubmission {
        name: "Summer Floral Dress".into(),
        slug: "summer-floral-dress".into(),
        description: "Lightweight dress".into(),
        base_price: Decimal::new(5999, 2),
        category_id: Uuid::new_v4(),
        subcategory_id: None,
        variants: vec![VariantInput {
            name: "M".into(),
            price_offset: Decimal::ZERO,
            stocks: vec![StockEntryInput {
                quantity: 10,
                location: Some("WH-A1-10".into()),
                sku: Some("SFDR-M".into()),
                barcode: None,
            }],
        }],
        images: vec![NewImage {
            url: "https://img.example.com/upload/v1/shop/products/a.webp".into(),
            alt_text: Some("Front view".into()),
            is_primary: true,
        }],
    }
}

#[test]
fn a_complete_submission_passes() {
    assert!(valid_submission().validate().is_ok());
}

#[test]
fn submission_without_a_primary_image_is_rejected() {
    let mut submission = valid_submission();
    submission.images[0].is_primary = false;

    let errors = submission.validate().unwrap_err();
    let field_errors = errors.field_errors();
    let messages: Vec<String> = field_errors
        .values()
        .flat_map(|errs| errs.iter())
        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .collect();
    assert!(
        messages.iter().any(|m| m == "select one image as primary"),
        "unexpected messages: {messages:?}"
    );
}

#[test]
fn two_primary_images_are_rejected() {
    let mut submission = valid_submission();
    submission.images.push(NewImage {
        url: "https://img.example.com/b.webp".into(),
        alt_text: None,
        is_primary: true,
    });

    assert!(submission.validate().is_err());
}

#[test]
fn submission_without_images_is_rejected() {
    let mut submission = valid_submission();
    submission.images.clear();

    assert!(submission.validate().is_err());
}

#[test]
fn negative_stock_quantity_is_rejected() {
    let mut submission = valid_submission();
    submission.variants[0].stocks[0].quantity = -1;

    assert!(submission.validate().is_err());
}

#[test]
fn negative_base_price_is_rejected() {
    let mut submission = valid_submission();
    submission.base_price = Decimal::new(-100, 2);

    assert!(submission.validate().is_err());
}

#[test]
fn variant_without_stock_entries_is_rejected() {
    let mut submission = valid_submission();
    submission.variants[0].stocks.clear();

    assert!(submission.validate().is_err());
}

#[test]
fn garbage_price_fields_are_a_hard_error() {
    assert!(parse_decimal("basePrice", "abc").is_err());
    assert!(parse_decimal("basePrice", "").is_err());
    assert!(parse_decimal("basePrice", "12.three").is_err());
}

#[test]
fn numeric_price_fields_parse() {
    assert_eq!(
        parse_decimal("basePrice", " 59.99 ").unwrap(),
        Decimal::new(5999, 2)
    );
}

#[test]
fn catalog_paging_is_normalized() {
    let query = CatalogQuery {
        page: Some(3),
        limit: Some(20),
        category: None,
    };
    assert_eq!(query.normalize(), (3, 20, 40));

    let defaults = CatalogQuery::default();
    assert_eq!(defaults.normalize(), (1, 10, 0));

    let out_of_range = CatalogQuery {
        page: Some(0),
        limit: Some(1000),
        category: None,
    };
    assert_eq!(out_of_range.normalize(), (1, 100, 0));
}

#[test]
fn public_ids_come_out_of_delivery_urls() {
    assert_eq!(
        extract_public_id("https://res.example.com/demo/image/upload/v123/shop/products/abc.webp"),
        Some("shop/products/abc".to_string())
    );
    assert_eq!(
        extract_public_id("https://res.example.com/demo/image/upload/shop/products/abc.webp"),
        Some("shop/products/abc".to_string())
    );
    assert_eq!(extract_public_id("https://example.com/no-upload-segment.png"), None);
}
