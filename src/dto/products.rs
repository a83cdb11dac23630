use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::{Product, ProductImage, Stock};

/// One stock entry inside a submitted variant, as encoded in the
/// `variantsData` form field.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockEntryInput {
    #[validate(range(min = 0, message = "quantity must be a positive number"))]
    pub quantity: i32,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VariantInput {
    #[validate(length(min = 1, message = "variant name is required"))]
    pub name: String,
    pub price_offset: Decimal,
    #[validate(length(min = 1, message = "at least one stock entry is required"))]
    #[validate(nested)]
    pub stocks: Vec<StockEntryInput>,
}

/// Per-file metadata from the `imageMetadata` form field, index-aligned with
/// the `imageFiles` parts.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageMetaInput {
    #[serde(default)]
    pub alt_text: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

/// An image whose file has already been uploaded to the media host.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewImage {
    pub url: String,
    pub alt_text: Option<String>,
    pub is_primary: bool,
}

/// The normalized submission the handler builds from the multipart form.
/// Every numeric field has already been parsed strictly; garbage input never
/// reaches this type as a zero.
#[derive(Debug, Clone, Validate, ToSchema)]
pub struct NewProductSubmission {
    #[validate(length(min = 1, message = "product name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "slug is required"))]
    pub slug: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    #[validate(custom(function = non_negative_price))]
    pub base_price: Decimal,
    pub category_id: Uuid,
    pub subcategory_id: Option<Uuid>,
    #[validate(nested)]
    pub variants: Vec<VariantInput>,
    #[validate(
        length(min = 1, message = "at least one image is required"),
        custom(function = exactly_one_primary)
    )]
    pub images: Vec<NewImage>,
}

fn non_negative_price(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() {
        return Err(
            ValidationError::new("base_price").with_message("base price must be a positive number".into())
        );
    }
    Ok(())
}

fn exactly_one_primary(images: &[NewImage]) -> Result<(), ValidationError> {
    let primaries = images.iter().filter(|img| img.is_primary).count();
    if images.is_empty() || primaries == 1 {
        // Emptiness is reported by the length rule.
        return Ok(());
    }
    Err(ValidationError::new("primary_image").with_message("select one image as primary".into()))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedToggleRequest {
    pub is_featured: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteRequest {
    pub product_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteResult {
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryRef {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VariantRef {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageView {
    pub url: String,
    pub alt_text: Option<String>,
    pub is_primary: bool,
}

/// Stock row decorated with its variant name, the shape the dashboard tables
/// consume.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockView {
    pub id: Uuid,
    pub quantity: i32,
    pub location: String,
    pub sku: Option<String>,
    pub barcode: Option<String>,
    pub variant: Option<VariantRef>,
}

/// Dashboard listing row: the raw product plus the derived stock figures.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub base_price: Decimal,
    pub is_featured: bool,
    pub images: Vec<ImageView>,
    pub total_stock: i64,
    pub stock_count: i64,
    pub stocks: Vec<StockView>,
    pub category: Option<CategoryRef>,
    pub subcategory: Option<CategoryRef>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VariantWithStocks {
    pub id: Uuid,
    pub name: String,
    pub price_offset: Decimal,
    pub product_id: Uuid,
    pub stocks: Vec<Stock>,
}

/// Fully populated product, returned by the submission pipeline and the
/// single-product endpoint.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub category: Option<CategoryRef>,
    pub variants: Vec<VariantWithStocks>,
    pub images: Vec<ProductImage>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductSummaryList {
    #[schema(value_type = Vec<ProductSummary>)]
    pub items: Vec<ProductSummary>,
}

/// Storefront card: flattened to the primary image and in-stock sizes.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub is_featured: bool,
    pub base_price: Decimal,
    pub image: Option<String>,
    pub image_alt: Option<String>,
    pub total_stock: i64,
    pub available_sizes: Vec<String>,
    pub is_in_stock: bool,
    pub category: Option<CategoryRef>,
    pub subcategory: Option<CategoryRef>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct CatalogList {
    #[schema(value_type = Vec<CatalogItem>)]
    pub items: Vec<CatalogItem>,
}
