use std::str::FromStr;

use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, State, rejection::JsonRejection},
    routing::{get, patch, post},
};
use futures::future::try_join_all;
use rust_decimal::Decimal;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::products::{
        FeaturedToggleRequest, ImageMetaInput, NewImage, NewProductSubmission, ProductDetail,
        ProductSummaryList, VariantInput,
    },
    error::{AppError, AppResult},
    models::Product,
    response::ApiResponse,
    routes::params::DashboardProductQuery,
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products))
        .route("/", post(create_product))
        .route("/{id}/featured", patch(set_featured))
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard/products",
    params(
        ("categoryId" = Option<Uuid>, Query, description = "Filter by category"),
        ("subcategoryId" = Option<Uuid>, Query, description = "Filter by subcategory"),
        ("name" = Option<String>, Query, description = "Case-insensitive name filter"),
        ("limit" = Option<i64>, Query, description = "Maximum number of rows"),
    ),
    responses(
        (status = 200, description = "List products with stock figures", body = ApiResponse<ProductSummaryList>)
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<DashboardProductQuery>,
) -> AppResult<Json<ApiResponse<ProductSummaryList>>> {
    let resp = product_service::list_products(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/v1/dashboard/products",
    request_body(
        content_type = "multipart/form-data",
        description = "Product fields plus `variantsData` (JSON array), repeated `imageFiles` parts and `imageMetadata` (JSON array)",
    ),
    responses(
        (status = 200, description = "Create product with variants, stock entries and images", body = ApiResponse<ProductDetail>),
        (status = 400, description = "Validation failed"),
    ),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<ProductDetail>>> {
    let form = SubmissionForm::read(multipart).await?;
    let (submission, files) = form.into_submission()?;

    // Validate everything before touching the media host, so a rejected
    // submission never leaves stranded uploads behind.
    if files.is_empty() {
        return Err(AppError::BadRequest("at least one image is required".into()));
    }
    submission.validate()?;

    // Independent uploads run concurrently; one failure aborts the batch.
    let uploads = try_join_all(files.into_iter().map(|file| {
        let media = state.media.clone();
        async move { media.upload_image(file.bytes, &file.filename, "products").await }
    }))
    .await?;

    let uploaded_urls: Vec<String> = uploads.iter().map(|u| u.secure_url.clone()).collect();
    let submission = submission.with_uploaded(uploads.into_iter().map(|u| u.secure_url));

    match product_service::create_product(&state, submission).await {
        Ok(resp) => Ok(Json(resp)),
        Err(err) => {
            // Persistence failed after the files went out; clean up remotely
            // on a best-effort basis.
            for url in &uploaded_urls {
                if let Err(destroy_err) = state.media.destroy(url).await {
                    tracing::warn!(%url, error = %destroy_err, "orphaned upload not removed");
                }
            }
            Err(err)
        }
    }
}

#[utoipa::path(
    patch,
    path = "/api/v1/dashboard/products/{id}/featured",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = FeaturedToggleRequest,
    responses(
        (status = 200, description = "Featured flag updated", body = ApiResponse<Product>),
        (status = 400, description = "isFeatured must be a boolean"),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn set_featured(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<FeaturedToggleRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let Json(payload) =
        payload.map_err(|_| AppError::BadRequest("isFeatured must be a boolean".into()))?;
    let resp = product_service::set_featured(&state, id, payload.is_featured).await?;
    Ok(Json(resp))
}

struct UploadFile {
    filename: String,
    bytes: Vec<u8>,
}

/// Raw multipart fields of a product submission, before strict parsing.
#[derive(Default)]
struct SubmissionForm {
    name: String,
    slug: String,
    description: String,
    base_price: String,
    category_id: String,
    subcategory_id: String,
    variants_json: String,
    image_meta_json: String,
    files: Vec<UploadFile>,
}

impl SubmissionForm {
    async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|err| AppError::BadRequest(format!("malformed multipart body: {err}")))?
        {
            let field_name = field.name().unwrap_or("").to_string();
            match field_name.as_str() {
                "imageFiles" => {
                    let filename = field
                        .file_name()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "image".to_string());
                    let bytes = field.bytes().await.map_err(|err| {
                        AppError::BadRequest(format!("failed to read image file: {err}"))
                    })?;
                    form.files.push(UploadFile {
                        filename,
                        bytes: bytes.to_vec(),
                    });
                }
                name => {
                    let value = field.text().await.map_err(|err| {
                        AppError::BadRequest(format!("failed to read field {name}: {err}"))
                    })?;
                    match name {
                        "name" => form.name = value,
                        "slug" => form.slug = value,
                        "description" => form.description = value,
                        "basePrice" => form.base_price = value,
                        "categoryId" => form.category_id = value,
                        "subcategoryId" => form.subcategory_id = value,
                        "variantsData" => form.variants_json = value,
                        "imageMetadata" => form.image_meta_json = value,
                        _ => {}
                    }
                }
            }
        }
        Ok(form)
    }

    /// Strict conversion into a submission plus the files to upload. Numeric
    /// or JSON garbage is a hard error here, never a silent zero.
    fn into_submission(self) -> AppResult<(NewProductSubmission, Vec<UploadFile>)> {
        let base_price = parse_decimal("basePrice", &self.base_price)?;
        let category_id = Uuid::parse_str(self.category_id.trim())
            .map_err(|_| AppError::BadRequest("categoryId must be a valid id".into()))?;
        let subcategory_id = match self.subcategory_id.trim() {
            "" => None,
            raw => Some(
                Uuid::parse_str(raw)
                    .map_err(|_| AppError::BadRequest("subcategoryId must be a valid id".into()))?,
            ),
        };

        let variants: Vec<VariantInput> = serde_json::from_str(&self.variants_json)
            .map_err(|err| AppError::BadRequest(format!("variantsData is not valid JSON: {err}")))?;

        let metadata: Vec<ImageMetaInput> = if self.image_meta_json.is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&self.image_meta_json).map_err(|err| {
                AppError::BadRequest(format!("imageMetadata is not valid JSON: {err}"))
            })?
        };
        if metadata.len() != self.files.len() {
            return Err(AppError::BadRequest(
                "imageMetadata must have one entry per image file".into(),
            ));
        }

        // Image URLs are filled in after upload; metadata is validated now.
        let images = metadata
            .iter()
            .map(|meta| NewImage {
                url: String::new(),
                alt_text: meta.alt_text.clone(),
                is_primary: meta.is_primary,
            })
            .collect();

        let submission = NewProductSubmission {
            name: self.name,
            slug: self.slug,
            description: self.description,
            base_price,
            category_id,
            subcategory_id,
            variants,
            images,
        };
        Ok((submission, self.files))
    }
}

impl NewProductSubmission {
    fn with_uploaded(mut self, urls: impl Iterator<Item = String>) -> Self {
        for (image, url) in self.images.iter_mut().zip(urls) {
            image.url = url;
        }
        self
    }
}

/// Parse a decimal form field; rejects anything that is not a number instead
/// of defaulting to zero.
pub fn parse_decimal(field: &str, raw: &str) -> AppResult<Decimal> {
    Decimal::from_str(raw.trim())
        .map_err(|_| AppError::BadRequest(format!("{field} must be a number")))
}
