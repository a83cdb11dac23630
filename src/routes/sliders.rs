use axum::{
    Json, Router,
    extract::{Multipart, State},
    routing::{get, post},
};

use crate::{
    dto::sliders::{ACCEPTED_IMAGE_TYPES, MAX_IMAGE_BYTES, MAX_TITLE_LEN, SliderList},
    error::{AppError, AppResult},
    models::Slider,
    response::ApiResponse,
    services::slider_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sliders))
        .route("/", post(create_slider))
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard/settings/sliders",
    responses(
        (status = 200, description = "Homepage banners, newest first", body = ApiResponse<SliderList>)
    ),
    tag = "Sliders"
)]
pub async fn list_sliders(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<SliderList>>> {
    let resp = slider_service::list_sliders(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/v1/dashboard/settings/sliders",
    request_body(
        content_type = "multipart/form-data",
        description = "A `title` field plus one `image` part (jpeg/png/webp, 10 MiB max)",
    ),
    responses(
        (status = 200, description = "Banner stored and its image uploaded", body = ApiResponse<Slider>),
        (status = 400, description = "Missing title, bad image type or image too large"),
    ),
    tag = "Sliders"
)]
pub async fn create_slider(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<Slider>>> {
    let form = SliderForm::read(multipart).await?;

    let title = form.title.trim().to_string();
    if title.is_empty() {
        return Err(AppError::BadRequest("title is required".into()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(AppError::BadRequest(format!(
            "title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    let image = form
        .image
        .ok_or_else(|| AppError::BadRequest("image file is required".into()))?;
    if !ACCEPTED_IMAGE_TYPES.contains(&image.content_type.as_str()) {
        return Err(AppError::BadRequest(
            "image must be a jpeg, png or webp file".into(),
        ));
    }
    if image.bytes.len() > MAX_IMAGE_BYTES {
        return Err(AppError::BadRequest("image is larger than 10MB".into()));
    }

    let uploaded = state
        .media
        .upload_image(image.bytes, &image.filename, "sliders")
        .await?;

    let resp = slider_service::create_slider(&state, title, uploaded.secure_url).await?;
    Ok(Json(resp))
}

struct SliderImage {
    filename: String,
    content_type: String,
    bytes: Vec<u8>,
}

#[derive(Default)]
struct SliderForm {
    title: String,
    image: Option<SliderImage>,
}

impl SliderForm {
    async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|err| AppError::BadRequest(format!("malformed multipart body: {err}")))?
        {
            match field.name().unwrap_or("") {
                "title" => {
                    form.title = field.text().await.map_err(|err| {
                        AppError::BadRequest(format!("failed to read title: {err}"))
                    })?;
                }
                "image" => {
                    let filename = field
                        .file_name()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "banner".to_string());
                    let content_type = field.content_type().unwrap_or("").to_string();
                    let bytes = field.bytes().await.map_err(|err| {
                        AppError::BadRequest(format!("failed to read image file: {err}"))
                    })?;
                    form.image = Some(SliderImage {
                        filename,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
                _ => {}
            }
        }
        Ok(form)
    }
}
