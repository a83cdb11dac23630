use serde::Serialize;
use utoipa::ToSchema;

use crate::models::Slider;

/// Upload limits for banner images, mirrored from the dashboard form.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;
pub const ACCEPTED_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/jpg", "image/png", "image/webp"];
pub const MAX_TITLE_LEN: usize = 100;

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct SliderList {
    #[schema(value_type = Vec<Slider>)]
    pub items: Vec<Slider>,
}
