use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    dto::sliders::SliderList,
    entity::sliders::{ActiveModel as SliderActive, Column as SliderCol, Entity as Sliders,
        Model as SliderModel},
    error::AppResult,
    models::Slider,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_sliders(state: &AppState) -> AppResult<ApiResponse<SliderList>> {
    let items = Sliders::find()
        .order_by_desc(SliderCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(slider_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Sliders",
        SliderList { items },
        Some(Meta::empty()),
    ))
}

/// Persist a banner whose image has already been uploaded to the media host.
pub async fn create_slider(
    state: &AppState,
    title: String,
    image_url: String,
) -> AppResult<ApiResponse<Slider>> {
    let slider = SliderActive {
        id: Set(Uuid::new_v4()),
        title: Set(title),
        image: Set(image_url),
        is_active: Set(true),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(ApiResponse::success(
        "Slider created",
        slider_from_entity(slider),
        Some(Meta::empty()),
    ))
}

fn slider_from_entity(model: SliderModel) -> Slider {
    Slider {
        id: model.id,
        title: model.title,
        image: model.image,
        is_active: model.is_active,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
