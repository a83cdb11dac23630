use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::notifications::{RegisterTokenRequest, SendNotificationRequest, SendResult},
    entity::push_tokens::{
        ActiveModel as PushTokenActive, Column as PushTokenCol, Entity as PushTokens,
    },
    error::{AppError, AppResult},
    models::PushToken,
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Store a device registration. Duplicate registrations are kept as-is;
/// `send` always picks the newest.
pub async fn register_token(
    state: &AppState,
    payload: RegisterTokenRequest,
) -> AppResult<ApiResponse<PushToken>> {
    payload.validate()?;

    let token = PushTokenActive {
        id: Set(Uuid::new_v4()),
        token: Set(payload.token),
        user_id: Set(payload.user_id),
        platform: Set(payload.platform),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(ApiResponse::success(
        "Push token saved",
        PushToken {
            id: token.id,
            token: token.token,
            user_id: token.user_id,
            platform: token.platform,
            created_at: token.created_at.with_timezone(&Utc),
        },
        Some(Meta::empty()),
    ))
}

/// Look up the user's most recent token and hand the message to the gateway.
pub async fn send_notification(
    state: &AppState,
    payload: SendNotificationRequest,
) -> AppResult<ApiResponse<SendResult>> {
    payload.validate()?;

    let record = PushTokens::find()
        .filter(PushTokenCol::UserId.eq(payload.user_id.clone()))
        .order_by_desc(PushTokenCol::CreatedAt)
        .one(&state.orm)
        .await?;
    let record = match record {
        Some(r) => r,
        None => return Err(AppError::NotFound),
    };

    state
        .push
        .send(&record.token, &payload.title, &payload.body)
        .await?;

    tracing::info!(user_id = %payload.user_id, "push notification forwarded");

    Ok(ApiResponse::success(
        "Notification sent",
        SendResult { success: true },
        Some(Meta::empty()),
    ))
}
