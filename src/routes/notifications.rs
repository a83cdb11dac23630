use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::notifications::{RegisterTokenRequest, SendNotificationRequest, SendResult},
    error::AppResult,
    models::PushToken,
    response::ApiResponse,
    services::notification_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/push", post(register_token))
        .route("/send", post(send_notification))
}

#[utoipa::path(
    post,
    path = "/api/v1/notifications/push",
    request_body = RegisterTokenRequest,
    responses(
        (status = 200, description = "Push token saved", body = ApiResponse<PushToken>),
        (status = 400, description = "Missing field"),
    ),
    tag = "Notifications"
)]
pub async fn register_token(
    State(state): State<AppState>,
    Json(payload): Json<RegisterTokenRequest>,
) -> AppResult<Json<ApiResponse<PushToken>>> {
    let resp = notification_service::register_token(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/v1/notifications/send",
    request_body = SendNotificationRequest,
    responses(
        (status = 200, description = "Notification forwarded to the gateway", body = ApiResponse<SendResult>),
        (status = 404, description = "No push token on file for the user"),
        (status = 502, description = "Gateway unreachable"),
    ),
    tag = "Notifications"
)]
pub async fn send_notification(
    State(state): State<AppState>,
    Json(payload): Json<SendNotificationRequest>,
) -> AppResult<Json<ApiResponse<SendResult>>> {
    let resp = notification_service::send_notification(&state, payload).await?;
    Ok(Json(resp))
}
