use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterTokenRequest {
    #[validate(length(min = 1, message = "push token is required"))]
    pub token: String,
    #[validate(length(min = 1, message = "user id is required"))]
    pub user_id: String,
    #[validate(length(min = 1, message = "platform is required"))]
    pub platform: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendNotificationRequest {
    #[validate(length(min = 1, message = "user id is required"))]
    pub user_id: String,
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "body is required"))]
    pub body: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SendResult {
    pub success: bool,
}
