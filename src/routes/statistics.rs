use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::statistics::StatisticsResponse,
    error::AppResult,
    response::ApiResponse,
    services::statistics_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_statistics))
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard/statistics",
    responses(
        (status = 200, description = "Overview counts, stock by category and the low-stock report", body = ApiResponse<StatisticsResponse>)
    ),
    tag = "Statistics"
)]
pub async fn get_statistics(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<StatisticsResponse>>> {
    let resp = statistics_service::get_statistics(&state).await?;
    Ok(Json(resp))
}
