// src/handlers/dashboard.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::dashboard::DashboardMetrics,
};

// GET /api/dashboard/metrics
#[utoipa::path(
    get,
    path = "/api/dashboard/metrics",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Resumo de receita, meses, clientes novos e top produtos", body = DashboardMetrics),
        (status = 401, description = "Não autorizado"),
        (status = 500, description = "Falha na consulta")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_metrics(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let metrics = app_state.dashboard_service.get_metrics(user.id).await?;

    Ok((StatusCode::OK, Json(metrics)))
}
