// src/handlers/companies.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::company::{Company, CompanyPayload},
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListCompaniesQuery {
    /// Filtra por papel: true = vendedoras, false = clientes
    pub is_seller: Option<bool>,
}

// POST /api/companies
#[utoipa::path(
    post,
    path = "/api/companies",
    tag = "Companies",
    request_body = CompanyPayload,
    responses(
        (status = 201, description = "Empresa criada", body = Company),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_company(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CompanyPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let company = app_state.company_service
        .create_company(user.id, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(company)))
}

// GET /api/companies?isSeller=
#[utoipa::path(
    get,
    path = "/api/companies",
    tag = "Companies",
    params(ListCompaniesQuery),
    responses(
        (status = 200, description = "Empresas do usuário", body = Vec<Company>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_companies(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<ListCompaniesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let companies = app_state.company_service
        .list_companies(user.id, query.is_seller)
        .await?;

    Ok((StatusCode::OK, Json(companies)))
}

// PUT /api/companies/{id}
#[utoipa::path(
    put,
    path = "/api/companies/{id}",
    tag = "Companies",
    request_body = CompanyPayload,
    responses(
        (status = 200, description = "Empresa atualizada", body = Company),
        (status = 404, description = "Empresa não encontrada")
    ),
    params(
        ("id" = Uuid, Path, description = "ID da empresa")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_company(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(company_id): Path<Uuid>,
    Json(payload): Json<CompanyPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let company = app_state.company_service
        .update_company(user.id, company_id, &payload)
        .await?;

    Ok((StatusCode::OK, Json(company)))
}
