// src/services/company_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CompanyRepository,
    models::company::{Company, CompanyPayload},
};

#[derive(Clone)]
pub struct CompanyService {
    pool: PgPool,
    repo: CompanyRepository,
}

impl CompanyService {
    pub fn new(pool: PgPool, repo: CompanyRepository) -> Self {
        Self { pool, repo }
    }

    pub async fn create_company(
        &self,
        user_id: Uuid,
        payload: &CompanyPayload,
    ) -> Result<Company, AppError> {
        self.repo
            .create(
                &self.pool,
                user_id,
                &payload.name,
                payload.email.as_deref(),
                payload.phone.as_deref(),
                payload.address.as_deref(),
                payload.is_seller,
            )
            .await
    }

    pub async fn list_companies(
        &self,
        user_id: Uuid,
        is_seller: Option<bool>,
    ) -> Result<Vec<Company>, AppError> {
        self.repo.list(user_id, is_seller).await
    }

    pub async fn update_company(
        &self,
        user_id: Uuid,
        company_id: Uuid,
        payload: &CompanyPayload,
    ) -> Result<Company, AppError> {
        self.repo
            .update(
                user_id,
                company_id,
                &payload.name,
                payload.email.as_deref(),
                payload.phone.as_deref(),
                payload.address.as_deref(),
            )
            .await?
            .ok_or(AppError::CompanyNotFound)
    }
}
