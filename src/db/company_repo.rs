// src/db/company_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::company::Company};

#[derive(Clone)]
pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
        address: Option<&str>,
        is_seller: bool,
    ) -> Result<Company, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let company = sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (user_id, name, email, phone, address, is_seller)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, name, email, phone, address, is_seller,
                      created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(address)
        .bind(is_seller)
        .fetch_one(executor)
        .await?;

        Ok(company)
    }

    /// Lista as empresas do usuário; `is_seller` filtra por papel quando presente.
    pub async fn list(
        &self,
        user_id: Uuid,
        is_seller: Option<bool>,
    ) -> Result<Vec<Company>, AppError> {
        let companies = sqlx::query_as::<_, Company>(
            r#"
            SELECT id, user_id, name, email, phone, address, is_seller,
                   created_at, updated_at
            FROM companies
            WHERE user_id = $1
              AND ($2::boolean IS NULL OR is_seller = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(is_seller)
        .fetch_all(&self.pool)
        .await?;

        Ok(companies)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        company_id: Uuid,
    ) -> Result<Option<Company>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let maybe_company = sqlx::query_as::<_, Company>(
            r#"
            SELECT id, user_id, name, email, phone, address, is_seller,
                   created_at, updated_at
            FROM companies
            WHERE user_id = $1 AND id = $2
            "#,
        )
        .bind(user_id)
        .bind(company_id)
        .fetch_optional(executor)
        .await?;

        Ok(maybe_company)
    }

    pub async fn update(
        &self,
        user_id: Uuid,
        company_id: Uuid,
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
        address: Option<&str>,
    ) -> Result<Option<Company>, AppError> {
        let maybe_company = sqlx::query_as::<_, Company>(
            r#"
            UPDATE companies
            SET name = $3, email = $4, phone = $5, address = $6, updated_at = NOW()
            WHERE user_id = $1 AND id = $2
            RETURNING id, user_id, name, email, phone, address, is_seller,
                      created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(company_id)
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(address)
        .fetch_optional(&self.pool)
        .await?;

        Ok(maybe_company)
    }

    /// Quantos compradores novos desde `since` (primeiro dia do mês corrente).
    /// Alimenta o card "novos clientes" do dashboard.
    pub async fn count_new_buyers_since(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM companies
            WHERE user_id = $1
              AND is_seller = FALSE
              AND created_at >= $2
            "#,
        )
        .bind(user_id)
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
