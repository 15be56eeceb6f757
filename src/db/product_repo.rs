// src/db/product_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::product::Product};

#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        name: &str,
        description: Option<&str>,
        unit_price: Decimal,
    ) -> Result<Product, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (user_id, name, description, unit_price)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, name, description, unit_price, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(name)
        .bind(description)
        .bind(unit_price)
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

    pub async fn list(&self, user_id: Uuid) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, user_id, name, description, unit_price, created_at, updated_at
            FROM products
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    pub async fn update(
        &self,
        user_id: Uuid,
        product_id: Uuid,
        name: &str,
        description: Option<&str>,
        unit_price: Decimal,
    ) -> Result<Option<Product>, AppError> {
        let maybe_product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = $3, description = $4, unit_price = $5, updated_at = NOW()
            WHERE user_id = $1 AND id = $2
            RETURNING id, user_id, name, description, unit_price, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(product_id)
        .bind(name)
        .bind(description)
        .bind(unit_price)
        .fetch_optional(&self.pool)
        .await?;

        Ok(maybe_product)
    }
}
