// src/services/product_service.rs

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ProductRepository,
    models::product::{Product, ProductPayload},
};

#[derive(Clone)]
pub struct ProductService {
    repo: ProductRepository,
}

impl ProductService {
    pub fn new(repo: ProductRepository) -> Self {
        Self { repo }
    }

    pub async fn create_product(
        &self,
        user_id: Uuid,
        payload: &ProductPayload,
    ) -> Result<Product, AppError> {
        check_price(payload.unit_price)?;

        self.repo
            .create(user_id, &payload.name, payload.description.as_deref(), payload.unit_price)
            .await
    }

    pub async fn list_products(&self, user_id: Uuid) -> Result<Vec<Product>, AppError> {
        self.repo.list(user_id).await
    }

    pub async fn update_product(
        &self,
        user_id: Uuid,
        product_id: Uuid,
        payload: &ProductPayload,
    ) -> Result<Product, AppError> {
        check_price(payload.unit_price)?;

        self.repo
            .update(
                user_id,
                product_id,
                &payload.name,
                payload.description.as_deref(),
                payload.unit_price,
            )
            .await?
            .ok_or(AppError::ProductNotFound)
    }
}

fn check_price(unit_price: Decimal) -> Result<(), AppError> {
    if unit_price < Decimal::ZERO {
        return Err(AppError::InvalidInput(
            "unitPrice não pode ser negativo.".to_string(),
        ));
    }
    Ok(())
}
