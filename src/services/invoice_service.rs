// src/services/invoice_service.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CompanyRepository, InvoiceRepository},
    models::invoice::{
        BuyerRef, InvoiceDetail, InvoiceListEntry, InvoiceListRow, InvoicePayload,
        InvoiceStatus,
    },
    services::totals,
};

#[derive(Clone)]
pub struct InvoiceService {
    pool: PgPool,
    repo: InvoiceRepository,
    company_repo: CompanyRepository,
}

impl InvoiceService {
    pub fn new(pool: PgPool, repo: InvoiceRepository, company_repo: CompanyRepository) -> Self {
        Self { pool, repo, company_repo }
    }

    pub async fn create_invoice(
        &self,
        user_id: Uuid,
        payload: &InvoicePayload,
    ) -> Result<InvoiceDetail, AppError> {
        check_amounts(payload)?;

        let mut tx = self.pool.begin().await?;

        self.check_parties(&mut tx, user_id, payload.seller_id, payload.buyer_id).await?;

        let invoice = self.repo
            .create_invoice(
                &mut *tx,
                user_id,
                &payload.invoice_number,
                payload.seller_id,
                payload.buyer_id,
                payload.status.unwrap_or(InvoiceStatus::Draft),
                payload.issue_date,
                payload.due_date,
                payload.discount_percentage,
                payload.tax_percentage,
                payload.shipping_charges,
                payload.notes.as_deref(),
            )
            .await?;

        for item in &payload.products {
            self.repo
                .add_item(&mut *tx, invoice.id, item.product_id, item.quantity, item.unit_price)
                .await?;
        }

        let items = self.repo.list_items(&mut *tx, invoice.id).await?;

        tx.commit().await?;

        Ok(InvoiceDetail { invoice, items })
    }

    pub async fn list_invoices(&self, user_id: Uuid) -> Result<Vec<InvoiceListEntry>, AppError> {
        let rows = self.repo.list_rows(user_id).await?;
        Ok(rows.into_iter().map(list_entry).collect())
    }

    pub async fn get_invoice(
        &self,
        user_id: Uuid,
        invoice_id: Uuid,
    ) -> Result<InvoiceDetail, AppError> {
        let invoice = self.repo
            .find_by_id(&self.pool, user_id, invoice_id)
            .await?
            .ok_or(AppError::InvoiceNotFound)?;

        let items = self.repo.list_items(&self.pool, invoice.id).await?;

        Ok(InvoiceDetail { invoice, items })
    }

    /// Atualiza o cabeçalho e troca TODOS os itens pelos enviados,
    /// na mesma transação.
    pub async fn update_invoice(
        &self,
        user_id: Uuid,
        invoice_id: Uuid,
        payload: &InvoicePayload,
    ) -> Result<InvoiceDetail, AppError> {
        check_amounts(payload)?;

        let mut tx = self.pool.begin().await?;

        self.check_parties(&mut tx, user_id, payload.seller_id, payload.buyer_id).await?;

        let invoice = self.repo
            .update_invoice(
                &mut *tx,
                user_id,
                invoice_id,
                &payload.invoice_number,
                payload.seller_id,
                payload.buyer_id,
                payload.status.unwrap_or(InvoiceStatus::Draft),
                payload.issue_date,
                payload.due_date,
                payload.discount_percentage,
                payload.tax_percentage,
                payload.shipping_charges,
                payload.notes.as_deref(),
            )
            .await?
            .ok_or(AppError::InvoiceNotFound)?;

        self.repo.delete_items(&mut *tx, invoice.id).await?;
        for item in &payload.products {
            self.repo
                .add_item(&mut *tx, invoice.id, item.product_id, item.quantity, item.unit_price)
                .await?;
        }

        let items = self.repo.list_items(&mut *tx, invoice.id).await?;

        tx.commit().await?;

        Ok(InvoiceDetail { invoice, items })
    }

    pub async fn delete_invoice(&self, user_id: Uuid, invoice_id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete(user_id, invoice_id).await? {
            return Err(AppError::InvoiceNotFound);
        }
        Ok(())
    }

    // Vendedor e comprador precisam ser do usuário e ter o papel certo.
    async fn check_parties(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        user_id: Uuid,
        seller_id: Uuid,
        buyer_id: Uuid,
    ) -> Result<(), AppError> {
        let seller = self.company_repo
            .find_by_id(&mut **tx, user_id, seller_id)
            .await?
            .ok_or(AppError::CompanyNotFound)?;
        if !seller.is_seller {
            return Err(AppError::InvalidInput(
                "sellerId não aponta para uma empresa vendedora.".to_string(),
            ));
        }

        let buyer = self.company_repo
            .find_by_id(&mut **tx, user_id, buyer_id)
            .await?
            .ok_or(AppError::CompanyNotFound)?;
        if buyer.is_seller {
            return Err(AppError::InvalidInput(
                "buyerId não aponta para um cliente.".to_string(),
            ));
        }

        Ok(())
    }
}

/// Transforma a linha crua do banco na entrada da listagem, aplicando a
/// mesma fórmula de total do dashboard e do PDF.
fn list_entry(row: InvoiceListRow) -> InvoiceListEntry {
    let grand_total = totals::from_subtotal(
        row.subtotal,
        row.discount_percentage,
        row.tax_percentage,
        row.shipping_charges,
    )
    .grand_total;

    InvoiceListEntry {
        id: row.id,
        invoice_number: row.invoice_number,
        status: row.status,
        created_date: row.created_at.format("%d-%m-%Y").to_string(),
        issue_date: row.issue_date,
        due_date: row.due_date,
        grand_total,
        buyer: BuyerRef {
            name: row.buyer_name,
            email: row.buyer_email,
        },
    }
}

// Faixas numéricas que o validator não cobre
fn check_amounts(payload: &InvoicePayload) -> Result<(), AppError> {
    let percent_ok = |p: Decimal| p >= Decimal::ZERO && p <= Decimal::ONE_HUNDRED;

    if !percent_ok(payload.discount_percentage) {
        return Err(AppError::InvalidInput(
            "discountPercentage deve estar entre 0 e 100.".to_string(),
        ));
    }
    if !percent_ok(payload.tax_percentage) {
        return Err(AppError::InvalidInput(
            "taxPercentage deve estar entre 0 e 100.".to_string(),
        ));
    }
    if payload.shipping_charges < Decimal::ZERO {
        return Err(AppError::InvalidInput(
            "shippingCharges não pode ser negativo.".to_string(),
        ));
    }
    for item in &payload.products {
        if item.quantity < 1 {
            return Err(AppError::InvalidInput(
                "quantity deve ser no mínimo 1.".to_string(),
            ));
        }
        if item.unit_price < Decimal::ZERO {
            return Err(AppError::InvalidInput(
                "unitPrice não pode ser negativo.".to_string(),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    #[test]
    fn listagem_reaplica_a_formula_do_total() {
        let row = InvoiceListRow {
            id: Uuid::new_v4(),
            invoice_number: "FAT-001".to_string(),
            status: InvoiceStatus::Sent,
            issue_date: NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
            due_date: None,
            discount_percentage: Decimal::new(10, 0),
            tax_percentage: Decimal::new(5, 0),
            shipping_charges: Decimal::new(20, 0),
            created_at: Utc.with_ymd_and_hms(2025, 6, 10, 12, 0, 0).unwrap(),
            buyer_name: "Mercadinho do Zé".to_string(),
            buyer_email: None,
            subtotal: Decimal::new(200, 0),
        };

        let entry = list_entry(row);

        assert_eq!(entry.grand_total, Decimal::new(209, 0));
        assert_eq!(entry.created_date, "10-06-2025");
        assert_eq!(entry.buyer.name, "Mercadinho do Zé");
    }

    fn payload_base() -> InvoicePayload {
        InvoicePayload {
            invoice_number: "FAT-001".to_string(),
            seller_id: Uuid::new_v4(),
            buyer_id: Uuid::new_v4(),
            status: None,
            issue_date: NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
            due_date: None,
            discount_percentage: Decimal::ZERO,
            tax_percentage: Decimal::ZERO,
            shipping_charges: Decimal::ZERO,
            notes: None,
            products: vec![],
        }
    }

    #[test]
    fn desconto_acima_de_cem_e_rejeitado() {
        let mut payload = payload_base();
        payload.discount_percentage = Decimal::new(101, 0);
        assert!(check_amounts(&payload).is_err());
    }

    #[test]
    fn frete_negativo_e_rejeitado() {
        let mut payload = payload_base();
        payload.shipping_charges = Decimal::new(-1, 0);
        assert!(check_amounts(&payload).is_err());
    }

    #[test]
    fn valores_no_limite_passam() {
        let mut payload = payload_base();
        payload.discount_percentage = Decimal::new(100, 0);
        payload.tax_percentage = Decimal::ZERO;
        assert!(check_amounts(&payload).is_ok());
    }
}
