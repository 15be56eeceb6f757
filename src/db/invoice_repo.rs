// src/db/invoice_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::invoice::{Invoice, InvoiceItemDetail, InvoiceListRow, InvoiceStatus},
};

const INVOICE_COLUMNS: &str = r#"
    id, user_id, invoice_number, seller_id, buyer_id, status,
    issue_date, due_date,
    discount_percentage, tax_percentage, shipping_charges,
    notes, created_at, updated_at
"#;

#[derive(Clone)]
pub struct InvoiceRepository {
    pool: PgPool,
}

impl InvoiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_invoice<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        invoice_number: &str,
        seller_id: Uuid,
        buyer_id: Uuid,
        status: InvoiceStatus,
        issue_date: NaiveDate,
        due_date: Option<NaiveDate>,
        discount_percentage: Decimal,
        tax_percentage: Decimal,
        shipping_charges: Decimal,
        notes: Option<&str>,
    ) -> Result<Invoice, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO invoices (
                user_id, invoice_number, seller_id, buyer_id, status,
                issue_date, due_date,
                discount_percentage, tax_percentage, shipping_charges, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {INVOICE_COLUMNS}
            "#
        );

        let invoice = sqlx::query_as::<_, Invoice>(&sql)
            .bind(user_id)
            .bind(invoice_number)
            .bind(seller_id)
            .bind(buyer_id)
            .bind(status)
            .bind(issue_date)
            .bind(due_date)
            .bind(discount_percentage)
            .bind(tax_percentage)
            .bind(shipping_charges)
            .bind(notes)
            .fetch_one(executor)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return AppError::UniqueConstraintViolation(format!(
                            "A fatura '{}' já existe.",
                            invoice_number
                        ));
                    }
                }
                e.into()
            })?;

        Ok(invoice)
    }

    /// Insere um item. Chamado em loop dentro da mesma transação da fatura.
    pub async fn add_item<'e, E>(
        &self,
        executor: E,
        invoice_id: Uuid,
        product_id: Uuid,
        quantity: i32,
        unit_price: Decimal,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO invoice_items (invoice_id, product_id, quantity, unit_price)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(invoice_id)
        .bind(product_id)
        .bind(quantity)
        .bind(unit_price)
        .execute(executor)
        .await?;

        Ok(())
    }

    /// Itens de uma fatura com o nome do produto resolvido.
    pub async fn list_items<'e, E>(
        &self,
        executor: E,
        invoice_id: Uuid,
    ) -> Result<Vec<InvoiceItemDetail>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let items = sqlx::query_as::<_, InvoiceItemDetail>(
            r#"
            SELECT it.invoice_id, it.product_id, p.name AS product_name,
                   it.quantity, it.unit_price
            FROM invoice_items it
            LEFT JOIN products p ON p.id = it.product_id
            WHERE it.invoice_id = $1
            ORDER BY it.id
            "#,
        )
        .bind(invoice_id)
        .fetch_all(executor)
        .await?;

        Ok(items)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        invoice_id: Uuid,
    ) -> Result<Option<Invoice>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            SELECT {INVOICE_COLUMNS}
            FROM invoices
            WHERE user_id = $1 AND id = $2
            "#
        );

        let maybe_invoice = sqlx::query_as::<_, Invoice>(&sql)
            .bind(user_id)
            .bind(invoice_id)
            .fetch_optional(executor)
            .await?;

        Ok(maybe_invoice)
    }

    /// Listagem para a tela de faturas: cabeçalho + comprador + subtotal
    /// somado no SQL. O total final é calculado no service para usar a
    /// mesma fórmula do dashboard e do PDF.
    pub async fn list_rows(&self, user_id: Uuid) -> Result<Vec<InvoiceListRow>, AppError> {
        let rows = sqlx::query_as::<_, InvoiceListRow>(
            r#"
            SELECT
                i.id, i.invoice_number, i.status, i.issue_date, i.due_date,
                i.discount_percentage, i.tax_percentage, i.shipping_charges,
                i.created_at,
                c.name AS buyer_name,
                c.email AS buyer_email,
                COALESCE((
                    SELECT SUM(it.quantity * it.unit_price)
                    FROM invoice_items it
                    WHERE it.invoice_id = i.id
                ), 0) AS subtotal
            FROM invoices i
            JOIN companies c ON c.id = i.buyer_id
            WHERE i.user_id = $1
            ORDER BY i.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Faturas emitidas a partir de `since`, na ordem de emissão.
    /// É a janela que alimenta o agregador do dashboard.
    pub async fn list_headers_since(
        &self,
        user_id: Uuid,
        since: NaiveDate,
    ) -> Result<Vec<Invoice>, AppError> {
        let sql = format!(
            r#"
            SELECT {INVOICE_COLUMNS}
            FROM invoices
            WHERE user_id = $1 AND issue_date >= $2
            ORDER BY created_at ASC
            "#
        );

        let invoices = sqlx::query_as::<_, Invoice>(&sql)
            .bind(user_id)
            .bind(since)
            .fetch_all(&self.pool)
            .await?;

        Ok(invoices)
    }

    /// Itens de várias faturas de uma vez (evita N+1 no dashboard).
    pub async fn list_items_for(
        &self,
        invoice_ids: &[Uuid],
    ) -> Result<Vec<InvoiceItemDetail>, AppError> {
        if invoice_ids.is_empty() {
            return Ok(Vec::new());
        }

        let items = sqlx::query_as::<_, InvoiceItemDetail>(
            r#"
            SELECT it.invoice_id, it.product_id, p.name AS product_name,
                   it.quantity, it.unit_price
            FROM invoice_items it
            LEFT JOIN products p ON p.id = it.product_id
            WHERE it.invoice_id = ANY($1)
            ORDER BY it.id
            "#,
        )
        .bind(invoice_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    pub async fn update_invoice<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        invoice_id: Uuid,
        invoice_number: &str,
        seller_id: Uuid,
        buyer_id: Uuid,
        status: InvoiceStatus,
        issue_date: NaiveDate,
        due_date: Option<NaiveDate>,
        discount_percentage: Decimal,
        tax_percentage: Decimal,
        shipping_charges: Decimal,
        notes: Option<&str>,
    ) -> Result<Option<Invoice>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            UPDATE invoices
            SET invoice_number = $3, seller_id = $4, buyer_id = $5, status = $6,
                issue_date = $7, due_date = $8,
                discount_percentage = $9, tax_percentage = $10,
                shipping_charges = $11, notes = $12,
                updated_at = NOW()
            WHERE user_id = $1 AND id = $2
            RETURNING {INVOICE_COLUMNS}
            "#
        );

        let maybe_invoice = sqlx::query_as::<_, Invoice>(&sql)
            .bind(user_id)
            .bind(invoice_id)
            .bind(invoice_number)
            .bind(seller_id)
            .bind(buyer_id)
            .bind(status)
            .bind(issue_date)
            .bind(due_date)
            .bind(discount_percentage)
            .bind(tax_percentage)
            .bind(shipping_charges)
            .bind(notes)
            .fetch_optional(executor)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return AppError::UniqueConstraintViolation(format!(
                            "A fatura '{}' já existe.",
                            invoice_number
                        ));
                    }
                }
                e.into()
            })?;

        Ok(maybe_invoice)
    }

    /// Remove todos os itens (usado na troca completa de itens do update).
    pub async fn delete_items<'e, E>(
        &self,
        executor: E,
        invoice_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM invoice_items WHERE invoice_id = $1")
            .bind(invoice_id)
            .execute(executor)
            .await?;

        Ok(())
    }

    /// Apaga a fatura (os itens caem junto pelo ON DELETE CASCADE).
    pub async fn delete(&self, user_id: Uuid, invoice_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM invoices WHERE user_id = $1 AND id = $2")
            .bind(user_id)
            .bind(invoice_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
