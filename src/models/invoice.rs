// src/models/invoice.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// --- ENUMS ---

// Mapeia o CREATE TYPE invoice_status do banco
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "invoice_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
    Cancelled,
}

// --- FATURA ---

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: Uuid,
    pub user_id: Uuid,

    pub invoice_number: String,
    pub seller_id: Uuid,
    pub buyer_id: Uuid,
    pub status: InvoiceStatus,

    pub issue_date: NaiveDate,
    pub due_date: Option<NaiveDate>,

    // Percentuais de 0 a 100; frete em valor absoluto
    pub discount_percentage: Decimal,
    pub tax_percentage: Decimal,
    pub shipping_charges: Decimal,

    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Item da fatura com o nome do produto já resolvido (JOIN com products).
/// O nome pode faltar se o produto sumir; quem exibe troca por "--".
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItemDetail {
    pub invoice_id: Uuid,
    pub product_id: Uuid,
    pub product_name: Option<String>,
    pub quantity: i32,
    pub unit_price: Decimal,
}

/// Fatura completa: cabeçalho + itens. É o formato que o agregador do
/// dashboard e o gerador de PDF consomem.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDetail {
    pub invoice: Invoice,
    pub items: Vec<InvoiceItemDetail>,
}

// --- LISTAGEM ---

// Linha crua da listagem: fatura + comprador + subtotal somado no SQL.
// Não é serializada; o service transforma em InvoiceListEntry.
#[derive(Debug, FromRow)]
pub struct InvoiceListRow {
    pub id: Uuid,
    pub invoice_number: String,
    pub status: InvoiceStatus,
    pub issue_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub discount_percentage: Decimal,
    pub tax_percentage: Decimal,
    pub shipping_charges: Decimal,
    pub created_at: DateTime<Utc>,
    pub buyer_name: String,
    pub buyer_email: Option<String>,
    pub subtotal: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BuyerRef {
    pub name: String,
    pub email: Option<String>,
}

/// Entrada da listagem de faturas, já com o total calculado.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceListEntry {
    pub id: Uuid,
    pub invoice_number: String,
    pub status: InvoiceStatus,
    pub created_date: String, // DD-MM-YYYY
    pub issue_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub grand_total: Decimal,
    pub buyer: BuyerRef,
}

// --- PAYLOADS ---

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItemPayload {
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
}

/// Dados para criar ou atualizar uma fatura. No update os itens enviados
/// substituem os existentes por completo.
///
/// Percentuais e frete ausentes entram como zero (coerção guardada:
/// melhor um número possivelmente menor do que derrubar a tela).
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "FAT-2025-0042")]
    pub invoice_number: String,

    pub seller_id: Uuid,
    pub buyer_id: Uuid,

    pub status: Option<InvoiceStatus>,

    pub issue_date: NaiveDate,
    pub due_date: Option<NaiveDate>,

    #[serde(default)]
    pub discount_percentage: Decimal,
    #[serde(default)]
    pub tax_percentage: Decimal,
    #[serde(default)]
    pub shipping_charges: Decimal,

    pub notes: Option<String>,

    #[validate(length(min = 1, message = "A fatura precisa de ao menos um item."))]
    pub products: Vec<InvoiceItemPayload>,
}
