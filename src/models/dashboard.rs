// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

// 1. Vendas por mês (série dos últimos 3 meses)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySales {
    pub month: String, // Nome do mês por extenso ("January")
    pub revenue: Decimal,
    pub invoice_count: i64,
}

// 2. Curva ABC (Top Produtos por receita)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    pub product_id: Uuid,
    pub name: String,
    pub revenue: Decimal,
    pub quantity: i64,
}

// 3. Receita por mês (série completa, sem truncar)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRevenue {
    pub month: String,
    pub revenue: Decimal,
}

/// O resumo completo que o dashboard consome.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub overall_revenue: Decimal,
    pub last_three_months_sales: Vec<MonthlySales>,
    pub new_customers_this_month: i64,
    pub top_products: Vec<TopProduct>,
    pub revenue_by_month: Vec<MonthlyRevenue>,
}
