// src/services/metrics.rs
//
// O agregador do dashboard: computação pura sobre as faturas já carregadas.
// Nenhum I/O acontece aqui; quem busca a janela de dados é o
// DashboardService.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    models::{
        dashboard::{DashboardMetrics, MonthlyRevenue, MonthlySales, TopProduct},
        invoice::InvoiceDetail,
    },
    services::totals,
};

/// Monta o resumo completo do dashboard.
///
/// `invoices` já vem filtrada pela janela de apuração (3 meses) e na ordem
/// de emissão; `new_customers` é contado à parte pelo repositório.
pub fn summarize(invoices: &[InvoiceDetail], new_customers: i64) -> DashboardMetrics {
    let mut monthly = monthly_sales(invoices);

    let revenue_by_month = monthly
        .iter()
        .map(|bucket| MonthlyRevenue {
            month: bucket.month.clone(),
            revenue: bucket.revenue,
        })
        .collect();

    // Só os 3 últimos grupos, na ordem em que apareceram.
    let keep_from = monthly.len().saturating_sub(3);
    let last_three = monthly.split_off(keep_from);

    DashboardMetrics {
        overall_revenue: overall_revenue(invoices),
        last_three_months_sales: last_three,
        new_customers_this_month: new_customers,
        top_products: top_products(invoices),
        revenue_by_month,
    }
}

/// Receita total da janela: soma do total de cada fatura.
fn overall_revenue(invoices: &[InvoiceDetail]) -> Decimal {
    invoices.iter().map(invoice_total).sum()
}

/// Agrupa por nome do mês de emissão, na ordem do primeiro aparecimento.
/// Faturas fora de ordem cronológica ficam na ordem em que chegaram.
fn monthly_sales(invoices: &[InvoiceDetail]) -> Vec<MonthlySales> {
    let mut buckets: Vec<MonthlySales> = Vec::new();

    for detail in invoices {
        let month = month_label(detail.invoice.issue_date);
        let revenue = invoice_total(detail);

        match buckets.iter_mut().find(|b| b.month == month) {
            Some(bucket) => {
                bucket.revenue += revenue;
                bucket.invoice_count += 1;
            }
            None => buckets.push(MonthlySales {
                month,
                revenue,
                invoice_count: 1,
            }),
        }
    }

    buckets
}

/// Curva ABC: receita e quantidade acumuladas por produto, ordenadas por
/// receita decrescente. Empates preservam a ordem de chegada (sort estável).
fn top_products(invoices: &[InvoiceDetail]) -> Vec<TopProduct> {
    let mut stats: Vec<TopProduct> = Vec::new();

    for detail in invoices {
        for item in &detail.items {
            let line_revenue = Decimal::from(item.quantity) * item.unit_price;

            match stats.iter_mut().find(|s| s.product_id == item.product_id) {
                Some(stat) => {
                    stat.revenue += line_revenue;
                    stat.quantity += i64::from(item.quantity);
                }
                None => stats.push(TopProduct {
                    product_id: item.product_id,
                    name: item
                        .product_name
                        .clone()
                        .unwrap_or_else(|| "--".to_string()),
                    revenue: line_revenue,
                    quantity: i64::from(item.quantity),
                }),
            }
        }
    }

    stats.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    stats.truncate(5);
    stats
}

fn invoice_total(detail: &InvoiceDetail) -> Decimal {
    totals::calculate(
        &detail.items,
        detail.invoice.discount_percentage,
        detail.invoice.tax_percentage,
        detail.invoice.shipping_charges,
    )
    .grand_total
}

/// Nome do mês por extenso ("January", "February"...).
fn month_label(date: NaiveDate) -> String {
    date.format("%B").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    use crate::models::invoice::{Invoice, InvoiceItemDetail, InvoiceStatus};

    fn invoice_on(issue_date: NaiveDate, items: Vec<(Uuid, &str, i32, Decimal)>) -> InvoiceDetail {
        let id = Uuid::new_v4();
        let now = Utc::now();
        InvoiceDetail {
            invoice: Invoice {
                id,
                user_id: Uuid::new_v4(),
                invoice_number: format!("FAT-{id}"),
                seller_id: Uuid::new_v4(),
                buyer_id: Uuid::new_v4(),
                status: InvoiceStatus::Sent,
                issue_date,
                due_date: None,
                discount_percentage: Decimal::ZERO,
                tax_percentage: Decimal::ZERO,
                shipping_charges: Decimal::ZERO,
                notes: None,
                created_at: now,
                updated_at: now,
            },
            items: items
                .into_iter()
                .map(|(product_id, name, quantity, unit_price)| InvoiceItemDetail {
                    invoice_id: id,
                    product_id,
                    product_name: Some(name.to_string()),
                    quantity,
                    unit_price,
                })
                .collect(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn faturas_do_mesmo_mes_caem_no_mesmo_grupo() {
        let produto = Uuid::new_v4();
        let faturas = vec![
            invoice_on(date(2025, 6, 3), vec![(produto, "Café", 1, Decimal::new(100, 0))]),
            invoice_on(date(2025, 6, 20), vec![(produto, "Café", 1, Decimal::new(150, 0))]),
        ];

        let resumo = summarize(&faturas, 0);

        assert_eq!(resumo.last_three_months_sales.len(), 1);
        let bucket = &resumo.last_three_months_sales[0];
        assert_eq!(bucket.month, "June");
        assert_eq!(bucket.revenue, Decimal::new(250, 0));
        assert_eq!(bucket.invoice_count, 2);
    }

    #[test]
    fn serie_dos_ultimos_meses_trunca_em_tres() {
        let produto = Uuid::new_v4();
        let faturas: Vec<_> = [4, 5, 6, 7]
            .into_iter()
            .map(|m| {
                invoice_on(date(2025, m, 10), vec![(produto, "Café", 1, Decimal::new(10, 0))])
            })
            .collect();

        let resumo = summarize(&faturas, 0);

        // Ficam os 3 últimos grupos inseridos; a série completa mantém os 4
        assert_eq!(resumo.last_three_months_sales.len(), 3);
        assert_eq!(resumo.last_three_months_sales[0].month, "May");
        assert_eq!(resumo.last_three_months_sales[2].month, "July");
        assert_eq!(resumo.revenue_by_month.len(), 4);
    }

    #[test]
    fn agrupamento_segue_a_ordem_de_chegada_nao_o_calendario() {
        let produto = Uuid::new_v4();
        // Junho chega antes de maio: o grupo de junho nasce primeiro
        let faturas = vec![
            invoice_on(date(2025, 6, 1), vec![(produto, "Café", 1, Decimal::new(10, 0))]),
            invoice_on(date(2025, 5, 1), vec![(produto, "Café", 1, Decimal::new(10, 0))]),
        ];

        let resumo = summarize(&faturas, 0);

        assert_eq!(resumo.last_three_months_sales[0].month, "June");
        assert_eq!(resumo.last_three_months_sales[1].month, "May");
    }

    #[test]
    fn top_produtos_ordena_por_receita_decrescente() {
        let barato = Uuid::new_v4();
        let caro = Uuid::new_v4();
        let faturas = vec![
            invoice_on(date(2025, 6, 1), vec![(barato, "Pão", 3, Decimal::new(100, 0))]),
            invoice_on(date(2025, 6, 2), vec![(caro, "Bolo", 1, Decimal::new(500, 0))]),
        ];

        let resumo = summarize(&faturas, 0);

        assert_eq!(resumo.top_products.len(), 2);
        assert_eq!(resumo.top_products[0].name, "Bolo");
        assert_eq!(resumo.top_products[0].revenue, Decimal::new(500, 0));
        assert_eq!(resumo.top_products[1].name, "Pão");
        assert_eq!(resumo.top_products[1].revenue, Decimal::new(300, 0));
    }

    #[test]
    fn top_produtos_nunca_passa_de_cinco() {
        let faturas: Vec<_> = (1..=7)
            .map(|n| {
                invoice_on(
                    date(2025, 6, n),
                    vec![(Uuid::new_v4(), "Produto", 1, Decimal::new(i64::from(n) * 10, 0))],
                )
            })
            .collect();

        let resumo = summarize(&faturas, 0);

        assert_eq!(resumo.top_products.len(), 5);
        // O mais caro lidera, o corte fica nos cinco maiores
        assert_eq!(resumo.top_products[0].revenue, Decimal::new(70, 0));
        assert_eq!(resumo.top_products[4].revenue, Decimal::new(30, 0));
    }

    #[test]
    fn empate_de_receita_preserva_a_ordem_de_chegada() {
        let primeiro = Uuid::new_v4();
        let segundo = Uuid::new_v4();
        let faturas = vec![invoice_on(
            date(2025, 6, 1),
            vec![
                (primeiro, "Primeiro", 1, Decimal::new(100, 0)),
                (segundo, "Segundo", 1, Decimal::new(100, 0)),
            ],
        )];

        let resumo = summarize(&faturas, 0);

        assert_eq!(resumo.top_products[0].product_id, primeiro);
        assert_eq!(resumo.top_products[1].product_id, segundo);
    }

    #[test]
    fn receita_geral_usa_a_mesma_formula_da_fatura() {
        let produto = Uuid::new_v4();
        let mut fatura = invoice_on(
            date(2025, 6, 1),
            vec![(produto, "Café", 2, Decimal::new(100, 0))],
        );
        fatura.invoice.discount_percentage = Decimal::new(10, 0);
        fatura.invoice.tax_percentage = Decimal::new(5, 0);
        fatura.invoice.shipping_charges = Decimal::new(20, 0);

        let resumo = summarize(&[fatura], 0);

        // 200 - 20 + 9 + 20
        assert_eq!(resumo.overall_revenue, Decimal::new(209, 0));
    }

    #[test]
    fn janela_vazia_gera_resumo_zerado() {
        let resumo = summarize(&[], 4);

        assert_eq!(resumo.overall_revenue, Decimal::ZERO);
        assert!(resumo.last_three_months_sales.is_empty());
        assert!(resumo.top_products.is_empty());
        assert!(resumo.revenue_by_month.is_empty());
        assert_eq!(resumo.new_customers_this_month, 4);
    }
}
