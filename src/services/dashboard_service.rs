// src/services/dashboard_service.rs

use std::collections::HashMap;

use chrono::{Datelike, Months, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CompanyRepository, InvoiceRepository},
    models::{
        dashboard::DashboardMetrics,
        invoice::{InvoiceDetail, InvoiceItemDetail},
    },
    services::metrics,
};

#[derive(Clone)]
pub struct DashboardService {
    invoice_repo: InvoiceRepository,
    company_repo: CompanyRepository,
}

impl DashboardService {
    pub fn new(invoice_repo: InvoiceRepository, company_repo: CompanyRepository) -> Self {
        Self { invoice_repo, company_repo }
    }

    /// Busca a janela de apuração e entrega tudo ao agregador puro.
    pub async fn get_metrics(&self, user_id: Uuid) -> Result<DashboardMetrics, AppError> {
        let today = Utc::now().date_naive();
        let (three_months_ago, start_of_month) = reporting_window(today);

        let headers = self.invoice_repo
            .list_headers_since(user_id, three_months_ago)
            .await?;

        let ids: Vec<Uuid> = headers.iter().map(|invoice| invoice.id).collect();
        let items = self.invoice_repo.list_items_for(&ids).await?;

        // Reagrupa os itens embaixo de cada fatura
        let mut by_invoice: HashMap<Uuid, Vec<InvoiceItemDetail>> = HashMap::new();
        for item in items {
            by_invoice.entry(item.invoice_id).or_default().push(item);
        }

        let invoices: Vec<InvoiceDetail> = headers
            .into_iter()
            .map(|invoice| {
                let items = by_invoice.remove(&invoice.id).unwrap_or_default();
                InvoiceDetail { invoice, items }
            })
            .collect();

        let since = start_of_month.and_time(NaiveTime::MIN).and_utc();
        let new_customers = self.company_repo
            .count_new_buyers_since(user_id, since)
            .await?;

        Ok(metrics::summarize(&invoices, new_customers))
    }
}

/// Janela de apuração do dashboard: (primeiro dia de três meses atrás,
/// primeiro dia do mês corrente).
fn reporting_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start_of_month = today.with_day(1).unwrap_or(today);
    let three_months_ago = start_of_month
        .checked_sub_months(Months::new(3))
        .unwrap_or(start_of_month);
    (three_months_ago, start_of_month)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn janela_no_meio_do_ano() {
        let (inicio, mes_corrente) = reporting_window(date(2025, 8, 5));
        assert_eq!(inicio, date(2025, 5, 1));
        assert_eq!(mes_corrente, date(2025, 8, 1));
    }

    #[test]
    fn janela_atravessa_a_virada_do_ano() {
        let (inicio, mes_corrente) = reporting_window(date(2025, 1, 20));
        assert_eq!(inicio, date(2024, 10, 1));
        assert_eq!(mes_corrente, date(2025, 1, 1));
    }
}
