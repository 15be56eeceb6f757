// src/services/document_service.rs

use chrono::NaiveDate;
use genpdf::{elements, style, Alignment, Element};
use image::Luma;
use qrcode::QrCode;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CompanyRepository, InvoiceRepository},
    models::company::Company,
    services::totals,
};

#[derive(Clone)]
pub struct DocumentService {
    pool: PgPool,
    invoice_repo: InvoiceRepository,
    company_repo: CompanyRepository,
}

impl DocumentService {
    pub fn new(
        pool: PgPool,
        invoice_repo: InvoiceRepository,
        company_repo: CompanyRepository,
    ) -> Self {
        Self { pool, invoice_repo, company_repo }
    }

    /// Gera o PDF de uma fatura. Retorna (número da fatura, bytes) para o
    /// handler montar o nome do arquivo.
    pub async fn generate_invoice_pdf(
        &self,
        user_id: Uuid,
        invoice_id: Uuid,
    ) -> Result<(String, Vec<u8>), AppError> {
        // 1. Busca os dados
        let invoice = self.invoice_repo
            .find_by_id(&self.pool, user_id, invoice_id)
            .await?
            .ok_or(AppError::InvoiceNotFound)?;

        let items = self.invoice_repo.list_items(&self.pool, invoice.id).await?;

        let seller = self.company_repo
            .find_by_id(&self.pool, user_id, invoice.seller_id)
            .await?
            .ok_or(AppError::CompanyNotFound)?;
        let buyer = self.company_repo
            .find_by_id(&self.pool, user_id, invoice.buyer_id)
            .await?
            .ok_or(AppError::CompanyNotFound)?;

        let totals = totals::calculate(
            &items,
            invoice.discount_percentage,
            invoice.tax_percentage,
            invoice.shipping_charges,
        );

        // 2. Configura o PDF
        // Carrega a fonte da pasta 'fonts/'
        let font_family = genpdf::fonts::from_files("./fonts", "Roboto", None)
            .map_err(|_| AppError::FontNotFound("Fonte não encontrada na pasta ./fonts".to_string()))?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(format!("Fatura {}", invoice.invoice_number));
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        // --- CABEÇALHO ---
        doc.push(elements::Paragraph::new("FATURA")
            .styled(style::Style::new().bold().with_font_size(18)));

        doc.push(elements::Paragraph::new(format!("Nº {}", invoice.invoice_number))
            .styled(style::Style::new().bold().with_font_size(12)));
        doc.push(elements::Paragraph::new(format!("Emissão: {}", fmt_date(invoice.issue_date))));
        if let Some(due) = invoice.due_date {
            doc.push(elements::Paragraph::new(format!("Vencimento: {}", fmt_date(due))));
        }

        doc.push(elements::Break::new(1.5));

        // --- PARTES ---
        push_party(&mut doc, "VENDEDOR", &seller);
        doc.push(elements::Break::new(1));
        push_party(&mut doc, "COMPRADOR", &buyer);

        doc.push(elements::Break::new(2));

        // --- TABELA DE ITENS ---
        // Pesos das colunas: Nome (4), Qtd (1), Preço (2), Total (2)
        let mut table = elements::TableLayout::new(vec![4, 1, 2, 2]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

        let style_bold = style::Style::new().bold();
        table.row()
            .element(elements::Paragraph::new("Produto").styled(style_bold))
            .element(elements::Paragraph::new("Qtd").styled(style_bold))
            .element(elements::Paragraph::new("Unitário").styled(style_bold))
            .element(elements::Paragraph::new("Total").styled(style_bold))
            .push()
            .expect("Table error");

        for item in &items {
            let line_total = Decimal::from(item.quantity) * item.unit_price;
            table.row()
                .element(elements::Paragraph::new(or_dash(item.product_name.as_deref()).to_string()))
                .element(elements::Paragraph::new(format!("{}", item.quantity)))
                .element(elements::Paragraph::new(fmt_money(item.unit_price)))
                .element(elements::Paragraph::new(fmt_money(line_total)))
                .push()
                .expect("Table row error");
        }

        doc.push(table);
        doc.push(elements::Break::new(2));

        // --- TOTAIS ---
        // Linhas zeradas somem; a fórmula é a mesma do dashboard.
        push_amount(&mut doc, format!("Subtotal: {}", fmt_money(totals.subtotal)), false);

        if !invoice.discount_percentage.is_zero() {
            push_amount(
                &mut doc,
                format!(
                    "Desconto ({}%): -{}",
                    invoice.discount_percentage.normalize(),
                    fmt_money(totals.discount_amount)
                ),
                false,
            );
        }
        if !invoice.tax_percentage.is_zero() {
            push_amount(
                &mut doc,
                format!(
                    "Imposto ({}%): {}",
                    invoice.tax_percentage.normalize(),
                    fmt_money(totals.tax_amount)
                ),
                false,
            );
        }
        if !invoice.shipping_charges.is_zero() {
            push_amount(&mut doc, format!("Frete: {}", fmt_money(totals.shipping)), false);
        }

        push_amount(
            &mut doc,
            format!("TOTAL GERAL: {}", fmt_money(totals.grand_total)),
            true,
        );

        doc.push(elements::Break::new(2));

        // --- QR CODE (busca rápida pelo número da fatura) ---
        let code = QrCode::new(invoice.invoice_number.as_bytes())
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        let image_buffer = code.render::<Luma<u8>>().build();
        let dynamic_image = image::DynamicImage::ImageLuma8(image_buffer);

        let pdf_image = genpdf::elements::Image::from_dynamic_image(dynamic_image)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?
            .with_scale(genpdf::Scale::new(0.5, 0.5));

        doc.push(pdf_image);

        // --- OBSERVAÇÕES E RODAPÉ ---
        if let Some(notes) = &invoice.notes {
            doc.push(elements::Break::new(1));
            doc.push(elements::Paragraph::new("Observações:")
                .styled(style::Style::new().bold().with_font_size(10)));
            doc.push(elements::Paragraph::new(notes.clone())
                .styled(style::Style::new().with_font_size(10)));
        }

        doc.push(elements::Break::new(2));
        doc.push(elements::Paragraph::new("Obrigado pela preferência!")
            .styled(style::Style::new().italic().with_font_size(8)));

        // 3. Renderiza para Buffer (Memória)
        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        Ok((invoice.invoice_number, buffer))
    }
}

// Bloco de identificação de uma das partes (vendedor ou comprador)
fn push_party(doc: &mut genpdf::Document, role: &str, company: &Company) {
    doc.push(elements::Paragraph::new(role)
        .styled(style::Style::new().with_font_size(9)));
    doc.push(elements::Paragraph::new(company.name.clone())
        .styled(style::Style::new().bold()));
    doc.push(elements::Paragraph::new(or_dash(company.address.as_deref()).to_string()));
    doc.push(elements::Paragraph::new(or_dash(company.email.as_deref()).to_string()));
    doc.push(elements::Paragraph::new(or_dash(company.phone.as_deref()).to_string()));
}

fn push_amount(doc: &mut genpdf::Document, text: String, bold: bool) {
    let mut paragraph = elements::Paragraph::new(text);
    paragraph.set_alignment(Alignment::Right);

    if bold {
        doc.push(paragraph.styled(style::Style::new().bold().with_font_size(12)));
    } else {
        doc.push(paragraph);
    }
}

/// Campos de texto vazios viram "--" em vez de buraco no layout.
fn or_dash(value: Option<&str>) -> &str {
    match value {
        Some(s) if !s.trim().is_empty() => s,
        _ => "--",
    }
}

/// Sempre duas casas e o prefixo fixo da moeda.
fn fmt_money(amount: Decimal) -> String {
    format!("R$ {:.2}", amount)
}

fn fmt_date(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dinheiro_sai_com_prefixo_e_duas_casas() {
        assert_eq!(fmt_money(Decimal::new(209, 0)), "R$ 209.00");
        assert_eq!(fmt_money(Decimal::new(12345, 2)), "R$ 123.45");
        assert_eq!(fmt_money(Decimal::ZERO), "R$ 0.00");
    }

    #[test]
    fn data_sai_como_dia_mes_ano() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 3).unwrap();
        assert_eq!(fmt_date(date), "03-06-2025");
    }

    #[test]
    fn campo_ausente_ou_vazio_vira_traco() {
        assert_eq!(or_dash(None), "--");
        assert_eq!(or_dash(Some("")), "--");
        assert_eq!(or_dash(Some("   ")), "--");
        assert_eq!(or_dash(Some("Rua das Laranjeiras, 42")), "Rua das Laranjeiras, 42");
    }
}
