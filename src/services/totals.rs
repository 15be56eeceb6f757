// src/services/totals.rs

use rust_decimal::Decimal;

use crate::models::invoice::InvoiceItemDetail;

/// A decomposição do valor de uma fatura.
///
/// Tanto o dashboard quanto a listagem e o PDF passam por aqui, então os
/// números batem em todas as telas.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceTotals {
    pub subtotal: Decimal,
    pub discount_amount: Decimal,
    pub tax_amount: Decimal,
    pub shipping: Decimal,
    pub grand_total: Decimal,
}

/// Calcula o total a partir dos itens.
pub fn calculate(
    items: &[InvoiceItemDetail],
    discount_percentage: Decimal,
    tax_percentage: Decimal,
    shipping_charges: Decimal,
) -> InvoiceTotals {
    let subtotal = items
        .iter()
        .map(|item| Decimal::from(item.quantity) * item.unit_price)
        .sum();

    from_subtotal(subtotal, discount_percentage, tax_percentage, shipping_charges)
}

/// Calcula o total a partir de um subtotal já somado (a listagem soma no SQL).
///
/// Ordem fixa: o imposto incide sobre a base já descontada, nunca sobre o
/// subtotal cheio.
pub fn from_subtotal(
    subtotal: Decimal,
    discount_percentage: Decimal,
    tax_percentage: Decimal,
    shipping_charges: Decimal,
) -> InvoiceTotals {
    let discount_amount = subtotal * discount_percentage / Decimal::ONE_HUNDRED;
    let taxable_base = subtotal - discount_amount;
    let tax_amount = taxable_base * tax_percentage / Decimal::ONE_HUNDRED;
    let grand_total = subtotal - discount_amount + tax_amount + shipping_charges;

    InvoiceTotals {
        subtotal,
        discount_amount,
        tax_amount,
        shipping: shipping_charges,
        grand_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn item(quantity: i32, unit_price: Decimal) -> InvoiceItemDetail {
        InvoiceItemDetail {
            invoice_id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            product_name: None,
            quantity,
            unit_price,
        }
    }

    #[test]
    fn exemplo_completo_com_desconto_imposto_e_frete() {
        // 2 x 100, 10% de desconto, 5% de imposto sobre a base descontada, frete 20
        let totals = calculate(
            &[item(2, Decimal::new(100, 0))],
            Decimal::new(10, 0),
            Decimal::new(5, 0),
            Decimal::new(20, 0),
        );

        assert_eq!(totals.subtotal, Decimal::new(200, 0));
        assert_eq!(totals.discount_amount, Decimal::new(20, 0));
        assert_eq!(totals.tax_amount, Decimal::new(9, 0));
        assert_eq!(totals.grand_total, Decimal::new(209, 0));
    }

    #[test]
    fn fatura_vazia_sem_encargos_da_zero() {
        let totals = calculate(&[], Decimal::ZERO, Decimal::ZERO, Decimal::ZERO);
        assert_eq!(totals.grand_total, Decimal::ZERO);
    }

    #[test]
    fn fatura_vazia_vale_o_frete() {
        let totals = calculate(
            &[],
            Decimal::new(10, 0),
            Decimal::new(5, 0),
            Decimal::new(35, 0),
        );
        // Subtotal zero: desconto e imposto zeram, sobra só o frete
        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.grand_total, Decimal::new(35, 0));
    }

    #[test]
    fn sem_desconto_nem_imposto_total_e_subtotal_mais_frete() {
        let totals = calculate(
            &[item(3, Decimal::new(50, 0))],
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::new(12, 0),
        );
        assert_eq!(totals.grand_total, Decimal::new(162, 0));
    }

    #[test]
    fn total_nao_diminui_quando_o_frete_sobe() {
        let base = calculate(
            &[item(1, Decimal::new(80, 0))],
            Decimal::new(10, 0),
            Decimal::new(5, 0),
            Decimal::new(10, 0),
        );
        let com_mais_frete = calculate(
            &[item(1, Decimal::new(80, 0))],
            Decimal::new(10, 0),
            Decimal::new(5, 0),
            Decimal::new(25, 0),
        );
        assert!(com_mais_frete.grand_total >= base.grand_total);
    }

    #[test]
    fn total_nao_diminui_quando_a_quantidade_sobe() {
        let base = calculate(
            &[item(2, Decimal::new(80, 0))],
            Decimal::new(10, 0),
            Decimal::new(5, 0),
            Decimal::ZERO,
        );
        let com_mais_itens = calculate(
            &[item(5, Decimal::new(80, 0))],
            Decimal::new(10, 0),
            Decimal::new(5, 0),
            Decimal::ZERO,
        );
        assert!(com_mais_itens.grand_total >= base.grand_total);
    }

    #[test]
    fn from_subtotal_e_calculate_concordam() {
        let por_itens = calculate(
            &[item(2, Decimal::new(100, 0)), item(1, Decimal::new(50, 0))],
            Decimal::new(10, 0),
            Decimal::new(5, 0),
            Decimal::new(20, 0),
        );
        let por_subtotal = from_subtotal(
            Decimal::new(250, 0),
            Decimal::new(10, 0),
            Decimal::new(5, 0),
            Decimal::new(20, 0),
        );
        assert_eq!(por_itens, por_subtotal);
    }
}
