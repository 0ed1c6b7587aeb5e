//! Totals and detail-row expansion for a purchase.
//!
//! The tax-exclusive total floors each unit price before multiplying by the
//! quantity. Flooring the line or the grand total instead gives different
//! numbers, so the order here must not change.

use crate::enums::TaxCode;
use crate::error::CoreError;
use crate::structs::{PurchaseItem, TransactionDetail};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    /// Tax-inclusive total.
    pub total_amount: i64,
    /// Tax-exclusive total.
    pub total_amount_ex_tax: i64,
}

/// Sums the tax-inclusive and tax-exclusive amounts of all items.
pub fn compute_totals(items: &[PurchaseItem]) -> Result<Totals, CoreError> {
    let tax = TaxCode::default();
    let overflow = || CoreError::Calculation("purchase total is too large".to_string());

    let mut totals = Totals { total_amount: 0, total_amount_ex_tax: 0 };
    for item in items {
        let line = item.prd_price.checked_mul(item.quantity).ok_or_else(overflow)?;
        let line_ex_tax = tax
            .exclude_tax(item.prd_price)
            .checked_mul(item.quantity)
            .ok_or_else(overflow)?;

        totals.total_amount = totals.total_amount.checked_add(line).ok_or_else(overflow)?;
        totals.total_amount_ex_tax = totals
            .total_amount_ex_tax
            .checked_add(line_ex_tax)
            .ok_or_else(overflow)?;
    }
    Ok(totals)
}

/// Expands items into one detail row per unit purchased.
///
/// `dtl_id` starts at 1 and keeps counting across items, in submission order.
pub fn expand_details(items: &[PurchaseItem]) -> Vec<TransactionDetail> {
    let tax_cd = TaxCode::default().code();

    items
        .iter()
        .flat_map(|item| (0..item.quantity.max(0)).map(move |_| item))
        .zip(1_i64..)
        .map(|(item, dtl_id)| TransactionDetail {
            dtl_id,
            prd_id: item.prd_id,
            prd_code: item.prd_code.clone(),
            prd_name: item.prd_name.clone(),
            prd_price: item.prd_price,
            tax_cd: tax_cd.to_string(),
        })
        .collect()
}
