//! Purchase checkout: validate, total, expand into detail rows, persist.

use crate::error::AppError;
use chrono::Local;
use core_types::{compute_totals, expand_details, NewTransaction, PurchaseRequest, PurchaseResponse};
use database::PosStore;

/// Records a purchase and returns the totals and the new transaction id.
///
/// Nothing reaches the store unless the request passes validation. The header
/// and every detail row are written in a single store transaction.
pub async fn execute(store: &dyn PosStore, request: &PurchaseRequest) -> Result<PurchaseResponse, AppError> {
    request.validate()?;

    let totals = compute_totals(&request.items)?;
    let details = expand_details(&request.items);

    let header = NewTransaction {
        datetime: Local::now().naive_local(),
        emp_cd: request.resolved_emp_cd().to_string(),
        store_cd: request.store_cd.clone(),
        pos_no: request.pos_no.clone(),
        total_amt: totals.total_amount,
        ttl_amt_ex_tax: totals.total_amount_ex_tax,
    };

    let trd_id = store.record_transaction(&header, &details).await?;
    tracing::info!(trd_id, total = totals.total_amount, units = details.len(), "Purchase recorded.");

    Ok(PurchaseResponse {
        success: true,
        total_amount: totals.total_amount,
        total_amount_ex_tax: totals.total_amount_ex_tax,
        transaction_id: Some(trd_id),
    })
}
