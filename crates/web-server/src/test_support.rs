//! In-memory `PosStore` for handler and checkout tests.

use async_trait::async_trait;
use core_types::{NewTransaction, Product, PurchaseItem, TransactionDetail};
use database::{DbError, PosStore};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

pub(crate) fn item(prd_id: i64, price: i64, quantity: i64) -> PurchaseItem {
    PurchaseItem {
        prd_id,
        prd_code: format!("49010000{prd_id:02}"),
        prd_name: format!("Product {prd_id}"),
        prd_price: price,
        quantity,
    }
}

#[derive(Default)]
struct Tables {
    headers: Vec<(i64, NewTransaction)>,
    details: Vec<(i64, TransactionDetail)>,
    next_trd_id: i64,
}

/// Mimics the MySQL store: rows only become visible when the whole
/// transaction succeeds.
#[derive(Default)]
pub(crate) struct InMemoryStore {
    catalog: Vec<Product>,
    tables: Mutex<Tables>,
    /// Fail the detail insert after this many rows were written.
    fail_after_details: Option<usize>,
    unavailable: bool,
    calls: AtomicUsize,
}

impl InMemoryStore {
    pub(crate) fn with_catalog(catalog: Vec<Product>) -> Self {
        Self { catalog, ..Self::default() }
    }

    pub(crate) fn failing_after(details: usize) -> Self {
        Self { fail_after_details: Some(details), ..Self::default() }
    }

    pub(crate) fn unavailable() -> Self {
        Self { unavailable: true, ..Self::default() }
    }

    pub(crate) fn headers(&self) -> Vec<(i64, NewTransaction)> {
        self.tables.lock().unwrap().headers.clone()
    }

    pub(crate) fn details(&self) -> Vec<(i64, TransactionDetail)> {
        self.tables.lock().unwrap().details.clone()
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), DbError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(DbError::ConnectionConfigError("DB_HOST is not set".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl PosStore for InMemoryStore {
    async fn find_product_by_code(&self, code: &str) -> Result<Option<Product>, DbError> {
        self.check_available()?;
        Ok(self.catalog.iter().find(|p| p.prd_code == code).cloned())
    }

    async fn record_transaction(
        &self,
        header: &NewTransaction,
        details: &[TransactionDetail],
    ) -> Result<i64, DbError> {
        self.check_available()?;
        let mut tables = self.tables.lock().unwrap();
        let trd_id = tables.next_trd_id + 1;

        let mut staged = Vec::with_capacity(details.len());
        for (written, detail) in details.iter().enumerate() {
            if self.fail_after_details == Some(written) {
                return Err(DbError::PersistenceError(sqlx::Error::Protocol(format!(
                    "Duplicate entry '{trd_id}-{}' for key 'PRIMARY'",
                    detail.dtl_id
                ))));
            }
            staged.push((trd_id, detail.clone()));
        }

        tables.next_trd_id = trd_id;
        tables.headers.push((trd_id, header.clone()));
        tables.details.extend(staged);
        Ok(trd_id)
    }

    fn is_configured(&self) -> bool {
        !self.unavailable
    }
}
