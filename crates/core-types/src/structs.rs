use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Employee code recorded when the register does not identify a cashier.
pub const UNKNOWN_EMPLOYEE_CODE: &str = "9999999999";

fn default_store_cd() -> String {
    "30".to_string()
}

fn default_pos_no() -> String {
    "90".to_string()
}

/// A row of the product catalog (`m_product`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub prd_id: i64,
    pub prd_code: String,
    pub prd_name: String,
    /// Tax-inclusive price in yen.
    pub prd_price: i64,
}

/// Body of `POST /search_product`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductSearchRequest {
    #[serde(default)]
    pub code: String,
}

impl ProductSearchRequest {
    /// The trimmed product code, or `None` when nothing usable was sent.
    pub fn normalized_code(&self) -> Option<&str> {
        let code = self.code.trim();
        (!code.is_empty()).then_some(code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSearchResponse {
    pub product: Option<Product>,
}

/// A product line as submitted by the register. Product fields are taken
/// as-is and not re-checked against the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseItem {
    pub prd_id: i64,
    pub prd_code: String,
    pub prd_name: String,
    pub prd_price: i64,
    pub quantity: i64,
}

/// Body of `POST /purchase`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRequest {
    #[serde(default)]
    pub emp_cd: Option<String>,
    #[serde(default = "default_store_cd")]
    pub store_cd: String,
    #[serde(default = "default_pos_no")]
    pub pos_no: String,
    pub items: Vec<PurchaseItem>,
}

impl PurchaseRequest {
    /// The employee code to record, falling back to [`UNKNOWN_EMPLOYEE_CODE`].
    pub fn resolved_emp_cd(&self) -> &str {
        match self.emp_cd.as_deref() {
            Some(code) if !code.is_empty() => code,
            _ => UNKNOWN_EMPLOYEE_CODE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseResponse {
    pub success: bool,
    pub total_amount: i64,
    pub total_amount_ex_tax: i64,
    pub transaction_id: Option<i64>,
}

/// The transaction header (`t_txn`) as it is about to be inserted.
/// `TRD_ID` is assigned by the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub datetime: NaiveDateTime,
    pub emp_cd: String,
    pub store_cd: String,
    pub pos_no: String,
    pub total_amt: i64,
    pub ttl_amt_ex_tax: i64,
}

/// One unit of a purchased product (`t_txn_dtl`). The owning `TRD_ID` is bound
/// when the row is written, once the header has been inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDetail {
    pub dtl_id: i64,
    pub prd_id: i64,
    pub prd_code: String,
    pub prd_name: String,
    pub prd_price: i64,
    pub tax_cd: String,
}
