pub mod enums;
pub mod error;
pub mod pricing;
pub mod structs;
pub mod validation;

// Re-export the core types to provide a clean public API.
pub use enums::TaxCode;
pub use error::CoreError;
pub use pricing::{compute_totals, expand_details, Totals};
pub use structs::{
    NewTransaction, Product, ProductSearchRequest, ProductSearchResponse, PurchaseItem,
    PurchaseRequest, PurchaseResponse, TransactionDetail, UNKNOWN_EMPLOYEE_CODE,
};
