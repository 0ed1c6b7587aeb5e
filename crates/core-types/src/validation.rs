use crate::error::CoreError;
use crate::structs::{PurchaseItem, PurchaseRequest};

/// Maximum length, in characters, of the register identifier fields.
pub const MAX_CODE_LENGTH: usize = 20;
/// Largest quantity accepted on a single line.
pub const MAX_QUANTITY: i64 = 9999;

fn check_length(field: &str, value: &str) -> Result<(), CoreError> {
    if value.chars().count() > MAX_CODE_LENGTH {
        return Err(CoreError::invalid(
            field,
            format!("must be at most {MAX_CODE_LENGTH} characters"),
        ));
    }
    Ok(())
}

impl PurchaseItem {
    pub fn validate(&self, index: usize) -> Result<(), CoreError> {
        if self.prd_price <= 0 {
            return Err(CoreError::invalid(
                format!("items[{index}].prd_price"),
                "must be greater than 0",
            ));
        }
        if !(1..=MAX_QUANTITY).contains(&self.quantity) {
            return Err(CoreError::invalid(
                format!("items[{index}].quantity"),
                format!("must be between 1 and {MAX_QUANTITY}"),
            ));
        }
        Ok(())
    }
}

impl PurchaseRequest {
    /// Checks every field constraint. Runs before anything touches the store.
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(emp_cd) = &self.emp_cd {
            check_length("emp_cd", emp_cd)?;
        }
        check_length("store_cd", &self.store_cd)?;
        check_length("pos_no", &self.pos_no)?;

        if self.items.is_empty() {
            return Err(CoreError::invalid("items", "at least one item is required"));
        }
        for (index, item) in self.items.iter().enumerate() {
            item.validate(index)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(items: Vec<PurchaseItem>) -> PurchaseRequest {
        PurchaseRequest {
            emp_cd: None,
            store_cd: "30".to_string(),
            pos_no: "90".to_string(),
            items,
        }
    }

    fn item(price: i64, quantity: i64) -> PurchaseItem {
        PurchaseItem {
            prd_id: 1,
            prd_code: "4901".to_string(),
            prd_name: "Green tea".to_string(),
            prd_price: price,
            quantity,
        }
    }

    #[test]
    fn accepts_boundary_quantities() {
        assert!(request(vec![item(100, 1), item(100, MAX_QUANTITY)]).validate().is_ok());
    }

    #[test]
    fn rejects_empty_basket() {
        let err = request(vec![]).validate().unwrap_err();
        assert_eq!(err, CoreError::InvalidInput("items".into(), "at least one item is required".into()));
    }

    #[test]
    fn rejects_out_of_range_quantity() {
        for quantity in [0, -1, MAX_QUANTITY + 1] {
            let err = request(vec![item(100, 1), item(100, quantity)]).validate().unwrap_err();
            assert!(matches!(err, CoreError::InvalidInput(field, _) if field == "items[1].quantity"));
        }
    }

    #[test]
    fn rejects_non_positive_price() {
        let err = request(vec![item(0, 1)]).validate().unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(field, _) if field == "items[0].prd_price"));
    }

    #[test]
    fn enforces_identifier_lengths_in_characters() {
        let mut ok = request(vec![item(100, 1)]);
        ok.emp_cd = Some("あ".repeat(MAX_CODE_LENGTH));
        assert!(ok.validate().is_ok());

        let mut too_long = request(vec![item(100, 1)]);
        too_long.pos_no = "9".repeat(MAX_CODE_LENGTH + 1);
        assert!(matches!(
            too_long.validate().unwrap_err(),
            CoreError::InvalidInput(field, _) if field == "pos_no"
        ));
    }
}
