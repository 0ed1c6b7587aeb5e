use serde::{Deserialize, Serialize};

/// The tax category recorded on every transaction detail row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxCode {
    /// Standard consumption tax, 10%.
    #[default]
    Standard,
}

impl TaxCode {
    /// Returns the code stored in the `TAX_CD` column.
    pub fn code(&self) -> &'static str {
        match self {
            TaxCode::Standard => "10",
        }
    }

    /// Removes the tax from a tax-inclusive unit price, rounding down.
    ///
    /// Computed as `floor(price * 10 / 11)` in integers so that prices like
    /// 220 come out at exactly 200. Split on 11 to stay clear of overflow.
    pub fn exclude_tax(&self, price: i64) -> i64 {
        match self {
            TaxCode::Standard => price.div_euclid(11) * 10 + price.rem_euclid(11) * 10 / 11,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_rate_floors_each_unit_price() {
        let tax = TaxCode::Standard;
        assert_eq!(tax.exclude_tax(108), 98);
        assert_eq!(tax.exclude_tax(220), 200);
        assert_eq!(tax.exclude_tax(110), 100);
        assert_eq!(tax.exclude_tax(1), 0);
        assert_eq!(tax.exclude_tax(11), 10);
        assert_eq!(tax.exclude_tax(i64::MAX), (i128::from(i64::MAX) * 10 / 11) as i64);
    }

    #[test]
    fn standard_code_is_ten() {
        assert_eq!(TaxCode::default().code(), "10");
    }
}
