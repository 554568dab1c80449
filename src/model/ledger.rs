// src/model/ledger.rs

use std::collections::HashMap;

use crate::model::records::Material;

/// Remaining quantity of material per color for a single allocation run.
///
/// Balances only ever go down. A deduction that would not leave a strictly
/// positive remainder is refused instead of clamped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryLedger {
    balances: HashMap<String, f64>,
}

impl InventoryLedger {
    /// Builds the ledger from material rows in the order given.
    ///
    /// Duplicate colors are not summed: the last row for a color wins.
    pub fn from_materials<'a, I>(materials: I) -> Self
    where
        I: IntoIterator<Item = &'a Material>,
    {
        let mut balances = HashMap::new();
        for material in materials {
            balances.insert(material.color.clone(), material.quantity);
        }
        Self { balances }
    }

    /// Current balance for a color. Colors with no material row have none.
    pub fn balance(&self, color: &str) -> f64 {
        self.balances.get(color).copied().unwrap_or(0.0)
    }

    /// Deducts `quantity` from `color` if it is strictly below the balance.
    ///
    /// Returns the new balance, or the untouched balance as the error.
    pub fn try_deduct(&mut self, color: &str, quantity: f64) -> Result<f64, f64> {
        let balance = self.balance(color);
        if quantity < balance {
            let remaining = balance - quantity;
            self.balances.insert(color.to_string(), remaining);
            Ok(remaining)
        } else {
            Err(balance)
        }
    }

    pub fn colors(&self) -> usize {
        self.balances.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn last_material_row_for_a_color_wins() {
        let materials = vec![
            Material::new("red", 10.0, day()),
            Material::new("blue", 4.0, day()),
            Material::new("red", 3.0, day()),
        ];
        let ledger = InventoryLedger::from_materials(&materials);
        assert_eq!(ledger.balance("red"), 3.0);
        assert_eq!(ledger.balance("blue"), 4.0);
        assert_eq!(ledger.colors(), 2);
    }

    #[test]
    fn missing_color_has_zero_balance() {
        let ledger = InventoryLedger::default();
        assert_eq!(ledger.balance("green"), 0.0);
    }

    #[test]
    fn deduction_requires_strictly_smaller_quantity() {
        let mut ledger = InventoryLedger::from_materials(&[Material::new("red", 10.0, day())]);
        assert_eq!(ledger.try_deduct("red", 10.0), Err(10.0));
        assert_eq!(ledger.try_deduct("red", 4.0), Ok(6.0));
        assert_eq!(ledger.try_deduct("red", 6.0), Err(6.0));
        assert_eq!(ledger.balance("red"), 6.0);
    }

    #[test]
    fn deduction_against_missing_color_is_refused() {
        let mut ledger = InventoryLedger::default();
        assert_eq!(ledger.try_deduct("green", 0.5), Err(0.0));
        assert_eq!(ledger.colors(), 0);
    }
}
