// src/pipeline/allocator.rs

use std::collections::BTreeMap;

use chrono::NaiveDate;
use thiserror::Error;

use crate::model::{Allocated, InventoryLedger, Order};

/// An order the remaining inventory could not cover. Ends the whole run.
#[derive(Debug, Clone, PartialEq, Error)]
#[error(
    "order #{position} ({color}, {city}) needs {requested} but only {balance} {color} remains; \
     not all orders can be completed"
)]
pub struct AllocationError {
    /// Zero-based index of the order in processing sequence.
    pub position: usize,
    pub color: String,
    pub city: String,
    pub requested: f64,
    pub balance: f64,
}

/// Result of a successful allocation run.
#[derive(Debug, Clone)]
pub struct Allocation {
    /// One row per (color, city), sorted by color then city.
    pub rows: Vec<Allocated>,
    /// Inventory left once every order was served.
    pub ledger: InventoryLedger,
}

/// Allocates inventory to `orders` in the sequence given.
///
/// An order is served only when its quantity is strictly below the color's
/// remaining balance. The first order that is not servable aborts the run
/// and nothing accumulated so far is returned.
pub fn allocate(
    orders: &[Order],
    mut ledger: InventoryLedger,
    process_date: NaiveDate,
) -> Result<Allocation, AllocationError> {
    let mut totals: BTreeMap<(&str, &str), f64> = BTreeMap::new();

    for (position, order) in orders.iter().enumerate() {
        match ledger.try_deduct(&order.color, order.quantity) {
            Ok(remaining) => {
                tracing::debug!(
                    position,
                    color = %order.color,
                    city = %order.city,
                    quantity = order.quantity,
                    remaining,
                    "order allocated"
                );
                *totals
                    .entry((order.color.as_str(), order.city.as_str()))
                    .or_insert(0.0) += order.quantity;
            }
            Err(balance) => {
                return Err(AllocationError {
                    position,
                    color: order.color.clone(),
                    city: order.city.clone(),
                    requested: order.quantity,
                    balance,
                });
            }
        }
    }

    let rows = totals
        .into_iter()
        .map(|((color, city), quantity)| Allocated {
            color: color.to_string(),
            quantity,
            city: city.to_string(),
            process_date,
        })
        .collect();

    Ok(Allocation { rows, ledger })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Material;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn ledger(stock: &[(&str, f64)]) -> InventoryLedger {
        let materials: Vec<Material> = stock
            .iter()
            .map(|(color, qty)| Material::new(*color, *qty, day()))
            .collect();
        InventoryLedger::from_materials(&materials)
    }

    fn order(color: &str, qty: f64, city: &str) -> Order {
        Order::new(color, qty, city, "rep", day())
    }

    #[test]
    fn aggregates_per_color_and_city() {
        let orders = vec![
            order("red", 3.0, "Paris"),
            order("red", 2.0, "Lyon"),
            order("red", 1.5, "Paris"),
            order("blue", 4.0, "Paris"),
        ];
        let result = allocate(&orders, ledger(&[("red", 10.0), ("blue", 5.0)]), day()).unwrap();

        let summary: Vec<(&str, &str, f64)> = result
            .rows
            .iter()
            .map(|row| (row.color.as_str(), row.city.as_str(), row.quantity))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("blue", "Paris", 4.0),
                ("red", "Lyon", 2.0),
                ("red", "Paris", 4.5),
            ]
        );
        assert!(result.rows.iter().all(|row| row.process_date == day()));
        assert_eq!(result.ledger.balance("red"), 3.5);
        assert_eq!(result.ledger.balance("blue"), 1.0);
    }

    #[test]
    fn exact_balance_is_not_enough() {
        let err = allocate(&[order("red", 10.0, "Paris")], ledger(&[("red", 10.0)]), day())
            .unwrap_err();
        assert_eq!(err.position, 0);
        assert_eq!(err.requested, 10.0);
        assert_eq!(err.balance, 10.0);
    }

    #[test]
    fn processing_order_decides_which_order_fails() {
        let stock = [("red", 10.0)];

        let err = allocate(
            &[order("red", 6.0, "Paris"), order("red", 5.0, "Paris")],
            ledger(&stock),
            day(),
        )
        .unwrap_err();
        assert_eq!((err.position, err.requested, err.balance), (1, 5.0, 4.0));

        let err = allocate(
            &[order("red", 5.0, "Paris"), order("red", 6.0, "Paris")],
            ledger(&stock),
            day(),
        )
        .unwrap_err();
        assert_eq!((err.position, err.requested, err.balance), (1, 6.0, 5.0));
    }

    #[test]
    fn small_orders_fit_in_either_sequence() {
        let stock = [("red", 10.0)];
        for orders in [
            vec![order("red", 9.0, "Paris"), order("red", 0.5, "Paris")],
            vec![order("red", 0.5, "Paris"), order("red", 9.0, "Paris")],
        ] {
            let result = allocate(&orders, ledger(&stock), day()).unwrap();
            assert_eq!(result.rows.len(), 1);
            assert_eq!(result.rows[0].quantity, 9.5);
        }
    }

    #[test]
    fn unknown_color_fails_immediately() {
        let err = allocate(
            &[order("red", 1.0, "Paris"), order("green", 0.1, "Paris")],
            ledger(&[("red", 10.0)]),
            day(),
        )
        .unwrap_err();
        assert_eq!(err.color, "green");
        assert_eq!(err.balance, 0.0);
    }

    #[test]
    fn no_orders_allocates_nothing() {
        let result = allocate(&[], ledger(&[("red", 10.0)]), day()).unwrap();
        assert!(result.rows.is_empty());
        assert_eq!(result.ledger.balance("red"), 10.0);
    }
}
