// src/pipeline/bonus.rs

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::model::{Bonus, Order};

/// Total volume a rep must exceed for the base award.
pub const BASE_THRESHOLD: f64 = 200.0;
pub const BASE_POINTS: u32 = 5;

/// Total volume a rep must exceed for the extra award, on top of the base one.
pub const EXTRA_THRESHOLD: f64 = 500.0;
pub const EXTRA_POINTS: u32 = 15;

/// Total ordered quantity per sales rep.
pub fn volume_by_rep(orders: &[Order]) -> BTreeMap<&str, f64> {
    let mut totals = BTreeMap::new();
    for order in orders {
        *totals.entry(order.sales_rep.as_str()).or_insert(0.0) += order.quantity;
    }
    totals
}

/// Bonus rows for every rep, ordered by rep name.
///
/// A rep above both thresholds gets two separate rows.
pub fn compute_bonus(orders: &[Order], order_date: NaiveDate) -> Vec<Bonus> {
    let mut bonuses = Vec::new();
    for (rep, volume) in volume_by_rep(orders) {
        if volume > BASE_THRESHOLD {
            bonuses.push(Bonus {
                sales_rep: rep.to_string(),
                bonus_points: BASE_POINTS,
                order_date,
            });
        }
        if volume > EXTRA_THRESHOLD {
            bonuses.push(Bonus {
                sales_rep: rep.to_string(),
                bonus_points: EXTRA_POINTS,
                order_date,
            });
        }
    }
    bonuses
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn order(rep: &str, qty: f64) -> Order {
        Order::new("red", qty, "Paris", rep, day())
    }

    fn points(bonuses: &[Bonus], rep: &str) -> Vec<u32> {
        bonuses
            .iter()
            .filter(|b| b.sales_rep == rep)
            .map(|b| b.bonus_points)
            .collect()
    }

    #[test]
    fn awards_are_additive() {
        let orders = vec![
            order("carol", 350.0),
            order("dave", 300.0),
            order("carol", 250.0),
            order("erin", 200.0),
        ];
        let bonuses = compute_bonus(&orders, day());

        assert_eq!(points(&bonuses, "carol"), vec![5, 15]);
        assert_eq!(points(&bonuses, "dave"), vec![5]);
        assert!(points(&bonuses, "erin").is_empty());
        assert_eq!(bonuses.len(), 3);
        assert!(bonuses.iter().all(|b| b.order_date == day()));
    }

    #[test]
    fn thresholds_are_strict() {
        let bonuses = compute_bonus(&[order("frank", 500.0)], day());
        assert_eq!(points(&bonuses, "frank"), vec![5]);

        let bonuses = compute_bonus(&[order("frank", 200.01)], day());
        assert_eq!(points(&bonuses, "frank"), vec![5]);
    }

    #[test]
    fn volume_sums_across_colors_and_cities() {
        let orders = vec![
            Order::new("red", 120.0, "Paris", "gina", day()),
            Order::new("blue", 90.0, "Lyon", "gina", day()),
        ];
        assert_eq!(volume_by_rep(&orders).get("gina"), Some(&210.0));
        assert_eq!(points(&compute_bonus(&orders, day()), "gina"), vec![5]);
    }

    #[test]
    fn no_orders_no_bonus() {
        assert!(compute_bonus(&[], day()).is_empty());
    }
}
