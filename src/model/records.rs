// src/model/records.rs

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A row kind the record store knows how to keep.
///
/// `KIND` names the table (and the CSV file in the file-backed store).
pub trait Record: Serialize + DeserializeOwned + Clone + 'static {
    const KIND: &'static str;
}

/// A customer order. Source of demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub color: String,
    pub quantity: f64,
    pub city: String,
    pub sales_rep: String,
    pub order_date: NaiveDate,
}

impl Order {
    pub fn new(
        color: impl Into<String>,
        quantity: f64,
        city: impl Into<String>,
        sales_rep: impl Into<String>,
        order_date: NaiveDate,
    ) -> Self {
        Self {
            color: color.into(),
            quantity,
            city: city.into(),
            sales_rep: sales_rep.into(),
            order_date,
        }
    }
}

impl Record for Order {
    const KIND: &'static str = "orders";
}

/// A stock line of colored material. Source of supply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub color: String,
    pub quantity: f64,
    pub order_date: NaiveDate,
}

impl Material {
    pub fn new(color: impl Into<String>, quantity: f64, order_date: NaiveDate) -> Self {
        Self {
            color: color.into(),
            quantity,
            order_date,
        }
    }
}

impl Record for Material {
    const KIND: &'static str = "materials";
}

/// Total quantity allocated to one (color, city) pair in a successful run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocated {
    pub color: String,
    pub quantity: f64,
    pub city: String,
    pub process_date: NaiveDate,
}

impl Record for Allocated {
    const KIND: &'static str = "allocated";
}

/// Production quantity sent to the factory: the allocated quantity plus buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactoryOrder {
    pub color: String,
    pub quantity: f64,
    pub city: String,
    pub process_date: NaiveDate,
}

impl Record for FactoryOrder {
    const KIND: &'static str = "factory_orders";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bonus {
    pub sales_rep: String,
    pub bonus_points: u32,
    pub order_date: NaiveDate,
}

impl Record for Bonus {
    const KIND: &'static str = "bonuses";
}
