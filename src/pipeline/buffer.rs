// src/pipeline/buffer.rs

use chrono::NaiveDate;

use crate::model::{Allocated, FactoryOrder};

/// Production buffer band for an allocated quantity.
///
/// Bands are checked from the largest threshold down; comparisons are
/// strictly greater-than, so a quantity sitting on a threshold falls into
/// the band below it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BufferTier {
    /// Above 500: +30%
    Large,
    /// Above 200: +20%
    Medium,
    /// Above 100: +10%
    Small,
    /// 100 or less: no buffer
    None,
}

impl BufferTier {
    pub fn for_quantity(quantity: f64) -> Self {
        if quantity > 500.0 {
            BufferTier::Large
        } else if quantity > 200.0 {
            BufferTier::Medium
        } else if quantity > 100.0 {
            BufferTier::Small
        } else {
            BufferTier::None
        }
    }

    pub fn rate(self) -> f64 {
        match self {
            BufferTier::Large => 0.30,
            BufferTier::Medium => 0.20,
            BufferTier::Small => 0.10,
            BufferTier::None => 0.0,
        }
    }
}

/// Allocated quantity plus its buffer.
pub fn factory_quantity(quantity: f64) -> f64 {
    quantity + quantity * BufferTier::for_quantity(quantity).rate()
}

/// Derives one factory order per allocated row.
///
/// Always computed from the allocated quantity, so rerunning never stacks
/// buffers.
pub fn compute_buffer(allocated: &[Allocated], process_date: NaiveDate) -> Vec<FactoryOrder> {
    allocated
        .iter()
        .map(|row| FactoryOrder {
            color: row.color.clone(),
            quantity: factory_quantity(row.quantity),
            city: row.city.clone(),
            process_date,
        })
        .collect()
}
