pub mod ledger;
pub mod records;

pub use ledger::InventoryLedger;
pub use records::{Allocated, Bonus, FactoryOrder, Material, Order, Record};
