use std::any::{Any, TypeId};
use std::collections::HashMap;

use crate::model::Record;
use crate::store::{RecordStore, StoreResult};

/// In-process store. Each kind is kept as a typed `Vec` keyed by its type.
#[derive(Default)]
pub struct MemoryRecordStore {
    tables: HashMap<TypeId, Box<dyn Any>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn table_mut<R: Record>(&mut self) -> &mut Vec<R> {
        self.tables
            .entry(TypeId::of::<R>())
            .or_insert_with(|| Box::new(Vec::<R>::new()))
            .downcast_mut::<Vec<R>>()
            .unwrap_or_else(|| unreachable!("table {} keyed by its own type", R::KIND))
    }
}

impl RecordStore for MemoryRecordStore {
    fn delete_all<R: Record>(&mut self) -> StoreResult<()> {
        self.tables.remove(&TypeId::of::<R>());
        Ok(())
    }

    fn save<R: Record>(&mut self, record: &R) -> StoreResult<()> {
        self.table_mut::<R>().push(record.clone());
        Ok(())
    }

    fn find_all<R: Record>(&self) -> StoreResult<Vec<R>> {
        Ok(self
            .tables
            .get(&TypeId::of::<R>())
            .and_then(|table| table.downcast_ref::<Vec<R>>())
            .cloned()
            .unwrap_or_default())
    }
}
