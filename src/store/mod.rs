//! Record store: bulk clear, insert and scan per record kind.

mod csv_store;
mod memory;

pub use csv_store::CsvRecordStore;
pub use memory::MemoryRecordStore;

use thiserror::Error;

use crate::model::Record;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{kind}: io error: {source}")]
    Io {
        kind: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{kind}: csv error: {source}")]
    Csv {
        kind: &'static str,
        #[source]
        source: csv::Error,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage the pipeline stages read from and write to.
///
/// No filtering is pushed down: stages scan a whole kind and do the rest
/// themselves.
pub trait RecordStore {
    fn delete_all<R: Record>(&mut self) -> StoreResult<()>;

    fn save<R: Record>(&mut self, record: &R) -> StoreResult<()>;

    /// All rows of a kind, in the order they were saved.
    fn find_all<R: Record>(&self) -> StoreResult<Vec<R>>;

    /// Replaces every row of a kind with `records`.
    fn replace_all<R: Record>(&mut self, records: &[R]) -> StoreResult<()> {
        self.delete_all::<R>()?;
        for record in records {
            self.save(record)?;
        }
        Ok(())
    }
}
