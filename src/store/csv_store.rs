// src/store/csv_store.rs

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use crate::model::Record;
use crate::store::{RecordStore, StoreError, StoreResult};

/// File-backed store: one headered CSV file per record kind.
#[derive(Debug, Clone)]
pub struct CsvRecordStore {
    root: PathBuf,
}

impl CsvRecordStore {
    /// Opens (and creates if needed) the store directory.
    pub fn open(root: impl AsRef<Path>) -> StoreResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(|source| StoreError::Io {
            kind: "store",
            source,
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn table_path<R: Record>(&self) -> PathBuf {
        self.root.join(format!("{}.csv", R::KIND))
    }
}

fn io_error<R: Record>(source: io::Error) -> StoreError {
    StoreError::Io {
        kind: R::KIND,
        source,
    }
}

fn csv_error<R: Record>(source: csv::Error) -> StoreError {
    StoreError::Csv {
        kind: R::KIND,
        source,
    }
}

impl RecordStore for CsvRecordStore {
    fn delete_all<R: Record>(&mut self) -> StoreResult<()> {
        match fs::remove_file(self.table_path::<R>()) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_error::<R>(err)),
        }
    }

    fn save<R: Record>(&mut self, record: &R) -> StoreResult<()> {
        let path = self.table_path::<R>();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(io_error::<R>)?;
        let is_empty = file.metadata().map_err(io_error::<R>)?.len() == 0;

        let mut wtr = csv::WriterBuilder::new()
            .has_headers(is_empty)
            .from_writer(file);
        wtr.serialize(record).map_err(csv_error::<R>)?;
        wtr.flush().map_err(io_error::<R>)?;
        Ok(())
    }

    fn find_all<R: Record>(&self) -> StoreResult<Vec<R>> {
        let path = self.table_path::<R>();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let mut rdr = csv::Reader::from_path(&path).map_err(csv_error::<R>)?;
        rdr.deserialize::<R>()
            .collect::<Result<Vec<R>, _>>()
            .map_err(csv_error::<R>)
    }

    /// Writes the new table beside the old one and renames it into place,
    /// so readers see either the old rows or the new rows.
    fn replace_all<R: Record>(&mut self, records: &[R]) -> StoreResult<()> {
        let path = self.table_path::<R>();
        let staging = path.with_extension("csv.tmp");

        let mut wtr = csv::Writer::from_path(&staging).map_err(csv_error::<R>)?;
        for record in records {
            wtr.serialize(record).map_err(csv_error::<R>)?;
        }
        wtr.flush().map_err(io_error::<R>)?;
        drop(wtr);

        fs::rename(&staging, &path).map_err(io_error::<R>)
    }
}
