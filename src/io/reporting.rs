// src/io/reporting.rs

use std::fmt::{self, Debug};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use crate::model::FactoryOrder;

/// Receives finished factory orders at the end of the pipeline.
pub trait NotificationSink: Debug {
    fn notify(&mut self, order: &FactoryOrder) -> Result<(), csv::Error>;

    /// Called once after the last order.
    fn finish(&mut self) -> Result<(), csv::Error> {
        Ok(())
    }
}

/// Announces each factory order on the log.
#[derive(Debug, Default)]
pub struct LogSink {
    notified: usize,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NotificationSink for LogSink {
    fn notify(&mut self, order: &FactoryOrder) -> Result<(), csv::Error> {
        self.notified += 1;
        tracing::info!(
            color = %order.color,
            city = %order.city,
            quantity = order.quantity,
            process_date = %order.process_date,
            "notifying factory"
        );
        Ok(())
    }

    fn finish(&mut self) -> Result<(), csv::Error> {
        tracing::info!(notified = self.notified, "factory notified");
        Ok(())
    }
}

/// Logs each factory order and writes it to a CSV report.
///
/// Rows go to a staging file that replaces the report only in `finish`, so
/// a run that fails part way keeps the previous report.
pub struct CsvReportSink {
    log: LogSink,
    path: PathBuf,
    staging: PathBuf,
    wtr: Option<csv::Writer<File>>,
}

impl CsvReportSink {
    pub fn create(path: &Path) -> Result<Self, csv::Error> {
        let mut staging = path.as_os_str().to_owned();
        staging.push(".tmp");
        let staging = PathBuf::from(staging);

        Ok(Self {
            log: LogSink::new(),
            wtr: Some(csv::Writer::from_path(&staging)?),
            path: path.to_path_buf(),
            staging,
        })
    }

    fn writer(&mut self) -> Result<&mut csv::Writer<File>, csv::Error> {
        self.wtr.as_mut().ok_or_else(|| {
            csv::Error::from(io::Error::other(format!(
                "report {} already finished",
                self.path.display()
            )))
        })
    }
}

impl fmt::Debug for CsvReportSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CsvReportSink")
            .field("log", &self.log)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl NotificationSink for CsvReportSink {
    fn notify(&mut self, order: &FactoryOrder) -> Result<(), csv::Error> {
        self.log.notify(order)?;
        self.writer()?.serialize(order)
    }

    fn finish(&mut self) -> Result<(), csv::Error> {
        let mut wtr = match self.wtr.take() {
            Some(wtr) => wtr,
            None => return Ok(()),
        };
        // Flush the buffer to ensure all rows reach the file
        wtr.flush()?;
        drop(wtr);
        fs::rename(&self.staging, &self.path)?;
        self.log.finish()
    }
}

impl<N: NotificationSink + ?Sized> NotificationSink for Box<N> {
    fn notify(&mut self, order: &FactoryOrder) -> Result<(), csv::Error> {
        (**self).notify(order)
    }

    fn finish(&mut self) -> Result<(), csv::Error> {
        (**self).finish()
    }
}

/// Collects notifications in memory.
impl NotificationSink for Vec<FactoryOrder> {
    fn notify(&mut self, order: &FactoryOrder) -> Result<(), csv::Error> {
        self.push(order.clone());
        Ok(())
    }
}
