//! Allocates colored material inventory to customer orders, derives
//! factory production quantities and sales bonuses, and reports the result.
//!
//! The batch runs one [`Stage`] per invocation against a [`RecordStore`].

pub mod error;
pub mod io;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod store;

pub use error::{PipelineError, PipelineResult};
pub use pipeline::{Pipeline, PipelineConfig, Stage, StageReport};
pub use store::{CsvRecordStore, MemoryRecordStore, RecordStore};
