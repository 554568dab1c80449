pub mod allocator;
pub mod bonus;
pub mod buffer;
pub mod config;
pub mod stages;

pub use allocator::{allocate, Allocation, AllocationError};
pub use bonus::compute_bonus;
pub use buffer::{compute_buffer, BufferTier};
pub use config::PipelineConfig;
pub use stages::{Pipeline, Stage, StageReport};
