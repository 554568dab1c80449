// src/pipeline/config.rs

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory holding the order and material input files.
    pub data_dir: PathBuf,
    pub order_file: String,
    pub material_file: String,
    /// Directory of the CSV record store.
    pub store_dir: PathBuf,
    /// Optional CSV report of factory notifications.
    pub report_file: Option<PathBuf>,
}

impl PipelineConfig {
    pub fn order_path(&self) -> PathBuf {
        self.data_dir.join(&self.order_file)
    }

    pub fn material_path(&self) -> PathBuf {
        self.data_dir.join(&self.material_file)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            order_file: "order-file.txt".to_string(),
            material_file: "material-file.txt".to_string(),
            store_dir: PathBuf::from("store"),
            report_file: None,
        }
    }
}
