use std::path::PathBuf;
use std::process::ExitCode;

use allocation_pipeline::io::reporting::{CsvReportSink, LogSink, NotificationSink};
use allocation_pipeline::logging;
use allocation_pipeline::{CsvRecordStore, Pipeline, PipelineConfig, PipelineResult, Stage};
use clap::Parser;

/// Material allocation batch: runs one stage per invocation.
#[derive(Parser, Debug)]
#[command(name = "allocation-pipeline")]
#[command(version)]
struct Args {
    /// Stage to run
    #[arg(value_enum)]
    stage: Stage,

    /// Directory holding order-file.txt and material-file.txt
    #[arg(long, env = "ALLOC_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,

    /// Directory of the record store
    #[arg(long, env = "ALLOC_STORE_DIR", default_value = "store")]
    store_dir: PathBuf,

    /// Also write factory notifications to this CSV file
    #[arg(long, env = "ALLOC_REPORT_FILE")]
    report_file: Option<PathBuf>,

    /// Log level when RUST_LOG is unset
    #[arg(long, env = "ALLOC_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Directory for daily rolling log files
    #[arg(long, env = "ALLOC_LOG_DIR")]
    log_dir: Option<PathBuf>,
}

impl Args {
    fn config(&self) -> PipelineConfig {
        PipelineConfig {
            data_dir: self.data_dir.clone(),
            store_dir: self.store_dir.clone(),
            report_file: self.report_file.clone(),
            ..PipelineConfig::default()
        }
    }
}

fn run(stage: Stage, config: PipelineConfig) -> PipelineResult<()> {
    let store = CsvRecordStore::open(&config.store_dir)?;
    let sink: Box<dyn NotificationSink> = match (&config.report_file, stage) {
        (Some(path), Stage::Notify) => Box::new(CsvReportSink::create(path)?),
        _ => Box::new(LogSink::new()),
    };

    let mut pipeline = Pipeline::new(config, store, sink);
    let report = pipeline.run(stage)?;
    tracing::info!(stage = %report.stage, rows_written = report.rows_written, "done");
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(err) = logging::init_logger(&args.log_level, args.log_dir.as_deref()) {
        eprintln!("error: cannot set up logging: {err}");
        return ExitCode::FAILURE;
    }

    match run(args.stage, args.config()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(stage = %args.stage, error = %err, "stage failed");
            ExitCode::FAILURE
        }
    }
}
