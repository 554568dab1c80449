// src/pipeline/stages.rs

use std::fmt;

use chrono::{Local, NaiveDate};
use clap::ValueEnum;

use crate::error::PipelineResult;
use crate::io::input;
use crate::io::reporting::NotificationSink;
use crate::model::{Allocated, Bonus, FactoryOrder, InventoryLedger, Material, Order};
use crate::pipeline::allocator::allocate;
use crate::pipeline::bonus::compute_bonus;
use crate::pipeline::buffer::compute_buffer;
use crate::pipeline::config::PipelineConfig;
use crate::store::RecordStore;

/// One independently invoked phase of the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Stage {
    /// Load orders from the order file
    #[value(name = "STAGE1")]
    LoadOrders,
    /// Load materials from the material file
    #[value(name = "STAGE2")]
    LoadMaterials,
    /// Allocate materials to orders
    #[value(name = "STAGE3")]
    Allocate,
    /// Add production buffer
    #[value(name = "STAGE4")]
    Buffer,
    /// Compute sales bonuses
    #[value(name = "STAGE5")]
    Bonus,
    /// Notify the factory
    #[value(name = "STAGE6")]
    Notify,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::LoadOrders,
        Stage::LoadMaterials,
        Stage::Allocate,
        Stage::Buffer,
        Stage::Bonus,
        Stage::Notify,
    ];

    fn activity(self) -> &'static str {
        match self {
            Stage::LoadOrders => "loading orders",
            Stage::LoadMaterials => "loading materials",
            Stage::Allocate => "processing orders",
            Stage::Buffer => "adding buffer",
            Stage::Bonus => "adding sales bonus",
            Stage::Notify => "notifying factory",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::LoadOrders => "STAGE1",
            Stage::LoadMaterials => "STAGE2",
            Stage::Allocate => "STAGE3",
            Stage::Buffer => "STAGE4",
            Stage::Bonus => "STAGE5",
            Stage::Notify => "STAGE6",
        };
        f.write_str(name)
    }
}

/// What a finished stage did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageReport {
    pub stage: Stage,
    /// Rows written to the store, or forwarded to the sink for `Notify`.
    pub rows_written: usize,
}

/// Runs stages against a record store.
///
/// Each derived kind is computed in full and then swapped into the store in
/// one `replace_all`, so a stage never leaves a partly rebuilt table.
pub struct Pipeline<S, N> {
    config: PipelineConfig,
    store: S,
    sink: N,
    today: NaiveDate,
}

impl<S, N> Pipeline<S, N>
where
    S: RecordStore,
    N: NotificationSink,
{
    pub fn new(config: PipelineConfig, store: S, sink: N) -> Self {
        Self {
            config,
            store,
            sink,
            today: Local::now().date_naive(),
        }
    }

    /// Overrides the date stamped on derived rows.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn sink(&self) -> &N {
        &self.sink
    }

    pub fn run(&mut self, stage: Stage) -> PipelineResult<StageReport> {
        let span = tracing::info_span!("stage", %stage);
        let _enter = span.enter();

        tracing::info!("{} started", stage.activity());
        let rows_written = match stage {
            Stage::LoadOrders => self.load_orders(),
            Stage::LoadMaterials => self.load_materials(),
            Stage::Allocate => self.allocate(),
            Stage::Buffer => self.buffer(),
            Stage::Bonus => self.bonus(),
            Stage::Notify => self.notify(),
        }?;
        tracing::info!(rows_written, "{} completed", stage.activity());
        Ok(StageReport {
            stage,
            rows_written,
        })
    }

    fn load_orders(&mut self) -> PipelineResult<usize> {
        let orders = input::read_orders(&self.config.order_path())?;
        self.store.replace_all(&orders)?;
        Ok(orders.len())
    }

    fn load_materials(&mut self) -> PipelineResult<usize> {
        let materials = input::read_materials(&self.config.material_path())?;
        self.store.replace_all(&materials)?;
        Ok(materials.len())
    }

    fn allocate(&mut self) -> PipelineResult<usize> {
        let orders = self.store.find_all::<Order>()?;
        let materials = self.store.find_all::<Material>()?;
        let ledger = InventoryLedger::from_materials(&materials);
        tracing::debug!(
            orders = orders.len(),
            colors = ledger.colors(),
            "inventory ledger built"
        );

        match allocate(&orders, ledger, self.today) {
            Ok(allocation) => {
                self.store.replace_all(&allocation.rows)?;
                // Factory orders derive from the old allocations; stage 4 rebuilds them.
                self.store.delete_all::<FactoryOrder>()?;
                Ok(allocation.rows.len())
            }
            Err(err) => {
                // Stale allocations from an earlier run must not reach the factory.
                self.store.delete_all::<Allocated>()?;
                self.store.delete_all::<FactoryOrder>()?;
                Err(err.into())
            }
        }
    }

    fn buffer(&mut self) -> PipelineResult<usize> {
        let allocated = self.store.find_all::<Allocated>()?;
        let factory = compute_buffer(&allocated, self.today);
        self.store.replace_all(&factory)?;
        Ok(factory.len())
    }

    fn bonus(&mut self) -> PipelineResult<usize> {
        let orders = self.store.find_all::<Order>()?;
        let bonuses = compute_bonus(&orders, self.today);
        for bonus in &bonuses {
            tracing::debug!(sales_rep = %bonus.sales_rep, points = bonus.bonus_points, "bonus awarded");
        }
        self.store.replace_all::<Bonus>(&bonuses)?;
        Ok(bonuses.len())
    }

    fn notify(&mut self) -> PipelineResult<usize> {
        let factory = self.store.find_all::<FactoryOrder>()?;
        for order in &factory {
            self.sink.notify(order)?;
        }
        self.sink.finish()?;
        Ok(factory.len())
    }
}
