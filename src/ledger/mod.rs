//! Ingestion and join engine
//!
//! Reads the six source tables, lifts them into typed records and left-joins
//! the dimensions onto the sales facts to build the unified [`Ledger`]. The
//! loaded [`SalesDataset`] is an immutable handle that every query borrows.

pub mod filter;
pub mod join;
pub mod records;

use std::time::Instant;

use crate::config::SourceConfig;
use crate::core::error::Result;
use crate::io::read_table;

pub use self::filter::{LedgerFilter, LedgerView};
pub use self::join::{left_join_all, DuplicateKeyPolicy, JoinStats, LedgerRecord};
pub use self::records::{CalendarDay, FactRecord, Partner, PlanRow, Product, Staff};

/// Denormalized sales ledger: one row per fact with its dimension attributes
#[derive(Debug, Clone)]
pub struct Ledger {
    records: Vec<LedgerRecord>,
    stats: JoinStats,
}

impl Ledger {
    /// Join facts with partner, product, staff and calendar dimensions
    pub fn join(
        facts: &[FactRecord],
        partners: &[Partner],
        products: &[Product],
        staff: &[Staff],
        calendar: &[CalendarDay],
        policy: DuplicateKeyPolicy,
    ) -> Result<Self> {
        let (records, stats) = left_join_all(facts, partners, products, staff, calendar, policy)?;
        Ok(Ledger { records, stats })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[LedgerRecord] {
        &self.records
    }

    pub fn stats(&self) -> &JoinStats {
        &self.stats
    }

    /// View over every row
    pub fn view(&self) -> LedgerView<'_> {
        LedgerView::new(self.records.iter().collect())
    }

    /// View over the rows accepted by the filter
    pub fn filter(&self, filter: &LedgerFilter) -> LedgerView<'_> {
        LedgerView::new(self.records.iter().filter(|r| filter.matches(r)).collect())
    }
}

/// Typed contents of the six sources, before joining
#[derive(Debug, Clone, Default)]
pub struct SourceTables {
    pub facts: Vec<FactRecord>,
    pub partners: Vec<Partner>,
    pub products: Vec<Product>,
    pub staff: Vec<Staff>,
    pub calendar: Vec<CalendarDay>,
    pub plan: Vec<PlanRow>,
}

impl SourceTables {
    /// Read every source named by the configuration. The first missing or
    /// malformed source aborts the whole read.
    pub fn read(config: &SourceConfig) -> Result<Self> {
        let sheet = config.sheet.as_deref();

        let calendar = CalendarDay::from_table(&read_table(config.calendar_path(), "calendar", sheet)?)?;
        let partners = Partner::from_table(&read_table(config.partners_path(), "partner", sheet)?)?;
        let plan = PlanRow::from_table(&read_table(config.plan_path(), "plan", sheet)?)?;
        let staff = Staff::from_table(&read_table(config.staff_path(), "staff", sheet)?)?;
        let products = Product::from_table(&read_table(config.products_path(), "product", sheet)?)?;
        let facts = FactRecord::from_table(&read_table(config.fact_path(), "fact", sheet)?)?;

        log::info!(
            "read sources from {}: {} facts, {} partners, {} products, {} staff, {} calendar days, {} plan rows",
            config.data_dir.display(),
            facts.len(),
            partners.len(),
            products.len(),
            staff.len(),
            calendar.len(),
            plan.len()
        );

        Ok(SourceTables {
            facts,
            partners,
            products,
            staff,
            calendar,
            plan,
        })
    }
}

/// Loaded data handle: the unified ledger and the sales plan
#[derive(Debug, Clone)]
pub struct SalesDataset {
    ledger: Ledger,
    plan: Vec<PlanRow>,
}

impl SalesDataset {
    /// Read and join every source. Runs once per process; the caller keeps the
    /// returned handle for as long as it answers queries.
    pub fn load(config: &SourceConfig, policy: DuplicateKeyPolicy) -> Result<Self> {
        let started = Instant::now();
        let tables = SourceTables::read(config)?;
        let dataset = Self::from_tables(tables, policy)?;
        log::info!(
            "ledger ready: {} rows in {:.1?}",
            dataset.ledger.len(),
            started.elapsed()
        );
        Ok(dataset)
    }

    /// Build the dataset from records already in memory
    pub fn from_tables(tables: SourceTables, policy: DuplicateKeyPolicy) -> Result<Self> {
        let ledger = Ledger::join(
            &tables.facts,
            &tables.partners,
            &tables.products,
            &tables.staff,
            &tables.calendar,
            policy,
        )?;

        let stats = ledger.stats();
        for (dimension, unmatched) in [
            ("partner", stats.unmatched_partners),
            ("product", stats.unmatched_products),
            ("staff", stats.unmatched_staff),
            ("calendar", stats.unmatched_calendar),
        ] {
            if unmatched > 0 {
                log::warn!(
                    "{} of {} facts have no {} match",
                    unmatched,
                    stats.facts,
                    dimension
                );
            }
        }

        Ok(SalesDataset {
            ledger,
            plan: tables.plan,
        })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn plan(&self) -> &[PlanRow] {
        &self.plan
    }
}
