//! salesdash: sales ledger ingestion and analytical queries
//!
//! Loads the calendar, partner, plan, staff, product and sales fact tables of
//! a retail business, joins them into one ledger and answers the dashboard's
//! queries over filtered views of it.
//!
//! ```no_run
//! use salesdash::analytics::{pareto_analysis, top_customers, DEFAULT_TOP_N};
//! use salesdash::config::SourceConfig;
//! use salesdash::ledger::{DuplicateKeyPolicy, LedgerFilter, SalesDataset};
//!
//! let dataset = SalesDataset::load(&SourceConfig::in_dir("data"), DuplicateKeyPolicy::Error)?;
//! let view = dataset
//!     .ledger()
//!     .filter(&LedgerFilter::new().with_years([2023]));
//!
//! let top = top_customers(&view, "Shoes", "Germany", DEFAULT_TOP_N);
//! let pareto = pareto_analysis(&view, "Brazil");
//! # Ok::<(), salesdash::Error>(())
//! ```

// Core module with fundamental data structures and errors
pub mod core;

pub mod analytics;
pub mod config;
pub mod groupby;
pub mod io;
pub mod ledger;
pub mod temporal;

pub use crate::core::error::{Error, Result};
pub use crate::core::{DataValue, RawTable};
pub use analytics::{Report, Tabular};
pub use config::DashboardConfig;
pub use groupby::GroupBy;
pub use ledger::{Ledger, LedgerFilter, LedgerRecord, LedgerView, SalesDataset};

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
