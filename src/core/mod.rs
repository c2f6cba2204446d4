// Core data structures shared by the readers and the ledger
pub mod data_value;
pub mod error;
pub mod table;

// Re-exports for convenience
pub use data_value::DataValue;
pub use error::{Error, Result};
pub use table::RawTable;
