//! `stockcount-recon` - expected-vs-counted inventory reconciliation engine.
//!
//! Pure engine crate: two CSV snapshots in, a discrepancy report out.
//! No CLI or terminal dependencies.

pub mod aggregate;
pub mod chart;
pub mod config;
pub mod dedup;
pub mod derived;
pub mod engine;
pub mod error;
pub mod evidence;
pub mod group;
pub mod load;
pub mod model;
pub mod reconcile;
pub mod session;

pub use config::ReportConfig;
pub use engine::{run, ReconInput};
pub use error::ReconError;
pub use model::{Dimension, DiscrepancyRecord, GroupedTable, Measure, ReconResult};
pub use session::ReconSession;
