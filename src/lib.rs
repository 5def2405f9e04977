//! LSG plant inventory viewer
//!
//! Read-only view over the `plant_inventory` table: rows are fetched through
//! an ordered chain of sources, normalized to the LSG group, given a derived
//! lifecycle status, age and attention flag, then filtered and summarized for
//! the terminal dashboard and the one-shot report.
//!
//! ```text
//! SourceChain (managed connection → direct client → snapshot)
//!     ↓
//! normalize (Group == "LSG", numeric/date coercion)
//!     ↓
//! TtlCache (5 min, manual invalidate)
//!     ↓
//! evaluate (status, days old, needs attention)
//!     ↓
//! apply_filters → SummaryMetrics / chart series / table rows
//! ```


pub mod cache;
pub mod config;
pub mod dashboard;
pub mod inventory;
pub mod report;
pub mod source;
pub mod ui;

pub use cache::TtlCache;
pub use config::{Config, ConfigError};
pub use dashboard::{Dashboard, DashboardView, LoadedInventory};
pub use source::{DataSource, FetchError, FetchOutcome, RecordSource, SourceChain};
