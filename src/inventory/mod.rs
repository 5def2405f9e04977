//! Plant inventory core: typed records, lifecycle rules, filters and aggregates
//!
//! Everything in here is pure: no I/O, no clocks. Callers pass `now`
//! explicitly so derivations are reproducible in tests.
//!
//! ## Module Organization
//!
//! - `record` - Column names and the typed `PlantRecord`
//! - `normalizer` - Raw row → `PlantRecord` coercion and LSG group filter
//! - `status` - Lifecycle status, age and attention flag
//! - `filters` - Categorical filters and their option lists
//! - `metrics` - Summary counts, chart series and table projection

pub mod filters;
pub mod metrics;
pub mod normalizer;
pub mod record;
pub mod status;

pub use filters::{apply_filters, FilterOptions, FilterSelection, Selection};
pub use metrics::{InventoryRow, SummaryMetrics};
pub use normalizer::normalize;
pub use record::{PlantRecord, RawRecord};
pub use status::{
    days_old, evaluate, kill_evidence, needs_attention, plant_status, AttentionPolicy, EvaluatedPlant,
    KillEvidence, PlantStatus,
};
