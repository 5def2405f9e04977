//! Upstream column names and the typed inventory record

use chrono::NaiveDateTime;
use serde_json::{Map, Value};

/// One untyped row as returned by the data source
pub type RawRecord = Map<String, Value>;

/// Only rows tagged with this group are part of the inventory view
pub const LSG_GROUP: &str = "LSG";

pub const COL_PLANT_NUMBER: &str = "Plant #";
pub const COL_GROUP: &str = "Group";
pub const COL_GENOTYPE: &str = "Standardized name (2nd tag by CJ)";
pub const COL_BENCH: &str = "Bench #";
pub const COL_ORIGIN_DATE: &str = "Original date (date of soil transplanting from TC or cutting)";
pub const COL_CUTBACK_DATE: &str = "Date cutback";
pub const COL_KILL_BENCH_DATE: &str = "Date to killing bench";
pub const COL_TERMINATION: &str = "Termination date & composite site temp";
pub const COL_PARENT_PLANT: &str = "Parent plant (for cuttings)";
pub const COL_NOTES: &str = "Other notes";

/// A normalized inventory row
///
/// Every field except `group` is best-effort: values that could not be
/// coerced are `None`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlantRecord {
    pub plant_number: Option<f64>,
    pub group: String,
    pub genotype: Option<String>,
    pub bench: Option<String>,
    /// Date of soil transplanting from tissue culture or cutting
    pub origin_date: Option<NaiveDateTime>,
    pub cutback_date: Option<NaiveDateTime>,
    pub kill_bench_date: Option<NaiveDateTime>,
    /// Raw termination marker. It mixes a date with a compost site
    /// temperature, so only its presence is meaningful.
    pub termination: Option<String>,
    pub parent_plant: Option<String>,
    pub notes: Option<String>,
}
