//! Raw row normalization
//!
//! Ingestion is best-effort: a field that cannot be coerced becomes `None`
//! and only that field of that row is affected. Nothing here returns an error.

use {
    super::record::*,
    chrono::{DateTime, NaiveDate, NaiveDateTime},
    serde_json::Value,
};

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

// "%m/%d/%y" must precede "%m/%d/%Y": "%Y" would happily read "24" as year 24.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%y", "%m/%d/%Y", "%Y/%m/%d"];

/// Keep LSG rows and coerce their fields
pub fn normalize(raw_records: &[RawRecord]) -> Vec<PlantRecord> {
    let plants: Vec<PlantRecord> = raw_records.iter().filter_map(normalize_row).collect();

    log::debug!(
        "Normalized {} of {} rows (group == {})",
        plants.len(),
        raw_records.len(),
        LSG_GROUP
    );
    plants
}

/// Normalize a single row, or `None` if it is outside the LSG group
pub fn normalize_row(row: &RawRecord) -> Option<PlantRecord> {
    match row.get(COL_GROUP) {
        Some(Value::String(group)) if group == LSG_GROUP => {}
        _ => return None,
    }

    Some(PlantRecord {
        plant_number: row.get(COL_PLANT_NUMBER).and_then(to_numeric),
        group: LSG_GROUP.to_string(),
        genotype: row.get(COL_GENOTYPE).and_then(to_text),
        bench: row.get(COL_BENCH).and_then(to_text),
        origin_date: row.get(COL_ORIGIN_DATE).and_then(to_datetime),
        cutback_date: row.get(COL_CUTBACK_DATE).and_then(to_datetime),
        kill_bench_date: row.get(COL_KILL_BENCH_DATE).and_then(to_datetime),
        termination: row
            .get(COL_TERMINATION)
            .and_then(to_text)
            .filter(|marker| !marker.is_empty()),
        parent_plant: row.get(COL_PARENT_PLANT).and_then(to_text),
        notes: row.get(COL_NOTES).and_then(to_text),
    })
}

/// Numeric coercion: numbers pass through, numeric strings are parsed
pub fn to_numeric(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

/// Date coercion for the accepted textual forms
pub fn to_datetime(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::String(s) => parse_datetime(s),
        _ => None,
    }
}

pub fn parse_datetime(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.naive_local());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

fn to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
