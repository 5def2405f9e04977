//! Lifecycle status, age and attention rules
//!
//! Status is recomputed from presence/absence of three fields on every
//! evaluation; nothing about it is stored. Dates are never compared with
//! each other, so a kill marker always wins over a cutback.

use {
    super::record::PlantRecord,
    chrono::NaiveDateTime,
    serde::Serialize,
    std::{fmt, str::FromStr},
};

const SECONDS_PER_DAY: i64 = 86_400;

/// Plants still active after this many days are flagged for review
pub const ACTIVE_ATTENTION_DAYS: i64 = 60;

/// Cut-back plants older than this many days are flagged for review
pub const CUT_BACK_ATTENTION_DAYS: i64 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PlantStatus {
    #[serde(rename = "Active")]
    Active,
    #[serde(rename = "Cut Back")]
    CutBack,
    #[serde(rename = "Killed")]
    Killed,
}

impl PlantStatus {
    pub const ALL: [PlantStatus; 3] = [PlantStatus::Active, PlantStatus::CutBack, PlantStatus::Killed];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlantStatus::Active => "Active",
            PlantStatus::CutBack => "Cut Back",
            PlantStatus::Killed => "Killed",
        }
    }
}

impl fmt::Display for PlantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlantStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlantStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown status '{}' (expected Active, Cut Back or Killed)", s))
    }
}

/// Which kill marker(s) a record carries
///
/// The table has two independent ways of saying a plant is dead: the date it
/// went to the killing bench, and a termination field that records the date
/// together with the compost site temperature. They are OR-ed for status and
/// kept apart here so rows that fill in both can be spotted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillEvidence {
    KillBench,
    Termination,
    Both,
}

pub fn kill_evidence(record: &PlantRecord) -> Option<KillEvidence> {
    match (record.kill_bench_date.is_some(), record.termination.is_some()) {
        (true, true) => Some(KillEvidence::Both),
        (true, false) => Some(KillEvidence::KillBench),
        (false, true) => Some(KillEvidence::Termination),
        (false, false) => None,
    }
}

pub fn plant_status(record: &PlantRecord) -> PlantStatus {
    if kill_evidence(record).is_some() {
        PlantStatus::Killed
    } else if record.cutback_date.is_some() {
        PlantStatus::CutBack
    } else {
        PlantStatus::Active
    }
}

/// Whole days between `origin` and `now`, floored
///
/// A missing origin counts as 0. Future origins give negative values and
/// are not clamped.
pub fn days_old(origin: Option<NaiveDateTime>, now: NaiveDateTime) -> i64 {
    match origin {
        None => 0,
        Some(origin) => (now - origin).num_seconds().div_euclid(SECONDS_PER_DAY),
    }
}

/// Age thresholds for the review flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttentionPolicy {
    pub active_max_days: i64,
    pub cut_back_max_days: i64,
}

impl Default for AttentionPolicy {
    fn default() -> Self {
        Self {
            active_max_days: ACTIVE_ATTENTION_DAYS,
            cut_back_max_days: CUT_BACK_ATTENTION_DAYS,
        }
    }
}

pub fn needs_attention(record: &PlantRecord, now: NaiveDateTime, policy: &AttentionPolicy) -> bool {
    if record.origin_date.is_none() {
        return false;
    }

    let age = days_old(record.origin_date, now);
    match plant_status(record) {
        PlantStatus::Active => age > policy.active_max_days,
        PlantStatus::CutBack => age > policy.cut_back_max_days,
        PlantStatus::Killed => false,
    }
}

/// A record together with its derived values at a given instant
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatedPlant {
    pub record: PlantRecord,
    pub status: PlantStatus,
    pub days_old: i64,
    pub needs_attention: bool,
}

pub fn evaluate(records: &[PlantRecord], now: NaiveDateTime, policy: &AttentionPolicy) -> Vec<EvaluatedPlant> {
    records
        .iter()
        .map(|record| EvaluatedPlant {
            status: plant_status(record),
            days_old: days_old(record.origin_date, now),
            needs_attention: needs_attention(record, now, policy),
            record: record.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    fn planted(days_ago: i64) -> PlantRecord {
        PlantRecord {
            group: "LSG".to_string(),
            origin_date: Some(now() - Duration::days(days_ago)),
            ..Default::default()
        }
    }

    #[test]
    fn test_status_rules() {
        let mut record = PlantRecord::default();
        assert_eq!(plant_status(&record), PlantStatus::Active);

        record.cutback_date = Some(now());
        assert_eq!(plant_status(&record), PlantStatus::CutBack);

        record.termination = Some("5/30 150F".to_string());
        assert_eq!(plant_status(&record), PlantStatus::Killed);

        record.termination = None;
        record.kill_bench_date = Some(now() - Duration::days(400));
        assert_eq!(plant_status(&record), PlantStatus::Killed);
    }

    #[test]
    fn test_kill_evidence() {
        let mut record = PlantRecord::default();
        assert_eq!(kill_evidence(&record), None);

        record.kill_bench_date = Some(now());
        assert_eq!(kill_evidence(&record), Some(KillEvidence::KillBench));

        record.termination = Some("x".to_string());
        assert_eq!(kill_evidence(&record), Some(KillEvidence::Both));

        record.kill_bench_date = None;
        assert_eq!(kill_evidence(&record), Some(KillEvidence::Termination));
    }

    #[test]
    fn test_days_old() {
        assert_eq!(days_old(None, now()), 0);
        assert_eq!(days_old(Some(now()), now()), 0);
        assert_eq!(days_old(Some(now() - Duration::days(65)), now()), 65);
        // partial days are floored
        assert_eq!(days_old(Some(now() - Duration::hours(47)), now()), 1);
        // future origins go negative, floored like a timedelta
        assert_eq!(days_old(Some(now() + Duration::hours(12)), now()), -1);
        assert_eq!(days_old(Some(now() + Duration::days(3)), now()), -3);
    }

    #[test]
    fn test_attention_thresholds() {
        let policy = AttentionPolicy::default();

        assert!(!needs_attention(&planted(60), now(), &policy));
        assert!(needs_attention(&planted(61), now(), &policy));

        let mut cut = planted(90);
        cut.cutback_date = Some(now() - Duration::days(10));
        assert!(!needs_attention(&cut, now(), &policy));
        cut.origin_date = Some(now() - Duration::days(91));
        assert!(needs_attention(&cut, now(), &policy));

        let mut killed = planted(500);
        killed.kill_bench_date = Some(now());
        assert!(!needs_attention(&killed, now(), &policy));
    }

    #[test]
    fn test_attention_requires_origin_date() {
        let policy = AttentionPolicy {
            active_max_days: -1000,
            cut_back_max_days: -1000,
        };
        let record = PlantRecord {
            cutback_date: Some(now()),
            ..Default::default()
        };
        assert!(!needs_attention(&record, now(), &policy));
        assert!(!needs_attention(&PlantRecord::default(), now(), &policy));
    }

    #[test]
    fn test_custom_policy() {
        let policy = AttentionPolicy {
            active_max_days: 30,
            cut_back_max_days: 45,
        };
        assert!(needs_attention(&planted(31), now(), &policy));
        assert!(!needs_attention(&planted(31), now(), &AttentionPolicy::default()));
    }

    #[test]
    fn test_status_parse_and_display() {
        assert_eq!("Cut Back".parse::<PlantStatus>(), Ok(PlantStatus::CutBack));
        assert_eq!("killed".parse::<PlantStatus>(), Ok(PlantStatus::Killed));
        assert!("Dormant".parse::<PlantStatus>().is_err());
        for status in PlantStatus::ALL {
            assert_eq!(status.to_string().parse::<PlantStatus>(), Ok(status));
        }
    }

    #[test]
    fn test_evaluate() {
        let records = vec![planted(65), PlantRecord::default()];
        let evaluated = evaluate(&records, now(), &AttentionPolicy::default());

        assert_eq!(evaluated.len(), 2);
        assert_eq!(evaluated[0].status, PlantStatus::Active);
        assert_eq!(evaluated[0].days_old, 65);
        assert!(evaluated[0].needs_attention);
        assert_eq!(evaluated[1].days_old, 0);
        assert!(!evaluated[1].needs_attention);
    }
}
