//! Aggregates over a (filtered) set of evaluated plants
//!
//! All reductions are recomputed from scratch on every call; there is no
//! incremental bookkeeping to drift out of sync with the filtered set.

use {
    super::status::{EvaluatedPlant, PlantStatus},
    serde::Serialize,
    std::collections::{BTreeMap, BTreeSet, HashMap},
};

/// Number of genotypes shown in the distribution chart
pub const GENOTYPE_CHART_LIMIT: usize = 15;

/// Column headers of the detail table, in display order
pub const TABLE_COLUMNS: [&str; 8] = [
    "Plant #",
    "Genotype",
    "Bench",
    "Plant Date",
    "Status",
    "Days Old",
    "Parent Plant",
    "Notes",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SummaryMetrics {
    pub total_plants: usize,
    /// Distinct non-null genotype labels
    pub unique_genotypes: usize,
    pub active_plants: usize,
    pub killed_plants: usize,
    pub cut_back_plants: usize,
    pub attention_plants: usize,
}

impl SummaryMetrics {
    pub fn from_plants(plants: &[EvaluatedPlant]) -> Self {
        let count_status = |status: PlantStatus| plants.iter().filter(|p| p.status == status).count();

        Self {
            total_plants: plants.len(),
            unique_genotypes: plants
                .iter()
                .filter_map(|p| p.record.genotype.as_deref())
                .collect::<BTreeSet<_>>()
                .len(),
            active_plants: count_status(PlantStatus::Active),
            killed_plants: count_status(PlantStatus::Killed),
            cut_back_plants: count_status(PlantStatus::CutBack),
            attention_plants: plants.iter().filter(|p| p.needs_attention).count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenotypeCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: PlantStatus,
    pub count: usize,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BenchCount {
    pub bench: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyPlanting {
    /// `YYYY-MM`
    pub month: String,
    pub count: usize,
}

pub fn status_color(status: PlantStatus) -> &'static str {
    match status {
        PlantStatus::Active => "#28a745",
        PlantStatus::CutBack => "#ffc107",
        PlantStatus::Killed => "#dc3545",
    }
}

/// Most common genotypes, largest first (ties by name), capped at 15
pub fn genotype_distribution(plants: &[EvaluatedPlant]) -> Vec<GenotypeCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for genotype in plants.iter().filter_map(|p| p.record.genotype.as_deref()) {
        *counts.entry(genotype).or_default() += 1;
    }

    let mut distribution: Vec<GenotypeCount> = counts
        .into_iter()
        .map(|(name, count)| GenotypeCount {
            name: name.to_string(),
            count,
        })
        .collect();
    distribution.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    distribution.truncate(GENOTYPE_CHART_LIMIT);
    distribution
}

/// Count per status present in the set, largest first
pub fn status_distribution(plants: &[EvaluatedPlant]) -> Vec<StatusCount> {
    let mut distribution: Vec<StatusCount> = PlantStatus::ALL
        .into_iter()
        .map(|status| StatusCount {
            status,
            count: plants.iter().filter(|p| p.status == status).count(),
            color: status_color(status),
        })
        .filter(|entry| entry.count > 0)
        .collect();
    // stable sort keeps Active, Cut Back, Killed order on ties
    distribution.sort_by(|a, b| b.count.cmp(&a.count));
    distribution
}

/// Count per bench; integer-like benches first in numeric order, then the rest lexically
pub fn bench_distribution(plants: &[EvaluatedPlant]) -> Vec<BenchCount> {
    let mut counts: BTreeMap<(Option<i64>, &str), usize> = BTreeMap::new();
    for bench in plants.iter().filter_map(|p| p.record.bench.as_deref()) {
        let numeric = bench.trim().parse::<i64>().ok();
        *counts.entry((numeric, bench)).or_default() += 1;
    }

    let (numeric, named): (Vec<_>, Vec<_>) = counts.into_iter().partition(|((n, _), _)| n.is_some());
    numeric
        .into_iter()
        .chain(named)
        .map(|((_, bench), count)| BenchCount {
            bench: bench.to_string(),
            count,
        })
        .collect()
}

/// Plants per planting month, oldest first; rows without an origin date are skipped
pub fn planting_timeline(plants: &[EvaluatedPlant]) -> Vec<MonthlyPlanting> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for origin in plants.iter().filter_map(|p| p.record.origin_date) {
        *counts.entry(origin.format("%Y-%m").to_string()).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(month, count)| MonthlyPlanting { month, count })
        .collect()
}

/// One row of the detail table, with display column names
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryRow {
    #[serde(rename = "Plant #")]
    pub plant_number: String,
    #[serde(rename = "Genotype")]
    pub genotype: String,
    #[serde(rename = "Bench")]
    pub bench: String,
    #[serde(rename = "Plant Date")]
    pub plant_date: String,
    #[serde(rename = "Status")]
    pub status: PlantStatus,
    #[serde(rename = "Days Old")]
    pub days_old: i64,
    #[serde(rename = "Parent Plant")]
    pub parent_plant: String,
    #[serde(rename = "Notes")]
    pub notes: String,
}

impl InventoryRow {
    pub fn from_plant(plant: &EvaluatedPlant) -> Self {
        let record = &plant.record;
        Self {
            plant_number: record.plant_number.map(format_plant_number).unwrap_or_default(),
            genotype: record.genotype.clone().unwrap_or_default(),
            bench: record.bench.clone().unwrap_or_default(),
            plant_date: record
                .origin_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            status: plant.status,
            days_old: plant.days_old,
            parent_plant: record.parent_plant.clone().unwrap_or_default(),
            notes: record.notes.clone().unwrap_or_default(),
        }
    }

    /// Cell texts in `TABLE_COLUMNS` order
    pub fn cells(&self) -> [String; 8] {
        [
            self.plant_number.clone(),
            self.genotype.clone(),
            self.bench.clone(),
            self.plant_date.clone(),
            self.status.to_string(),
            self.days_old.to_string(),
            self.parent_plant.clone(),
            self.notes.clone(),
        ]
    }
}

pub fn table_rows(plants: &[EvaluatedPlant]) -> Vec<InventoryRow> {
    plants.iter().map(InventoryRow::from_plant).collect()
}

/// Plant numbers are numeric upstream; show whole numbers without a fraction
pub fn format_plant_number(number: f64) -> String {
    if number.fract() == 0.0 && number.abs() < 1e15 {
        format!("{}", number as i64)
    } else {
        format!("{}", number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::record::PlantRecord;
    use chrono::NaiveDate;

    fn plant(genotype: Option<&str>, status: PlantStatus, bench: Option<&str>) -> EvaluatedPlant {
        EvaluatedPlant {
            record: PlantRecord {
                group: "LSG".to_string(),
                genotype: genotype.map(str::to_string),
                bench: bench.map(str::to_string),
                ..Default::default()
            },
            status,
            days_old: 0,
            needs_attention: false,
        }
    }

    #[test]
    fn test_summary_metrics() {
        let mut plants = vec![
            plant(Some("G1"), PlantStatus::Active, None),
            plant(Some("G1"), PlantStatus::Killed, None),
            plant(Some("G2"), PlantStatus::CutBack, None),
            plant(None, PlantStatus::Active, None),
        ];
        plants[0].needs_attention = true;

        let metrics = SummaryMetrics::from_plants(&plants);
        assert_eq!(
            metrics,
            SummaryMetrics {
                total_plants: 4,
                unique_genotypes: 2,
                active_plants: 2,
                killed_plants: 1,
                cut_back_plants: 1,
                attention_plants: 1,
            }
        );
        assert_eq!(SummaryMetrics::from_plants(&[]), SummaryMetrics::default());
    }

    #[test]
    fn test_genotype_distribution_order_and_limit() {
        let mut plants = Vec::new();
        for i in 0..20 {
            for _ in 0..=(i % 3) {
                plants.push(plant(Some(&format!("G{:02}", i)), PlantStatus::Active, None));
            }
        }
        plants.push(plant(None, PlantStatus::Active, None));

        let distribution = genotype_distribution(&plants);
        assert_eq!(distribution.len(), GENOTYPE_CHART_LIMIT);
        assert_eq!(distribution[0], GenotypeCount { name: "G02".to_string(), count: 3 });
        assert_eq!(distribution[1].name, "G05");
        assert!(distribution.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn test_status_distribution() {
        let plants = vec![
            plant(None, PlantStatus::Killed, None),
            plant(None, PlantStatus::Killed, None),
            plant(None, PlantStatus::Active, None),
        ];
        let distribution = status_distribution(&plants);
        assert_eq!(distribution.len(), 2);
        assert_eq!(distribution[0].status, PlantStatus::Killed);
        assert_eq!(distribution[0].count, 2);
        assert_eq!(distribution[0].color, "#dc3545");
        assert_eq!(distribution[1].status, PlantStatus::Active);
        assert!(status_distribution(&[]).is_empty());
    }

    #[test]
    fn test_bench_distribution_ordering() {
        let plants = vec![
            plant(None, PlantStatus::Active, Some("10")),
            plant(None, PlantStatus::Active, Some("9")),
            plant(None, PlantStatus::Active, Some("Quarantine")),
            plant(None, PlantStatus::Active, Some("10")),
            plant(None, PlantStatus::Active, Some("A2")),
            plant(None, PlantStatus::Active, None),
        ];

        let benches: Vec<(String, usize)> = bench_distribution(&plants)
            .into_iter()
            .map(|b| (b.bench, b.count))
            .collect();
        assert_eq!(
            benches,
            vec![
                ("9".to_string(), 1),
                ("10".to_string(), 2),
                ("A2".to_string(), 1),
                ("Quarantine".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_planting_timeline() {
        let dated = |y, m, d| {
            let mut p = plant(None, PlantStatus::Active, None);
            p.record.origin_date = NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0);
            p
        };
        let plants = vec![
            dated(2024, 3, 2),
            dated(2023, 11, 30),
            dated(2024, 3, 28),
            plant(None, PlantStatus::Active, None),
        ];

        let timeline = planting_timeline(&plants);
        assert_eq!(
            timeline,
            vec![
                MonthlyPlanting { month: "2023-11".to_string(), count: 1 },
                MonthlyPlanting { month: "2024-03".to_string(), count: 2 },
            ]
        );
    }

    #[test]
    fn test_table_projection() {
        let mut p = plant(Some("Blue Dream"), PlantStatus::CutBack, Some("4"));
        p.record.plant_number = Some(112.0);
        p.record.origin_date = NaiveDate::from_ymd_opt(2024, 1, 9).unwrap().and_hms_opt(0, 0, 0);
        p.record.parent_plant = Some("#98".to_string());
        p.days_old = 40;

        let row = InventoryRow::from_plant(&p);
        assert_eq!(
            row.cells(),
            [
                "112".to_string(),
                "Blue Dream".to_string(),
                "4".to_string(),
                "2024-01-09".to_string(),
                "Cut Back".to_string(),
                "40".to_string(),
                "#98".to_string(),
                String::new(),
            ]
        );

        let json = serde_json::to_value(&row).unwrap();
        for column in TABLE_COLUMNS {
            assert!(json.get(column).is_some(), "missing column {}", column);
        }
        assert_eq!(json["Status"], "Cut Back");
    }

    #[test]
    fn test_format_plant_number() {
        assert_eq!(format_plant_number(7.0), "7");
        assert_eq!(format_plant_number(7.5), "7.5");
    }
}
