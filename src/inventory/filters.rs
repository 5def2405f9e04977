//! Categorical filters over evaluated plants
//!
//! Three independent single-select dimensions (genotype, status, bench),
//! combined as an exact-match AND. `All` leaves a dimension unconstrained.

use {
    super::status::{EvaluatedPlant, PlantStatus},
    std::{collections::BTreeSet, fmt, str::FromStr},
};

/// Sentinel shown (and accepted) for "no constraint"
pub const ALL_SENTINEL: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    pub fn matches(&self, value: Option<&T>) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => value == Some(wanted),
        }
    }
}

impl<T: Clone + PartialEq> Selection<T> {
    /// Step to the next choice in `All, options[0], options[1], ...`, wrapping
    /// back to `All`. A selection no longer present in `options` restarts at `All`.
    pub fn next_in(&self, options: &[T]) -> Selection<T> {
        let next_index = match self {
            Selection::All => 0,
            Selection::Only(current) => match options.iter().position(|o| o == current) {
                Some(index) => index + 1,
                None => return Selection::All,
            },
        };
        options
            .get(next_index)
            .cloned()
            .map(Selection::Only)
            .unwrap_or(Selection::All)
    }
}

impl<T: FromStr> Selection<T> {
    /// Parse a user-supplied value; the `All` sentinel (or blank) means unconstrained
    pub fn parse(input: &str) -> Result<Self, T::Err> {
        let input = input.trim();
        if input.is_empty() || input == ALL_SENTINEL {
            Ok(Selection::All)
        } else {
            input.parse().map(Selection::Only)
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str(ALL_SENTINEL),
            Selection::Only(value) => write!(f, "{}", value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSelection {
    pub genotype: Selection<String>,
    pub status: Selection<PlantStatus>,
    pub bench: Selection<String>,
}

impl FilterSelection {
    pub fn matches(&self, plant: &EvaluatedPlant) -> bool {
        self.genotype.matches(plant.record.genotype.as_ref())
            && self.status.matches(Some(&plant.status))
            && self.bench.matches(plant.record.bench.as_ref())
    }

    pub fn is_unfiltered(&self) -> bool {
        *self == FilterSelection::default()
    }
}

pub fn apply_filters(plants: &[EvaluatedPlant], filters: &FilterSelection) -> Vec<EvaluatedPlant> {
    plants
        .iter()
        .filter(|plant| filters.matches(plant))
        .cloned()
        .collect()
}

/// Choices offered for each dimension, excluding the leading `All`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterOptions {
    pub genotypes: Vec<String>,
    pub statuses: Vec<PlantStatus>,
    pub benches: Vec<String>,
}

impl FilterOptions {
    /// Sorted distinct non-null values of the unfiltered set
    pub fn from_plants(plants: &[EvaluatedPlant]) -> Self {
        let genotypes: BTreeSet<&String> = plants.iter().filter_map(|p| p.record.genotype.as_ref()).collect();
        let statuses: BTreeSet<PlantStatus> = plants.iter().map(|p| p.status).collect();
        let benches: BTreeSet<&String> = plants.iter().filter_map(|p| p.record.bench.as_ref()).collect();

        Self {
            genotypes: genotypes.into_iter().cloned().collect(),
            statuses: statuses.into_iter().collect(),
            benches: benches.into_iter().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::record::PlantRecord;

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

    fn sample() -> Vec<EvaluatedPlant> {
        vec![
            plant(Some("G1"), PlantStatus::Active, Some("B1")),
            plant(Some("G1"), PlantStatus::Killed, Some("B1")),
            plant(Some("G2"), PlantStatus::Active, Some("B1")),
            plant(Some("G1"), PlantStatus::Active, Some("B2")),
            plant(None, PlantStatus::CutBack, None),
        ]
    }

    #[test]
    fn test_all_is_unconstrained() {
        let plants = sample();
        let filters = FilterSelection::default();
        assert!(filters.is_unfiltered());
        assert_eq!(apply_filters(&plants, &filters), plants);
    }

    #[test]
    fn test_conjunction() {
        let plants = sample();
        let filters = FilterSelection {
            genotype: Selection::Only("G1".to_string()),
            status: Selection::Only(PlantStatus::Active),
            bench: Selection::Only("B1".to_string()),
        };

        let filtered = apply_filters(&plants, &filters);
        assert_eq!(filtered, vec![plants[0].clone()]);
    }

    #[test]
    fn test_null_values_never_match_a_constraint() {
        let plants = sample();
        let filters = FilterSelection {
            bench: Selection::Only("".to_string()),
            ..Default::default()
        };
        assert!(apply_filters(&plants, &filters).is_empty());
    }

    #[test]
    fn test_empty_inputs() {
        let filters = FilterSelection {
            genotype: Selection::Only("G9".to_string()),
            ..Default::default()
        };
        assert!(apply_filters(&[], &filters).is_empty());
        assert!(apply_filters(&sample(), &filters).is_empty());
    }

    #[test]
    fn test_selection_parse() {
        assert_eq!(Selection::<String>::parse("All"), Ok(Selection::All));
        assert_eq!(Selection::<String>::parse(" "), Ok(Selection::All));
        assert_eq!(
            Selection::<String>::parse("Blue Dream"),
            Ok(Selection::Only("Blue Dream".to_string()))
        );
        assert_eq!(
            Selection::<PlantStatus>::parse("Cut Back"),
            Ok(Selection::Only(PlantStatus::CutBack))
        );
        assert!(Selection::<PlantStatus>::parse("Composted").is_err());
        assert_eq!(Selection::<PlantStatus>::Only(PlantStatus::CutBack).to_string(), "Cut Back");
        assert_eq!(Selection::<String>::All.to_string(), "All");
    }

    #[test]
    fn test_next_in_cycles_through_options() {
        let options = vec!["B1".to_string(), "B2".to_string()];
        let first = Selection::All.next_in(&options);
        assert_eq!(first, Selection::Only("B1".to_string()));
        let second = first.next_in(&options);
        assert_eq!(second, Selection::Only("B2".to_string()));
        assert_eq!(second.next_in(&options), Selection::All);

        let stale = Selection::Only("B9".to_string());
        assert_eq!(stale.next_in(&options), Selection::All);
        assert_eq!(Selection::<String>::All.next_in(&[]), Selection::All);
    }

    #[test]
    fn test_filter_options() {
        let options = FilterOptions::from_plants(&sample());
        assert_eq!(options.genotypes, vec!["G1", "G2"]);
        assert_eq!(
            options.statuses,
            vec![PlantStatus::Active, PlantStatus::CutBack, PlantStatus::Killed]
        );
        assert_eq!(options.benches, vec!["B1", "B2"]);
    }
}
