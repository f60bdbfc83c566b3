use crate::csv_reader::Publication;

use std::collections::BTreeMap;

/// Per-year sums of the three technique indicators.
///
/// Categories are not mutually exclusive: a paper counted under several
/// techniques contributes to each of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TechniqueCounts {
    pub image_processing: u64,
    pub machine_learning: u64,
    pub deep_learning: u64,
}

impl TechniqueCounts {
    pub fn total(&self) -> u64 {
        self.image_processing + self.machine_learning + self.deep_learning
    }
}

/// Aggregated technique counts keyed by publication year, ordered ascending.
/// Years with no publications are simply absent.
pub type YearlyCounts = BTreeMap<i32, TechniqueCounts>;

/// Each technique's share of the grand total across all techniques and
/// years, in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TechniqueShares {
    pub image_processing: f64,
    pub machine_learning: f64,
    pub deep_learning: f64,
}

/// Group publications by year and sum the indicator columns.
pub fn aggregate_by_year(publications: &[Publication]) -> YearlyCounts {
    let mut table = YearlyCounts::new();
    for p in publications {
        let counts = table.entry(p.year).or_default();
        counts.image_processing += p.image_processing;
        counts.machine_learning += p.machine_learning;
        counts.deep_learning += p.deep_learning;
    }
    table
}

/// Restrict the table to years at or after `year`.
pub fn filter_after_year(table: &YearlyCounts, year: i32) -> YearlyCounts {
    table
        .iter()
        .filter(|&(&y, _)| y >= year)
        .map(|(&y, &c)| (y, c))
        .collect()
}

/// Share of each technique of the total cell-sum over all techniques and
/// all years in the table. An empty table yields all-zero shares.
pub fn percentages(table: &YearlyCounts) -> TechniqueShares {
    let ip: u64 = table.values().map(|c| c.image_processing).sum();
    let ml: u64 = table.values().map(|c| c.machine_learning).sum();
    let dl: u64 = table.values().map(|c| c.deep_learning).sum();
    let total = ip + ml + dl;

    if total == 0 {
        return TechniqueShares {
            image_processing: 0.0,
            machine_learning: 0.0,
            deep_learning: 0.0,
        };
    }

    let denom = total as f64;
    TechniqueShares {
        image_processing: ip as f64 / denom * 100.0,
        machine_learning: ml as f64 / denom * 100.0,
        deep_learning: dl as f64 / denom * 100.0,
    }
}
