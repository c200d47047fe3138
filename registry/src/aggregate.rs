//! Aggregation Engine: summary statistics over a program sequence.
//!
//! Every function takes either a full catalog's programs or a query result and
//! is pure. Empty input yields neutral values: zero for sums and counts,
//! [`Average::NoData`] for means. NaN and infinity never escape.
//!
//! Grouped results are `(key, value)` vectors in first-appearance order so
//! reports are deterministic.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use kmc_catalog::{Catalog, LinkageType, MappingValue, Money, PhaseCycle, Program, Standard};

/// The mean of a possibly-empty set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Average {
    /// The set was empty
    NoData,
    Value(f64),
}

impl Average {
    /// `sum / count`, or `NoData` when there is nothing to divide by.
    pub fn of(sum: f64, count: f64) -> Self {
        if count > 0.0 && sum.is_finite() {
            Self::Value(sum / count)
        } else {
            Self::NoData
        }
    }

    /// Mean of `values`.
    pub fn mean(values: impl IntoIterator<Item = f64>) -> Self {
        let (sum, count) = values
            .into_iter()
            .fold((0.0, 0.0), |(sum, count), v| (sum + v, count + 1.0));
        Self::of(sum, count)
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Self::NoData => None,
            Self::Value(v) => Some(*v),
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData)
    }

    pub fn unwrap_or(&self, default: f64) -> f64 {
        self.value().unwrap_or(default)
    }
}

impl fmt::Display for Average {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoData => f.write_str("no data"),
            Self::Value(v) => write!(f, "{v:.2}"),
        }
    }
}

/// Sum of normalized budgets.
pub fn total_budget<'a>(programs: impl IntoIterator<Item = &'a Program>) -> Money {
    programs.into_iter().map(|p| p.budget()).sum()
}

/// Mean score for one standard.
pub fn average_linkage<'a>(
    programs: impl IntoIterator<Item = &'a Program>,
    standard: Standard,
) -> Average {
    Average::mean(
        programs
            .into_iter()
            .map(|p| f64::from(p.linkage_scores().score(standard))),
    )
}

/// Two-level mean: each program's mean of its three scores, then the mean of
/// those across programs.
pub fn average_overall_linkage<'a>(programs: impl IntoIterator<Item = &'a Program>) -> Average {
    Average::mean(programs.into_iter().map(|p| p.linkage_scores().mean()))
}

/// Program means weighted by their linkage-type multiplier.
pub fn weighted_average_linkage<'a>(programs: impl IntoIterator<Item = &'a Program>) -> Average {
    let (weighted, weights) = programs.into_iter().fold((0.0, 0.0), |(sum, total), p| {
        let m = p.linkage_type().multiplier();
        (sum + p.linkage_scores().mean() * m, total + m)
    });
    Average::of(weighted, weights)
}

/// Mean of phase progress.
pub fn average_progress<'a>(programs: impl IntoIterator<Item = &'a Program>) -> Average {
    Average::mean(
        programs
            .into_iter()
            .map(|p| f64::from(p.project_phase().progress)),
    )
}

/// Program count per thematic area id. Unknown ids count under the raw id.
pub fn count_by_thematic_area<'a>(
    programs: impl IntoIterator<Item = &'a Program>,
) -> Vec<(String, usize)> {
    let mut groups = Grouping::new();
    for program in programs {
        *groups.entry(program.thematic_area()) += 1;
    }
    groups.into_vec()
}

/// Budget total per thematic area id.
pub fn budget_by_thematic_area<'a>(
    programs: impl IntoIterator<Item = &'a Program>,
) -> Vec<(String, Money)> {
    let mut groups = Grouping::new();
    for program in programs {
        *groups.entry(program.thematic_area()) += program.budget();
    }
    groups.into_vec()
}

/// Programs per raw direct-mapping value for one standard.
///
/// A text field is one key even when it lists several codes
/// (`"12.3,12.5,12.6"` is counted once, as itself). A list field counts each
/// populated element. Sentinel values are skipped.
pub fn count_by_standard_code<'a>(
    programs: impl IntoIterator<Item = &'a Program>,
    standard: Standard,
) -> Vec<(String, usize)> {
    let mut groups = Grouping::new();
    for program in programs {
        let direct: &MappingValue = &program.mapping(standard).direct;
        for code in direct.entries() {
            *groups.entry(code) += 1;
        }
    }
    groups.into_vec()
}

/// Programs whose mappings mention `code` anywhere, by substring.
pub fn related_programs<'a>(programs: impl IntoIterator<Item = &'a Program>, code: &str) -> usize {
    programs
        .into_iter()
        .filter(|p| p.mentions_code(code))
        .count()
}

/// Programs with a populated direct reference for `standard`.
pub fn count_direct_links<'a>(
    programs: impl IntoIterator<Item = &'a Program>,
    standard: Standard,
) -> usize {
    programs
        .into_iter()
        .filter(|p| p.mapping(standard).direct.is_populated())
        .count()
}

/// Programs per linkage type, weakest first, including empty types.
pub fn count_by_linkage_type<'a>(
    programs: impl IntoIterator<Item = &'a Program>,
) -> Vec<(LinkageType, usize)> {
    let mut counts = LinkageType::all().map(|t| (t, 0usize));
    for program in programs {
        if let Some((_, count)) = counts.iter_mut().find(|(t, _)| *t == program.linkage_type()) {
            *count += 1;
        }
    }
    counts.to_vec()
}

/// Program count per phase in lifecycle order, including empty phases.
///
/// Phases outside the cycle follow in first-appearance order.
pub fn phase_distribution<'a>(
    cycle: &PhaseCycle,
    programs: impl IntoIterator<Item = &'a Program>,
) -> Vec<(String, usize)> {
    let mut groups = Grouping::new();
    for phase in cycle.phases() {
        groups.entry(&phase.value);
    }
    for program in programs {
        *groups.entry(&program.project_phase().phase) += 1;
    }
    groups.into_vec()
}

/// Program names sharing an identical budget, in first-appearance order.
pub fn programs_by_budget<'a>(
    programs: impl IntoIterator<Item = &'a Program>,
) -> Vec<(Money, Vec<String>)> {
    let mut groups: Vec<(Money, Vec<String>)> = Vec::new();
    for program in programs {
        let name = program.program_name().to_string();
        match groups.iter_mut().find(|(budget, _)| *budget == program.budget()) {
            Some((_, names)) => names.push(name),
            None => groups.push((program.budget(), vec![name])),
        }
    }
    groups
}

/// Per-area figures for the thematic overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThematicAreaStats {
    pub area_id: String,
    /// Area name, or the raw id when the area does not resolve
    pub name: String,
    pub program_count: usize,
    pub total_budget: Money,
    pub average_sdg: Average,
    pub average_iso: Average,
    pub average_sci: Average,
}

/// Statistics for every catalog area (catalog order), then for any unknown
/// area ids the programs reference.
pub fn thematic_area_stats<'a>(
    catalog: &Catalog,
    programs: impl IntoIterator<Item = &'a Program>,
) -> Vec<ThematicAreaStats> {
    let mut groups: Grouping<Vec<&Program>> = Grouping::new();
    for area in catalog.thematic_areas() {
        groups.entry(&area.id);
    }
    for program in programs {
        groups.entry(program.thematic_area()).push(program);
    }

    groups
        .into_vec()
        .into_iter()
        .map(|(area_id, members)| ThematicAreaStats {
            name: catalog.thematic_area_name(&area_id).to_string(),
            program_count: members.len(),
            total_budget: total_budget(members.iter().copied()),
            average_sdg: average_linkage(members.iter().copied(), Standard::Sdg),
            average_iso: average_linkage(members.iter().copied(), Standard::Iso37120),
            average_sci: average_linkage(members.iter().copied(), Standard::Sci2025),
            area_id,
        })
        .collect()
}

/// Insertion-ordered accumulator keyed by string.
struct Grouping<T> {
    index: HashMap<String, usize>,
    entries: Vec<(String, T)>,
}

impl<T: Default> Grouping<T> {
    fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    fn entry(&mut self, key: &str) -> &mut T {
        let position = match self.index.get(key) {
            Some(&position) => position,
            None => {
                self.entries.push((key.to_string(), T::default()));
                self.index.insert(key.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[position].1
    }

    fn into_vec(self) -> Vec<(String, T)> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_guards_empty() {
        assert_eq!(Average::mean(std::iter::empty()), Average::NoData);
        assert_eq!(Average::of(0.0, 0.0), Average::NoData);
        assert_eq!(Average::of(f64::INFINITY, 2.0), Average::NoData);
        assert_eq!(Average::mean([2.0, 4.0]), Average::Value(3.0));
    }

    #[test]
    fn test_average_display() {
        assert_eq!(Average::NoData.to_string(), "no data");
        assert_eq!(Average::Value(3.166_666).to_string(), "3.17");
    }

    #[test]
    fn test_average_serializes_no_data_as_null() {
        assert_eq!(serde_json::to_string(&Average::NoData).unwrap(), "null");
        assert_eq!(serde_json::to_string(&Average::Value(1.5)).unwrap(), "1.5");
    }

    #[test]
    fn test_empty_inputs() {
        let none: [Program; 0] = [];
        assert!(total_budget(&none).is_zero());
        assert!(average_progress(&none).is_no_data());
        assert!(average_linkage(&none, Standard::Sdg).is_no_data());
        assert!(average_overall_linkage(&none).is_no_data());
        assert!(weighted_average_linkage(&none).is_no_data());
        assert!(count_by_thematic_area(&none).is_empty());
        assert!(count_by_standard_code(&none, Standard::Sdg).is_empty());
        assert_eq!(related_programs(&none, "3.8"), 0);
        assert_eq!(
            count_by_linkage_type(&none),
            LinkageType::all().map(|t| (t, 0)).to_vec()
        );
    }

    #[test]
    fn test_phase_distribution_empty_keeps_cycle() {
        let none: [Program; 0] = [];
        let distribution = phase_distribution(&PhaseCycle::disaster_response(), &none);
        let phases: Vec<&str> = distribution.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(phases, ["planning", "preparedness", "response", "recovery"]);
        assert!(distribution.iter().all(|(_, count)| *count == 0));
    }

    #[test]
    fn test_grouping_keeps_first_appearance() {
        let mut groups: Grouping<usize> = Grouping::new();
        *groups.entry("b") += 1;
        *groups.entry("a") += 1;
        *groups.entry("b") += 1;
        assert_eq!(
            groups.into_vec(),
            vec![("b".to_string(), 2), ("a".to_string(), 1)]
        );
    }
}
