//! Headline figures for a department or a filtered view of one.

use serde::Serialize;

use kmc_catalog::{Catalog, Money, Program, Standard};

use crate::aggregate::{self, Average};

/// Figures shown on a department's stats cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrySummary {
    pub department: String,
    pub total_programs: usize,
    pub total_budget: Money,
    /// Two-level mean of the three standard scores
    pub average_linkage: Average,
    /// Same, weighted by linkage type
    pub weighted_linkage: Average,
    pub average_progress: Average,
    pub thematic_areas: usize,
    /// Programs with a populated direct SDG reference
    pub direct_sdg_links: usize,
}

impl RegistrySummary {
    /// Summarize `programs`, which may be the whole catalog or a filtered
    /// subset of it.
    pub fn from_programs<'a>(
        catalog: &Catalog,
        programs: impl IntoIterator<Item = &'a Program>,
    ) -> Self {
        let programs: Vec<&Program> = programs.into_iter().collect();
        Self {
            department: catalog.id().to_string(),
            total_programs: programs.len(),
            total_budget: aggregate::total_budget(programs.iter().copied()),
            average_linkage: aggregate::average_overall_linkage(programs.iter().copied()),
            weighted_linkage: aggregate::weighted_average_linkage(programs.iter().copied()),
            average_progress: aggregate::average_progress(programs.iter().copied()),
            thematic_areas: catalog.thematic_areas().len(),
            direct_sdg_links: aggregate::count_direct_links(programs.iter().copied(), Standard::Sdg),
        }
    }

    /// Summary of a whole catalog.
    pub fn for_catalog(catalog: &Catalog) -> Self {
        Self::from_programs(catalog, catalog.all_programs())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
