//! Shared fixtures for registry integration tests.

#![allow(dead_code)]

use kmc_registry::kmc_catalog::{
    BudgetUnit, Catalog, DepartmentInfo, DepartmentSeed, FixedPhaseEstimator, LinkageScores,
    LinkageType, MappingValue, PhaseCycle, PhaseStatus, ProgramRecord, StandardMapping,
    ThematicArea, ThematicStandards,
};

/// A mapping whose kind agrees with `score`.
pub fn mapping_for(score: u8, code: &str) -> StandardMapping {
    let text = |s: &str| MappingValue::Text(s.to_string());
    match score {
        0 => StandardMapping {
            direct: text("No"),
            indirect: text(""),
        },
        1..=2 => StandardMapping {
            direct: text(""),
            indirect: text(code),
        },
        _ => StandardMapping {
            direct: text(code),
            indirect: text(""),
        },
    }
}

pub struct Row<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub main: &'a str,
    pub area: &'a str,
    pub phase: &'a str,
    pub progress: u8,
    pub budget: u64,
    pub scores: [u8; 3],
    /// Stored SDG score when it should disagree with the SDG mapping
    pub claimed_sdg: Option<u8>,
    pub linkage_type: LinkageType,
}

impl<'a> Row<'a> {
    pub fn new(id: &'a str, name: &'a str, main: &'a str, area: &'a str, phase: &'a str) -> Self {
        let progress = PhaseCycle::capital_works()
            .get(phase)
            .map(|p| p.range_start)
            .unwrap_or(0);
        Self {
            id,
            name,
            main,
            area,
            phase,
            progress,
            budget: 1000,
            scores: [4, 2, 0],
            claimed_sdg: None,
            linkage_type: LinkageType::Concurrence,
        }
    }

    pub fn budget(mut self, budget: u64) -> Self {
        self.budget = budget;
        self
    }

    pub fn scores(mut self, scores: [u8; 3]) -> Self {
        self.scores = scores;
        self
    }

    pub fn claim_sdg(mut self, score: u8) -> Self {
        self.claimed_sdg = Some(score);
        self
    }

    pub fn progress(mut self, progress: u8) -> Self {
        self.progress = progress;
        self
    }

    pub fn linkage_type(mut self, linkage_type: LinkageType) -> Self {
        self.linkage_type = linkage_type;
        self
    }

    pub fn record(&self) -> ProgramRecord {
        ProgramRecord {
            id: self.id.to_string(),
            department: "Fixture".to_string(),
            sector: "Social Development".to_string(),
            sub_sector: "Fixture".to_string(),
            main_program: self.main.to_string(),
            program_name: self.name.to_string(),
            budget: self.budget,
            budget_code: None,
            sdg: mapping_for(self.scores[0], "3.8"),
            iso37120: mapping_for(self.scores[1], "12.1"),
            sci2025: mapping_for(self.scores[2], "Pillar 4"),
            thematic_area: self.area.to_string(),
            linkage_scores: LinkageScores {
                sdg_score: self.claimed_sdg.unwrap_or(self.scores[0]),
                iso_score: self.scores[1],
                sci_score: self.scores[2],
                linkage_type: self.linkage_type,
            },
            project_phase: Some(PhaseStatus::new(self.phase, self.progress)),
        }
    }
}

pub fn area(id: &str, name: &str) -> ThematicArea {
    ThematicArea {
        id: id.to_string(),
        name: name.to_string(),
        name_np: name.to_string(),
        description: None,
        color: "#3B82F6".to_string(),
        icon: None,
        standards: ThematicStandards::default(),
    }
}

/// A capital-works department catalog with budgets in `unit`.
pub fn catalog(id: &str, unit: BudgetUnit, rows: &[Row<'_>]) -> Catalog {
    let seed = DepartmentSeed {
        department: DepartmentInfo {
            id: id.to_string(),
            name: id.to_string(),
            name_np: id.to_string(),
            budget_unit: unit,
            version: "fixture".to_string(),
        },
        phases: PhaseCycle::capital_works().phases().to_vec(),
        thematic_areas: vec![
            area("health-treatment", "Health Treatment"),
            area("physical-infrastructure", "Physical Infrastructure"),
        ],
        indicators: vec![],
        programs: rows.iter().map(Row::record).collect(),
    };
    Catalog::assemble(seed, &mut FixedPhaseEstimator::cycle_start()).expect("fixture catalog")
}

/// The two-program catalog used for search semantics.
pub fn vaccine_and_road() -> Catalog {
    catalog(
        "fixture",
        BudgetUnit::Rupee,
        &[
            Row::new(
                "p-1",
                "Vaccine Drive",
                "Community Health",
                "health-treatment",
                "completion",
            ),
            Row::new("p-2", "Road Repair", "Infra", "physical-infrastructure", "tender"),
        ],
    )
}
