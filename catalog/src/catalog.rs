//! Department catalog assembly.
//!
//! A [`Catalog`] is built once from a [`DepartmentSeed`] and is immutable
//! afterwards. Assembly validates the phase table, normalizes budgets,
//! resolves every program's phase, derives indicator coverage and collects
//! data-quality warnings without rejecting the records that caused them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[cfg(feature = "typescript")]
use ts_rs::TS;

use crate::linkage;
use crate::money::{BudgetUnit, Money};
use crate::phase::{PhaseCycle, PhaseDefinition, PhaseEstimator, PhaseViolation};
use crate::types::*;

/// Department header of a seed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct DepartmentInfo {
    /// Key the catalog is registered under
    pub id: String,
    pub name: String,
    pub name_np: String,
    /// Unit the seed's `budget` fields are expressed in
    #[serde(default)]
    pub budget_unit: BudgetUnit,
    /// Seed data version, e.g. fiscal year plus revision
    pub version: String,
}

/// Everything one department file holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentSeed {
    pub department: DepartmentInfo,
    pub phases: Vec<PhaseDefinition>,
    #[serde(default)]
    pub thematic_areas: Vec<ThematicArea>,
    #[serde(default)]
    pub indicators: Vec<Indicator>,
    #[serde(default)]
    pub programs: Vec<ProgramRecord>,
}

/// An assembled, read-only department catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    department: DepartmentInfo,
    phase_cycle: PhaseCycle,
    thematic_areas: Vec<ThematicArea>,
    indicators: Vec<IndicatorView>,
    programs: Vec<Program>,
    index: HashMap<String, usize>,
    warnings: Vec<CatalogWarning>,
    fingerprint: String,
}

impl Catalog {
    /// Assemble a catalog from seed data.
    ///
    /// Recorded phases are kept as-is; `estimator` is only consulted for
    /// programs without one. Fails on a malformed phase table or duplicate
    /// program ids. Inconsistent scores, out-of-band progress and unknown
    /// thematic areas become warnings.
    pub fn assemble(seed: DepartmentSeed, estimator: &mut dyn PhaseEstimator) -> Result<Self> {
        let DepartmentSeed {
            department,
            phases,
            thematic_areas,
            indicators,
            programs: records,
        } = seed;

        let phase_cycle = PhaseCycle::new(phases)?;

        let mut programs: Vec<Program> = Vec::with_capacity(records.len());
        let mut index = HashMap::with_capacity(records.len());
        let mut warnings = Vec::new();

        for record in records {
            if index.contains_key(&record.id) {
                return Err(CatalogError::DuplicateProgram {
                    department: department.id.clone(),
                    id: record.id,
                });
            }

            warnings.extend(linkage::audit_program(&record));

            if !thematic_areas.iter().any(|a| a.id == record.thematic_area) {
                warnings.push(CatalogWarning::UnresolvedThematicArea {
                    program_id: record.id.clone(),
                    thematic_area: record.thematic_area.clone(),
                });
            }

            let (status, source) = match &record.project_phase {
                Some(status) => (status.clone(), PhaseSource::Recorded),
                None => {
                    let status = estimator.estimate(&phase_cycle);
                    tracing::debug!(
                        program_id = %record.id,
                        phase = %status.phase,
                        progress = status.progress,
                        "Estimated missing project phase"
                    );
                    (status, PhaseSource::Estimated)
                }
            };

            match phase_cycle.validate(&status) {
                Ok(()) => {}
                Err(PhaseViolation::OutOfBand {
                    phase,
                    progress,
                    range_start,
                    range_end,
                }) => warnings.push(CatalogWarning::OutOfBand {
                    program_id: record.id.clone(),
                    phase,
                    progress,
                    range_start,
                    range_end,
                }),
                Err(PhaseViolation::UnknownPhase(phase)) => {
                    warnings.push(CatalogWarning::UnknownPhase {
                        program_id: record.id.clone(),
                        phase,
                    })
                }
            }

            let budget = Money::from_units(record.budget, department.budget_unit);
            index.insert(record.id.clone(), programs.len());
            programs.push(Program::new(record, budget, status, source));
        }

        let indicators = indicators
            .into_iter()
            .map(|indicator| {
                let related_programs = programs
                    .iter()
                    .filter(|p| p.mentions_code(&indicator.code))
                    .count();
                IndicatorView {
                    indicator,
                    related_programs,
                }
            })
            .collect();

        let fingerprint = compute_fingerprint(&department, &programs)?;

        tracing::info!(
            department = %department.id,
            version = %department.version,
            programs = programs.len(),
            warnings = warnings.len(),
            "Assembled department catalog"
        );

        Ok(Self {
            department,
            phase_cycle,
            thematic_areas,
            indicators,
            programs,
            index,
            warnings,
            fingerprint,
        })
    }

    pub fn department(&self) -> &DepartmentInfo {
        &self.department
    }

    pub fn id(&self) -> &str {
        &self.department.id
    }

    pub fn budget_unit(&self) -> BudgetUnit {
        self.department.budget_unit
    }

    /// Programs in seed order.
    pub fn all_programs(&self) -> &[Program] {
        &self.programs
    }

    pub fn program(&self, id: &str) -> Option<&Program> {
        self.index.get(id).map(|&i| &self.programs[i])
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    pub fn thematic_areas(&self) -> &[ThematicArea] {
        &self.thematic_areas
    }

    /// Exact-match lookup. Callers display the raw id when this is `None`.
    pub fn thematic_area_by_id(&self, id: &str) -> Option<&ThematicArea> {
        self.thematic_areas.iter().find(|a| a.id == id)
    }

    /// Display name of a thematic area, or the raw id if it does not resolve.
    pub fn thematic_area_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.thematic_area_by_id(id)
            .map(|a| a.name.as_str())
            .unwrap_or(id)
    }

    /// Indicators with their related-program counts.
    pub fn indicators(&self) -> &[IndicatorView] {
        &self.indicators
    }

    pub fn phase_cycle(&self) -> &PhaseCycle {
        &self.phase_cycle
    }

    /// Data-quality findings collected during assembly.
    pub fn warnings(&self) -> &[CatalogWarning] {
        &self.warnings
    }

    /// SHA-256 over the department header and program table.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Seed rows in order, without derived fields.
    pub fn records(&self) -> impl Iterator<Item = &ProgramRecord> {
        self.programs.iter().map(Program::record)
    }

    /// Rebuild the seed this catalog was assembled from.
    pub fn to_seed(&self) -> DepartmentSeed {
        DepartmentSeed {
            department: self.department.clone(),
            phases: self.phase_cycle.phases().to_vec(),
            thematic_areas: self.thematic_areas.clone(),
            indicators: self.indicators.iter().map(|v| v.indicator.clone()).collect(),
            programs: self.records().cloned().collect(),
        }
    }
}

fn compute_fingerprint(department: &DepartmentInfo, programs: &[Program]) -> Result<String> {
    let mut hasher = Sha256::new();
    hasher.update(department.id.as_bytes());
    hasher.update(department.version.as_bytes());
    hasher.update(department.budget_unit.paisa_per_unit().to_le_bytes());
    for program in programs {
        hasher.update(serde_json::to_vec(program.record())?);
    }
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::FixedPhaseEstimator;

    fn record(id: &str, area: &str, phase: Option<(&str, u8)>) -> ProgramRecord {
        ProgramRecord {
            id: id.to_string(),
            department: "Health".to_string(),
            sector: "Social Development".to_string(),
            sub_sector: "Health".to_string(),
            main_program: "Community Health".to_string(),
            program_name: format!("Program {id}"),
            budget: 500,
            budget_code: None,
            sdg: StandardMapping {
                direct: MappingValue::Text("3.8".to_string()),
                indirect: MappingValue::default(),
            },
            iso37120: StandardMapping {
                direct: MappingValue::default(),
                indirect: MappingValue::Text("12.1".to_string()),
            },
            sci2025: StandardMapping::default(),
            thematic_area: area.to_string(),
            linkage_scores: LinkageScores {
                sdg_score: 4,
                iso_score: 2,
                sci_score: 0,
                linkage_type: LinkageType::Concurrence,
            },
            project_phase: phase.map(|(p, progress)| PhaseStatus::new(p, progress)),
        }
    }

    fn seed(programs: Vec<ProgramRecord>) -> DepartmentSeed {
        DepartmentSeed {
            department: DepartmentInfo {
                id: "health".to_string(),
                name: "Health".to_string(),
                name_np: "स्वास्थ्य".to_string(),
                budget_unit: BudgetUnit::Thousand,
                version: "test".to_string(),
            },
            phases: PhaseCycle::capital_works().phases().to_vec(),
            thematic_areas: vec![ThematicArea {
                id: "health-treatment".to_string(),
                name: "Health Treatment".to_string(),
                name_np: "स्वास्थ्य उपचार".to_string(),
                description: None,
                color: "#3B82F6".to_string(),
                icon: None,
                standards: ThematicStandards::default(),
            }],
            indicators: vec![Indicator {
                id: "sdg-3-8".to_string(),
                standard: IndicatorStandard::Sdg,
                code: "3.8".to_string(),
                name: "Universal Health Coverage".to_string(),
                name_np: "सर्वव्यापी स्वास्थ्य सेवा".to_string(),
                description: None,
                current: None,
                target: None,
            }],
            programs,
        }
    }

    #[test]
    fn test_assemble_normalizes_budget() {
        let catalog = Catalog::assemble(
            seed(vec![record("a", "health-treatment", Some(("tender", 48)))]),
            &mut FixedPhaseEstimator::cycle_start(),
        )
        .unwrap();

        let program = catalog.program("a").unwrap();
        assert_eq!(program.budget(), Money::from_rupees(500_000));
        assert!(catalog.warnings().is_empty());
    }

    #[test]
    fn test_recorded_phase_is_never_overwritten() {
        let catalog = Catalog::assemble(
            seed(vec![
                record("a", "health-treatment", Some(("award", 70))),
                record("b", "health-treatment", None),
            ]),
            &mut FixedPhaseEstimator::at("completion", 95),
        )
        .unwrap();

        let a = catalog.program("a").unwrap();
        assert_eq!(a.project_phase(), &PhaseStatus::new("award", 70));
        assert_eq!(a.phase_source(), PhaseSource::Recorded);

        let b = catalog.program("b").unwrap();
        assert_eq!(b.project_phase(), &PhaseStatus::new("completion", 95));
        assert_eq!(b.phase_source(), PhaseSource::Estimated);
    }

    #[test]
    fn test_duplicate_program_is_fatal() {
        let result = Catalog::assemble(
            seed(vec![
                record("a", "health-treatment", None),
                record("a", "health-treatment", None),
            ]),
            &mut FixedPhaseEstimator::cycle_start(),
        );
        assert!(matches!(result, Err(CatalogError::DuplicateProgram { .. })));
    }

    #[test]
    fn test_warnings_are_collected() {
        let mut bad_score = record("a", "health-treatment", Some(("tender", 70)));
        bad_score.linkage_scores.sdg_score = 1;
        let unknown_area = record("b", "no-such-area", Some(("mystery", 10)));

        let catalog = Catalog::assemble(
            seed(vec![bad_score, unknown_area]),
            &mut FixedPhaseEstimator::cycle_start(),
        )
        .unwrap();

        let kinds: Vec<&str> = catalog.warnings().iter().map(|w| w.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                "inconsistent_linkage",
                "out_of_band",
                "unresolved_thematic_area",
                "unknown_phase"
            ]
        );
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_thematic_area_fallback() {
        let catalog = Catalog::assemble(
            seed(vec![record("a", "no-such-area", None)]),
            &mut FixedPhaseEstimator::cycle_start(),
        )
        .unwrap();
        assert!(catalog.thematic_area_by_id("no-such-area").is_none());
        assert_eq!(catalog.thematic_area_name("no-such-area"), "no-such-area");
        assert_eq!(catalog.thematic_area_name("health-treatment"), "Health Treatment");
    }

    #[test]
    fn test_indicator_related_programs() {
        let catalog = Catalog::assemble(
            seed(vec![
                record("a", "health-treatment", None),
                record("b", "health-treatment", None),
            ]),
            &mut FixedPhaseEstimator::cycle_start(),
        )
        .unwrap();
        assert_eq!(catalog.indicators()[0].related_programs, 2);
    }

    #[test]
    fn test_fingerprint_is_stable() {
        let build = || {
            Catalog::assemble(
                seed(vec![record("a", "health-treatment", None)]),
                &mut FixedPhaseEstimator::cycle_start(),
            )
            .unwrap()
        };
        let first = build();
        assert_eq!(first.fingerprint(), build().fingerprint());
        assert_eq!(first.fingerprint().len(), 64);

        let other = Catalog::assemble(
            seed(vec![record("z", "health-treatment", None)]),
            &mut FixedPhaseEstimator::cycle_start(),
        )
        .unwrap();
        assert_ne!(first.fingerprint(), other.fingerprint());
    }

    #[test]
    fn test_to_seed_round_trip() {
        let original = seed(vec![
            record("a", "health-treatment", Some(("tender", 48))),
            record("b", "health-treatment", None),
        ]);
        let catalog =
            Catalog::assemble(original.clone(), &mut FixedPhaseEstimator::cycle_start()).unwrap();
        assert_eq!(catalog.to_seed(), original);
    }
}
