//! Department phase cycles.
//!
//! Each department declares an ordered lifecycle vocabulary where every phase
//! owns a progress band. Capital works move through inception to completion;
//! disaster programs move through planning, preparedness, response and
//! recovery. The band table is validated once when a catalog is assembled and
//! every program's `{phase, progress}` pair is checked against it.

mod estimator;

pub use estimator::{FixedPhaseEstimator, PhaseEstimator, WeightedPhaseEstimator};

use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

use crate::types::{CatalogError, PhaseStatus, Result};

const WEIGHT_TOLERANCE: f64 = 1e-6;

/// One lifecycle stage and its inclusive progress band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct PhaseDefinition {
    /// Machine value stored on programs
    pub value: String,
    pub label: String,
    pub label_np: String,
    pub range_start: u8,
    pub range_end: u8,
    /// Probability used when estimating a missing phase
    pub weight: f64,
}

impl PhaseDefinition {
    pub fn new(
        value: &str,
        label: &str,
        label_np: &str,
        range: (u8, u8),
        weight: f64,
    ) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            label_np: label_np.to_string(),
            range_start: range.0,
            range_end: range.1,
            weight,
        }
    }

    pub fn contains(&self, progress: u8) -> bool {
        (self.range_start..=self.range_end).contains(&progress)
    }
}

/// Why a `{phase, progress}` pair does not fit a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhaseViolation {
    /// Progress lies outside the phase's declared band
    OutOfBand {
        phase: String,
        progress: u8,
        range_start: u8,
        range_end: u8,
    },
    /// Phase is not part of the cycle's vocabulary
    UnknownPhase(String),
}

/// Rendering state of one phase relative to a program's current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseState {
    Completed,
    Current,
    Upcoming,
}

/// A validated, ordered phase vocabulary with its band table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PhaseCycle {
    phases: Vec<PhaseDefinition>,
}

impl PhaseCycle {
    /// Validate and build a cycle.
    ///
    /// Phases must be non-empty with unique values; bands must lie within
    /// 0..=100, be strictly increasing and not overlap; weights must be
    /// non-negative and sum to 1.
    pub fn new(phases: Vec<PhaseDefinition>) -> Result<Self> {
        if phases.is_empty() {
            return Err(CatalogError::InvalidPhaseCycle("no phases declared".into()));
        }

        let mut previous_end: Option<u8> = None;
        for (index, phase) in phases.iter().enumerate() {
            if phases[..index].iter().any(|p| p.value == phase.value) {
                return Err(CatalogError::InvalidPhaseCycle(format!(
                    "duplicate phase '{}'",
                    phase.value
                )));
            }
            if phase.range_start > phase.range_end || phase.range_end > 100 {
                return Err(CatalogError::InvalidPhaseCycle(format!(
                    "phase '{}' has invalid band [{}, {}]",
                    phase.value, phase.range_start, phase.range_end
                )));
            }
            if let Some(end) = previous_end {
                if phase.range_start <= end {
                    return Err(CatalogError::InvalidPhaseCycle(format!(
                        "phase '{}' band starts at {} but previous band ends at {}",
                        phase.value, phase.range_start, end
                    )));
                }
            }
            if !phase.weight.is_finite() || phase.weight < 0.0 {
                return Err(CatalogError::InvalidPhaseCycle(format!(
                    "phase '{}' has invalid weight {}",
                    phase.value, phase.weight
                )));
            }
            previous_end = Some(phase.range_end);
        }

        let total: f64 = phases.iter().map(|p| p.weight).sum();
        if (total - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(CatalogError::InvalidPhaseCycle(format!(
                "weights sum to {total}, expected 1.0"
            )));
        }

        Ok(Self { phases })
    }

    /// Five-stage capital works cycle (inception to completion).
    pub fn capital_works() -> Self {
        Self {
            phases: vec![
                PhaseDefinition::new("inception", "Inception", "आरम्भ", (0, 20), 0.15),
                PhaseDefinition::new("approval", "Approval", "स्वीकृति", (21, 40), 0.20),
                PhaseDefinition::new("tender", "Tender", "बोलपत्र", (41, 60), 0.25),
                PhaseDefinition::new("award", "Award", "सम्झौता", (61, 80), 0.25),
                PhaseDefinition::new("completion", "Completion", "सम्पन्न", (81, 100), 0.15),
            ],
        }
    }

    /// Four-stage disaster management cycle.
    pub fn disaster_response() -> Self {
        Self {
            phases: vec![
                PhaseDefinition::new("planning", "Planning", "योजना", (0, 25), 0.2),
                PhaseDefinition::new("preparedness", "Preparedness", "तयारी", (26, 50), 0.3),
                PhaseDefinition::new("response", "Response", "प्रतिक्रिया", (51, 75), 0.3),
                PhaseDefinition::new("recovery", "Recovery", "पुनःस्थापना", (76, 100), 0.2),
            ],
        }
    }

    pub fn phases(&self) -> &[PhaseDefinition] {
        &self.phases
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// First phase of the cycle. Cycles are never empty.
    pub fn first(&self) -> &PhaseDefinition {
        &self.phases[0]
    }

    pub fn get(&self, phase: &str) -> Option<&PhaseDefinition> {
        self.phases.iter().find(|p| p.value == phase)
    }

    /// Position of `phase` in the lifecycle sequence.
    pub fn phase_index(&self, phase: &str) -> Option<usize> {
        self.phases.iter().position(|p| p.value == phase)
    }

    /// Check a `{phase, progress}` pair against the band table.
    pub fn validate(&self, status: &PhaseStatus) -> std::result::Result<(), PhaseViolation> {
        let definition = self
            .get(&status.phase)
            .ok_or_else(|| PhaseViolation::UnknownPhase(status.phase.clone()))?;

        if definition.contains(status.progress) {
            Ok(())
        } else {
            Err(PhaseViolation::OutOfBand {
                phase: status.phase.clone(),
                progress: status.progress,
                range_start: definition.range_start,
                range_end: definition.range_end,
            })
        }
    }

    /// How `candidate` renders for a program currently in `current`.
    ///
    /// Phase equality is the only signal; there is no tie-break on progress.
    pub fn phase_state(&self, current: &str, candidate: &str) -> Option<PhaseState> {
        let current = self.phase_index(current)?;
        let candidate = self.phase_index(candidate)?;
        Some(match candidate.cmp(&current) {
            std::cmp::Ordering::Less => PhaseState::Completed,
            std::cmp::Ordering::Equal => PhaseState::Current,
            std::cmp::Ordering::Greater => PhaseState::Upcoming,
        })
    }

    /// Display label for a phase value, falling back to the raw value.
    pub fn label<'a>(&'a self, phase: &'a str) -> &'a str {
        self.get(phase).map(|p| p.label.as_str()).unwrap_or(phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phase(value: &str, range: (u8, u8), weight: f64) -> PhaseDefinition {
        PhaseDefinition::new(value, value, value, range, weight)
    }

    #[test]
    fn test_presets_are_valid() {
        for cycle in [PhaseCycle::capital_works(), PhaseCycle::disaster_response()] {
            let rebuilt = PhaseCycle::new(cycle.phases().to_vec()).unwrap();
            assert_eq!(rebuilt, cycle);
        }
        assert_eq!(PhaseCycle::capital_works().len(), 5);
        assert_eq!(PhaseCycle::disaster_response().len(), 4);
    }

    #[test]
    fn test_rejects_empty_cycle() {
        assert!(matches!(
            PhaseCycle::new(vec![]),
            Err(CatalogError::InvalidPhaseCycle(_))
        ));
    }

    #[test]
    fn test_rejects_overlapping_bands() {
        let result = PhaseCycle::new(vec![phase("a", (0, 50), 0.5), phase("b", (50, 100), 0.5)]);
        assert!(matches!(result, Err(CatalogError::InvalidPhaseCycle(_))));
    }

    #[test]
    fn test_rejects_duplicate_values() {
        let result = PhaseCycle::new(vec![phase("a", (0, 40), 0.5), phase("a", (41, 100), 0.5)]);
        assert!(matches!(result, Err(CatalogError::InvalidPhaseCycle(_))));
    }

    #[test]
    fn test_rejects_bad_weights() {
        let short = PhaseCycle::new(vec![phase("a", (0, 40), 0.5), phase("b", (41, 100), 0.4)]);
        assert!(short.is_err());

        let negative = PhaseCycle::new(vec![phase("a", (0, 40), 1.5), phase("b", (41, 100), -0.5)]);
        assert!(negative.is_err());
    }

    #[test]
    fn test_rejects_band_past_100() {
        let result = PhaseCycle::new(vec![phase("a", (0, 120), 1.0)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate() {
        let cycle = PhaseCycle::capital_works();
        assert!(cycle.validate(&PhaseStatus::new("tender", 48)).is_ok());
        assert!(cycle.validate(&PhaseStatus::new("tender", 41)).is_ok());
        assert!(cycle.validate(&PhaseStatus::new("tender", 60)).is_ok());

        assert_eq!(
            cycle.validate(&PhaseStatus::new("tender", 70)),
            Err(PhaseViolation::OutOfBand {
                phase: "tender".to_string(),
                progress: 70,
                range_start: 41,
                range_end: 60,
            })
        );
        assert_eq!(
            cycle.validate(&PhaseStatus::new("recovery", 90)),
            Err(PhaseViolation::UnknownPhase("recovery".to_string()))
        );
    }

    #[test]
    fn test_phase_index_and_state() {
        let cycle = PhaseCycle::disaster_response();
        assert_eq!(cycle.phase_index("planning"), Some(0));
        assert_eq!(cycle.phase_index("recovery"), Some(3));
        assert_eq!(cycle.phase_index("tender"), None);

        assert_eq!(cycle.phase_state("response", "planning"), Some(PhaseState::Completed));
        assert_eq!(cycle.phase_state("response", "response"), Some(PhaseState::Current));
        assert_eq!(cycle.phase_state("response", "recovery"), Some(PhaseState::Upcoming));
        assert_eq!(cycle.phase_state("unknown", "recovery"), None);
    }

    #[test]
    fn test_label_fallback() {
        let cycle = PhaseCycle::capital_works();
        assert_eq!(cycle.label("award"), "Award");
        assert_eq!(cycle.label("mystery"), "mystery");
    }
}
