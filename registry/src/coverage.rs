//! Ward health-insurance coverage against Smart City Index thresholds.

use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

use crate::config::CoverageConfig;

/// Surveyed insurance figures for one ward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct WardHealthData {
    pub ward_number: u32,
    pub population: u64,
    pub insured_population: u64,
}

/// Minimum and target coverage percentages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverageStandard {
    pub minimum: f64,
    pub target: f64,
}

impl Default for CoverageStandard {
    fn default() -> Self {
        Self {
            minimum: 50.0,
            target: 75.0,
        }
    }
}

impl From<&CoverageConfig> for CoverageStandard {
    fn from(config: &CoverageConfig) -> Self {
        Self {
            minimum: config.minimum_percent,
            target: config.target_percent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum CoverageStatus {
    MeetsTarget,
    MeetsMinimum,
    BelowMinimum,
}

/// One ward's coverage compared with the standard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct CoverageResult {
    pub ward_number: u32,
    /// Insured share of population, two decimals
    pub percentage: f64,
    /// Percentage points short of the minimum; negative once it is exceeded
    pub minimum_gap: f64,
    /// Percentage points short of the target; negative once it is exceeded
    pub target_gap: f64,
    pub status: CoverageStatus,
}

impl WardHealthData {
    /// Insured share of population in percent; 0 for an empty ward.
    pub fn coverage_percent(&self) -> f64 {
        if self.population == 0 {
            return 0.0;
        }
        self.insured_population as f64 / self.population as f64 * 100.0
    }
}

/// Compare each ward with `standard`, keeping input order.
pub fn compare(wards: &[WardHealthData], standard: CoverageStandard) -> Vec<CoverageResult> {
    wards
        .iter()
        .map(|ward| {
            let percentage = round2(ward.coverage_percent());
            let status = if percentage >= standard.target {
                CoverageStatus::MeetsTarget
            } else if percentage >= standard.minimum {
                CoverageStatus::MeetsMinimum
            } else {
                CoverageStatus::BelowMinimum
            };
            CoverageResult {
                ward_number: ward.ward_number,
                percentage,
                minimum_gap: round2(standard.minimum - percentage),
                target_gap: round2(standard.target - percentage),
                status,
            }
        })
        .collect()
}

/// Surveyed wards 16, 29 and 31.
pub fn bundled_wards() -> Vec<WardHealthData> {
    vec![
        WardHealthData {
            ward_number: 16,
            population: 84_441,
            insured_population: 7_050,
        },
        WardHealthData {
            ward_number: 29,
            population: 33_316,
            insured_population: 2_009,
        },
        WardHealthData {
            ward_number: 31,
            population: 66_121,
            insured_population: 3_810,
        },
    ]
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
