//! Disaster Management Department: four-phase disaster cycle.
//!
//! No program reports a phase, so every row is estimated at assembly. The seed
//! keeps three known scoring inconsistencies so audits have something to
//! surface.

use super::DepartmentProvider;

const SEED: &str = include_str!("../../data/disaster.yaml");

/// Provider for the Disaster Management Department catalog.
pub struct DisasterDepartment;

impl DepartmentProvider for DisasterDepartment {
    fn id(&self) -> &'static str {
        "disaster"
    }

    fn source(&self) -> &'static str {
        SEED
    }
}
