//! Urban Development Department: budgets recorded in full rupees.

use super::DepartmentProvider;

const SEED: &str = include_str!("../../data/urban-development.yaml");

/// Provider for the Urban Development Department catalog.
pub struct UrbanDevelopmentDepartment;

impl DepartmentProvider for UrbanDevelopmentDepartment {
    fn id(&self) -> &'static str {
        "urban-development"
    }

    fn source(&self) -> &'static str {
        SEED
    }
}
