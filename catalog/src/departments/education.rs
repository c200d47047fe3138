//! Education Department: capital-works phase cycle with recorded progress.

use super::DepartmentProvider;

const SEED: &str = include_str!("../../data/education.yaml");

/// Provider for the Education Department catalog.
pub struct EducationDepartment;

impl DepartmentProvider for EducationDepartment {
    fn id(&self) -> &'static str {
        "education"
    }

    fn source(&self) -> &'static str {
        SEED
    }
}
