//! Bundled department catalogs.
//!
//! Each provider ships one department's seed file compiled into the binary.
//! Further departments can be loaded at runtime through [`crate::loader`].

pub mod disaster;
pub mod education;
pub mod health;
pub mod urban;

pub use disaster::DisasterDepartment;
pub use education::EducationDepartment;
pub use health::HealthDepartment;
pub use urban::UrbanDevelopmentDepartment;

use crate::catalog::DepartmentSeed;
use crate::loader;
use crate::types::Result;

/// Source of a bundled department seed.
pub trait DepartmentProvider: Send + Sync {
    /// Department id the catalog registers under
    fn id(&self) -> &'static str;

    /// Raw YAML seed
    fn source(&self) -> &'static str;

    /// Parsed seed
    fn seed(&self) -> Result<DepartmentSeed> {
        loader::from_yaml_str(self.source())
    }
}

/// All bundled departments in registration order.
pub fn bundled() -> Vec<Box<dyn DepartmentProvider>> {
    vec![
        Box::new(HealthDepartment),
        Box::new(EducationDepartment),
        Box::new(DisasterDepartment),
        Box::new(UrbanDevelopmentDepartment),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_ids_match_seeds() {
        for provider in bundled() {
            let seed = provider.seed().unwrap();
            assert_eq!(seed.department.id, provider.id());
        }
    }
}
