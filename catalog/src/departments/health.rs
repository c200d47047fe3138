//! Health Department: capital-works phase cycle, budgets in thousands.
//!
//! The source records carry no lifecycle data, so every program's phase is
//! estimated at assembly.

use super::DepartmentProvider;

const SEED: &str = include_str!("../../data/health.yaml");

/// Provider for the Health Department catalog.
pub struct HealthDepartment;

impl DepartmentProvider for HealthDepartment {
    fn id(&self) -> &'static str {
        "health"
    }

    fn source(&self) -> &'static str {
        SEED
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::money::{BudgetUnit, Money};
    use crate::phase::WeightedPhaseEstimator;
    use crate::types::PhaseSource;

    #[test]
    fn test_health_department() {
        let seed = HealthDepartment.seed().unwrap();
        assert_eq!(seed.department.budget_unit, BudgetUnit::Thousand);
        assert_eq!(seed.programs.len(), 28);
        assert!(seed.programs.iter().all(|p| p.project_phase.is_none()));

        let catalog = Catalog::assemble(seed, &mut WeightedPhaseEstimator::seeded(2082)).unwrap();
        assert!(catalog.warnings().is_empty());
        assert!(catalog
            .all_programs()
            .iter()
            .all(|p| p.phase_source() == PhaseSource::Estimated));

        let total: Money = catalog.all_programs().iter().map(|p| p.budget()).sum();
        assert_eq!(total, Money::from_units(209_600, BudgetUnit::Thousand));
    }
}
