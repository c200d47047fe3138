//! Catalog Store: the registry of assembled department catalogs.

use std::collections::HashMap;
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::departments::{self, DepartmentProvider};
use crate::money::Money;
use crate::phase::PhaseEstimator;
use crate::types::{CatalogError, Result};

/// Holds one immutable catalog per department, in registration order.
///
/// Catalogs are handed out as `Arc` so they can be shared freely; nothing
/// mutates a catalog once it is registered.
#[derive(Debug, Default)]
pub struct CatalogStore {
    catalogs: HashMap<String, Arc<Catalog>>,
    order: Vec<String>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble and register every bundled department.
    pub fn with_bundled(estimator: &mut dyn PhaseEstimator) -> Result<Self> {
        let mut store = Self::new();
        for provider in departments::bundled() {
            let catalog = Catalog::assemble(provider.seed()?, estimator)?;
            store.register(catalog)?;
        }
        Ok(store)
    }

    /// Register a catalog under its department id.
    pub fn register(&mut self, catalog: Catalog) -> Result<Arc<Catalog>> {
        let id = catalog.id().to_string();
        if self.catalogs.contains_key(&id) {
            return Err(CatalogError::DuplicateDepartment(id));
        }

        let catalog = Arc::new(catalog);
        tracing::info!(
            department = %id,
            programs = catalog.len(),
            "Registered department catalog"
        );
        self.catalogs.insert(id.clone(), Arc::clone(&catalog));
        self.order.push(id);
        Ok(catalog)
    }

    /// Shared handle to a department's catalog.
    pub fn load(&self, department_id: &str) -> Result<Arc<Catalog>> {
        self.catalogs
            .get(department_id)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownDepartment(department_id.to_string()))
    }

    /// Borrow a department's catalog.
    pub fn get(&self, department_id: &str) -> Result<&Catalog> {
        self.catalogs
            .get(department_id)
            .map(Arc::as_ref)
            .ok_or_else(|| CatalogError::UnknownDepartment(department_id.to_string()))
    }

    pub fn contains(&self, department_id: &str) -> bool {
        self.catalogs.contains_key(department_id)
    }

    /// Department ids in registration order.
    pub fn departments(&self) -> &[String] {
        &self.order
    }

    /// Catalogs in registration order.
    pub fn catalogs(&self) -> impl Iterator<Item = &Arc<Catalog>> {
        self.order.iter().filter_map(|id| self.catalogs.get(id))
    }

    /// Municipal budget allocation: total normalized budget per department.
    pub fn budget_allocation(&self) -> Vec<(String, Money)> {
        self.catalogs()
            .map(|catalog| {
                let total = catalog.all_programs().iter().map(|p| p.budget()).sum();
                (catalog.id().to_string(), total)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::departments::{DepartmentProvider, HealthDepartment};
    use crate::phase::{FixedPhaseEstimator, WeightedPhaseEstimator};

    #[test]
    fn test_with_bundled() {
        let store = CatalogStore::with_bundled(&mut FixedPhaseEstimator::cycle_start()).unwrap();
        assert_eq!(
            store.departments(),
            &["health", "education", "disaster", "urban-development"]
        );
        assert!(store.contains("health"));
    }

    #[test]
    fn test_unknown_department() {
        let store = CatalogStore::new();
        assert!(matches!(
            store.load("fisheries"),
            Err(CatalogError::UnknownDepartment(id)) if id == "fisheries"
        ));
    }

    #[test]
    fn test_duplicate_department() {
        let mut store = CatalogStore::new();
        let mut estimator = WeightedPhaseEstimator::seeded(9);
        let seed = HealthDepartment.seed().unwrap();
        store
            .register(Catalog::assemble(seed.clone(), &mut estimator).unwrap())
            .unwrap();
        let again = store.register(Catalog::assemble(seed, &mut estimator).unwrap());
        assert!(matches!(again, Err(CatalogError::DuplicateDepartment(_))));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_load_shares_catalog() {
        let store = CatalogStore::with_bundled(&mut FixedPhaseEstimator::cycle_start()).unwrap();
        let a = store.load("disaster").unwrap();
        let b = store.load("disaster").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_budget_allocation_order() {
        let store = CatalogStore::with_bundled(&mut FixedPhaseEstimator::cycle_start()).unwrap();
        let allocation = store.budget_allocation();
        let ids: Vec<&str> = allocation.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, store.departments().iter().map(String::as_str).collect::<Vec<_>>());
        assert!(allocation.iter().all(|(_, total)| !total.is_zero()));
    }
}
