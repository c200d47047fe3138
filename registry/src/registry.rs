//! The registry facade.
//!
//! Wires configuration, the catalog store and the phase estimator together
//! and exposes the in-process operations presentation layers call.

use std::sync::Arc;

use kmc_catalog::{
    loader, Catalog, CatalogError, CatalogStore, FixedPhaseEstimator, Money, PhaseEstimator,
    WeightedPhaseEstimator,
};

use crate::audit::{self, AuditReport};
use crate::config::{ConfigError, EstimatorConfig, RegistryConfig};
use crate::coverage::{self, CoverageResult, CoverageStandard, WardHealthData};
use crate::query::{self, BrowseSession, Filter, ProgramQuery, ResultPage};
use crate::summary::RegistrySummary;

/// Error types for registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Catalog loading or lookup failed
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Configuration rejected
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, RegistryError>;

/// All department catalogs plus the configuration used to build them.
#[derive(Debug)]
pub struct Registry {
    config: RegistryConfig,
    store: CatalogStore,
}

impl Registry {
    /// Build a registry from the default configuration.
    pub fn new() -> Result<Self> {
        Self::from_config(RegistryConfig::default())
    }

    /// Validate `config`, then assemble the bundled departments (if enabled)
    /// followed by every extra catalog file, in order.
    pub fn from_config(config: RegistryConfig) -> Result<Self> {
        config.validate()?;

        let mut estimator = build_estimator(&config.estimator);
        let mut store = if config.catalogs.include_bundled {
            CatalogStore::with_bundled(&mut *estimator)?
        } else {
            CatalogStore::new()
        };

        for path in &config.catalogs.paths {
            let seed = loader::from_path(path)?;
            store.register(Catalog::assemble(seed, &mut *estimator)?)?;
        }

        tracing::info!(
            departments = store.len(),
            estimator_enabled = config.estimator.enabled,
            "Program registry ready"
        );

        Ok(Self { config, store })
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// Department ids in registration order.
    pub fn departments(&self) -> &[String] {
        self.store.departments()
    }

    pub fn catalog(&self, department_id: &str) -> Result<Arc<Catalog>> {
        Ok(self.store.load(department_id)?)
    }

    /// Parse a raw filter value using the configured sentinel.
    pub fn filter(&self, value: &str) -> Filter {
        Filter::parse(value, &self.config.query.all_sentinel)
    }

    /// An unfiltered first-page query with the configured page size.
    pub fn query(&self) -> ProgramQuery {
        ProgramQuery::new().page_size(self.config.query.page_size)
    }

    pub fn search(&self, department_id: &str, query: &ProgramQuery) -> Result<ResultPage<'_>> {
        let catalog = self.store.get(department_id)?;
        Ok(query::search(catalog.all_programs(), query))
    }

    /// Start a browsing session on a department.
    pub fn browse(&self, department_id: &str) -> Result<BrowseSession> {
        Ok(BrowseSession::with_sentinel(
            self.catalog(department_id)?,
            self.config.query.page_size,
            &self.config.query.all_sentinel,
        ))
    }

    pub fn summary(&self, department_id: &str) -> Result<RegistrySummary> {
        Ok(RegistrySummary::for_catalog(self.store.get(department_id)?))
    }

    pub fn audit(&self, department_id: &str) -> Result<AuditReport> {
        let catalog = self.store.get(department_id)?;
        Ok(audit::audit(catalog, self.config.audit.log_warnings))
    }

    /// Audit every department in registration order.
    pub fn audit_all(&self) -> Vec<AuditReport> {
        self.store
            .catalogs()
            .map(|catalog| audit::audit(catalog, self.config.audit.log_warnings))
            .collect()
    }

    /// Total normalized budget per department.
    pub fn budget_allocation(&self) -> Vec<(String, Money)> {
        self.store.budget_allocation()
    }

    /// Compare wards with the configured coverage thresholds.
    pub fn coverage(&self, wards: &[WardHealthData]) -> Vec<CoverageResult> {
        coverage::compare(wards, CoverageStandard::from(&self.config.coverage))
    }
}

fn build_estimator(config: &EstimatorConfig) -> Box<dyn PhaseEstimator> {
    match (config.enabled, config.seed) {
        (false, _) => Box::new(FixedPhaseEstimator::cycle_start()),
        (true, Some(seed)) => Box::new(WeightedPhaseEstimator::seeded(seed)),
        (true, None) => Box::new(WeightedPhaseEstimator::from_entropy()),
    }
}
