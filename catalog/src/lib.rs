//! Municipal program catalogs for the KMC program registry.
//!
//! Each department publishes a catalog of funded programs mapped against
//! three external standards:
//!
//! - **SDG**: UN Sustainable Development Goals
//! - **ISO 37120**: city services and quality of life indicators
//! - **SCI 2025**: the Smart City Index
//!
//! This crate holds everything that runs while a catalog is being built: the
//! data model, the seed loader, linkage score validation, phase tracking and
//! synthetic phase estimation. Assembled catalogs are immutable.
//!
//! # Key Components
//!
//! - [`Catalog`]: one department's assembled programs and reference tables
//! - [`CatalogStore`]: catalogs keyed by department id
//! - [`PhaseCycle`]: a department's lifecycle vocabulary and band table
//! - [`PhaseEstimator`]: strategy for filling in missing phases
//! - [`DepartmentProvider`]: bundled department seeds
//!
//! # Example
//!
//! ```ignore
//! use kmc_catalog::{CatalogStore, WeightedPhaseEstimator};
//!
//! let store = CatalogStore::with_bundled(&mut WeightedPhaseEstimator::seeded(2082))?;
//! let health = store.load("health")?;
//! for warning in health.warnings() {
//!     println!("{warning}");
//! }
//! ```

pub mod catalog;
pub mod departments;
pub mod linkage;
pub mod loader;
pub mod money;
pub mod phase;
pub mod store;
pub mod types;

// Re-export main types
pub use catalog::{Catalog, DepartmentInfo, DepartmentSeed};
pub use departments::{
    bundled, DepartmentProvider, DisasterDepartment, EducationDepartment, HealthDepartment,
    UrbanDevelopmentDepartment,
};
pub use money::{BudgetUnit, Money};
pub use phase::{
    FixedPhaseEstimator, PhaseCycle, PhaseDefinition, PhaseEstimator, PhaseState, PhaseViolation,
    WeightedPhaseEstimator,
};
pub use store::CatalogStore;
pub use types::*;
