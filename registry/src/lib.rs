//! KMC Program Registry engine.
//!
//! In-process query and reporting operations over the department catalogs
//! built by `kmc-catalog`:
//!
//! - **Query Engine**: case-insensitive search, thematic/phase filters and
//!   stable pagination
//! - **Aggregation Engine**: totals, averages and groupings that never
//!   produce NaN on empty input
//! - **Audit**: every data-quality warning of a catalog in one report
//! - **Coverage**: ward insurance coverage against SCI thresholds
//!
//! # Example
//!
//! ```ignore
//! use kmc_registry::{Registry, RegistryConfig};
//!
//! let registry = Registry::from_config(RegistryConfig::parse(yaml)?)?;
//! let query = registry
//!     .query()
//!     .text("vaccine")
//!     .thematic(registry.filter("health-treatment"));
//! let page = registry.search("health", &query)?;
//! println!("{} of {} programs", page.items.len(), page.total_count);
//! ```

pub mod aggregate;
pub mod audit;
pub mod config;
pub mod coverage;
pub mod query;
pub mod registry;
pub mod summary;

// Re-export main types
pub use aggregate::{Average, ThematicAreaStats};
pub use audit::AuditReport;
pub use config::{ConfigError, RegistryConfig};
pub use coverage::{CoverageResult, CoverageStandard, CoverageStatus, WardHealthData};
pub use query::{BrowseSession, Filter, ProgramQuery, ResultPage};
pub use registry::{Registry, RegistryError, Result};
pub use summary::RegistrySummary;

pub use kmc_catalog;
