//! Data-quality audit reports.
//!
//! Catalog assembly never rejects a record over a scoring or phase
//! inconsistency; it collects a warning instead. An [`AuditReport`] packages
//! every warning of one catalog so an auditor can review them in a single
//! pass.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use kmc_catalog::{Catalog, CatalogWarning};

/// All data-quality findings for one catalog.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub id: Uuid,
    pub department: String,
    pub catalog_version: String,
    /// Fingerprint of the audited program table
    pub fingerprint: String,
    pub generated_at: DateTime<Utc>,
    pub program_count: usize,
    pub warnings: Vec<CatalogWarning>,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Warning count per kind, in first-appearance order.
    pub fn count_by_kind(&self) -> Vec<(&'static str, usize)> {
        let mut counts: Vec<(&'static str, usize)> = Vec::new();
        for warning in &self.warnings {
            match counts.iter_mut().find(|(kind, _)| *kind == warning.kind()) {
                Some((_, count)) => *count += 1,
                None => counts.push((warning.kind(), 1)),
            }
        }
        counts
    }

    /// Warnings raised against one program.
    pub fn for_program<'a>(&'a self, program_id: &'a str) -> impl Iterator<Item = &'a CatalogWarning> {
        self.warnings
            .iter()
            .filter(move |w| w.program_id() == program_id)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Build the audit report for `catalog`, logging each finding when `log` is set.
pub fn audit(catalog: &Catalog, log: bool) -> AuditReport {
    let report = AuditReport {
        id: Uuid::new_v4(),
        department: catalog.id().to_string(),
        catalog_version: catalog.department().version.clone(),
        fingerprint: catalog.fingerprint().to_string(),
        generated_at: Utc::now(),
        program_count: catalog.len(),
        warnings: catalog.warnings().to_vec(),
    };

    if log {
        for warning in &report.warnings {
            tracing::warn!(
                department = %report.department,
                program_id = %warning.program_id(),
                kind = warning.kind(),
                "{warning}"
            );
        }
    }

    tracing::info!(
        report_id = %report.id,
        department = %report.department,
        warnings = report.warnings.len(),
        "Audit complete"
    );

    report
}
