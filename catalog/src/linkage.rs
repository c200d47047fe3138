//! Linkage score validation.
//!
//! Scores are assigned by domain experts and stored with each program; they
//! are never computed from the mapping text. This module checks each score
//! against the kind of mapping it accompanies:
//!
//! - a populated direct reference needs a score of at least 3
//! - an indirect-only reference needs a score of 1 or 2
//! - no reference needs a score of 0
//!
//! Anything else is reported as an `InconsistentLinkage` warning. The program
//! is still served.

use crate::types::{CatalogWarning, ProgramRecord, Standard, StandardMapping};

/// Highest valid linkage score.
pub const MAX_SCORE: u8 = 5;

/// Check one standard's score against its mapping.
pub fn assess(
    program_id: &str,
    mapping: &StandardMapping,
    standard: Standard,
    score: u8,
) -> Option<CatalogWarning> {
    let kind = mapping.kind();
    let (low, high) = kind.allowed_scores();
    if score > MAX_SCORE || score < low || score > high {
        Some(CatalogWarning::InconsistentLinkage {
            program_id: program_id.to_string(),
            standard,
            score,
            mapping_kind: kind,
        })
    } else {
        None
    }
}

/// Check all three standards of a program.
pub fn audit_program(record: &ProgramRecord) -> Vec<CatalogWarning> {
    Standard::all()
        .into_iter()
        .filter_map(|standard| {
            assess(
                &record.id,
                record.mapping(standard),
                standard,
                record.linkage_scores.score(standard),
            )
        })
        .collect()
}
