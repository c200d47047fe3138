//! Core types for department program catalogs.
//!
//! These types model one funded municipal program and the reference tables it
//! is mapped against: three external standards (SDG, ISO 37120, SCI 2025),
//! department thematic areas and coded indicators.
//!
//! With the `typescript` feature enabled, these types can be exported to
//! TypeScript using ts-rs for consistency with the dashboard frontend.

use std::fmt;

use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

use crate::money::Money;

/// One of the three external standards every program is scored against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum Standard {
    /// UN Sustainable Development Goals
    Sdg,
    /// ISO 37120 city services indicators
    Iso37120,
    /// Smart City Index 2025
    Sci2025,
}

impl Standard {
    /// Display name used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sdg => "SDG",
            Self::Iso37120 => "ISO 37120",
            Self::Sci2025 => "SCI 2025",
        }
    }

    /// All standards in report order.
    pub fn all() -> [Self; 3] {
        [Self::Sdg, Self::Iso37120, Self::Sci2025]
    }
}

impl fmt::Display for Standard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Standard an indicator belongs to. `Combined` indicators span several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub enum IndicatorStandard {
    #[serde(rename = "SDG")]
    Sdg,
    #[serde(rename = "ISO 37120")]
    Iso37120,
    #[serde(rename = "SCI 2025")]
    Sci2025,
    #[serde(rename = "Combined")]
    Combined,
}

impl IndicatorStandard {
    /// The scored standard this indicator maps to, if any.
    pub fn standard(&self) -> Option<Standard> {
        match self {
            Self::Sdg => Some(Standard::Sdg),
            Self::Iso37120 => Some(Standard::Iso37120),
            Self::Sci2025 => Some(Standard::Sci2025),
            Self::Combined => None,
        }
    }
}

/// A raw standard reference as authored in the seed data.
///
/// Kept as written (single text field or list of codes) so that a catalog
/// re-serializes to its original seed. Codes are opaque strings and are never
/// parsed numerically; an unquoted numeric code such as `11` or `11.1` is
/// read back as its text form, and a null reads as the empty sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(untagged, from = "RawMappingValue")]
pub enum MappingValue {
    /// Free text: a bare code, dotted codes, or a pillar/indicator description
    Text(String),
    /// A list of individual codes
    Codes(Vec<String>),
}

impl Default for MappingValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl MappingValue {
    /// Whether this value carries a real reference rather than the
    /// "no mapping" sentinel (empty text, `No`/`NO`, or an empty list).
    pub fn is_populated(&self) -> bool {
        !self.entries().is_empty()
    }

    /// Populated entries. Text yields itself as a single entry.
    pub fn entries(&self) -> Vec<&str> {
        match self {
            Self::Text(text) => {
                if is_no_mapping(text) {
                    vec![]
                } else {
                    vec![text.as_str()]
                }
            }
            Self::Codes(codes) => codes
                .iter()
                .map(String::as_str)
                .filter(|code| !is_no_mapping(code))
                .collect(),
        }
    }

    /// Loose substring match used for indicator coverage.
    pub fn contains_code(&self, code: &str) -> bool {
        self.entries().iter().any(|entry| entry.contains(code))
    }
}

/// Seed form of a mapping value, before numbers are folded into text.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawMappingValue {
    Null,
    Code(RawCode),
    Codes(Vec<RawCode>),
}

/// A code as YAML or JSON may type it.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCode {
    Text(String),
    Integer(i64),
    Decimal(f64),
}

impl From<RawCode> for String {
    fn from(code: RawCode) -> Self {
        match code {
            RawCode::Text(text) => text,
            RawCode::Integer(n) => n.to_string(),
            RawCode::Decimal(n) => n.to_string(),
        }
    }
}

impl From<RawMappingValue> for MappingValue {
    fn from(raw: RawMappingValue) -> Self {
        match raw {
            RawMappingValue::Null => Self::default(),
            RawMappingValue::Code(code) => Self::Text(code.into()),
            RawMappingValue::Codes(codes) => {
                Self::Codes(codes.into_iter().map(String::from).collect())
            }
        }
    }
}

fn is_no_mapping(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.eq_ignore_ascii_case("no")
}

/// Direct and indirect references of one program against one standard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct StandardMapping {
    #[serde(default)]
    pub direct: MappingValue,
    #[serde(default)]
    pub indirect: MappingValue,
}

impl StandardMapping {
    /// Classify the mapping for score validation.
    pub fn kind(&self) -> MappingKind {
        if self.direct.is_populated() {
            MappingKind::Direct
        } else if self.indirect.is_populated() {
            MappingKind::IndirectOnly
        } else {
            MappingKind::None
        }
    }

    /// Whether either field contains `code` as a substring.
    pub fn mentions(&self, code: &str) -> bool {
        self.direct.contains_code(code) || self.indirect.contains_code(code)
    }
}

/// How a program is mapped against a standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum MappingKind {
    /// A populated direct reference (indirect may also be present)
    Direct,
    /// Only the indirect field is populated
    IndirectOnly,
    /// Neither field is populated
    None,
}

impl MappingKind {
    /// Inclusive score range this mapping kind permits.
    pub fn allowed_scores(&self) -> (u8, u8) {
        match self {
            Self::Direct => (3, 5),
            Self::IndirectOnly => (1, 2),
            Self::None => (0, 0),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::IndirectOnly => "indirect-only",
            Self::None => "none",
        }
    }
}

impl fmt::Display for MappingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an alignment claim was substantiated.
///
/// Ordered from weakest to strongest evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum LinkageType {
    /// Official policy declaration without verification
    Declaration,
    /// Discussed in meetings/workshops
    Discussion,
    /// Agreed upon by multiple stakeholders
    Concurrence,
    /// Backed by research and evidence
    Research,
}

impl LinkageType {
    /// Fixed base score (1-4).
    pub fn base_score(&self) -> u8 {
        match self {
            Self::Declaration => 1,
            Self::Discussion => 2,
            Self::Concurrence => 3,
            Self::Research => 4,
        }
    }

    /// Weight applied in aggregate reports. Never rescales stored scores.
    pub fn multiplier(&self) -> f64 {
        match self {
            Self::Declaration => 0.5,
            Self::Discussion => 0.75,
            Self::Concurrence => 1.0,
            Self::Research => 1.25,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Declaration => "Declaration",
            Self::Discussion => "Discussion",
            Self::Concurrence => "Concurrence",
            Self::Research => "Research",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Declaration => "Official policy declaration without verification",
            Self::Discussion => "Discussed in meetings/workshops",
            Self::Concurrence => "Agreed upon by multiple stakeholders",
            Self::Research => "Backed by research and evidence",
        }
    }

    /// All linkage types, weakest first.
    pub fn all() -> [Self; 4] {
        [
            Self::Declaration,
            Self::Discussion,
            Self::Concurrence,
            Self::Research,
        ]
    }
}

/// Expert-assigned 0-5 alignment scores plus the verification method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct LinkageScores {
    pub sdg_score: u8,
    pub iso_score: u8,
    pub sci_score: u8,
    pub linkage_type: LinkageType,
}

impl LinkageScores {
    /// Score for one standard.
    pub fn score(&self, standard: Standard) -> u8 {
        match standard {
            Standard::Sdg => self.sdg_score,
            Standard::Iso37120 => self.iso_score,
            Standard::Sci2025 => self.sci_score,
        }
    }

    /// Per-program mean of the three standard scores.
    pub fn mean(&self) -> f64 {
        let scores = Standard::all().map(|s| f64::from(self.score(s)));
        scores.iter().sum::<f64>() / scores.len() as f64
    }
}

/// Qualitative band of a 0-5 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum LinkageStrength {
    NoLink,
    Indirect,
    Partial,
    Direct,
}

impl LinkageStrength {
    pub fn from_score(score: u8) -> Self {
        match score {
            0 => Self::NoLink,
            1..=2 => Self::Indirect,
            3..=4 => Self::Partial,
            _ => Self::Direct,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::NoLink => "No Link",
            Self::Indirect => "Indirect",
            Self::Partial => "Partial",
            Self::Direct => "Direct",
        }
    }
}

/// A lifecycle stage with its progress percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct PhaseStatus {
    pub phase: String,
    pub progress: u8,
}

impl PhaseStatus {
    pub fn new(phase: impl Into<String>, progress: u8) -> Self {
        Self {
            phase: phase.into(),
            progress,
        }
    }
}

/// Where a program's phase came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum PhaseSource {
    /// Supplied by the seed data
    Recorded,
    /// Filled in by a phase estimator because the seed had none
    Estimated,
}

/// Representative standard codes shown for a thematic area.
///
/// Display exemplars only; scoring never reads them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct ThematicStandards {
    #[serde(default)]
    pub sdg: Vec<String>,
    #[serde(default)]
    pub iso: Vec<String>,
    #[serde(default)]
    pub sci: Vec<String>,
}

/// A categorical grouping of programs within a department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct ThematicArea {
    pub id: String,
    pub name: String,
    pub name_np: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Chart/badge colour, a display concern carried through untouched
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub standards: ThematicStandards,
}

/// A named metric belonging to one standard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct Indicator {
    pub id: String,
    pub standard: IndicatorStandard,
    pub code: String,
    pub name: String,
    pub name_np: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Current measured value, e.g. `"62%"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<String>,
    /// Target value, e.g. `"80%"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl Indicator {
    /// Current value as a percentage of target.
    ///
    /// `None` when either value is missing or unparseable, or the target is zero.
    pub fn attainment(&self) -> Option<f64> {
        let current = parse_measure(self.current.as_deref()?)?;
        let target = parse_measure(self.target.as_deref()?)?;
        if target == 0.0 {
            return None;
        }
        Some(current / target * 100.0)
    }
}

fn parse_measure(raw: &str) -> Option<f64> {
    let value = raw.trim().trim_end_matches('%').trim().parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}

/// An indicator with its derived count of related programs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorView {
    #[serde(flatten)]
    pub indicator: Indicator,
    pub related_programs: usize,
}

/// One program row exactly as it appears in a department seed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct ProgramRecord {
    /// Unique within a department catalog
    pub id: String,
    pub department: String,
    pub sector: String,
    pub sub_sector: String,
    pub main_program: String,
    pub program_name: String,
    /// Amount in the department's declared budget unit
    pub budget: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_code: Option<String>,
    #[serde(default)]
    pub sdg: StandardMapping,
    #[serde(default)]
    pub iso37120: StandardMapping,
    #[serde(default)]
    pub sci2025: StandardMapping,
    pub thematic_area: String,
    pub linkage_scores: LinkageScores,
    /// Authoritative phase, when the department records one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_phase: Option<PhaseStatus>,
}

impl ProgramRecord {
    /// Mapping against one standard.
    pub fn mapping(&self, standard: Standard) -> &StandardMapping {
        match standard {
            Standard::Sdg => &self.sdg,
            Standard::Iso37120 => &self.iso37120,
            Standard::Sci2025 => &self.sci2025,
        }
    }
}

/// A program enriched at catalog assembly.
///
/// Budgets are normalized to paisa and every program carries exactly one
/// phase, either recorded or estimated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    record: ProgramRecord,
    budget: Money,
    project_phase: PhaseStatus,
    phase_source: PhaseSource,
}

impl Program {
    pub(crate) fn new(
        record: ProgramRecord,
        budget: Money,
        project_phase: PhaseStatus,
        phase_source: PhaseSource,
    ) -> Self {
        Self {
            record,
            budget,
            project_phase,
            phase_source,
        }
    }

    pub fn id(&self) -> &str {
        &self.record.id
    }

    pub fn department(&self) -> &str {
        &self.record.department
    }

    pub fn sector(&self) -> &str {
        &self.record.sector
    }

    pub fn sub_sector(&self) -> &str {
        &self.record.sub_sector
    }

    pub fn main_program(&self) -> &str {
        &self.record.main_program
    }

    pub fn program_name(&self) -> &str {
        &self.record.program_name
    }

    /// Normalized budget.
    pub fn budget(&self) -> Money {
        self.budget
    }

    pub fn budget_code(&self) -> Option<&str> {
        self.record.budget_code.as_deref()
    }

    pub fn mapping(&self, standard: Standard) -> &StandardMapping {
        self.record.mapping(standard)
    }

    pub fn thematic_area(&self) -> &str {
        &self.record.thematic_area
    }

    pub fn linkage_scores(&self) -> &LinkageScores {
        &self.record.linkage_scores
    }

    pub fn linkage_type(&self) -> LinkageType {
        self.record.linkage_scores.linkage_type
    }

    pub fn project_phase(&self) -> &PhaseStatus {
        &self.project_phase
    }

    pub fn phase_source(&self) -> PhaseSource {
        self.phase_source
    }

    /// The seed row this program was built from.
    pub fn record(&self) -> &ProgramRecord {
        &self.record
    }

    /// Whether any of the six mapping fields contains `code` as a substring.
    pub fn mentions_code(&self, code: &str) -> bool {
        Standard::all()
            .iter()
            .any(|standard| self.mapping(*standard).mentions(code))
    }
}

/// A non-fatal data-quality finding collected while assembling a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogWarning {
    /// Score does not fit the mapping kind (or exceeds 5)
    #[error("program {program_id}: {standard} score {score} inconsistent with {mapping_kind} mapping")]
    InconsistentLinkage {
        program_id: String,
        standard: Standard,
        score: u8,
        mapping_kind: MappingKind,
    },

    /// Progress lies outside the band declared for its phase
    #[error("program {program_id}: progress {progress}% outside {phase} band [{range_start}, {range_end}]")]
    OutOfBand {
        program_id: String,
        phase: String,
        progress: u8,
        range_start: u8,
        range_end: u8,
    },

    /// Phase is not part of the department's vocabulary
    #[error("program {program_id}: phase '{phase}' not in department phase cycle")]
    UnknownPhase { program_id: String, phase: String },

    /// Thematic area id has no entry; display falls back to the raw id
    #[error("program {program_id}: thematic area '{thematic_area}' not found")]
    UnresolvedThematicArea {
        program_id: String,
        thematic_area: String,
    },
}

impl CatalogWarning {
    /// Short kind name for grouping in reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InconsistentLinkage { .. } => "inconsistent_linkage",
            Self::OutOfBand { .. } => "out_of_band",
            Self::UnknownPhase { .. } => "unknown_phase",
            Self::UnresolvedThematicArea { .. } => "unresolved_thematic_area",
        }
    }

    pub fn program_id(&self) -> &str {
        match self {
            Self::InconsistentLinkage { program_id, .. }
            | Self::OutOfBand { program_id, .. }
            | Self::UnknownPhase { program_id, .. }
            | Self::UnresolvedThematicArea { program_id, .. } => program_id,
        }
    }
}

/// Error types for catalog operations.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// No catalog registered for the department
    #[error("Unknown department: {0}")]
    UnknownDepartment(String),

    /// A department was registered twice
    #[error("Department already registered: {0}")]
    DuplicateDepartment(String),

    /// Two programs share an id within one department
    #[error("Duplicate program id {id} in department {department}")]
    DuplicateProgram { department: String, id: String },

    /// Phase table is malformed
    #[error("Invalid phase cycle: {0}")]
    InvalidPhaseCycle(String),

    /// Seed file has an extension the loader does not understand
    #[error("Unsupported catalog format: {0}")]
    UnsupportedFormat(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
