//! VALIDATE: structural and semantic checks before any computation.
//!
//! Deterministic: issues are emitted in a fixed field order, so two runs over
//! the same case produce the same report. Warnings never gate the pipeline.

use mirath_core::heirs::Gender;
use mirath_core::money::Decimal;
use mirath_io::case::CaseFile;

/// Hard sanity cap on repeatable heir categories.
const MAX_COUNT: u32 = 10_000;

/// Issue severity. Only `Error` makes a report fatal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// Where the issue occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityRef {
    Root,
    Deceased,
    Estate,
    Heir(&'static str),
    Param(&'static str),
}

impl core::fmt::Display for EntityRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EntityRef::Root => f.write_str("case"),
            EntityRef::Deceased => f.write_str("deceased"),
            EntityRef::Estate => f.write_str("net_estate"),
            EntityRef::Heir(field) => write!(f, "heirs.{field}"),
            EntityRef::Param(field) => write!(f, "params.{field}"),
        }
    }
}

/// One validation finding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub code: &'static str,
    pub message: String,
    pub entity: EntityRef,
}

impl ValidationIssue {
    fn error(code: &'static str, entity: EntityRef, message: String) -> Self {
        ValidationIssue { severity: Severity::Error, code, message, entity }
    }

    fn warning(code: &'static str, entity: EntityRef, message: String) -> Self {
        ValidationIssue { severity: Severity::Warning, code, message, entity }
    }

    /// One-line rendering for stderr: `error[counts.domain] heirs.wives: ...`.
    pub fn render(&self) -> String {
        let sev = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        format!("{sev}[{}] {}: {}", self.code, self.entity, self.message)
    }
}

/// Deterministic report over one case file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// True when any issue is an error; fatal reports stop the pipeline.
    pub fn is_fatal(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    pub fn error_count(&self) -> usize {
        self.issues.iter().filter(|i| i.severity == Severity::Error).count()
    }

    /// Compact single-line summary for error surfaces.
    pub fn summary(&self) -> String {
        let errors: Vec<String> = self
            .issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .map(|i| format!("{} ({})", i.message, i.entity))
            .collect();
        format!("{} error(s): {}", errors.len(), errors.join("; "))
    }
}

/// Top-level entry point.
pub fn validate_case(case: &CaseFile) -> ValidationReport {
    let mut issues: Vec<ValidationIssue> = Vec::new();

    issues.extend(check_count_domains(case));
    issues.extend(check_spouse_gender(case));
    issues.extend(check_estate_domain(case));
    issues.extend(check_params(case));
    issues.extend(check_warnings(case));

    ValidationReport { issues }
}

// ------------------------------------------------------------------
// Checks
// ------------------------------------------------------------------

fn check_count_domains(case: &CaseFile) -> Vec<ValidationIssue> {
    let h = &case.heirs;
    let mut out = Vec::new();

    // At-most-one categories.
    let singletons: [(&'static str, u32); 6] = [
        ("husband", h.husband),
        ("father", h.father),
        ("mother", h.mother),
        ("paternal_grandfather", h.paternal_grandfather),
        ("paternal_grandmother", h.paternal_grandmother),
        ("maternal_grandmother", h.maternal_grandmother),
    ];
    for (field, n) in singletons {
        if n > 1 {
            out.push(ValidationIssue::error(
                "counts.domain",
                EntityRef::Heir(field),
                format!("count {n} exceeds maximum 1"),
            ));
        }
    }

    if h.wives > 4 {
        out.push(ValidationIssue::error(
            "counts.domain",
            EntityRef::Heir("wives"),
            format!("count {} exceeds maximum 4", h.wives),
        ));
    }

    let repeatables: [(&'static str, u32); 7] = [
        ("sons", h.sons),
        ("daughters", h.daughters),
        ("full_brothers", h.full_brothers),
        ("full_sisters", h.full_sisters),
        ("paternal_brothers", h.paternal_brothers),
        ("paternal_sisters", h.paternal_sisters),
        ("maternal_siblings", h.maternal_siblings),
    ];
    for (field, n) in repeatables {
        if n > MAX_COUNT {
            out.push(ValidationIssue::error(
                "counts.domain",
                EntityRef::Heir(field),
                format!("count {n} exceeds sanity cap {MAX_COUNT}"),
            ));
        }
    }

    out
}

fn check_spouse_gender(case: &CaseFile) -> Vec<ValidationIssue> {
    let mut out = Vec::new();
    match case.deceased {
        Gender::Male if case.heirs.husband > 0 => {
            out.push(ValidationIssue::error(
                "spouse.gender",
                EntityRef::Heir("husband"),
                "male deceased cannot leave a husband".to_string(),
            ));
        }
        Gender::Female if case.heirs.wives > 0 => {
            out.push(ValidationIssue::error(
                "spouse.gender",
                EntityRef::Heir("wives"),
                "female deceased cannot leave wives".to_string(),
            ));
        }
        _ => {}
    }
    out
}

fn check_estate_domain(case: &CaseFile) -> Vec<ValidationIssue> {
    let mut out = Vec::new();
    if case.net_estate < Decimal::ZERO {
        out.push(ValidationIssue::error(
            "estate.negative",
            EntityRef::Estate,
            format!("net estate {} is negative", case.net_estate),
        ));
    }
    out
}

fn check_params(case: &CaseFile) -> Vec<ValidationIssue> {
    // Unknown policy tokens never get here: serde rejects them at parse time.
    let mut out = Vec::new();
    if let Err(e) = case.params.validate_domains() {
        out.push(ValidationIssue::error(
            "params.domain",
            EntityRef::Param("rounding_dp"),
            e.to_string(),
        ));
    }
    out
}

fn check_warnings(case: &CaseFile) -> Vec<ValidationIssue> {
    let mut out = Vec::new();

    let counts = case.heir_counts();
    let nobody = counts.husband == 0
        && counts.wives == 0
        && counts.father == 0
        && counts.mother == 0
        && counts.paternal_grandfather == 0
        && counts.paternal_grandmother == 0
        && counts.maternal_grandmother == 0
        && !counts.has_descendant()
        && counts.sibling_count_raw() == 0;
    if nobody {
        out.push(ValidationIssue::warning(
            "heirs.empty",
            EntityRef::Root,
            "no heirs listed; the estate passes entirely to the treasury".to_string(),
        ));
    }

    if case.net_estate == Decimal::ZERO {
        out.push(ValidationIssue::warning(
            "estate.zero",
            EntityRef::Estate,
            "net estate is zero; all amounts will be zero".to_string(),
        ));
    }

    out
}
