//! DISTRIBUTE: drive the engine stages and capture stage diagnostics.
//!
//! Same stage order as `mirath_algo::distribute`, run stepwise here so the
//! pre-normalization total (the Awal/Radd trigger value) can be echoed into
//! the result document.

use mirath_core::frac::{Frac, ZERO};
use mirath_core::heirs::HeirCounts;
use mirath_core::params::Params;
use mirath_core::shares::{Entitlement, Outcome};

use crate::PipelineError;

/// Final share table plus the diagnostics the result document carries.
#[derive(Debug, Clone)]
pub struct DistributionRun {
    pub entitlements: Vec<Entitlement>,
    pub outcome: Outcome,
    /// Sum of granted fractions after the residuary stage, before
    /// normalization. Exceeds 1 exactly when Awal fires.
    pub pre_normalization_total: Frac,
}

/// Run blocking → fixed → residuary → normalize.
pub fn run_distribution(
    counts: &HeirCounts,
    params: &Params,
) -> Result<DistributionRun, PipelineError> {
    let facts = mirath_algo::resolve_blocking(counts, params.blocking_policy);
    let lines = mirath_algo::assign_fixed(counts, &facts)?;
    let lines = mirath_algo::apply_residuary(counts, &facts, lines)?;

    let mut pre_total = ZERO;
    for line in lines.iter().filter(|l| !l.blocked) {
        pre_total = pre_total.checked_add(line.frac)?;
    }

    let (entitlements, outcome) = mirath_algo::normalize(lines)?;

    Ok(DistributionRun { entitlements, outcome, pre_normalization_total: pre_total })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mirath_core::frac::ONE;
    use mirath_core::heirs::Gender;

    #[test]
    fn awal_case_records_the_overshoot() {
        // wife 1/8 + daughters 2/3 + mother 1/6 + father 1/6 = 9/8
        let mut c = HeirCounts::none(Gender::Male);
        c.wives = 1;
        c.daughters = 2;
        c.mother = 1;
        c.father = 1;

        let run = run_distribution(&c, &Params::default()).unwrap();
        assert_eq!(run.pre_normalization_total, Frac::new(9, 8).unwrap());
        assert_eq!(run.outcome, Outcome::Awal { factor: Frac::new(9, 8).unwrap() });
    }

    #[test]
    fn balanced_case_records_exactly_one() {
        let mut c = HeirCounts::none(Gender::Male);
        c.wives = 1;
        c.father = 1;

        let run = run_distribution(&c, &Params::default()).unwrap();
        assert_eq!(run.pre_normalization_total, ONE);
        assert_eq!(run.outcome, Outcome::Balanced);
    }

    #[test]
    fn matches_the_single_call_engine_entry() {
        let mut c = HeirCounts::none(Gender::Female);
        c.husband = 1;
        c.mother = 1;
        c.full_sisters = 2;

        let run = run_distribution(&c, &Params::default()).unwrap();
        let (direct_lines, direct_outcome) =
            mirath_algo::distribute(&c, &Params::default()).unwrap();
        assert_eq!(run.entitlements, direct_lines);
        assert_eq!(run.outcome, direct_outcome);
    }
}
