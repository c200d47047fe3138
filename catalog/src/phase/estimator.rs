//! Phase estimation for programs with no recorded phase.
//!
//! Some departments do not yet report lifecycle data. Their programs are given
//! a simulated phase drawn from the cycle's weights so dashboards have
//! something to show. An estimate is never authoritative: it is only requested
//! when the seed row has no `projectPhase`, and the program is marked
//! `PhaseSource::Estimated`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{PhaseCycle, PhaseDefinition};
use crate::types::PhaseStatus;

/// Strategy for filling in a missing phase.
pub trait PhaseEstimator {
    /// Produce a `{phase, progress}` pair that lies inside `cycle`'s band table.
    fn estimate(&mut self, cycle: &PhaseCycle) -> PhaseStatus;
}

/// Draws a phase from the cycle's weights, then a progress value uniformly
/// from that phase's band.
pub struct WeightedPhaseEstimator<R: Rng> {
    rng: R,
}

impl WeightedPhaseEstimator<StdRng> {
    /// Non-deterministic estimator seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Deterministic estimator for reproducible catalogs.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> WeightedPhaseEstimator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    fn pick<'a>(&mut self, cycle: &'a PhaseCycle) -> &'a PhaseDefinition {
        let mut remaining: f64 = self.rng.gen();
        for phase in cycle.phases() {
            remaining -= phase.weight;
            if remaining <= 0.0 {
                return phase;
            }
        }
        // Rounding can leave a sliver above zero.
        cycle.phases().last().unwrap_or_else(|| cycle.first())
    }
}

impl<R: Rng> PhaseEstimator for WeightedPhaseEstimator<R> {
    fn estimate(&mut self, cycle: &PhaseCycle) -> PhaseStatus {
        let phase = self.pick(cycle);
        let progress = self.rng.gen_range(phase.range_start..=phase.range_end);
        PhaseStatus::new(phase.value.clone(), progress)
    }
}

/// Deterministic estimator for fixtures and for catalogs built with
/// estimation disabled.
#[derive(Debug, Clone, Default)]
pub struct FixedPhaseEstimator {
    status: Option<PhaseStatus>,
}

impl FixedPhaseEstimator {
    /// Place every program at the start of the cycle's first band.
    pub fn cycle_start() -> Self {
        Self { status: None }
    }

    /// Always return `phase`/`progress`, whatever the cycle.
    pub fn at(phase: impl Into<String>, progress: u8) -> Self {
        Self {
            status: Some(PhaseStatus::new(phase, progress)),
        }
    }
}

impl PhaseEstimator for FixedPhaseEstimator {
    fn estimate(&mut self, cycle: &PhaseCycle) -> PhaseStatus {
        match &self.status {
            Some(status) => status.clone(),
            None => {
                let first = cycle.first();
                PhaseStatus::new(first.value.clone(), first.range_start)
            }
        }
    }
}
