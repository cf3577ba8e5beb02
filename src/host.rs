//! The interface between a host simulator and the per-core predictor tables.

use tracing::debug;

use crate::branch::*;
use crate::config::PredictorConfig;
use crate::error::ConfigError;
use crate::history::GlobalHistory;
use crate::predictor::*;

/// A resolved branch reported by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BranchEvent {
    /// The core that executed the branch
    pub core_id: usize,

    /// The program counter value for this branch
    pub pc: u64,

    /// Global history at the time the branch was predicted
    pub history: GlobalHistory,

    /// The resolved outcome
    pub outcome: Outcome,

    /// The type/kind of branch
    pub kind: BranchKind,
}

/// State handed to [`SpeculativeHooks::recover`] after a misprediction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecoveryInfo {
    pub core_id: usize,

    /// The program counter value of the mispredicted branch
    pub pc: u64,

    /// Global history restored by the host
    pub history: GlobalHistory,
}

/// Callbacks a host makes around speculative execution.
///
/// A predictor only needs to implement these when it keeps speculative
/// state of its own. The default implementations do nothing.
pub trait SpeculativeHooks {
    /// Called when a branch is fetched, before it is predicted.
    fn timestamp(&mut self, _event: &BranchEvent) {}

    /// Called when the host rolls back after a misprediction.
    fn recover(&mut self, _info: &RecoveryInfo) {}

    /// Called when a branch resolves speculatively (before retirement).
    fn spec_update(&mut self, _event: &BranchEvent) {}

    /// Called when a branch retires.
    fn retire(&mut self, _event: &BranchEvent) {}

    /// Returns 'true' if the predictor cannot accept another branch this
    /// cycle.
    fn is_full(&self, _core_id: usize) -> bool { false }
}

/// Interface to a direction predictor driven by a host simulator.
pub trait HostPredictor: SpeculativeHooks {
    fn name(&self) -> &'static str;

    /// Predict the direction of a branch. This must not change any state.
    fn predict(&self, core_id: usize, pc: u64, history: GlobalHistory)
        -> Outcome;

    /// Update the predictor with a resolved branch.
    fn update(&mut self, event: &BranchEvent);
}

/// A [`PerceptronTable`] for each core.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PerceptronPredictor<const H: usize = { HISTORY_LENGTH }> {
    cores: Vec<PerceptronTable<H>>,
}

impl <const H: usize> PerceptronPredictor<H> {
    /// Allocate a zeroed table for each configured core.
    pub fn init(cfg: &PredictorConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        debug!(num_cores = cfg.num_cores, history_length = H,
            "Allocating perceptron tables");
        let cores = (0..cfg.num_cores).map(|_| PerceptronTable::new())
            .collect();
        Ok(Self { cores })
    }

    /// Return the number of cores.
    pub fn num_cores(&self) -> usize { self.cores.len() }

    /// Returns a reference to the table for some core.
    ///
    /// Panics if the core id is out of range.
    pub fn table(&self, core_id: usize) -> &PerceptronTable<H> {
        self.check_core(core_id);
        &self.cores[core_id]
    }

    /// Returns a mutable reference to the table for some core.
    ///
    /// Panics if the core id is out of range.
    pub fn table_mut(&mut self, core_id: usize) -> &mut PerceptronTable<H> {
        self.check_core(core_id);
        &mut self.cores[core_id]
    }

    /// Returns mutable references to every core's table.
    /// Tables never share state, so these can be driven independently.
    pub fn tables_mut(&mut self) -> impl Iterator<Item = &mut PerceptronTable<H>> {
        self.cores.iter_mut()
    }

    fn check_core(&self, core_id: usize) {
        assert!(core_id < self.cores.len(),
            "core id {} out of range ({} cores)", core_id, self.cores.len());
    }
}

impl <const H: usize> SpeculativeHooks for PerceptronPredictor<H> {}

impl <const H: usize> HostPredictor for PerceptronPredictor<H> {
    fn name(&self) -> &'static str { "PerceptronPredictor" }

    fn predict(&self, core_id: usize, pc: u64, history: GlobalHistory)
        -> Outcome
    {
        let table = self.table(core_id);
        let idx = table.get_index(pc);
        let output = table.get_entry(idx).output(history);
        let prediction = Outcome::from(output >= 0);
        debug!(core_id, idx, output, ?prediction,
            "Predicting with perceptron for branch @ {:#x}", pc);
        prediction
    }

    fn update(&mut self, event: &BranchEvent) {
        if !event.kind.is_conditional() {
            return;
        }
        let table = self.table_mut(event.core_id);
        let idx = table.get_index(event.pc);
        let trained = table.get_entry_mut(idx).train(event.history, event.outcome);
        debug!(core_id = event.core_id, idx, outcome = ?event.outcome, trained,
            "Updated perceptron for branch @ {:#x}", event.pc);
    }
}
