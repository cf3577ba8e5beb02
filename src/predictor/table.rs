//! A table of perceptrons indexed by the program counter.

use crate::branch::Outcome;
use crate::history::GlobalHistory;
use crate::predictor::*;

/// Map a branch address onto one of `2^H` table slots.
///
/// The low two bits of the address are dropped (instructions are aligned)
/// and the next `H` bits select the slot. Addresses that only differ above
/// those bits alias onto the same slot.
pub fn perceptron_index<const H: usize>(pc: u64) -> usize {
    ((pc >> 2) as usize) & ((1 << H) - 1)
}

/// The table of [`PerceptronEntry`] owned by a single core.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PerceptronTable<const H: usize = { HISTORY_LENGTH }> {
    data: Vec<PerceptronEntry<H>>,
}

impl <const H: usize> Default for PerceptronTable<H> {
    fn default() -> Self { Self::new() }
}

impl <const H: usize> PerceptronTable<H> {
    /// Create a table of `2^H` zeroed entries.
    pub fn new() -> Self {
        assert!(H > 0 && H <= GlobalHistory::WIDTH,
            "history length must be in 1..={}", GlobalHistory::WIDTH);
        Self { data: vec![PerceptronEntry::new(); 1 << H] }
    }

    /// Reset every entry.
    pub fn reset(&mut self) {
        self.data.iter_mut().for_each(|e| e.reset());
    }

    /// Return all of the entries in the table.
    pub fn entries(&self) -> &[PerceptronEntry<H>] { &self.data }

    /// Return the entry used to predict the branch at some address.
    pub fn entry_for(&self, pc: u64) -> &PerceptronEntry<H> {
        self.get_entry(self.get_index(pc))
    }

    /// Compute the perceptron output for a branch.
    pub fn output(&self, pc: u64, history: GlobalHistory) -> i32 {
        self.entry_for(pc).output(history)
    }

    /// Predict the direction of a branch.
    pub fn predict(&self, pc: u64, history: GlobalHistory) -> Outcome {
        self.entry_for(pc).predict(history)
    }

    /// Train the entry for a branch with its resolved outcome.
    /// Returns 'true' if the entry was updated.
    pub fn train(&mut self, pc: u64, history: GlobalHistory, outcome: Outcome)
        -> bool
    {
        let idx = self.get_index(pc);
        self.get_entry_mut(idx).train(history, outcome)
    }
}

impl <const H: usize> PredictorTable for PerceptronTable<H> {
    type Input = u64;
    type Entry = PerceptronEntry<H>;

    fn size(&self) -> usize { self.data.len() }

    fn get_index(&self, pc: u64) -> usize {
        perceptron_index::<H>(pc)
    }

    fn get_entry(&self, idx: usize) -> &PerceptronEntry<H> {
        &self.data[idx & self.index_mask()]
    }

    fn get_entry_mut(&mut self, idx: usize) -> &mut PerceptronEntry<H> {
        let index = idx & self.index_mask();
        &mut self.data[index]
    }
}
