//! Helpers for collecting statistics.

use std::collections::*;
use itertools::*;
use crate::branch::*;

/// Container for recording simple statistics while evaluating a predictor.
#[derive(Clone, Debug, Default)]
pub struct PredictionStats {
    /// Per-branch statistics (indexed by program counter value).
    pub data: BTreeMap<u64, BranchData>,

    /// Number of correct predictions
    pub global_hits: usize,

    /// Number of conditional branches predicted
    pub global_brns: usize,
}
impl PredictionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the global hit rate.
    pub fn hit_rate(&self) -> f64 {
        if self.global_brns == 0 { return 0.0; }
        self.global_hits as f64 / self.global_brns as f64
    }

    /// Return the global hit count.
    pub fn global_hits(&self) -> usize { self.global_hits }

    /// Return the global miss count.
    pub fn global_miss(&self) -> usize { self.global_brns - self.global_hits }

    /// Return the total branch count.
    pub fn global_brns(&self) -> usize { self.global_brns }

    /// Record a prediction made for some branch.
    pub fn record(&mut self, record: &BranchRecord, prediction: Outcome) {
        let hit = prediction == record.outcome;
        self.global_brns += 1;
        if hit { self.global_hits += 1; }

        let data = self.get_mut(record.pc);
        data.occ += 1;
        if hit { data.hits += 1; }
        if record.outcome == Outcome::T { data.taken += 1; }
    }

    /// Returns a reference to data collected for a particular branch.
    pub fn get(&self, pc: u64) -> Option<&BranchData> {
        self.data.get(&pc)
    }

    /// Returns a mutable reference to data collected for a particular branch.
    /// Creates a new entry if one doesn't already exist.
    pub fn get_mut(&mut self, pc: u64) -> &mut BranchData {
        self.data.entry(pc).or_default()
    }

    /// Returns the number of unique observed branch instructions.
    pub fn num_unique_branches(&self) -> usize {
        self.data.len()
    }

    /// Returns the 'n' most frequent branches whose hit rate is at or below
    /// some cutoff.
    pub fn low_rate_branches(&self, n: usize, cutoff: f64)
        -> Vec<(u64, &BranchData)>
    {
        self.data.iter()
            .filter(|(_, s)| s.hit_rate() <= cutoff)
            .sorted_by(|x, y| y.1.occ.cmp(&x.1.occ).then(x.0.cmp(y.0)))
            .take(n)
            .map(|(pc, s)| (*pc, s))
            .collect()
    }
}

/// Container for per-branch statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BranchData {
    /// Number of times this branch was encountered.
    pub occ: usize,

    /// Number of correct predictions for this branch.
    pub hits: usize,

    /// Number of times this branch was taken.
    pub taken: usize,
}
impl BranchData {
    /// Return the hit rate for this branch.
    pub fn hit_rate(&self) -> f64 {
        self.hits as f64 / self.occ as f64
    }

    pub fn is_always_taken(&self) -> bool { self.taken == self.occ }
    pub fn is_never_taken(&self) -> bool { self.taken == 0 }
}

#[cfg(test)]
mod test {
    use super::*;

    fn rec(pc: u64, outcome: Outcome) -> BranchRecord {
        BranchRecord { pc, outcome, kind: BranchKind::DirectBranch }
    }

    #[test]
    fn counts_hits_and_misses() {
        let mut s = PredictionStats::new();
        assert_eq!(s.hit_rate(), 0.0);
        s.record(&rec(0x10, Outcome::T), Outcome::T);
        s.record(&rec(0x10, Outcome::N), Outcome::T);
        s.record(&rec(0x20, Outcome::N), Outcome::N);
        s.record(&rec(0x20, Outcome::N), Outcome::N);

        assert_eq!(s.global_brns(), 4);
        assert_eq!(s.global_hits(), 3);
        assert_eq!(s.global_miss(), 1);
        assert_eq!(s.hit_rate(), 0.75);
        assert_eq!(s.num_unique_branches(), 2);
        assert_eq!(s.get(0x10).unwrap().hits, 1);
        assert!(s.get(0x20).unwrap().is_never_taken());
        assert!(!s.get(0x10).unwrap().is_always_taken());
    }

    #[test]
    fn low_rate_branches_by_frequency() {
        let mut s = PredictionStats::new();
        for _ in 0..3 { s.record(&rec(0x10, Outcome::T), Outcome::N); }
        for _ in 0..5 { s.record(&rec(0x20, Outcome::T), Outcome::N); }
        for _ in 0..9 { s.record(&rec(0x30, Outcome::T), Outcome::T); }
        let worst = s.low_rate_branches(4, 0.5);
        let pcs = worst.iter().map(|(pc, _)| *pc).collect::<Vec<_>>();
        assert_eq!(pcs, vec![0x20, 0x10]);
    }
}
