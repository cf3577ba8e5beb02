//! Synthetic branch traces.
//!
//! A [`TraceBuilder`] holds a set of branch sites, each with some
//! pre-determined [`BranchPattern`], and produces a stream of
//! [`BranchRecord`] by visiting the sites in order.

use rand::prelude::*;
use crate::branch::*;

/// A pre-determined pattern of outcomes associated with a conditional branch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BranchPattern {
    /// A branch whose outcome is always 'taken'.
    AlwaysTaken,

    /// A branch whose outcome is always 'not-taken'.
    NeverTaken,

    /// A branch whose outcome is only periodically "taken".
    /// Otherwise, the branch is "not-taken" by default.
    TakenPeriodic(usize),

    /// A branch whose outcome is only periodically "not-taken".
    /// Otherwise, the branch is "taken" by default.
    NotTakenPeriodic(usize),

    /// A branch with an arbitrary repeating pattern of outcomes.
    Pattern(&'static [Outcome]),

    /// A branch which is taken with some probability.
    Random(f64),
}
impl BranchPattern {
    /// Given the number of times this branch has executed, generate an
    /// outcome.
    pub fn outcome(&self, ctr: usize, rng: &mut impl Rng) -> Outcome {
        match self {
            Self::AlwaysTaken => Outcome::T,
            Self::NeverTaken => Outcome::N,
            Self::TakenPeriodic(p) => {
                assert!(*p > 0, "period must be non-zero");
                Outcome::from(ctr % p == (p - 1))
            },
            Self::NotTakenPeriodic(p) => {
                assert!(*p > 0, "period must be non-zero");
                Outcome::from(ctr % p != (p - 1))
            },
            Self::Pattern(pat) => pat[ctr % pat.len()],
            Self::Random(prob) => Outcome::from(rng.gen_bool(*prob)),
        }
    }
}

#[derive(Clone, Debug)]
struct BranchSite {
    pc: u64,
    kind: BranchKind,
    pattern: BranchPattern,

    /// Number of times this site has been visited
    ctr: usize,
}

/// Builds a trace from a set of branch sites.
#[derive(Clone, Debug)]
pub struct TraceBuilder {
    sites: Vec<BranchSite>,
    rng: StdRng,
}
impl TraceBuilder {
    /// Create a new builder. Random patterns are drawn from a generator
    /// seeded with `seed`, so the same builder always yields the same trace.
    pub fn new(seed: u64) -> Self {
        Self {
            sites: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Add a conditional branch.
    pub fn branch(&mut self, pc: u64, pattern: BranchPattern) -> &mut Self {
        self.site(pc, BranchKind::DirectBranch, pattern)
    }

    /// Add a branch of any kind.
    /// Sites that aren't conditional branches are always taken.
    pub fn site(&mut self, pc: u64, kind: BranchKind, pattern: BranchPattern)
        -> &mut Self
    {
        self.sites.push(BranchSite { pc, kind, pattern, ctr: 0 });
        self
    }

    /// Return the number of branch sites.
    pub fn num_sites(&self) -> usize { self.sites.len() }

    /// Generate `len` records, visiting each site in turn.
    pub fn build(&mut self, len: usize) -> Vec<BranchRecord> {
        assert!(!self.sites.is_empty(), "no branch sites");
        let mut res = Vec::with_capacity(len);
        let num_sites = self.sites.len();
        for i in 0..len {
            let site = &mut self.sites[i % num_sites];
            let outcome = if site.kind.is_conditional() {
                site.pattern.outcome(site.ctr, &mut self.rng)
            } else {
                Outcome::T
            };
            site.ctr += 1;
            res.push(BranchRecord { pc: site.pc, outcome, kind: site.kind });
        }
        res
    }
}
