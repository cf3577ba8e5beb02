//! An unsaturated reference model of the perceptron learning rule.
//!
//! This is only useful for checking [`PerceptronEntry`] against plain
//! integer math: both apply the same training rule, but the weights here
//! are never clamped.

use crate::branch::Outcome;
use crate::history::GlobalHistory;
use crate::predictor::*;

/// Perceptron with unbounded integer weights over an explicit input vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReferencePerceptron<const H: usize = { HISTORY_LENGTH }> {
    pub bias: i32,
    pub weights: [i32; H],
}

impl <const H: usize> Default for ReferencePerceptron<H> {
    fn default() -> Self { Self::new() }
}

impl <const H: usize> ReferencePerceptron<H> {
    pub const THETA: i32 = PerceptronEntry::<H>::THETA;

    pub fn new() -> Self {
        Self { bias: 0, weights: [0; H] }
    }

    /// Build the bipolar input vector for some history snapshot.
    pub fn inputs_from(history: GlobalHistory) -> [i32; H] {
        let mut res = [0; H];
        let bits = history.recent_bits(H).iter().by_vals();
        for (x, bit) in res.iter_mut().zip(bits) {
            *x = if bit { 1 } else { -1 };
        }
        res
    }

    pub fn output(&self, inputs: &[i32; H]) -> i32 {
        self.bias + inputs.iter().zip(self.weights.iter())
            .map(|(x, w)| x * w)
            .sum::<i32>()
    }

    pub fn predict(&self, inputs: &[i32; H]) -> Outcome {
        Outcome::from(self.output(inputs) >= 0)
    }

    /// Returns 'true' if the weights were updated.
    pub fn train(&mut self, inputs: &[i32; H], outcome: Outcome) -> bool {
        let output = self.output(inputs);
        let miss = Outcome::from(output >= 0) != outcome;
        if !miss && output.abs() >= Self::THETA {
            return false;
        }
        let y = outcome.as_sign();
        self.bias += y;
        for (w, x) in self.weights.iter_mut().zip(inputs.iter()) {
            *w += x * y;
        }
        true
    }

    /// Returns 'true' when a saturating entry could hold every weight and
    /// take one more training step without clamping.
    pub fn within_i8(&self) -> bool {
        let ok = |w: &i32| (i8::MIN as i32 + 1..=i8::MAX as i32 - 1).contains(w);
        ok(&self.bias) && self.weights.iter().all(ok)
    }
}
