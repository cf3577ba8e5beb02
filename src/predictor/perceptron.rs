
use crate::branch::Outcome;
use crate::history::GlobalHistory;
use crate::predictor::HISTORY_LENGTH;
use crate::predictor::saturating::*;

/// Perceptron [with saturating 8-bit weights].
///
/// One weight for each of the `H` most recent global history bits, plus a
/// bias weight. See the following papers:
///
/// - "Dynamic Branch Prediction with Perceptrons" (Jiménez and Lin, 2001)
/// - "Neural Methods for Dynamic Branch Prediction" (Jiménez and Lin, 2002)
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PerceptronEntry<const H: usize = { HISTORY_LENGTH }> {
    pub bias: i8,
    pub weights: [i8; H],
}

impl <const H: usize> Default for PerceptronEntry<H> {
    fn default() -> Self { Self::new() }
}

impl <const H: usize> PerceptronEntry<H> {

    // Training threshold, floor(1.93 * H + 14).
    // Papers suggest this constant (based on the history size).
    pub const THETA: i32 = (193 * H as i32 + 1400) / 100;

    pub fn new() -> Self {
        Self { weights: [0; H], bias: 0 }
    }

    /// Reset the state.
    pub fn reset(&mut self) {
        self.bias = 0;
        self.weights = [0; H];
    }

    /// Return a reference to the list of weights.
    pub fn weights(&self) -> &[i8; H] {
        &self.weights
    }

    /// Map the `H` most recent history bits onto bipolar inputs
    /// (a '1' bit becomes +1, a '0' bit becomes -1).
    fn inputs(history: &GlobalHistory) -> impl Iterator<Item = i32> + '_ {
        history.recent_bits(H).iter().by_vals()
            .map(|bit| if bit { 1 } else { -1 })
    }

    /// Compute the output value: the bias plus the dot product of the
    /// input/weight vectors.
    ///
    /// The magnitude is at most `128 * (H + 1)`, so this never overflows.
    pub fn output(&self, history: GlobalHistory) -> i32 {
        Self::inputs(&history).zip(self.weights.iter())
            .fold(self.bias as i32, |sum, (x, w)| sum + x * (*w as i32))
    }

    /// The predicted outcome is determined by the sign of the output.
    /// An output of zero predicts 'taken'.
    pub fn predict(&self, history: GlobalHistory) -> Outcome {
        Outcome::from(self.output(history) >= 0)
    }

    /// Training occurs after a misprediction, or when the magnitude of the
    /// output is below [`PerceptronEntry::THETA`].
    pub fn needs_training(output: i32, outcome: Outcome) -> bool {
        let prediction = Outcome::from(output >= 0);
        prediction != outcome || output.abs() < Self::THETA
    }

    /// Move every weight one step toward agreeing with the outcome,
    /// regardless of the training threshold.
    ///
    /// When a bit in the history matches the outcome, increment the
    /// corresponding weight. Otherwise, decrement the corresponding weight.
    pub fn adjust(&mut self, history: GlobalHistory, outcome: Outcome) {
        let y = outcome.as_sign();
        self.bias = saturating_inc(self.bias, y);
        for (w, x) in self.weights.iter_mut().zip(Self::inputs(&history)) {
            *w = saturating_inc(*w, x * y);
        }
    }

    /// Given the resolved outcome, adjust the weights if necessary.
    /// Returns 'true' if the entry was updated.
    pub fn train(&mut self, history: GlobalHistory, outcome: Outcome) -> bool {
        let output = self.output(history);
        if !Self::needs_training(output, outcome) {
            return false;
        }
        self.adjust(history, outcome);
        true
    }
}

#[cfg(test)]
mod test {
    use super::*;

    type Entry = PerceptronEntry<12>;

    #[test]
    fn theta() {
        assert_eq!(Entry::THETA, 37);
        assert_eq!(PerceptronEntry::<1>::THETA, 15);
        assert_eq!(PerceptronEntry::<32>::THETA, 75);
    }

    #[test]
    fn zero_output_predicts_taken() {
        let e = Entry::new();
        for h in [0, 1, 0xffff_ffff, 0x8000_0000, 0x1234_5678] {
            let h = GlobalHistory::new(h);
            assert_eq!(e.output(h), 0);
            assert_eq!(e.predict(h), Outcome::T);
        }
    }

    #[test]
    fn output_uses_top_bits() {
        let mut e = Entry::new();
        e.bias = 3;
        e.weights[11] = 10;
        e.weights[0] = 5;

        // Most recent bit set, everything else clear
        let h = GlobalHistory::new(0x8000_0000);
        assert_eq!(e.output(h), 3 + 10 - 5);

        // Bits below the top 12 are ignored
        let h = GlobalHistory::new(0x000f_ffff);
        assert_eq!(e.output(h), 3 - 10 - 5);
    }

    #[test]
    fn mispredict_on_empty_history() {
        let mut e = Entry::new();
        let h = GlobalHistory::new(0);
        assert_eq!(e.predict(h), Outcome::T);
        assert!(e.train(h, Outcome::N));
        assert_eq!(e.bias, -1);
        assert_eq!(e.weights, [1; 12]);
    }

    #[test]
    fn confident_correct_prediction_is_not_trained() {
        let mut e = Entry::new();
        e.bias = 40;
        let h = GlobalHistory::new(0);
        assert!(e.output(h) >= Entry::THETA);
        let before = e;
        assert!(!e.train(h, Outcome::T));
        assert_eq!(e, before);

        // A confident misprediction is still trained
        assert!(e.train(h, Outcome::N));
        assert_ne!(e, before);
    }

    #[test]
    fn weak_correct_prediction_is_trained() {
        let mut e = Entry::new();
        e.bias = 36;
        let h = GlobalHistory::new(0);
        assert_eq!(e.output(h), 36);
        assert!(e.train(h, Outcome::T));
        assert_eq!(e.bias, 37);
        assert_eq!(e.output(h), 37 + 12);
    }

    #[test]
    fn margin_grows_until_threshold() {
        let mut e = Entry::new();
        let h = GlobalHistory::new(0xa5a0_0000);
        let mut last = e.output(h);
        while e.train(h, Outcome::T) {
            let out = e.output(h);
            assert!(out > last);
            last = out;
        }
        assert!(last >= Entry::THETA);
        let before = e;
        assert!(!e.train(h, Outcome::T));
        assert_eq!(e, before);
    }

    #[test]
    fn adjust_saturates() {
        let mut e = Entry::new();
        let h = GlobalHistory::new(0xa5a0_0000);
        for _ in 0..300 {
            e.adjust(h, Outcome::T);
        }
        assert_eq!(e.bias, 127);
        for (i, bit) in h.recent_bits(12).iter().by_vals().enumerate() {
            assert_eq!(e.weights[i], if bit { 127 } else { -128 });
        }
        let before = e;
        e.adjust(h, Outcome::T);
        assert_eq!(e, before);
    }

    #[test]
    fn reset_clears_state() {
        let mut e = Entry::new();
        e.adjust(GlobalHistory::new(0x1234_5678), Outcome::N);
        e.reset();
        assert_eq!(e, Entry::new());
    }
}
