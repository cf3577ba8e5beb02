//! A snapshot of the global branch history register.

use bitvec::prelude::*;
use crate::branch::Outcome;

/// A read-only snapshot of the 32-bit global history register.
///
/// The host owns the real register. Newer outcomes are shifted in at the
/// most-significant end, so the `n` most recent outcomes are always the top
/// `n` bits (the most recent outcome is bit 31).
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GlobalHistory(u32);

// NOTE: This prints the most recent outcome first (bit 31 on the left).
impl std::fmt::Display for GlobalHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:032b}", self.0)
    }
}

impl std::fmt::Debug for GlobalHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "GlobalHistory({:#010x})", self.0)
    }
}

impl From<u32> for GlobalHistory {
    fn from(x: u32) -> Self { Self(x) }
}

impl GlobalHistory {
    /// Width of the register in bits.
    pub const WIDTH: usize = u32::BITS as usize;

    pub fn new(bits: u32) -> Self { Self(bits) }

    /// Return the raw register value.
    pub fn bits(&self) -> u32 { self.0 }

    /// Return the register with a new outcome shifted in.
    /// The oldest outcome (bit 0) is discarded.
    #[must_use]
    pub fn push(self, outcome: Outcome) -> Self {
        let newest = (outcome.as_bit() as u32) << (Self::WIDTH - 1);
        Self((self.0 >> 1) | newest)
    }

    /// Return the `len` most recent outcomes.
    ///
    /// Index `i` of the result is bit `i` of `self.bits() >> (32 - len)`,
    /// so the most recent outcome is at index `len - 1`.
    pub fn recent_bits(&self, len: usize) -> &BitSlice<u32, Lsb0> {
        assert!(len <= Self::WIDTH, "history length {} exceeds {} bits",
            len, Self::WIDTH);
        &self.0.view_bits::<Lsb0>()[Self::WIDTH - len..]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn push_shifts_from_the_top() {
        let h = GlobalHistory::default()
            .push(Outcome::T)
            .push(Outcome::N)
            .push(Outcome::T);
        assert_eq!(h.bits(), 0b101 << 29);
        assert_eq!(h.to_string().chars().take(3).collect::<String>(), "101");
    }

    #[test]
    fn recent_bits_match_shifted_register() {
        let h = GlobalHistory::new(0xdead_beef);
        for len in [1, 7, 12, 31, 32] {
            let bits = h.recent_bits(len);
            assert_eq!(bits.len(), len);
            let shifted = (h.bits() as u64) >> (32 - len);
            for (i, bit) in bits.iter().by_vals().enumerate() {
                assert_eq!(bit, (shifted >> i) & 1 == 1, "len={} bit={}", len, i);
            }
        }
    }

    #[test]
    fn zero_length_is_empty() {
        assert!(GlobalHistory::new(u32::MAX).recent_bits(0).is_empty());
    }
}
