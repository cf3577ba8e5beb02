//! Types for representing branches and branch outcomes.

/// A branch outcome.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    /// Not taken
    N = 0,
    /// Taken
    T = 1
}

impl Outcome {
    /// Return the outcome as a single bit (1 for taken).
    pub fn as_bit(self) -> u8 { self as u8 }

    /// Map the outcome onto the bipolar value used for training
    /// (+1 for taken, -1 for not-taken).
    pub fn as_sign(self) -> i32 {
        match self {
            Self::T => 1,
            Self::N => -1,
        }
    }
}

impl std::fmt::Debug for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            Self::T => "t",
            Self::N => "n",
        };
        write!(f, "{}", s)
    }
}

impl std::ops::Not for Outcome {
    type Output = Self;
    fn not(self) -> Self {
        match self {
            Self::N => Self::T,
            Self::T => Self::N,
        }
    }
}

impl From<bool> for Outcome {
    fn from(x: bool) -> Self {
        match x {
            true => Self::T,
            false => Self::N
        }
    }
}
impl From<Outcome> for bool {
    fn from(x: Outcome) -> Self {
        match x {
            Outcome::T => true,
            Outcome::N => false,
        }
    }
}

/// Representing different kinds of branch/control-flow instructions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BranchKind {
    /// A direct conditional branch instruction.
    DirectBranch,

    /// A direct unconditional jump instruction.
    DirectJump,

    /// An indirect unconditional jump instruction.
    IndirectJump,

    /// A direct procedure call instruction.
    DirectCall,

    /// An indirect procedure call instruction.
    IndirectCall,

    /// A return instruction.
    Return,
}
impl BranchKind {
    /// Returns 'true' for the only kind of branch with a direction to predict.
    pub fn is_conditional(&self) -> bool {
        matches!(self, Self::DirectBranch)
    }
}

/// A record of branch execution.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BranchRecord {
    /// The program counter value for this branch
    pub pc: u64,

    /// The outcome evaluated for this branch
    pub outcome: Outcome,

    /// The type/kind of branch
    pub kind: BranchKind,
}
impl BranchRecord {
    pub fn is_conditional(&self) -> bool { self.kind.is_conditional() }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn outcome_bits() {
        assert_eq!(Outcome::T.as_bit(), 1);
        assert_eq!(Outcome::N.as_bit(), 0);
        assert_eq!(Outcome::T.as_sign(), 1);
        assert_eq!(Outcome::N.as_sign(), -1);
        assert_eq!(!Outcome::T, Outcome::N);
        assert_eq!(Outcome::from(true), Outcome::T);
        assert!(!bool::from(Outcome::N));
    }

    #[test]
    fn only_direct_branches_are_conditional() {
        assert!(BranchKind::DirectBranch.is_conditional());
        for kind in [
            BranchKind::DirectJump, BranchKind::IndirectJump,
            BranchKind::DirectCall, BranchKind::IndirectCall,
            BranchKind::Return,
        ] {
            assert!(!kind.is_conditional());
        }
    }
}
