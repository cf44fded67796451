//! The four-valued unknown domain.
//!
//! Every time-varying value in tempora carries a [`Certainty`] at each point
//! in time. `Known` means a literal is present. The three remaining states
//! describe *why* no literal is available: the fact was never supplied
//! (`Unstated`, the open-world default), the inputs contradict each other
//! (`Uncertain`), or the rule logic covering the case is deliberately
//! unimplemented (`Stub`).
//!
//! Two distinct, non-interchangeable dominance orders decide which state a
//! combination of several states collapses to: [`dominant_general`] for
//! comparisons, arithmetic, and unary transforms, and [`dominant_logic`] for
//! AND/OR combination of boolean operands. They are separate policies on
//! purpose; collapsing them into one order changes the truth table of the
//! logical operators.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How much is known about a value at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Certainty {
    /// A literal value is present.
    Known,
    /// No fact has been supplied (open-world default).
    Unstated,
    /// Conflicting or ambiguous input exists.
    Uncertain,
    /// The rule logic for this case is deliberately unimplemented.
    Stub,
}

impl Certainty {
    /// Returns true if a literal value is present.
    #[must_use]
    pub const fn is_known(self) -> bool {
        matches!(self, Self::Known)
    }

    /// Rank under the general order: the most blocking condition wins.
    const fn general_rank(self) -> u8 {
        match self {
            Self::Known => 0,
            Self::Unstated => 1,
            Self::Uncertain => 2,
            Self::Stub => 3,
        }
    }

    /// Rank under the logic order: a contradiction outranks a missing fact,
    /// and a missing fact outranks unimplemented logic, so that combining
    /// boolean operands keeps an interview progressing instead of giving up.
    const fn logic_rank(self) -> u8 {
        match self {
            Self::Known => 0,
            Self::Stub => 1,
            Self::Unstated => 2,
            Self::Uncertain => 3,
        }
    }
}

impl fmt::Display for Certainty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known => write!(f, "known"),
            Self::Unstated => write!(f, "unstated"),
            Self::Uncertain => write!(f, "uncertain"),
            Self::Stub => write!(f, "stub"),
        }
    }
}

/// Collapses several certainties under the general order:
/// Stub > Uncertain > Unstated > Known.
///
/// Used by comparisons, arithmetic, and unary transforms. Returns `Known`
/// only if every input is `Known`.
pub fn dominant_general(states: impl IntoIterator<Item = Certainty>) -> Certainty {
    states
        .into_iter()
        .max_by_key(|s| s.general_rank())
        .unwrap_or(Certainty::Known)
}

/// Collapses several certainties under the logic order:
/// Uncertain > Unstated > Stub > Known.
///
/// Used only by AND/OR combination of boolean operands, and only for slices
/// that no literal short-circuit already decided. Returns `Known` only if
/// every input is `Known`.
pub fn dominant_logic(states: impl IntoIterator<Item = Certainty>) -> Certainty {
    states
        .into_iter()
        .max_by_key(|s| s.logic_rank())
        .unwrap_or(Certainty::Known)
}
