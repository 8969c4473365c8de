use std::fmt;

use tracing::debug;

use crate::expression::{Expression, Input};
use crate::logic::dnf::minimized_dnf;
use crate::logic::implies::implies;
use crate::logic::witness::find_diff;

/// Why two expressions were judged non-equivalent.
#[derive(Debug, Clone, PartialEq)]
pub enum EquivalenceError {
    /// A concrete input on which the two expressions evaluate differently.
    Witness { input: Input },
    /// Witness search was exhausted, but one minimized DNF does not imply
    /// the other. Carries both for inspection.
    NotImplied { premise: Expression, conclusion: Expression },
}

impl fmt::Display for EquivalenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EquivalenceError::Witness { input } => {
                write!(f, "expressions are not equivalent, they differ on input {input}")
            }
            EquivalenceError::NotImplied { premise, conclusion } => {
                write!(
                    f,
                    "expressions are not equivalent after DNF minimization: {premise} does not imply {conclusion}"
                )
            }
        }
    }
}

impl std::error::Error for EquivalenceError {}

/// Decides whether `a` and `b` denote the same function. Witness search runs
/// first because a concrete distinguishing input is the most debuggable kind
/// of failure; the DNF implication check covers what the finite search
/// cannot.
pub fn assert_equivalence(a: &Expression, b: &Expression) -> Result<(), EquivalenceError> {
    if a == b {
        return Ok(());
    }

    if let Some(input) = find_diff(a, b) {
        return Err(EquivalenceError::Witness { input });
    }

    let dnf_a = minimized_dnf(a);
    let dnf_b = minimized_dnf(b);
    debug!(%dnf_a, %dnf_b, "no witness found, checking implication both ways");

    if !implies(&dnf_a, &dnf_b) {
        return Err(EquivalenceError::NotImplied { premise: dnf_a, conclusion: dnf_b });
    }
    if !implies(&dnf_b, &dnf_a) {
        return Err(EquivalenceError::NotImplied { premise: dnf_b, conclusion: dnf_a });
    }
    Ok(())
}
