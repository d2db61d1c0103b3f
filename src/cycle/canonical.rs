//! Canonical cycle representation
//!
//! A cycle is stored starting at its smallest state, so any two rotations
//! of the same cycle produce identical `Cycle` values and can be compared
//! or hashed directly.

use serde::Serialize;

use super::state::State;

/// Index of the lexicographically smallest state. Ties keep the earliest.
fn min_state_index(states: &[State]) -> usize {
    let mut min_idx = 0;
    for (i, state) in states.iter().enumerate().skip(1) {
        if *state < states[min_idx] {
            min_idx = i;
        }
    }
    min_idx
}

/// Rotate `states` so that it starts at its smallest state.
///
/// An empty slice canonicalizes to an empty vector.
#[must_use]
pub fn canonicalize(states: &[State]) -> Vec<State> {
    if states.is_empty() {
        return Vec::new();
    }
    let start = min_state_index(states);
    let mut rotated = Vec::with_capacity(states.len());
    rotated.extend_from_slice(&states[start..]);
    rotated.extend_from_slice(&states[..start]);
    rotated
}

/// A cycle of states in canonical rotation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Cycle {
    states: Vec<State>,
}

impl Cycle {
    /// Build a cycle from states in traversal order, canonicalizing them.
    #[must_use]
    pub fn from_states(states: &[State]) -> Self {
        Self {
            states: canonicalize(states),
        }
    }

    /// The states, starting at the smallest
    #[must_use]
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Number of states in the cycle
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the cycle has no states
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// First coordinate of each state, in cycle order.
    #[must_use]
    pub fn sequence(&self) -> Vec<u64> {
        self.states.iter().map(|s| s.first()).collect()
    }
}
