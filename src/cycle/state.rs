//! Residue-pair state and the Fibonacci transition
//!
//! A `State` holds two consecutive terms of a Fibonacci-like sequence
//! reduced modulo some base. It serializes as a two-element JSON array.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Two consecutive recurrence terms `(a, b)`, each in `[0, base)`.
///
/// The derived ordering compares the first coordinate, then the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct State(pub u64, pub u64);

impl State {
    /// Create a new state
    #[must_use]
    pub const fn new(a: u64, b: u64) -> Self {
        Self(a, b)
    }

    /// The earlier of the two terms
    #[must_use]
    pub const fn first(self) -> u64 {
        self.0
    }

    /// The later of the two terms
    #[must_use]
    pub const fn second(self) -> u64 {
        self.1
    }

    /// Apply the recurrence once: `(a, b) -> (b, (a + b) mod base)`.
    ///
    /// Both coordinates must already be reduced below `base`.
    #[must_use]
    pub const fn step(self, base: u64) -> Self {
        // a + b < 2 * base, so subtracting once is enough and avoids overflow
        let sum = if self.0 >= base - self.1 {
            self.0 - (base - self.1)
        } else {
            self.0 + self.1
        };
        Self(self.1, sum)
    }

    /// Row-major index of this state in a `base × base` grid.
    #[must_use]
    pub const fn index(self, base: u64) -> u64 {
        self.0 * base + self.1
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

impl From<(u64, u64)> for State {
    fn from((a, b): (u64, u64)) -> Self {
        Self(a, b)
    }
}
