//! Cycle discovery for the Fibonacci recurrence modulo a base
//!
//! This module holds the residue-pair state, canonical cycle form, and the
//! enumerator that partitions the state space into orbits.

pub mod canonical;
pub mod enumerator;
pub mod state;

pub use canonical::{canonicalize, Cycle};
pub use enumerator::{enumerate, CycleEnumerator, Enumeration, NoProgress, ProgressObserver};
pub use state::State;
