//! Cycle enumeration over the residue-pair state space
//!
//! Walks the recurrence from every unvisited state of `[0, base)²` in
//! row-major order, cuts off the repeating suffix of each trajectory,
//! and collects the distinct canonical cycles in discovery order.

use std::collections::{HashMap, HashSet};

use anyhow::{bail, Result};

use super::canonical::Cycle;
use super::state::State;

/// Default state-space size above which progress is reported
pub const DEFAULT_PROGRESS_THRESHOLD: u64 = 1000;

/// Default number of progress increments over a full run
pub const DEFAULT_PROGRESS_STEPS: u64 = 100;

/// Extra steps allowed per trajectory on top of `2 * base²`
const STEP_SLACK: u64 = 1000;

/// Observer for enumeration progress.
///
/// Purely advisory: nothing reported here influences the result.
pub trait ProgressObserver {
    /// Called with the percentage of starting states scanned so far.
    fn update(&mut self, percent: u64);
}

/// Observer that discards every update
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn update(&mut self, _percent: u64) {}
}

/// The distinct cycles found for one modulus, in discovery order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enumeration {
    /// The modulus
    pub base: u64,
    /// Canonical cycles, first discovered first
    pub cycles: Vec<Cycle>,
}

impl Enumeration {
    /// First-coordinate projection of every cycle, same order as `cycles`.
    #[must_use]
    pub fn sequences(&self) -> Vec<Vec<u64>> {
        self.cycles.iter().map(Cycle::sequence).collect()
    }

    /// Number of distinct cycles
    #[must_use]
    pub fn len(&self) -> usize {
        self.cycles.len()
    }

    /// Whether no cycles were found (only for `base == 0`)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }
}

/// Enumerates the cycles of the Fibonacci recurrence modulo `base`
#[derive(Debug, Clone)]
pub struct CycleEnumerator {
    base: u64,
    progress_threshold: u64,
    progress_steps: u64,
}

impl CycleEnumerator {
    /// Create an enumerator with the default progress settings
    #[must_use]
    pub const fn new(base: u64) -> Self {
        Self {
            base,
            progress_threshold: DEFAULT_PROGRESS_THRESHOLD,
            progress_steps: DEFAULT_PROGRESS_STEPS,
        }
    }

    /// Report progress only when `base²` exceeds `threshold`.
    #[must_use]
    pub const fn with_progress_threshold(mut self, threshold: u64) -> Self {
        self.progress_threshold = threshold;
        self
    }

    /// Number of progress increments over a full run (clamped to at least 1).
    #[must_use]
    pub const fn with_progress_steps(mut self, steps: u64) -> Self {
        self.progress_steps = if steps == 0 { 1 } else { steps };
        self
    }

    /// The modulus this enumerator works over
    #[must_use]
    pub const fn base(&self) -> u64 {
        self.base
    }

    /// Size of the state space, or `None` if `base²` overflows `u64`.
    #[must_use]
    pub const fn state_count(&self) -> Option<u64> {
        self.base.checked_mul(self.base)
    }

    /// Run the enumeration, reporting progress to `progress`.
    ///
    /// Fails only if the state space does not fit in `u64` or a trajectory
    /// exceeds its step cap, which would mean the transition is broken.
    pub fn run(&self, progress: &mut dyn ProgressObserver) -> Result<Enumeration> {
        let base = self.base;
        if base == 0 {
            return Ok(Enumeration {
                base,
                cycles: Vec::new(),
            });
        }

        let Some(total) = self.state_count() else {
            bail!("State space for base {base} does not fit in 64 bits");
        };
        let Some(max_steps) = total
            .checked_mul(2)
            .and_then(|n| n.checked_add(STEP_SLACK))
        else {
            bail!("Step cap for base {base} does not fit in 64 bits");
        };

        let show_progress = total > self.progress_threshold;
        let interval = (total / self.progress_steps).max(1);

        let mut visited: HashSet<State> = HashSet::new();
        let mut discovered: Vec<Cycle> = Vec::new();

        for a0 in 0..base {
            for b0 in 0..base {
                let start = State::new(a0, b0);
                if visited.contains(&start) {
                    continue;
                }

                let (path, cycle_start) = walk(start, base, max_steps)?;
                discovered.push(Cycle::from_states(&path[cycle_start..]));
                visited.extend(path);

                let index = start.index(base);
                if show_progress && index % interval == 0 {
                    progress.update(percent(index, total));
                }
            }
        }

        if show_progress {
            progress.update(100);
        }

        Ok(Enumeration {
            base,
            cycles: dedup_stable(discovered),
        })
    }
}

/// Follow the recurrence from `start` until a state repeats.
///
/// Returns the full path and the index in it where the cycle begins.
fn walk(start: State, base: u64, max_steps: u64) -> Result<(Vec<State>, usize)> {
    let mut path: Vec<State> = Vec::new();
    let mut seen_at: HashMap<State, usize> = HashMap::new();
    let mut current = start;
    let mut steps: u64 = 0;

    while steps < max_steps {
        if let Some(&idx) = seen_at.get(&current) {
            return Ok((path, idx));
        }
        seen_at.insert(current, path.len());
        path.push(current);
        current = current.step(base);
        steps += 1;
    }

    bail!(
        "Trajectory from {start} did not repeat within {max_steps} steps (base {base}); \
         the transition is not behaving as a finite deterministic map"
    )
}

/// Drop cycles equal to an earlier one, keeping first-seen order.
fn dedup_stable(cycles: Vec<Cycle>) -> Vec<Cycle> {
    let mut seen: HashSet<Cycle> = HashSet::with_capacity(cycles.len());
    let mut unique = Vec::new();
    for cycle in cycles {
        if !seen.contains(&cycle) {
            seen.insert(cycle.clone());
            unique.push(cycle);
        }
    }
    unique
}

fn percent(index: u64, total: u64) -> u64 {
    // u128 keeps index * 100 from overflowing for very large state spaces
    u64::try_from(u128::from(index) * 100 / u128::from(total)).unwrap_or(100)
}

/// Enumerate the cycles modulo `base` without progress reporting.
pub fn enumerate(base: u64) -> Result<Enumeration> {
    CycleEnumerator::new(base).run(&mut NoProgress)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        updates: Vec<u64>,
    }

    impl ProgressObserver for Recorder {
        fn update(&mut self, percent: u64) {
            self.updates.push(percent);
        }
    }

    fn pairs(cycle: &Cycle) -> Vec<(u64, u64)> {
        cycle.states().iter().map(|s| (s.first(), s.second())).collect()
    }

    #[test]
    fn test_base_zero_is_empty() {
        let result = enumerate(0).unwrap();
        assert!(result.is_empty());
        assert!(result.sequences().is_empty());
    }

    #[test]
    fn test_base_one_single_fixed_point() {
        let result = enumerate(1).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(pairs(&result.cycles[0]), vec![(0, 0)]);
        assert_eq!(result.sequences(), vec![vec![0]]);
    }

    #[test]
    fn test_base_two_cycles() {
        let result = enumerate(2).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(pairs(&result.cycles[0]), vec![(0, 0)]);
        assert_eq!(pairs(&result.cycles[1]), vec![(0, 1), (1, 1), (1, 0)]);
        assert_eq!(result.sequences(), vec![vec![0], vec![0, 1, 1]]);
    }

    #[test]
    fn test_base_three_cycles() {
        let result = enumerate(3).unwrap();
        // the zero state, then one cycle through the other eight states
        assert_eq!(result.len(), 2);
        assert_eq!(result.cycles[1].len(), 8);
        assert_eq!(result.sequences()[1], vec![0, 1, 1, 2, 0, 2, 2, 1]);
    }

    #[test]
    fn test_walk_finds_cycle_start() {
        let (path, start) = walk(State::new(0, 1), 2, 1000).unwrap();
        assert_eq!(start, 0);
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn test_walk_errors_when_cap_is_hit() {
        let err = walk(State::new(0, 1), 10, 5).unwrap_err();
        assert!(err.to_string().contains("did not repeat within 5 steps"));
    }

    #[test]
    fn test_dedup_stable_keeps_first_order() {
        let a = Cycle::from_states(&[State::new(0, 0)]);
        let b = Cycle::from_states(&[State::new(1, 1), State::new(0, 1), State::new(1, 0)]);
        let b_rotated =
            Cycle::from_states(&[State::new(0, 1), State::new(1, 0), State::new(1, 1)]);
        let out = dedup_stable(vec![b.clone(), a.clone(), b_rotated]);
        assert_eq!(out, vec![b, a]);
    }

    #[test]
    fn test_progress_silent_below_threshold() {
        let mut recorder = Recorder::default();
        CycleEnumerator::new(10).run(&mut recorder).unwrap();
        assert!(recorder.updates.is_empty());
    }

    #[test]
    fn test_progress_reported_above_threshold() {
        let mut recorder = Recorder::default();
        CycleEnumerator::new(10)
            .with_progress_threshold(50)
            .with_progress_steps(10)
            .run(&mut recorder)
            .unwrap();
        assert_eq!(recorder.updates.first(), Some(&0));
        assert_eq!(recorder.updates.last(), Some(&100));
        assert!(recorder.updates.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_progress_does_not_change_result() {
        let mut recorder = Recorder::default();
        let reported = CycleEnumerator::new(12)
            .with_progress_threshold(0)
            .run(&mut recorder)
            .unwrap();
        assert_eq!(reported, enumerate(12).unwrap());
    }

    #[test]
    fn test_overflowing_state_space_is_rejected() {
        let err = enumerate(u64::MAX).unwrap_err();
        assert!(err.to_string().contains("does not fit in 64 bits"));
    }

    #[test]
    fn test_state_count() {
        assert_eq!(CycleEnumerator::new(7).state_count(), Some(49));
        assert_eq!(CycleEnumerator::new(u64::MAX).state_count(), None);
    }
}
