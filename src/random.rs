use rand::Rng;
use rand::rngs::StdRng;

/// Source of uniform random indices used for food placement.
///
/// The engine takes one at construction so tests can script the exact
/// sequence of draws.
pub trait RandomSource {
    /// Returns an index uniformly distributed in `0..upper`.
    ///
    /// Callers never pass `upper == 0`.
    fn pick_index(&mut self, upper: usize) -> usize;
}

impl RandomSource for StdRng {
    fn pick_index(&mut self, upper: usize) -> usize {
        self.gen_range(0..upper)
    }
}

/// Replays scripted indices, wrapped into range; draws zero once exhausted.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub(crate) struct ScriptedSource {
    draws: std::collections::VecDeque<usize>,
    pub(crate) calls: usize,
}

#[cfg(test)]
impl ScriptedSource {
    pub(crate) fn new(draws: &[usize]) -> Self {
        Self {
            draws: draws.iter().copied().collect(),
            calls: 0,
        }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedSource {
    fn pick_index(&mut self, upper: usize) -> usize {
        self.calls += 1;
        self.draws.pop_front().unwrap_or(0) % upper
    }
}
