use std::collections::VecDeque;

use rand::Rng;

/// Source of the uniform choices the generator makes.
///
/// Each call picks one index in `0..len`; `len` is never zero.
pub trait Draw {
    fn pick_index(&mut self, len: usize) -> usize;
}

impl<D: Draw + ?Sized> Draw for &mut D {
    fn pick_index(&mut self, len: usize) -> usize {
        (**self).pick_index(len)
    }
}

/// Uniform draws from any `rand` generator.
pub struct RngDraws<R>(pub R);

impl<R: Rng> Draw for RngDraws<R> {
    fn pick_index(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }
}

/// Replays a fixed sequence of indices.
///
/// Indices are reduced modulo `len`. Once the script runs out every
/// further draw picks the first candidate.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDraws {
    script: VecDeque<usize>,
}

impl ScriptedDraws {
    pub fn new(script: impl IntoIterator<Item = usize>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Draw for ScriptedDraws {
    fn pick_index(&mut self, len: usize) -> usize {
        self.script.pop_front().map_or(0, |idx| idx % len)
    }
}

/// Forwards to another source and keeps every `(len, index)` it hands out.
pub struct RecordingDraws<D> {
    inner: D,
    picks: Vec<(usize, usize)>,
}

impl<D: Draw> RecordingDraws<D> {
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            picks: Vec::new(),
        }
    }

    pub fn picks(&self) -> &[(usize, usize)] {
        &self.picks
    }

    /// The picked indices, ready to feed back through [`ScriptedDraws`].
    pub fn replay(&self) -> ScriptedDraws {
        ScriptedDraws::new(self.picks.iter().map(|&(_, idx)| idx))
    }
}

impl<D: Draw> Draw for RecordingDraws<D> {
    fn pick_index(&mut self, len: usize) -> usize {
        let idx = self.inner.pick_index(len);
        self.picks.push((len, idx));
        idx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn scripted_draws_wrap_and_run_out() {
        let mut draws = ScriptedDraws::new([1, 7]);
        assert_eq!(draws.pick_index(3), 1);
        assert_eq!(draws.pick_index(5), 2);
        assert_eq!(draws.remaining(), 0);
        assert_eq!(draws.pick_index(4), 0);
    }

    #[test]
    fn rng_draws_stay_in_range() {
        let mut draws = RngDraws(StdRng::seed_from_u64(7));
        for len in 1..50 {
            assert!(draws.pick_index(len) < len);
        }
    }

    #[test]
    fn recording_replays_same_indices() {
        let mut recorder = RecordingDraws::new(RngDraws(StdRng::seed_from_u64(99)));
        let first: Vec<usize> = (1..10).map(|len| recorder.pick_index(len)).collect();

        let mut replay = recorder.replay();
        let second: Vec<usize> = (1..10).map(|len| replay.pick_index(len)).collect();

        assert_eq!(first, second);
        assert_eq!(recorder.picks().len(), 9);
        assert!(recorder.picks().iter().all(|&(len, idx)| idx < len));
    }
}
