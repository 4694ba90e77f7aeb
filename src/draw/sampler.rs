// Uniform index sampling behind a trait so draws can be seeded in tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::roster::participant::Participant;

/// Source of uniform random indices.
pub trait Sampler: Send {
    /// Return an index uniformly distributed over `0..len`. Callers never
    /// pass `len == 0`.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// `StdRng`-backed sampler. Seed it for reproducible draws.
pub struct SeededSampler {
    rng: StdRng,
}

impl SeededSampler {
    pub fn from_seed(seed: u64) -> Self {
        SeededSampler {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seed from the operating system's entropy source.
    pub fn from_entropy() -> Self {
        SeededSampler {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Build from an optional configured seed.
    pub fn from_config(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }
}

impl Sampler for SeededSampler {
    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

/// Pick one position uniformly from a pool of `len`, or `None` if it is empty.
pub fn sample_index(sampler: &mut dyn Sampler, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(sampler.pick_index(len).min(len - 1))
}

/// Pick one participant uniformly from `pool`, or `None` if it is empty.
pub fn sample<'a>(sampler: &mut dyn Sampler, pool: &'a [Participant]) -> Option<&'a Participant> {
    sample_index(sampler, pool.len()).and_then(|idx| pool.get(idx))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
