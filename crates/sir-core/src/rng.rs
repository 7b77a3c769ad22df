//! The simulation's shared random stream.
//!
//! Every stochastic decision of a run (start-up compartment, recovery,
//! infection trials, host-side placement) draws from a `SimRng`.  The model
//! owns exactly one stream and consumes it in a fixed order, so the same seed
//! always reproduces the same epidemic.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Seeded, single-threaded RNG.
///
/// Not `Sync` by intent: one stream, one owner.  If another component needs
/// its own randomness (e.g. the host's placement logic), derive it with
/// [`child`](Self::child) so it never perturbs the model's draw sequence.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Uniform draw in `[0, 1)`.
    ///
    /// All probability tests in the model are written as
    /// `rng.next_f64() < p` so that `p = 1.0` always succeeds and `p = 0.0`
    /// never does, with exactly one draw consumed either way.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}

impl std::fmt::Debug for SimRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SimRng")
    }
}
