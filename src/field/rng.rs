//! Random sources for stamp placement
//!
//! The engine only needs a stream of fractions in [0, 1). The default source
//! is the Wichmann-Hill combination of three small congruential generators,
//! which reproduces bit-for-bit across runs for the same seed triple.

use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{MODULI, MULTIPLIERS, SEED_MAX, SEED_MIN};
use crate::error::FieldError;

/// Anything that can hand out uniform fractions in [0, 1)
pub trait RandomSource {
    fn draw(&mut self) -> f64;
}

impl<S: RandomSource + ?Sized> RandomSource for Box<S> {
    fn draw(&mut self) -> f64 {
        (**self).draw()
    }
}

/// Three-generator Wichmann-Hill sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WichmannHill {
    state: [u32; 3],
}

impl WichmannHill {
    /// Create a generator from a seed triple, each component in [1, 30000]
    pub fn new(seed: [i64; 3]) -> Result<Self, FieldError> {
        let mut state = [0u32; 3];
        for (index, (&value, slot)) in seed.iter().zip(state.iter_mut()).enumerate() {
            if !(SEED_MIN..=SEED_MAX).contains(&value) {
                return Err(FieldError::InvalidSeed { index, value });
            }
            *slot = value as u32;
        }
        Ok(Self { state })
    }

    /// Current internal state (s1, s2, s3)
    pub fn state(&self) -> [u32; 3] {
        self.state
    }
}

impl RandomSource for WichmannHill {
    fn draw(&mut self) -> f64 {
        let mut sum = 0.0;
        for ((s, &a), &m) in self.state.iter_mut().zip(&MULTIPLIERS).zip(&MODULI) {
            *s = (a * *s) % m;
            sum += f64::from(*s) / f64::from(m);
        }
        sum % 1.0
    }
}

/// Adapter that lets any `rand` generator feed the engine
#[derive(Debug, Clone)]
pub struct Entropy<R>(pub R);

impl Entropy<rand::rngs::ThreadRng> {
    /// Non-reproducible source backed by the thread-local generator
    pub fn thread() -> Self {
        Self(rand::rng())
    }
}

impl Entropy<Pcg32> {
    /// Reproducible PCG32 stream for a 64-bit seed
    pub fn pcg(seed: u64) -> Self {
        Self(Pcg32::seed_from_u64(seed))
    }
}

impl<R: RngCore> RandomSource for Entropy<R> {
    fn draw(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}
