//! Deterministic field simulation
//!
//! All numeric logic lives here. This module must be pure and deterministic:
//! - Seeded sequence generator only (unless a caller injects another source)
//! - Row-major iteration order everywhere
//! - No rendering or platform dependencies

pub mod grid;
pub mod kernel;
pub mod rng;
pub mod state;
pub mod tick;

pub use grid::Grid;
pub use kernel::build_kernel;
pub use rng::{Entropy, RandomSource, WichmannHill};
pub use state::Engine;
pub use tick::{FrameParams, attenuation_curve};
