//! Engine state
//!
//! The engine exclusively owns the persistent grid and the random source, so
//! steps are serialized by `&mut self` and the draw sequence stays intact.

use super::grid::Grid;
use super::kernel::build_kernel;
use super::rng::{RandomSource, WichmannHill};
use crate::error::FieldError;

/// Owned simulation: persistent field, blob kernel and placement source
#[derive(Debug, Clone)]
pub struct Engine<R = WichmannHill> {
    /// Accumulated intensities, carried from frame to frame
    pub(crate) field: Grid,
    /// Read-only stamp
    pub(crate) kernel: Grid,
    pub(crate) rng: R,
    /// Completed steps
    pub(crate) frames: u64,
}

impl Engine<WichmannHill> {
    /// Create an engine driven by the deterministic sequence generator
    pub fn new(width: usize, height: usize, seed: [i64; 3]) -> Result<Self, FieldError> {
        let rng = WichmannHill::new(seed)?;
        log::debug!("Seeding engine with {:?}", seed);
        Self::with_source(width, height, rng)
    }
}

impl<R: RandomSource> Engine<R> {
    /// Create an engine that places stamps using `rng`
    pub fn with_source(width: usize, height: usize, rng: R) -> Result<Self, FieldError> {
        let field = Grid::zeros(width, height)?;
        let kernel = build_kernel();
        log::debug!(
            "Engine created: {}x{} field, {}x{} kernel",
            width,
            height,
            kernel.width(),
            kernel.height()
        );
        Ok(Self {
            field,
            kernel,
            rng,
            frames: 0,
        })
    }

    pub fn width(&self) -> usize {
        self.field.width()
    }

    pub fn height(&self) -> usize {
        self.field.height()
    }

    /// Persistent field as of the last completed step
    pub fn state(&self) -> &Grid {
        &self.field
    }

    pub fn kernel(&self) -> &Grid {
        &self.kernel
    }

    /// Number of steps taken so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn source(&self) -> &R {
        &self.rng
    }
}
