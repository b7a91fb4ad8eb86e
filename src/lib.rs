//! Stamp Field - an evolving 2D intensity field
//!
//! A fixed radial "blob" kernel is stamped at pseudo-random positions onto a
//! persistent grid, which is then contrast-mapped for display and decayed
//! every frame.
//!
//! Core modules:
//! - `field`: Deterministic simulation (sequence generator, grid, kernel, step)
//! - `settings`: Driver configuration
//! - `preview`: Terminal shading of output frames
//! - `error`: Construction and configuration errors

pub mod error;
pub mod field;
pub mod preview;
pub mod settings;

pub use error::FieldError;
pub use field::{Engine, FrameParams, Grid, RandomSource, WichmannHill};
pub use settings::{Settings, SourceKind};

/// Engine configuration constants
pub mod consts {
    /// Inclusive bounds for each seed component
    pub const SEED_MIN: i64 = 1;
    pub const SEED_MAX: i64 = 30_000;

    /// Multipliers of the three congruential generators
    pub const MULTIPLIERS: [u32; 3] = [171, 172, 170];
    /// Prime moduli of the three congruential generators
    pub const MODULI: [u32; 3] = [30_269, 30_307, 30_323];

    /// Side length of the square blob kernel
    pub const KERNEL_SIZE: usize = 17;
    /// Peak value of the kernel after normalization
    pub const KERNEL_SCALE: f64 = 0.1;
    /// Widens the falloff radius so corner cells stay slightly positive
    pub const KERNEL_FALLOFF_SLACK: f64 = 1.1;

    /// Offset from the drawn position to the kernel's top-left corner.
    /// Asymmetric: the kernel center lands 8 cells left of the drawn point.
    pub const STAMP_OFFSET: (i32, i32) = (-16, -8);

    /// Exponent of the attenuation easing curve
    pub const ATTENUATION_EXPONENT: f64 = 8.0;
}
