//! Driver settings
//!
//! Loaded from a JSON file; any missing field falls back to its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::FieldError;
use crate::field::{Engine, Entropy, FrameParams, RandomSource, WichmannHill};

/// Where stamp positions come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceKind {
    /// Wichmann-Hill sequence seeded from `Settings::seed`
    #[default]
    Deterministic,
    /// PCG32 stream with its own 64-bit seed
    Pcg { seed: u64 },
    /// Thread-local entropy, different every run
    Entropy,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Deterministic => "deterministic",
            SourceKind::Pcg { .. } => "pcg",
            SourceKind::Entropy => "entropy",
        }
    }
}

/// Field size, placement source and frame parameters for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub width: usize,
    pub height: usize,
    /// Seed triple for the deterministic source, each in [1, 30000]
    pub seed: [i64; 3],
    pub source: SourceKind,

    // === Frame parameters ===
    /// Kernel stamps per frame
    pub stamps: i64,
    /// Exponent applied to the normalized field
    pub contrast: f64,
    /// Raw attenuation input (0.0 - 1.0), eased before use
    pub attenuation: f64,

    // === Run ===
    /// Number of frames to simulate
    pub frames: u32,
    /// Renormalize the persistent field every N frames
    pub renormalize_every: Option<u32>,
    /// Print the last frame to the terminal
    pub preview: bool,
    /// Sample every Nth cell in the preview
    pub preview_stride: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
            seed: [100, 100, 100],
            source: SourceKind::Deterministic,

            stamps: 4,
            contrast: 1.0,
            attenuation: 0.5,

            frames: 120,
            renormalize_every: None,
            preview: true,
            preview_stride: 1,
        }
    }
}

impl Settings {
    /// Read settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FieldError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = serde_json::from_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), FieldError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Validate the per-frame inputs
    pub fn frame_params(&self) -> Result<FrameParams, FieldError> {
        FrameParams::new(self.stamps, self.contrast, self.attenuation)
    }

    /// Build an engine with the configured source
    pub fn build_engine(&self) -> Result<Engine<Box<dyn RandomSource>>, FieldError> {
        let rng: Box<dyn RandomSource> = match self.source {
            SourceKind::Deterministic => Box::new(WichmannHill::new(self.seed)?),
            SourceKind::Pcg { seed } => Box::new(Entropy::pcg(seed)),
            SourceKind::Entropy => Box::new(Entropy::thread()),
        };
        log::debug!("Using {} source", self.source.as_str());
        Engine::with_source(self.width, self.height, rng)
    }
}
