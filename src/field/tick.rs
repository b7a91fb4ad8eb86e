//! Per-frame simulation step
//!
//! One step stamps the kernel at random positions, produces a contrast-mapped
//! output frame and then decays the persistent field.

use glam::IVec2;

use super::grid::Grid;
use super::rng::RandomSource;
use super::state::Engine;
use crate::consts::{ATTENUATION_EXPONENT, STAMP_OFFSET};
use crate::error::FieldError;

/// Validated inputs for a single step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameParams {
    stamps: u32,
    contrast: f64,
    attenuation: f64,
}

impl FrameParams {
    /// Check raw driver inputs.
    ///
    /// `stamps` must fit in a `u32`, `contrast` finite and non-negative and
    /// `attenuation` within [0, 1].
    pub fn new(stamps: i64, contrast: f64, attenuation: f64) -> Result<Self, FieldError> {
        let stamps = u32::try_from(stamps).map_err(|_| FieldError::InvalidStampCount(stamps))?;
        if !contrast.is_finite() || contrast < 0.0 {
            return Err(FieldError::InvalidContrast(contrast));
        }
        if !(0.0..=1.0).contains(&attenuation) {
            return Err(FieldError::InvalidAttenuation(attenuation));
        }
        Ok(Self {
            stamps,
            contrast,
            attenuation,
        })
    }

    pub fn stamps(&self) -> u32 {
        self.stamps
    }

    pub fn contrast(&self) -> f64 {
        self.contrast
    }

    /// Raw attenuation input, before easing
    pub fn attenuation(&self) -> f64 {
        self.attenuation
    }
}

/// Ease the raw attenuation input: `1 - (1 - input)^8`.
/// Most of the control's travel ends up close to 1.
pub fn attenuation_curve(input: f64) -> f64 {
    1.0 - (1.0 - input).powf(ATTENUATION_EXPONENT)
}

impl<R: RandomSource> Engine<R> {
    /// Advance the field by one frame and return the display grid.
    ///
    /// The returned grid is the normalized field raised to the contrast
    /// exponent. Before anything has been stamped it is all NaN.
    pub fn step(&mut self, params: &FrameParams) -> Grid {
        self.stamp(params.stamps);

        let decay = attenuation_curve(params.attenuation);
        let contrast = params.contrast;
        let output = self.field.normalize().map(|v, _, _| v.powf(contrast));

        self.field.scale(decay);
        self.frames += 1;
        log::trace!(
            "frame {}: {} stamps, decay {:.6}",
            self.frames,
            params.stamps,
            decay
        );
        output
    }

    fn stamp(&mut self, count: u32) {
        let width = self.field.width() as f64;
        let height = self.field.height() as f64;
        let offset = IVec2::from(STAMP_OFFSET);

        for _ in 0..count {
            let x = (self.rng.draw() * width) as i32;
            let y = (self.rng.draw() * height) as i32;
            self.field.add_blit(&self.kernel, IVec2::new(x, y) + offset);
        }
    }

    /// Replace the persistent field with its normalized form.
    ///
    /// A field without a positive finite maximum normalizes to non-finite
    /// cells, and those carry over into later frames.
    pub fn renormalize(&mut self) {
        match self.field.max_value() {
            Ok(max) if max.is_finite() && max > 0.0 => {
                log::debug!("Renormalizing field (max {max:.6})");
            }
            Ok(max) => log::warn!("Renormalizing degenerate field (max {max})"),
            Err(e) => log::warn!("Renormalizing degenerate field: {e}"),
        }
        self.field = self.field.normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::KERNEL_SCALE;
    use crate::field::WichmannHill;

    /// Always returns the same fraction
    #[derive(Clone)]
    struct Fixed(f64);

    impl RandomSource for Fixed {
        fn draw(&mut self) -> f64 {
            self.0
        }
    }

    fn params(stamps: i64, contrast: f64, attenuation: f64) -> FrameParams {
        FrameParams::new(stamps, contrast, attenuation).unwrap()
    }

    #[test]
    fn test_attenuation_curve() {
        assert_eq!(attenuation_curve(0.0), 0.0);
        assert_eq!(attenuation_curve(1.0), 1.0);
        assert_eq!(attenuation_curve(0.5), 0.99609375);
        assert!(attenuation_curve(0.2) < attenuation_curve(0.3));
    }

    #[test]
    fn test_frame_params_validation() {
        assert!(matches!(
            FrameParams::new(-1, 1.0, 0.5),
            Err(FieldError::InvalidStampCount(-1))
        ));
        assert!(matches!(
            FrameParams::new(i64::from(u32::MAX) + 1, 1.0, 0.5),
            Err(FieldError::InvalidStampCount(4_294_967_296))
        ));
        assert_eq!(
            FrameParams::new(i64::from(u32::MAX), 1.0, 0.5).unwrap().stamps(),
            u32::MAX
        );
        assert!(matches!(
            FrameParams::new(1, -0.1, 0.5),
            Err(FieldError::InvalidContrast(_))
        ));
        assert!(matches!(
            FrameParams::new(1, f64::NAN, 0.5),
            Err(FieldError::InvalidContrast(_))
        ));
        assert!(matches!(
            FrameParams::new(1, 1.0, 1.5),
            Err(FieldError::InvalidAttenuation(_))
        ));
        assert!(matches!(
            FrameParams::new(1, 1.0, f64::NAN),
            Err(FieldError::InvalidAttenuation(_))
        ));
        let p = params(0, 0.0, 1.0);
        assert_eq!(p.stamps(), 0);
        assert_eq!(p.contrast(), 0.0);
        assert_eq!(p.attenuation(), 1.0);
    }

    #[test]
    fn test_idle_step_yields_nan_frame() {
        let mut engine = Engine::new(4, 4, [1, 1, 1]).unwrap();
        let out = engine.step(&params(0, 1.0, 0.5));

        assert_eq!(out.len(), 16);
        assert!(out.as_slice().iter().all(|v| v.is_nan()));
        assert!(engine.state().as_slice().iter().all(|&v| v == 0.0));
        assert_eq!(engine.frames(), 1);
        // no draws were consumed
        assert_eq!(engine.source().state(), [1, 1, 1]);
    }

    #[test]
    fn test_single_stamp_lands_at_expected_peak() {
        let mut engine = Engine::new(64, 64, [100, 100, 100]).unwrap();
        let out = engine.step(&params(1, 1.0, 1.0));

        // first draws are 0.693... and 0.525... -> (44, 33); kernel center
        // sits at (44 - 16 + 8, 33 - 8 + 8)
        let (px, py) = (36, 33);
        let state = engine.state();
        assert_eq!(state.get(px, py), KERNEL_SCALE);
        assert_eq!(state.max_value().unwrap(), state.get(px, py));
        assert_eq!(out.get(px, py), 1.0);
        assert!((state.sum() - engine.kernel().sum()).abs() < 1e-12);
        assert_eq!(state.get(px - 9, py), 0.0);
        assert_eq!(state.get(px, py + 9), 0.0);
    }

    #[test]
    fn test_decay_applies_after_output() {
        let mut engine = Engine::with_source(64, 64, Fixed(0.5)).unwrap();
        let out = engine.step(&params(1, 1.0, 0.5));

        // drawn (32, 32) -> kernel center at (24, 32)
        assert_eq!(out.get(24, 32), 1.0);
        let expected = KERNEL_SCALE * 0.99609375;
        assert!((engine.state().get(24, 32) - expected).abs() < 1e-15);
    }

    #[test]
    fn test_full_attenuation_input_keeps_field() {
        let mut engine = Engine::with_source(40, 40, Fixed(0.5)).unwrap();
        engine.step(&params(2, 1.0, 1.0));
        assert_eq!(engine.state().get(12, 20), 2.0 * KERNEL_SCALE);
        engine.step(&params(0, 1.0, 1.0));
        assert_eq!(engine.state().get(12, 20), 2.0 * KERNEL_SCALE);
    }

    #[test]
    fn test_zero_attenuation_input_clears_field() {
        let mut engine = Engine::with_source(40, 40, Fixed(0.5)).unwrap();
        engine.step(&params(3, 1.0, 0.0));
        assert_eq!(engine.state().sum(), 0.0);
    }

    #[test]
    fn test_contrast_exponent() {
        let mut engine = Engine::with_source(40, 40, Fixed(0.5)).unwrap();
        engine.step(&params(1, 1.0, 1.0));
        let linear = engine.clone().step(&params(0, 1.0, 1.0));
        let squared = engine.clone().step(&params(0, 2.0, 1.0));
        let flat = engine.step(&params(0, 0.0, 1.0));

        for ((&l, &s), &f) in linear
            .as_slice()
            .iter()
            .zip(squared.as_slice())
            .zip(flat.as_slice())
        {
            assert!((s - l * l).abs() < 1e-15);
            // 0^0 == 1 as well
            assert_eq!(f, 1.0);
        }
    }

    #[test]
    fn test_off_grid_stamp_is_clipped() {
        // drawn (0, 0): kernel corner at (-16, -8), only its last column lands
        let mut engine = Engine::with_source(20, 20, Fixed(0.0)).unwrap();
        engine.step(&params(1, 1.0, 1.0));

        let kernel = engine.kernel().clone();
        let state = engine.state();
        for y in 0..9 {
            assert_eq!(state.get(0, y), kernel.get(16, y + 8));
        }
        assert_eq!(state.get(1, 0), 0.0);
        assert_eq!(state.get(19, 19), 0.0);
    }

    #[test]
    fn test_determinism() {
        let mut a = Engine::new(48, 32, [123, 4567, 29000]).unwrap();
        let mut b = Engine::new(48, 32, [123, 4567, 29000]).unwrap();
        let frame = params(5, 1.5, 0.7);

        for _ in 0..20 {
            let out_a = a.step(&frame);
            let out_b = b.step(&frame);
            assert_eq!(out_a, out_b);
        }
        assert_eq!(a.state(), b.state());
        assert_eq!(a.frames(), 20);
    }

    #[test]
    fn test_engine_draws_match_generator() {
        let mut engine = Engine::new(30, 50, [7, 8, 9]).unwrap();
        let mut rng = WichmannHill::new([7, 8, 9]).unwrap();
        engine.step(&params(3, 1.0, 1.0));
        for _ in 0..6 {
            rng.draw();
        }
        assert_eq!(engine.source(), &rng);
    }

    #[test]
    fn test_renormalize() {
        let mut engine = Engine::with_source(40, 40, Fixed(0.5)).unwrap();
        engine.step(&params(1, 1.0, 1.0));
        engine.renormalize();
        assert_eq!(engine.state().max_value().unwrap(), 1.0);
        assert_eq!(engine.state().get(12, 20), 1.0);
    }

    #[test]
    fn test_renormalize_blank_field_goes_non_finite() {
        let mut engine = Engine::new(4, 4, [1, 1, 1]).unwrap();
        engine.renormalize();
        assert_eq!(engine.state().len(), 16);
        assert!(engine.state().as_slice().iter().all(|v| v.is_nan()));

        // stamps land on NaN cells and stay NaN
        engine.step(&params(2, 1.0, 1.0));
        assert!(engine.state().max_value().unwrap().is_nan());
    }
}
