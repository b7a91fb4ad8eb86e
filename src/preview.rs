//! Terminal preview of output frames
//!
//! Non-finite cells (an idle field normalizes to NaN) are clamped to the
//! darkest shade before lookup.

use crate::field::Grid;

/// Shades from darkest to brightest
const RAMP: &[u8] = b" .:-=+*#%@";

/// Shade for a single intensity, clamped to [0, 1]
pub fn shade_char(value: f64) -> char {
    let v = if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let idx = (v * (RAMP.len() - 1) as f64).round() as usize;
    RAMP[idx] as char
}

/// Render `grid` one line per sampled row, sampling every `stride` cells
pub fn shade(grid: &Grid, stride: usize) -> String {
    let stride = stride.max(1);
    let mut out = String::with_capacity((grid.width() / stride + 1) * (grid.height() / stride));
    for y in (0..grid.height()).step_by(stride) {
        for x in (0..grid.width()).step_by(stride) {
            out.push(shade_char(grid.get(x, y)));
        }
        out.push('\n');
    }
    out
}
