//! Radial blob kernel
//!
//! Built once at engine creation and only ever read afterwards.

use glam::DVec2;

use super::grid::Grid;
use crate::consts::{KERNEL_FALLOFF_SLACK, KERNEL_SCALE, KERNEL_SIZE};

/// Build the 17x17 falloff kernel.
///
/// Each cell is `(1 - d / (cap * 1.1))^2` where `d` is the distance to the
/// center cell and `cap` the center-to-corner distance. The result is
/// normalized and scaled so the peak equals [`KERNEL_SCALE`].
pub fn build_kernel() -> Grid {
    let center = DVec2::splat((KERNEL_SIZE / 2) as f64);
    let cap = center.distance(DVec2::ZERO);
    let reach = cap * KERNEL_FALLOFF_SLACK;

    Grid::zeros(KERNEL_SIZE, KERNEL_SIZE)
        .expect("kernel dimensions are non-zero")
        .map(|_, x, y| {
            let d = DVec2::new(x as f64, y as f64).distance(center);
            (1.0 - d / reach).powi(2)
        })
        .normalize()
        .map(|v, _, _| v * KERNEL_SCALE)
}
