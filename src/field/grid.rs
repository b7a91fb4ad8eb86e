//! Dense 2D grid of intensities
//!
//! Cells are stored row-major. Blits clip against the destination on every
//! side, so stamping partially (or entirely) off-grid is always safe.

use glam::IVec2;

use crate::error::FieldError;

/// Fixed-size 2D field of `f64` cells
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<f64>,
}

impl Grid {
    /// Allocate a `width` x `height` grid with every cell set to `value`
    pub fn new(width: usize, height: usize, value: f64) -> Result<Self, FieldError> {
        let len = width
            .checked_mul(height)
            .filter(|&len| len > 0)
            .ok_or(FieldError::InvalidDimensions { width, height })?;
        Ok(Self {
            width,
            height,
            cells: vec![value; len],
        })
    }

    /// All-zero grid
    pub fn zeros(width: usize, height: usize) -> Result<Self, FieldError> {
        Self::new(width, height, 0.0)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height, "({x}, {y}) outside grid");
        y * self.width + x
    }

    /// Cell at (x, y). Panics when out of range.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.cells[self.index(x, y)]
    }

    /// Overwrite cell at (x, y). Panics when out of range.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f64) {
        let i = self.index(x, y);
        self.cells[i] = value;
    }

    /// Row-major view of every cell
    pub fn as_slice(&self) -> &[f64] {
        &self.cells
    }

    /// New grid with each cell replaced by `f(value, x, y)`
    pub fn map(&self, mut f: impl FnMut(f64, usize, usize) -> f64) -> Self {
        let width = self.width;
        let cells = self
            .cells
            .iter()
            .enumerate()
            .map(|(i, &v)| f(v, i % width, i / width))
            .collect();
        Self {
            width,
            height: self.height,
            cells,
        }
    }

    /// Multiply every cell by `factor` in place
    pub fn scale(&mut self, factor: f64) {
        for v in &mut self.cells {
            *v *= factor;
        }
    }

    /// Largest cell value. A NaN anywhere makes the result NaN.
    pub fn max_value(&self) -> Result<f64, FieldError> {
        self.fold_cells(f64::max)
    }

    /// Smallest cell value. A NaN anywhere makes the result NaN.
    pub fn min_value(&self) -> Result<f64, FieldError> {
        self.fold_cells(f64::min)
    }

    fn fold_cells(&self, pick: impl Fn(f64, f64) -> f64) -> Result<f64, FieldError> {
        let (&first, rest) = self.cells.split_first().ok_or(FieldError::EmptyGrid)?;
        Ok(rest.iter().fold(first, |acc, &v| {
            if acc.is_nan() || v.is_nan() {
                f64::NAN
            } else {
                pick(acc, v)
            }
        }))
    }

    pub fn sum(&self) -> f64 {
        self.cells.iter().sum()
    }

    /// Divide every cell by the maximum.
    ///
    /// A zero maximum yields non-finite cells; callers that feed the result
    /// into anything color-like must clamp first.
    pub fn normalize(&self) -> Self {
        let max = self.max_value().unwrap_or(f64::NAN);
        self.map(|v, _, _| v / max)
    }

    /// Copy `source` onto this grid with its top-left corner at `offset`
    pub fn blit(&mut self, source: &Grid, offset: IVec2) {
        self.blit_with(source, offset, |dst, src| *dst = src);
    }

    /// Accumulate `source` onto this grid with its top-left corner at `offset`
    pub fn add_blit(&mut self, source: &Grid, offset: IVec2) {
        self.blit_with(source, offset, |dst, src| *dst += src);
    }

    fn blit_with(&mut self, source: &Grid, offset: IVec2, op: impl Fn(&mut f64, f64)) {
        let Some((xs, ys)) = self.overlap(source, offset) else {
            return;
        };
        let (ox, oy) = (offset.x as i64, offset.y as i64);

        for sy in ys {
            let dy = (sy as i64 + oy) as usize;
            let src_row = &source.cells[sy * source.width..][xs.clone()];
            let dst_start = dy * self.width + (xs.start as i64 + ox) as usize;
            let dst_row = &mut self.cells[dst_start..dst_start + xs.len()];
            for (dst, &src) in dst_row.iter_mut().zip(src_row) {
                op(dst, src);
            }
        }
    }

    /// Source-space column and row ranges that land inside this grid
    fn overlap(
        &self,
        source: &Grid,
        offset: IVec2,
    ) -> Option<(std::ops::Range<usize>, std::ops::Range<usize>)> {
        let clip = |off: i32, src_len: usize, dst_len: usize| {
            let off = off as i64;
            let start = (-off).max(0);
            let end = (dst_len as i64 - off).min(src_len as i64);
            (start < end).then(|| start as usize..end as usize)
        };
        let xs = clip(offset.x, source.width, self.width)?;
        let ys = clip(offset.y, source.height, self.height)?;
        Some((xs, ys))
    }
}
