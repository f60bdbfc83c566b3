use crate::csv_reader::Coordinate;
use crate::error::{FigureError, Result};
use crate::smoothing::{self, BoundaryMode};

use itertools::{Itertools, MinMaxResult};
use ndarray::Array2;

/// A 2D density grid over longitude x latitude.
///
/// Rows run south to north (row 0 is the minimum latitude), columns west to
/// east. The extents are taken from the data itself; callers render the grid
/// stretched over whatever map extent they like.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityGrid {
    data: Array2<f64>,
    x_extent: (f64, f64),
    y_extent: (f64, f64),
}

impl DensityGrid {
    /// Bins coordinates into an `nx` x `ny` histogram over the data's own
    /// min/max extent. The final bin on each axis is right-inclusive, so
    /// every input point lands in exactly one cell.
    ///
    /// # Errors
    /// Returns `EmptyInput` for an empty coordinate set and `Config` for a
    /// zero bin count.
    pub fn histogram(coords: &[Coordinate], nx: usize, ny: usize) -> Result<Self> {
        if coords.is_empty() {
            return Err(FigureError::EmptyInput(
                "no coordinates to bin into a heatmap".to_string(),
            ));
        }
        if nx == 0 || ny == 0 {
            return Err(FigureError::Config(format!(
                "bin counts must be positive, got ({nx}, {ny})"
            )));
        }

        let x_extent = extent(coords.iter().map(|c| c.longitude));
        let y_extent = extent(coords.iter().map(|c| c.latitude));

        let mut data = Array2::zeros((ny, nx));
        for c in coords {
            let col = bin_index(c.longitude, x_extent, nx);
            let row = bin_index(c.latitude, y_extent, ny);
            data[(row, col)] += 1.0;
        }

        Ok(Self {
            data,
            x_extent,
            y_extent,
        })
    }

    /// Natural log of each cell count. Zero cells stay exactly 0.0 so no
    /// negative infinity ever reaches the smoothing filter.
    pub fn log_density(mut self) -> Self {
        self.data.mapv_inplace(|v| if v > 0.0 { v.ln() } else { 0.0 });
        self
    }

    /// Gaussian-smoothed copy of this grid.
    pub fn smooth(&self, sigma: f64, mode: BoundaryMode) -> Self {
        Self {
            data: smoothing::gaussian_filter(&self.data, sigma, mode),
            x_extent: self.x_extent,
            y_extent: self.y_extent,
        }
    }

    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    /// (rows, cols) = (latitude bins, longitude bins)
    pub fn shape(&self) -> (usize, usize) {
        let s = self.data.dim();
        (s.0, s.1)
    }

    /// (min, max) longitude covered by the histogram
    pub fn x_extent(&self) -> (f64, f64) {
        self.x_extent
    }

    /// (min, max) latitude covered by the histogram
    pub fn y_extent(&self) -> (f64, f64) {
        self.y_extent
    }

    pub fn sum(&self) -> f64 {
        self.data.sum()
    }

    /// Global (min, max) of the cell values
    pub fn value_range(&self) -> (f64, f64) {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &v in self.data.iter() {
            min = min.min(v);
            max = max.max(v);
        }
        (min, max)
    }
}

/// Min/max of a coordinate axis; a degenerate single-value extent is widened
/// by half a unit on each side so every point still falls in a bin.
fn extent(values: impl Iterator<Item = f64>) -> (f64, f64) {
    match values.minmax_by(|a, b| a.total_cmp(b)) {
        MinMaxResult::NoElements => (0.0, 1.0),
        MinMaxResult::OneElement(v) => (v - 0.5, v + 0.5),
        MinMaxResult::MinMax(min, max) if min == max => (min - 0.5, max + 0.5),
        MinMaxResult::MinMax(min, max) => (min, max),
    }
}

fn bin_index(value: f64, (min, max): (f64, f64), n: usize) -> usize {
    let t = (value - min) / (max - min);
    ((t * n as f64) as usize).min(n - 1)
}
