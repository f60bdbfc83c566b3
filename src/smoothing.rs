use crate::constants::KERNEL_TRUNCATE;
use crate::error::{FigureError, Result};

use ndarray::{Array2, Axis};
use std::str::FromStr;

/// How the Gaussian filter extends the grid past its edges.
///
/// For a lane `a b c d`, the extension to the left looks like:
/// - `Reflect`:  `d c b a | a b c d`
/// - `Constant`: `0 0 0 0 | a b c d`
/// - `Nearest`:  `a a a a | a b c d`
/// - `Mirror`:   `d c b | a b c d`
/// - `Wrap`:     `a b c d | a b c d`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryMode {
    Reflect,
    Constant,
    #[default]
    Nearest,
    Mirror,
    Wrap,
}

impl FromStr for BoundaryMode {
    type Err = FigureError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "reflect" => Ok(Self::Reflect),
            "constant" => Ok(Self::Constant),
            "nearest" => Ok(Self::Nearest),
            "mirror" => Ok(Self::Mirror),
            "wrap" => Ok(Self::Wrap),
            _ => Err(FigureError::Config(format!(
                "Unknown boundary mode '{s}'. Available: reflect, constant, nearest, mirror, wrap"
            ))),
        }
    }
}

impl BoundaryMode {
    /// Maps an out-of-range lane index to an in-range one, or `None` when
    /// the sample is taken as zero (`Constant`).
    fn resolve(self, idx: isize, n: isize) -> Option<usize> {
        if (0..n).contains(&idx) {
            return Some(idx as usize);
        }
        if n == 1 {
            return match self {
                Self::Constant => None,
                _ => Some(0),
            };
        }
        match self {
            Self::Constant => None,
            Self::Nearest => Some(idx.clamp(0, n - 1) as usize),
            Self::Reflect => {
                let period = 2 * n;
                let i = idx.rem_euclid(period);
                Some(if i >= n { (period - 1 - i) as usize } else { i as usize })
            }
            Self::Mirror => {
                let period = 2 * n - 2;
                let i = idx.rem_euclid(period);
                Some(if i >= n { (period - i) as usize } else { i as usize })
            }
            Self::Wrap => Some(idx.rem_euclid(n) as usize),
        }
    }
}

/// Applies a 2D Gaussian blur with the given standard deviation.
///
/// The filter is separable: one 1D pass along each axis with a kernel
/// truncated at `KERNEL_TRUNCATE` sigmas, matching the common scientific
/// filter behavior. A non-positive sigma returns the input unchanged.
pub fn gaussian_filter(input: &Array2<f64>, sigma: f64, mode: BoundaryMode) -> Array2<f64> {
    if sigma <= 0.0 {
        return input.clone();
    }
    let kernel = gaussian_kernel(sigma);
    let rows_done = convolve_axis(input, &kernel, Axis(1), mode);
    convolve_axis(&rows_done, &kernel, Axis(0), mode)
}

/// Normalized 1D Gaussian kernel of radius `KERNEL_TRUNCATE * sigma`
fn gaussian_kernel(sigma: f64) -> Vec<f64> {
    let radius = (KERNEL_TRUNCATE * sigma + 0.5) as isize;
    let mut kernel = Vec::with_capacity((2 * radius + 1) as usize);
    for i in -radius..=radius {
        let x = i as f64;
        kernel.push((-0.5 * x * x / (sigma * sigma)).exp());
    }
    let sum: f64 = kernel.iter().sum();
    for w in &mut kernel {
        *w /= sum;
    }
    kernel
}

fn convolve_axis(
    input: &Array2<f64>,
    kernel: &[f64],
    axis: Axis,
    mode: BoundaryMode,
) -> Array2<f64> {
    let n = input.len_of(axis) as isize;
    let radius = (kernel.len() / 2) as isize;
    let mut out = Array2::zeros(input.raw_dim());

    for (lane_in, mut lane_out) in input
        .lanes(axis)
        .into_iter()
        .zip(out.lanes_mut(axis).into_iter())
    {
        for center in 0..n {
            let mut acc = 0.0;
            for (k, &w) in kernel.iter().enumerate() {
                let idx = center + k as isize - radius;
                if let Some(j) = mode.resolve(idx, n) {
                    acc += w * lane_in[j];
                }
            }
            lane_out[center as usize] = acc;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_mode_parsing() {
        assert_eq!("nearest".parse::<BoundaryMode>().unwrap(), BoundaryMode::Nearest);
        assert_eq!("Reflect".parse::<BoundaryMode>().unwrap(), BoundaryMode::Reflect);
        assert!("bogus".parse::<BoundaryMode>().is_err());
    }

    #[test]
    fn test_resolve_reflect() {
        let m = BoundaryMode::Reflect;
        // d c b a | a b c d | d c b a  for n = 4
        assert_eq!(m.resolve(-1, 4), Some(0));
        assert_eq!(m.resolve(-2, 4), Some(1));
        assert_eq!(m.resolve(4, 4), Some(3));
        assert_eq!(m.resolve(5, 4), Some(2));
    }

    #[test]
    fn test_resolve_mirror() {
        let m = BoundaryMode::Mirror;
        // d c b | a b c d | c b a  for n = 4
        assert_eq!(m.resolve(-1, 4), Some(1));
        assert_eq!(m.resolve(-2, 4), Some(2));
        assert_eq!(m.resolve(4, 4), Some(2));
        assert_eq!(m.resolve(5, 4), Some(1));
    }

    #[test]
    fn test_resolve_wrap_and_nearest() {
        assert_eq!(BoundaryMode::Wrap.resolve(-1, 4), Some(3));
        assert_eq!(BoundaryMode::Wrap.resolve(4, 4), Some(0));
        assert_eq!(BoundaryMode::Nearest.resolve(-3, 4), Some(0));
        assert_eq!(BoundaryMode::Nearest.resolve(9, 4), Some(3));
        assert_eq!(BoundaryMode::Constant.resolve(-1, 4), None);
    }

    #[test]
    fn test_kernel_is_normalized() {
        let kernel = gaussian_kernel(1.3);
        let sum: f64 = kernel.iter().sum();
        assert_relative_eq!(sum, 1.0, epsilon = 1e-12);
        // symmetric
        assert_relative_eq!(kernel[0], kernel[kernel.len() - 1]);
    }

    #[test]
    fn test_constant_field_is_invariant() {
        // With a normalized kernel and any edge-extending mode, a constant
        // grid must come back unchanged.
        let input = Array2::from_elem((8, 6), 3.5);
        for mode in [
            BoundaryMode::Reflect,
            BoundaryMode::Nearest,
            BoundaryMode::Mirror,
            BoundaryMode::Wrap,
        ] {
            let out = gaussian_filter(&input, 1.3, mode);
            for &v in out.iter() {
                assert_relative_eq!(v, 3.5, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_constant_mode_attenuates_edges() {
        // sigma 1.5 gives a kernel radius of 6, so the center of a 15x15
        // grid lies outside the zero padding's reach
        let input = Array2::from_elem((15, 15), 1.0);
        let out = gaussian_filter(&input, 1.5, BoundaryMode::Constant);
        assert!(out[(0, 0)] < out[(7, 7)]);
        assert_relative_eq!(out[(7, 7)], 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_smoothing_is_deterministic() {
        let input = array![[0.0, 2.0, 0.0], [1.0, 5.0, 1.0], [0.0, 2.0, 0.0]];
        let a = gaussian_filter(&input, 1.3, BoundaryMode::Nearest);
        let b = gaussian_filter(&input, 1.3, BoundaryMode::Nearest);
        assert_eq!(a, b); // bitwise
    }

    #[test]
    fn test_mass_preserved_under_wrap() {
        // Wrap extension redistributes but never loses mass.
        let mut input = Array2::zeros((5, 5));
        input[(2, 2)] = 10.0;
        let out = gaussian_filter(&input, 1.0, BoundaryMode::Wrap);
        let total: f64 = out.iter().sum();
        assert_relative_eq!(total, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_sigma_is_identity() {
        let input = array![[1.0, 2.0], [3.0, 4.0]];
        let out = gaussian_filter(&input, 0.0, BoundaryMode::Nearest);
        assert_eq!(out, input);
    }
}
