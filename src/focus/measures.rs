/// The four classical focus measures
///
/// Each function is a pure function of the plane's samples: higher scores
/// mean more high-frequency energy, i.e. a sharper image.
use super::filter::{laplacian, separable_filter, sobel};
use super::kernels::{gaussian_kernel, modified_laplacian_kernel};
use crate::assert_invariant;
use crate::errors::MeasureError;
use crate::plane::{mean, mean_std_dev, Plane};

/// Default Sobel aperture for Tenengrad
pub const DEFAULT_TENG_KERNEL_SIZE: usize = 3;

fn finite(score: f64) -> Result<f64, MeasureError> {
    if score.is_finite() {
        Ok(score)
    } else {
        Err(MeasureError::NonFiniteScore)
    }
}

fn non_negative(score: f64, context: &str) -> Result<f64, MeasureError> {
    let score = finite(score)?;
    assert_invariant!(
        score >= 0.0,
        "Energy-based focus scores are non-negative",
        context
    );
    Ok(score)
}

/// Modified Laplacian (LAPM)
///
/// Mean of `|Lx| + |Ly|` where `Lx` pairs the `[-1, 2, -1]` second
/// difference along x with Gaussian smoothing along y, and `Ly` the reverse.
pub fn lapm(plane: &Plane) -> Result<f64, MeasureError> {
    let m = modified_laplacian_kernel();
    let g = gaussian_kernel(3, -1.0)?;

    let lx = separable_filter(plane.samples(), &m, &g);
    let ly = separable_filter(plane.samples(), &g, &m);

    let fm = lx.mapv(f64::abs) + ly.mapv(f64::abs);
    non_negative(mean(&fm), "lapm")
}

/// Variance of the Laplacian (LAPV)
pub fn lapv(plane: &Plane) -> Result<f64, MeasureError> {
    let lap = laplacian(plane.samples());
    let (_, sigma) = mean_std_dev(&lap);
    non_negative(sigma * sigma, "lapv")
}

/// Tenengrad (TENG): mean squared Sobel gradient magnitude
///
/// `ksize` must be odd and at most 31.
pub fn teng(plane: &Plane, ksize: usize) -> Result<f64, MeasureError> {
    let gx = sobel(plane.samples(), 1, 0, ksize)?;
    let gy = sobel(plane.samples(), 0, 1, ksize)?;

    let fm = &gx * &gx + &gy * &gy;
    non_negative(mean(&fm), "teng")
}

/// Normalized gray-level variance (GLVN): `sigma^2 / mu`
///
/// A plane whose mean is exactly zero (pure black) has no defined score and
/// yields [`MeasureError::ZeroMean`].
pub fn glvn(plane: &Plane) -> Result<f64, MeasureError> {
    let (mu, sigma) = plane.mean_std_dev();
    if mu == 0.0 {
        return Err(MeasureError::ZeroMean);
    }
    finite(sigma * sigma / mu)
}
