/// Linear filters over `f64` sample arrays
///
/// All filters are correlations anchored at the kernel centre and use
/// reflect-101 borders (`gfedcb|abcdefgh|gfedcba`).
use super::kernels::sobel_kernels;
use crate::errors::MeasureError;
use ndarray::Array2;

/// Map a possibly out-of-range index into `0..len` by reflect-101
fn reflect_101(index: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let period = 2 * (len as isize - 1);
    let folded = index.rem_euclid(period);
    if folded >= len as isize {
        (period - folded) as usize
    } else {
        folded as usize
    }
}

/// Correlate every row of `src` with `kernel`
fn filter_rows(src: &Array2<f64>, kernel: &[f64]) -> Array2<f64> {
    let (height, width) = src.dim();
    let radius = (kernel.len() / 2) as isize;

    Array2::from_shape_fn((height, width), |(y, x)| {
        kernel.iter().enumerate().fold(0.0, |acc, (i, k)| {
            let sx = reflect_101(x as isize + i as isize - radius, width);
            acc + k * src[[y, sx]]
        })
    })
}

/// Correlate every column of `src` with `kernel`
fn filter_cols(src: &Array2<f64>, kernel: &[f64]) -> Array2<f64> {
    let (height, width) = src.dim();
    let radius = (kernel.len() / 2) as isize;

    Array2::from_shape_fn((height, width), |(y, x)| {
        kernel.iter().enumerate().fold(0.0, |acc, (i, k)| {
            let sy = reflect_101(y as isize + i as isize - radius, height);
            acc + k * src[[sy, x]]
        })
    })
}

/// Separable 2D filter: `row_kernel` runs along x, `col_kernel` along y
pub fn separable_filter(src: &Array2<f64>, row_kernel: &[f64], col_kernel: &[f64]) -> Array2<f64> {
    filter_cols(&filter_rows(src, row_kernel), col_kernel)
}

/// Discrete Laplacian with the 4-neighbour aperture
pub fn laplacian(src: &Array2<f64>) -> Array2<f64> {
    let (height, width) = src.dim();
    let at = |y: isize, x: isize| src[[reflect_101(y, height), reflect_101(x, width)]];

    Array2::from_shape_fn((height, width), |(y, x)| {
        let (y, x) = (y as isize, x as isize);
        at(y - 1, x) + at(y, x - 1) + at(y, x + 1) + at(y + 1, x) - 4.0 * at(y, x)
    })
}

/// Sobel derivative of order (`dx`, `dy`) with aperture `ksize`
pub fn sobel(
    src: &Array2<f64>,
    dx: usize,
    dy: usize,
    ksize: usize,
) -> Result<Array2<f64>, MeasureError> {
    let (kx, ky) = sobel_kernels(dx, dy, ksize)?;
    Ok(separable_filter(src, &kx, &ky))
}
