/// Kernel builders for the separable focus measures
///
/// Kernel values follow the OpenCV conventions so scores stay comparable
/// with the published LAPM / TENG figures.
use crate::errors::MeasureError;

/// Largest aperture accepted for Gaussian and Sobel kernels
pub const MAX_KERNEL_SIZE: usize = 31;

/// Fixed Gaussian tables used when no sigma is supplied for small apertures
const SMALL_GAUSSIAN_TABLES: [&[f64]; 4] = [
    &[1.0],
    &[0.25, 0.5, 0.25],
    &[0.0625, 0.25, 0.375, 0.25, 0.0625],
    &[0.03125, 0.109375, 0.21875, 0.28125, 0.21875, 0.109375, 0.03125],
];

/// Second-derivative vector used by the modified Laplacian
pub fn modified_laplacian_kernel() -> Vec<f64> {
    vec![-1.0, 2.0, -1.0]
}

pub fn validate_kernel_size(ksize: usize) -> Result<(), MeasureError> {
    if ksize == 0 || ksize % 2 == 0 || ksize > MAX_KERNEL_SIZE {
        return Err(MeasureError::InvalidKernelSize(ksize));
    }
    Ok(())
}

/// Normalized 1D Gaussian kernel
///
/// With `sigma <= 0` the sigma is derived from the aperture
/// (`0.3 * ((ksize - 1) * 0.5 - 1) + 0.8`), and apertures up to 7 use the
/// fixed integer-ratio tables.
pub fn gaussian_kernel(ksize: usize, sigma: f64) -> Result<Vec<f64>, MeasureError> {
    validate_kernel_size(ksize)?;

    if sigma <= 0.0 && ksize <= 7 {
        return Ok(SMALL_GAUSSIAN_TABLES[ksize / 2].to_vec());
    }

    let sigma = if sigma > 0.0 {
        sigma
    } else {
        ((ksize - 1) as f64 * 0.5 - 1.0) * 0.3 + 0.8
    };
    let scale = -0.5 / (sigma * sigma);
    let center = (ksize / 2) as f64;

    let mut kernel: Vec<f64> = (0..ksize)
        .map(|i| {
            let x = i as f64 - center;
            (scale * x * x).exp()
        })
        .collect();
    let sum: f64 = kernel.iter().sum();
    kernel.iter_mut().for_each(|k| *k /= sum);
    Ok(kernel)
}

/// Row of binomial coefficients of the given length
fn binomial_row(len: usize) -> Vec<f64> {
    let mut row = vec![1.0];
    for _ in 1..len {
        let mut next = vec![1.0; row.len() + 1];
        for i in 1..row.len() {
            next[i] = row[i - 1] + row[i];
        }
        row = next;
    }
    row
}

/// Sobel kernel for one axis: binomial smoothing differenced `order` times
fn sobel_axis_kernel(order: usize, ksize: usize) -> Result<Vec<f64>, MeasureError> {
    // An aperture of 1 means "no smoothing": plain central differences
    let size = if ksize == 1 && order > 0 { 3 } else { ksize };
    if order >= size {
        return Err(MeasureError::InvalidKernelSize(ksize));
    }

    let mut kernel = binomial_row(size - order);
    for _ in 0..order {
        let mut diffed = Vec::with_capacity(kernel.len() + 1);
        for j in 0..=kernel.len() {
            let prev = if j > 0 { kernel[j - 1] } else { 0.0 };
            let cur = kernel.get(j).copied().unwrap_or(0.0);
            diffed.push(prev - cur);
        }
        kernel = diffed;
    }
    Ok(kernel)
}

/// Row and column kernels for a Sobel derivative of order (`dx`, `dy`)
pub fn sobel_kernels(
    dx: usize,
    dy: usize,
    ksize: usize,
) -> Result<(Vec<f64>, Vec<f64>), MeasureError> {
    validate_kernel_size(ksize)?;
    Ok((sobel_axis_kernel(dx, ksize)?, sobel_axis_kernel(dy, ksize)?))
}
