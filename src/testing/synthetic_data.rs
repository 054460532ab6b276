//! Synthetic test data
//!
//! Checkerboards stand in for sharp photos, solid fills for completely
//! defocused ones, and repeated Gaussian smoothing produces a controlled
//! sequence of increasingly blurred variants.

use crate::errors::MeasureError;
use crate::focus::filter::separable_filter;
use crate::focus::kernels::gaussian_kernel;
use crate::plane::Plane;
use image::{Rgb, RgbImage};

/// Checkerboard of 0 / 255 cells, `cell` pixels wide
pub fn checkerboard_plane(width: usize, height: usize, cell: usize) -> Result<Plane, MeasureError> {
    let cell = cell.max(1);
    Plane::from_fn(width, height, |x, y| {
        if (x / cell + y / cell) % 2 == 0 {
            255.0
        } else {
            0.0
        }
    })
}

pub fn solid_plane(width: usize, height: usize, value: f64) -> Result<Plane, MeasureError> {
    Plane::filled(width, height, value)
}

/// Horizontal ramp from 0 to 255
pub fn gradient_plane(width: usize, height: usize) -> Result<Plane, MeasureError> {
    Plane::from_fn(width, height, |x, _| (x * 255 / width) as f64)
}

/// Apply the 3-tap Gaussian `passes` times
pub fn blurred(plane: &Plane, passes: usize) -> Result<Plane, MeasureError> {
    let g = gaussian_kernel(3, -1.0)?;
    let mut samples = plane.samples().clone();
    for _ in 0..passes {
        samples = separable_filter(&samples, &g, &g);
    }
    Plane::new(samples)
}

/// RGB checkerboard image, ready to be encoded to disk
pub fn checkerboard_image(width: u32, height: u32, cell: u32) -> RgbImage {
    let cell = cell.max(1);
    RgbImage::from_fn(width, height, |x, y| {
        let v = if (x / cell + y / cell) % 2 == 0 { 255 } else { 0 };
        Rgb([v, v, v])
    })
}

pub fn solid_image(width: u32, height: u32, value: u8) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb([value, value, value]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkerboard_plane_alternates() {
        let plane = checkerboard_plane(4, 4, 1).unwrap();
        assert_eq!(plane.samples()[[0, 0]], 255.0);
        assert_eq!(plane.samples()[[0, 1]], 0.0);
        assert_eq!(plane.samples()[[1, 1]], 255.0);
    }

    #[test]
    fn test_blurred_preserves_mean_of_constant() {
        let plane = solid_plane(8, 8, 42.0).unwrap();
        assert_eq!(blurred(&plane, 3).unwrap(), plane);
    }

    #[test]
    fn test_blurred_zero_passes_is_identity() {
        let plane = gradient_plane(10, 3).unwrap();
        assert_eq!(blurred(&plane, 0).unwrap(), plane);
    }

    #[test]
    fn test_images_match_planes() {
        let img = checkerboard_image(10, 10, 1);
        assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255]);
        assert_eq!(img.get_pixel(1, 0).0, [0, 0, 0]);
        assert_eq!(solid_image(3, 3, 7).get_pixel(2, 2).0, [7, 7, 7]);
    }
}
