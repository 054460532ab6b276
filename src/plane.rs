//! Single-channel sample planes
//!
//! Every focus measure operates on a [`Plane`]: a non-empty 2D array of
//! finite `f64` samples (rows = height, columns = width). Decoded colour
//! images are projected onto one plane through a [`Channel`] selection.

use crate::errors::MeasureError;
use image::DynamicImage;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Which component of a colour image is measured
///
/// Defaults to blue: scores are taken from the first channel of a
/// BGR-ordered matrix, so rankings agree with OpenCV-based focus tools.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Rec.601 luminance
    Luma,
    Red,
    Green,
    /// First channel of a BGR-ordered matrix
    #[default]
    Blue,
}

impl Channel {
    fn project(self, rgb: [u8; 3]) -> f64 {
        let [r, g, b] = rgb.map(f64::from);
        match self {
            Channel::Luma => 0.299 * r + 0.587 * g + 0.114 * b,
            Channel::Red => r,
            Channel::Green => g,
            Channel::Blue => b,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Luma => "luma",
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
        }
    }
}

/// Non-empty 2D plane of finite samples
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    samples: Array2<f64>,
}

impl Plane {
    pub fn new(samples: Array2<f64>) -> Result<Self, MeasureError> {
        let (height, width) = samples.dim();
        if width == 0 || height == 0 {
            return Err(MeasureError::EmptyImage { width, height });
        }
        if let Some(((y, x), _)) = samples.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(MeasureError::NonFiniteSample { x, y });
        }
        Ok(Self { samples })
    }

    /// Build a plane by evaluating `f(x, y)` for every pixel
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Result<Self, MeasureError>
    where
        F: FnMut(usize, usize) -> f64,
    {
        Self::new(Array2::from_shape_fn((height, width), |(y, x)| f(x, y)))
    }

    pub fn filled(width: usize, height: usize, value: f64) -> Result<Self, MeasureError> {
        Self::new(Array2::from_elem((height, width), value))
    }

    /// Project a decoded image onto a single plane
    pub fn from_image(image: &DynamicImage, channel: Channel) -> Result<Self, MeasureError> {
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();
        Self::from_fn(width as usize, height as usize, |x, y| {
            channel.project(rgb.get_pixel(x as u32, y as u32).0)
        })
    }

    pub fn width(&self) -> usize {
        self.samples.ncols()
    }

    pub fn height(&self) -> usize {
        self.samples.nrows()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false: construction rejects empty planes
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn samples(&self) -> &Array2<f64> {
        &self.samples
    }

    pub fn mean_std_dev(&self) -> (f64, f64) {
        mean_std_dev(&self.samples)
    }
}

/// Arithmetic mean; 0 for an empty array
pub fn mean(values: &Array2<f64>) -> f64 {
    values.mean().unwrap_or(0.0)
}

/// Mean and population standard deviation (divides by N)
pub fn mean_std_dev(values: &Array2<f64>) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    (mean(values), values.std(0.0))
}
