//! Testing utilities for clarity
//!
//! Provides synthetic planes and image files with known focus behaviour,
//! enabling reliable tests and benchmarks without a photo dataset.

pub mod synthetic_data;

pub use synthetic_data::{
    blurred, checkerboard_image, checkerboard_plane, gradient_plane, solid_image, solid_plane,
};
