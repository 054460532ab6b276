//! Focus Measure Testing
//!
//! Test suite for the four focus measures including:
//! - Behaviour on constant, sharp, and gradient planes
//! - Monotonic response to increasing blur
//! - Kernel size handling for Tenengrad
//! - Channel projection of decoded images

use clarity::focus::{glvn, lapm, lapv, teng, FocusAnalyzer, Measure};
use clarity::testing::{blurred, checkerboard_plane, gradient_plane, solid_plane};
use clarity::{Channel, MeasureError, Plane};
use image::{DynamicImage, Rgb, RgbImage};

/// Helper function to create test planes with specific characteristics
fn create_test_plane_with_pattern(width: usize, height: usize, pattern: &str) -> Plane {
    match pattern {
        "solid_gray" => solid_plane(width, height, 128.0).unwrap(),
        "black" => solid_plane(width, height, 0.0).unwrap(),
        "checkerboard" => checkerboard_plane(width, height, 2).unwrap(),
        "coarse_checkerboard" => checkerboard_plane(width, height, 8).unwrap(),
        "gradient" => gradient_plane(width, height).unwrap(),
        "noisy" => Plane::from_fn(width, height, |x, y| ((x * 31 + y * 17) % 50) as f64 + 100.0)
            .unwrap(),
        _ => solid_plane(width, height, 128.0).unwrap(),
    }
}

#[test]
fn test_constant_planes_have_no_gradient_energy() {
    for value in [0.0, 1.0, 128.0, 255.0] {
        let plane = solid_plane(10, 10, value).unwrap();
        assert_eq!(lapm(&plane).unwrap(), 0.0, "lapm of {}", value);
        assert_eq!(lapv(&plane).unwrap(), 0.0, "lapv of {}", value);
        assert_eq!(teng(&plane, 3).unwrap(), 0.0, "teng of {}", value);
    }
}

#[test]
fn test_sharp_beats_flat_on_every_energy_measure() {
    let flat = create_test_plane_with_pattern(10, 10, "solid_gray");
    let sharp = create_test_plane_with_pattern(10, 10, "checkerboard");

    for measure in [Measure::Lapm, Measure::Lapv, Measure::Teng] {
        let analyzer = FocusAnalyzer::default();
        let flat_score = analyzer.analyze(&flat).unwrap().score(measure).unwrap();
        let sharp_score = analyzer.analyze(&sharp).unwrap().score(measure).unwrap();
        println!("{}: flat={} sharp={}", measure, flat_score, sharp_score);
        assert_eq!(flat_score, 0.0);
        assert!(sharp_score > 0.0);
    }
}

#[test]
fn test_fine_detail_scores_higher_than_coarse() {
    let fine = create_test_plane_with_pattern(64, 64, "checkerboard");
    let coarse = create_test_plane_with_pattern(64, 64, "coarse_checkerboard");

    assert!(lapm(&fine).unwrap() > lapm(&coarse).unwrap());
    assert!(lapv(&fine).unwrap() > lapv(&coarse).unwrap());
}

#[test]
fn test_lapv_non_increasing_under_blur() {
    let sharp = create_test_plane_with_pattern(32, 32, "coarse_checkerboard");

    let scores: Vec<f64> = (0..6)
        .map(|passes| lapv(&blurred(&sharp, passes).unwrap()).unwrap())
        .collect();
    println!("LAPV under increasing blur: {:?}", scores);

    for pair in scores.windows(2) {
        assert!(pair[1] <= pair[0], "LAPV increased under blur: {:?}", scores);
    }
    assert!(scores[5] < scores[0]);
}

#[test]
fn test_every_measure_drops_under_heavy_blur() {
    let sharp = create_test_plane_with_pattern(32, 32, "checkerboard");
    let soft = blurred(&sharp, 4).unwrap();

    assert!(lapm(&soft).unwrap() < lapm(&sharp).unwrap());
    assert!(lapv(&soft).unwrap() < lapv(&sharp).unwrap());
    assert!(teng(&soft, 3).unwrap() < teng(&sharp, 3).unwrap());
    assert!(glvn(&soft).unwrap() < glvn(&sharp).unwrap());
}

#[test]
fn test_measures_are_idempotent() {
    let plane = create_test_plane_with_pattern(40, 30, "noisy");
    let analyzer = FocusAnalyzer::new(5).unwrap();

    let first = analyzer.analyze(&plane).unwrap();
    let second = analyzer.analyze(&plane).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_gradient_has_first_but_no_second_derivative_inside() {
    // A linear ramp has Sobel response everywhere but Laplacian response
    // only where the reflected border bends it
    let plane = Plane::from_fn(16, 16, |x, _| 10.0 * x as f64).unwrap();
    let lap_inner = clarity::focus::filter::laplacian(plane.samples());
    for x in 1..15 {
        assert_eq!(lap_inner[[8, x]], 0.0);
    }
    assert!(teng(&plane, 3).unwrap() > 0.0);
}

#[test]
fn test_glvn_black_image_is_flagged() {
    let black = create_test_plane_with_pattern(10, 10, "black");
    assert_eq!(glvn(&black), Err(MeasureError::ZeroMean));

    let metrics = FocusAnalyzer::default().analyze(&black).unwrap();
    assert_eq!(metrics.lapm, 0.0);
    assert_eq!(metrics.glvn, Err(MeasureError::ZeroMean));
}

#[test]
fn test_glvn_is_scale_sensitive() {
    // sigma^2 / mu doubles when every sample doubles
    let plane = create_test_plane_with_pattern(20, 20, "gradient");
    let doubled = Plane::new(plane.samples() * 2.0).unwrap();
    let ratio = glvn(&doubled).unwrap() / glvn(&plane).unwrap();
    assert!((ratio - 2.0).abs() < 1e-9);
}

#[test]
fn test_teng_kernel_sizes() {
    let plane = create_test_plane_with_pattern(32, 32, "coarse_checkerboard");
    let mut previous = 0.0;
    for ksize in [1, 3, 5, 7] {
        let score = teng(&plane, ksize).unwrap();
        println!("teng ksize {}: {}", ksize, score);
        assert!(score > previous);
        previous = score;
    }

    for ksize in [0, 2, 8, 33] {
        assert_eq!(teng(&plane, ksize), Err(MeasureError::InvalidKernelSize(ksize)));
    }
}

#[test]
fn test_tiny_planes() {
    for (w, h) in [(1, 1), (1, 5), (5, 1), (2, 2)] {
        let plane = Plane::from_fn(w, h, |x, y| (x * 3 + y * 7) as f64 + 1.0).unwrap();
        let metrics = FocusAnalyzer::default().analyze(&plane).unwrap();
        assert!(metrics.lapm >= 0.0 && metrics.lapm.is_finite());
        assert!(metrics.lapv >= 0.0 && metrics.lapv.is_finite());
        assert!(metrics.teng >= 0.0 && metrics.teng.is_finite());
        assert!(metrics.glvn.unwrap() >= 0.0);
    }
}

#[test]
fn test_channel_selection_changes_scores() {
    // Sharp pattern only in the blue channel
    let img = RgbImage::from_fn(16, 16, |x, y| {
        let b = if (x + y) % 2 == 0 { 255 } else { 0 };
        Rgb([100, 100, b])
    });
    let img = DynamicImage::ImageRgb8(img);

    let red = Plane::from_image(&img, Channel::Red).unwrap();
    let blue = Plane::from_image(&img, Channel::Blue).unwrap();
    let luma = Plane::from_image(&img, Channel::Luma).unwrap();

    assert_eq!(lapv(&red).unwrap(), 0.0);
    assert!(lapv(&blue).unwrap() > lapv(&luma).unwrap());
    assert!(lapv(&luma).unwrap() > 0.0);
}
