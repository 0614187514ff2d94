mod common;

use common::synthetic_image::{checkerboard, gradient, numbered, solid};
use pixel_pipeline::convolution::GradientProcessor;
use pixel_pipeline::prelude::*;
use pixel_pipeline::clamp_region;

#[test]
fn rectangles_inside_the_buffer_clamp_to_themselves() {
    for (x, y, w, h) in [(0, 0, 10, 8), (3, 2, 4, 4), (9, 7, 1, 1), (0, 5, 10, 3)] {
        let region = clamp_region(Rectangle::new(x, y, w, h), 10, 8);
        assert_eq!(region.as_rect(), Rectangle::new(x, y, w, h));
        assert_eq!((region.offset_x, region.offset_y), (x as usize, y as usize));
    }
}

#[test]
fn top_left_overhang_addresses_like_buffer_relative_rect() {
    let pipeline = Pipeline::new();
    let overlay = gradient(6, 6);
    let blend = BlendProcessor::new(overlay, 50.0).unwrap();

    let mut overhang = checkerboard(10, 10, 2);
    pipeline
        .process(&blend, &mut overhang, Rectangle::new(-3, -2, 7, 6))
        .unwrap();
    let mut relative = checkerboard(10, 10, 2);
    pipeline
        .process(&blend, &mut relative, Rectangle::new(0, 0, 4, 4))
        .unwrap();
    assert_eq!(overhang, relative);
}

#[test]
fn full_alpha_is_identity() {
    let mut image = gradient(9, 7);
    let before = image.clone();
    Pipeline::new()
        .process_all(&AlphaProcessor::new(100.0).unwrap(), &mut image)
        .unwrap();
    assert_eq!(image, before);
}

#[test]
fn blend_opacity_extremes() {
    let pipeline = Pipeline::new();

    let overlay = gradient(4, 4);
    let mut image = solid(8, 8, Rgba8::new(0, 0, 0, 255));
    pipeline
        .process_all(&BlendProcessor::new(overlay.clone(), 0.0).unwrap(), &mut image)
        .unwrap();
    for y in 0..4 {
        for x in 0..4 {
            assert_eq!(image.get(x, y), overlay.get(x, y));
        }
    }
    assert_eq!(image.get(5, 5), Rgba8::new(0, 0, 0, 255));

    let translucent = solid(8, 8, Rgba8::new(200, 100, 50, 64));
    let mut image = solid(8, 8, Rgba8::new(0, 0, 0, 255));
    pipeline
        .process_all(&BlendProcessor::new(translucent, 100.0).unwrap(), &mut image)
        .unwrap();
    assert!(image
        .pixels()
        .iter()
        .all(|&p| p == Rgba8::new(200, 100, 50, 64)));
}

#[test]
fn unit_kernel_is_identity() {
    let mut image = gradient(11, 5);
    let before = image.clone();
    let kernel = Kernel2D::new(1, 1, vec![1.0]).unwrap();
    Pipeline::new()
        .process_all(&ConvolutionProcessor::new(kernel), &mut image)
        .unwrap();
    assert_eq!(image, before);
}

#[test]
fn gradient_magnitude_vanishes_on_flat_color() {
    let sobel_x = Kernel2D::from_rows([[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]]).unwrap();
    let sobel_y = Kernel2D::from_rows([[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]]).unwrap();
    let mut image = solid(7, 7, Rgba8::new(120, 60, 30, 255));
    Pipeline::new()
        .process_all(&GradientProcessor::new(sobel_x, sobel_y), &mut image)
        .unwrap();
    for y in 1..6 {
        for x in 1..6 {
            let p = image.get(x, y);
            assert_eq!((p.r, p.g, p.b), (0, 0, 0), "pixel ({x}, {y})");
        }
    }
}

#[test]
fn byte_colors_round_trip_through_the_vector() {
    for v in 0..=255u8 {
        let c = Rgba8::new(v, 255 - v, v / 2, v);
        assert_eq!(Rgba8::from_vector(c.to_vector()), c);
    }
    let f = Rgba32F::new(0.1, 2.5, -0.3, 0.7);
    assert_eq!(Rgba32F::from_vector(f.to_vector()), f);
}

#[test]
fn auto_orient_twice_is_a_no_op() {
    let pipeline = Pipeline::new();
    for code in 1..=8u16 {
        let mut orientation = Orientation::from_exif(code);
        let mut image = numbered(5, 3);
        auto_orient(&pipeline, &mut image, &mut orientation).unwrap();
        assert_eq!(orientation, Orientation::TopLeft);
        let once = image.clone();
        auto_orient(&pipeline, &mut image, &mut orientation).unwrap();
        assert_eq!(image, once, "orientation {code}");
    }
}

#[test]
fn transposing_orientations_swap_dimensions() {
    let pipeline = Pipeline::new();
    for (code, size) in [(1u16, (5, 3)), (3, (5, 3)), (6, (3, 5)), (8, (3, 5))] {
        let mut orientation = Orientation::from_exif(code);
        let mut image = numbered(5, 3);
        auto_orient(&pipeline, &mut image, &mut orientation).unwrap();
        assert_eq!((image.width(), image.height()), size, "orientation {code}");
    }
}
