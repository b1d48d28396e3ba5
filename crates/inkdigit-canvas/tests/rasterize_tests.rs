use inkdigit_base::Vec2;
use inkdigit_canvas::{
    CaptureError, InkCanvas, LOGICAL_DPI, MAX_CAPTURE_DIMENSION, Pen, Stroke, Surface, WHITE,
    pixel_size, rasterize,
};
use inkdigit_image::{PixelFormat, RasterImage};

#[test]
fn test_rasterize_blank_canvas_is_white() {
    let canvas = InkCanvas::new(Vec2::new(200.0, 200.0));
    let raster = rasterize(&canvas, LOGICAL_DPI).unwrap();

    assert_eq!(raster.size(), Vec2::new(200, 200));
    assert_eq!(raster.format(), PixelFormat::Rgba8);
    assert!(raster.data().iter().all(|&b| b == 255));
}

#[test]
fn test_rasterize_truncates_fractional_layout() {
    let canvas = InkCanvas::new(Vec2::new(300.7, 150.2));
    let raster = rasterize(&canvas, LOGICAL_DPI).unwrap();
    assert_eq!(raster.size(), Vec2::new(300, 150));
}

#[test]
fn test_rasterize_scales_with_dpi() {
    let canvas = InkCanvas::new(Vec2::new(100.0, 50.0));
    let raster = rasterize(&canvas, 192.0).unwrap();
    assert_eq!(raster.size(), Vec2::new(200, 100));
}

#[test]
fn test_rasterize_zero_size_is_not_ready() {
    let canvas = InkCanvas::new(Vec2::new(0.0, 0.0));
    let result = rasterize(&canvas, LOGICAL_DPI);
    assert!(matches!(result, Err(CaptureError::SurfaceNotReady { .. })));
}

#[test]
fn test_rasterize_sub_pixel_size_is_not_ready() {
    let canvas = InkCanvas::new(Vec2::new(0.6, 400.0));
    assert!(matches!(
        rasterize(&canvas, LOGICAL_DPI),
        Err(CaptureError::SurfaceNotReady { .. })
    ));
}

#[test]
fn test_pixel_size_rejects_nan_and_bad_dpi() {
    assert!(pixel_size(Vec2::new(f32::NAN, 10.0), LOGICAL_DPI).is_err());
    assert!(pixel_size(Vec2::new(10.0, 10.0), 0.0).is_err());
    assert!(pixel_size(Vec2::new(-5.0, 10.0), LOGICAL_DPI).is_err());
}

#[test]
fn test_rasterize_huge_layout_is_an_error() {
    let canvas = InkCanvas::new(Vec2::new(f32::MAX, f32::MAX));
    assert!(matches!(
        rasterize(&canvas, LOGICAL_DPI),
        Err(CaptureError::TooLarge { .. })
    ));
}

#[test]
fn test_rasterize_huge_dpi_is_an_error() {
    let canvas = InkCanvas::new(Vec2::new(200.0, 200.0));
    assert!(matches!(
        rasterize(&canvas, 1e30),
        Err(CaptureError::TooLarge { .. })
    ));
}

#[test]
fn test_pixel_size_limit_is_inclusive() {
    let side = MAX_CAPTURE_DIMENSION as f32;
    assert_eq!(
        pixel_size(Vec2::new(side, 1.0), LOGICAL_DPI).unwrap(),
        Vec2::new(MAX_CAPTURE_DIMENSION, 1)
    );
    assert!(matches!(
        pixel_size(Vec2::new(side + 1.0, 1.0), LOGICAL_DPI),
        Err(CaptureError::TooLarge { width, height: 1 }) if width == MAX_CAPTURE_DIMENSION + 1
    ));
}

#[test]
fn test_rasterize_does_not_mutate_strokes() {
    let mut canvas = InkCanvas::new(Vec2::new(50.0, 50.0));
    canvas.begin_stroke(Vec2::new(5.0, 5.0));
    canvas.extend_stroke(Vec2::new(45.0, 45.0));
    canvas.end_stroke();
    let before = canvas.strokes().to_vec();

    rasterize(&canvas, LOGICAL_DPI).unwrap();
    rasterize(&canvas, LOGICAL_DPI).unwrap();

    assert_eq!(canvas.strokes(), before.as_slice());
}

#[test]
fn test_rasterize_draws_stroke_pixels() {
    let mut canvas = InkCanvas::new(Vec2::new(100.0, 100.0)).with_pen(Pen {
        thickness: 10.0,
        ..Pen::default()
    });
    canvas.begin_stroke(Vec2::new(10.0, 50.0));
    canvas.extend_stroke(Vec2::new(90.0, 50.0));
    canvas.end_stroke();

    let raster = rasterize(&canvas, LOGICAL_DPI).unwrap();

    // on the line
    assert_eq!(raster.pixel(50, 50), &[0, 0, 0, 255]);
    // well away from it
    assert_eq!(raster.pixel(50, 10), &[255, 255, 255, 255]);
    // beyond the round cap
    assert_eq!(raster.pixel(98, 50), &[255, 255, 255, 255]);
}

#[test]
fn test_single_point_stroke_paints_a_dot() {
    let mut canvas = InkCanvas::new(Vec2::new(20.0, 20.0));
    canvas.add_stroke(Stroke {
        points: vec![Vec2::new(10.0, 10.0)],
        pen: Pen {
            thickness: 6.0,
            ..Pen::default()
        },
    });

    let raster = rasterize(&canvas, LOGICAL_DPI).unwrap();
    assert_eq!(raster.pixel(10, 10), &[0, 0, 0, 255]);
    assert_eq!(raster.pixel(0, 0), &[255, 255, 255, 255]);
}

#[test]
fn test_stroke_in_progress_is_rendered() {
    let mut canvas = InkCanvas::new(Vec2::new(40.0, 40.0)).with_pen(Pen {
        thickness: 8.0,
        ..Pen::default()
    });
    canvas.begin_stroke(Vec2::new(20.0, 5.0));
    canvas.extend_stroke(Vec2::new(20.0, 35.0));

    let raster = rasterize(&canvas, LOGICAL_DPI).unwrap();
    assert_eq!(raster.pixel(20, 20), &[0, 0, 0, 255]);
}

#[test]
fn test_stroke_clipped_at_edges() {
    let mut canvas = InkCanvas::new(Vec2::new(10.0, 10.0)).with_pen(Pen {
        thickness: 30.0,
        ..Pen::default()
    });
    canvas.add_stroke(Stroke {
        points: vec![Vec2::new(-50.0, -50.0), Vec2::new(60.0, 60.0)],
        pen: canvas.pen(),
    });

    let raster = rasterize(&canvas, LOGICAL_DPI).unwrap();
    assert_eq!(raster.pixel(5, 5), &[0, 0, 0, 255]);
}

struct GraySurface;

impl Surface for GraySurface {
    fn layout_size(&self) -> Vec2<f32> {
        Vec2::new(4.0, 3.0)
    }

    fn render(&self, target: &mut RasterImage, _scale: f32) {
        for b in target.data_mut() {
            *b = 128;
        }
    }
}

#[test]
fn test_rasterize_custom_surface() {
    let raster = rasterize(&GraySurface, LOGICAL_DPI).unwrap();
    assert_eq!(raster.size(), Vec2::new(4, 3));
    assert!(raster.data().iter().all(|&b| b == 128));
}

#[test]
fn test_background_color_is_used() {
    let canvas = InkCanvas::new(Vec2::new(2.0, 2.0)).with_background([10, 20, 30, 255]);
    let raster = rasterize(&canvas, LOGICAL_DPI).unwrap();
    assert_eq!(raster.pixel(1, 1), &[10, 20, 30, 255]);
    assert_ne!(canvas.background(), WHITE);
}
