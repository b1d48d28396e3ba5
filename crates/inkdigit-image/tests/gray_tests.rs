use inkdigit_base::Vec2;
use inkdigit_image::{GrayscaleImage, PixelFormat, RasterImage, luminance, to_grayscale};

#[test]
fn test_luminance_extremes() {
    assert_eq!(luminance(0, 0, 0), 0);
    assert_eq!(luminance(255, 255, 255), 255);
}

#[test]
fn test_luminance_uses_bt601_weights() {
    // 0.299 * 255 = 76.245
    assert_eq!(luminance(255, 0, 0), 76);
    // 0.587 * 255 = 149.685
    assert_eq!(luminance(0, 255, 0), 150);
    // 0.114 * 255 = 29.07
    assert_eq!(luminance(0, 0, 255), 29);
}

#[test]
fn test_to_grayscale_rgba_ignores_alpha() {
    let opaque = RasterImage::new(Vec2::new(1, 1), PixelFormat::Rgba8, vec![100, 150, 200, 255])
        .unwrap();
    let transparent =
        RasterImage::new(Vec2::new(1, 1), PixelFormat::Rgba8, vec![100, 150, 200, 0]).unwrap();
    assert_eq!(to_grayscale(&opaque), to_grayscale(&transparent));
}

#[test]
fn test_to_grayscale_argb_channel_order() {
    let argb = RasterImage::new(Vec2::new(1, 1), PixelFormat::Argb8, vec![255, 255, 0, 0]).unwrap();
    assert_eq!(to_grayscale(&argb).data(), &[76]);
}

#[test]
fn test_to_grayscale_is_idempotent() {
    let data: Vec<u8> = (0..48u32).map(|i| (i * 37 % 256) as u8).collect();
    let rgb = RasterImage::new(Vec2::new(4, 4), PixelFormat::Rgb8, data).unwrap();

    let once = to_grayscale(&rgb);
    let twice = to_grayscale(&once.to_raster());

    assert_eq!(once, twice);
}

#[test]
fn test_to_grayscale_keeps_gray8_samples() {
    let data: Vec<u8> = (0..=255).collect();
    let gray = RasterImage::new(Vec2::new(16, 16), PixelFormat::Gray8, data.clone()).unwrap();
    assert_eq!(to_grayscale(&gray).data(), data.as_slice());
}

#[test]
fn test_grayscale_inverted() {
    let image = GrayscaleImage::new(Vec2::new(2, 1), vec![0, 200]).unwrap();
    assert_eq!(image.inverted().data(), &[255, 55]);
}

#[test]
fn test_grayscale_sample_and_tensor() {
    let data: Vec<u8> = (0..12).collect();
    let image = GrayscaleImage::new(Vec2::new(4, 3), data).unwrap();
    assert_eq!(image.sample(3, 1), 7);
    assert_eq!(image.to_tensor().unwrap().shape, vec![3, 4]);
}

#[test]
fn test_grayscale_new_rejects_wrong_length() {
    assert!(GrayscaleImage::new(Vec2::new(28, 28), vec![0; 100]).is_err());
}
