use inkdigit_base::{Vec2, init_file_logger, init_stdout_logger, log_fatal};
use inkdigit_canvas::{InkCanvas, LOGICAL_DPI, Pen, Surface, rasterize};
use inkdigit_image::{PixelFormat, RasterImage};
use inkdigit_infer::{OnnxBackend, Recognizer, RecognizerConfig};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

const WIDTH: usize = 280;
const HEIGHT: usize = 280;
const PEN_THICKNESS: f32 = 20.0;
const TITLE: &str = "Draw a digit - Enter: recognize, C: clear, ESC: exit";

/// Convert an RGBA raster to packed 0RGB u32 for minifb.
fn rgba_to_argb(image: &RasterImage) -> Vec<u32> {
    debug_assert_eq!(image.format(), PixelFormat::Rgba8);
    image
        .data()
        .chunks_exact(4)
        .map(|px| ((px[0] as u32) << 16) | ((px[1] as u32) << 8) | px[2] as u32)
        .collect()
}

fn title_for(label: &str) -> String {
    if label.is_empty() {
        TITLE.to_string()
    } else {
        format!("Digit: {label} - {TITLE}")
    }
}

fn load_config() -> RecognizerConfig {
    match std::env::args().nth(1) {
        Some(path) => match RecognizerConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                init_stdout_logger();
                log_fatal!("failed to load config {path}: {e}");
            }
        },
        None => RecognizerConfig::default(),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config();
    match &config.log_dir {
        Some(dir) => init_file_logger(dir)?,
        None => init_stdout_logger(),
    }

    let backend = OnnxBackend::new(config.device()?);
    log::info!("loading model {}", config.model_path.display());
    let mut recognizer = match Recognizer::from_config(&config, &backend) {
        Ok(recognizer) => recognizer,
        Err(e) => log_fatal!("failed to initialize recognizer: {e}"),
    };
    // the window draws at 1:1, so capture at the logical DPI regardless of config
    recognizer = recognizer.with_dpi(LOGICAL_DPI);

    let mut canvas = InkCanvas::new(Vec2::new(WIDTH as f32, HEIGHT as f32)).with_pen(Pen {
        thickness: PEN_THICKNESS,
        ..Pen::default()
    });

    let mut window = Window::new(
        TITLE,
        WIDTH,
        HEIGHT,
        WindowOptions {
            resize: true,
            ..WindowOptions::default()
        },
    )?;
    window.set_target_fps(60);

    let mut frame = rasterize(&canvas, LOGICAL_DPI)?;
    let mut dirty = false;

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let (width, height) = window.get_size();
        let layout = Vec2::new(width as f32, height as f32);
        if layout != canvas.layout_size() && width > 0 && height > 0 {
            canvas.set_size(layout);
            dirty = true;
        }

        if window.get_mouse_down(MouseButton::Left) {
            if let Some((x, y)) = window.get_mouse_pos(MouseMode::Discard) {
                let point = Vec2::new(x, y);
                if canvas.is_drawing() {
                    canvas.extend_stroke(point);
                } else {
                    canvas.begin_stroke(point);
                }
                dirty = true;
            }
        } else if canvas.is_drawing() {
            canvas.end_stroke();
        }

        if window.is_key_pressed(Key::Enter, KeyRepeat::No)
            || window.is_key_pressed(Key::R, KeyRepeat::No)
        {
            // failures are logged by the recognizer and leave the label empty
            let _ = recognizer.recognize(&canvas);
            window.set_title(&title_for(&recognizer.label()));
        }

        if window.is_key_pressed(Key::C, KeyRepeat::No)
            || window.is_key_pressed(Key::Delete, KeyRepeat::No)
        {
            recognizer.clear(&mut canvas);
            window.set_title(TITLE);
            dirty = true;
        }

        if dirty {
            frame = rasterize(&canvas, LOGICAL_DPI)?;
            dirty = false;
        }
        window.update_with_buffer(&rgba_to_argb(&frame), frame.width(), frame.height())?;
    }

    log::info!("exiting");
    Ok(())
}
