use crate::Surface;
use inkdigit_base::Vec2;
use inkdigit_image::{PixelFormat, RasterImage};

pub const WHITE: [u8; 4] = [255, 255, 255, 255];
pub const BLACK: [u8; 4] = [0, 0, 0, 255];

/// Drawing attributes applied to a stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pen {
    /// Straight (non-premultiplied) RGBA.
    pub color: [u8; 4],
    /// Tip diameter in logical units.
    pub thickness: f32,
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            color: BLACK,
            thickness: 2.0,
        }
    }
}

/// One continuous pen-down..pen-up gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub points: Vec<Vec2<f32>>,
    pub pen: Pen,
}

impl Stroke {
    pub fn new(pen: Pen) -> Self {
        Self {
            points: Vec::new(),
            pen,
        }
    }
}

/// Freehand ink surface: an opaque background plus a list of strokes.
#[derive(Debug, Clone)]
pub struct InkCanvas {
    size: Vec2<f32>,
    background: [u8; 4],
    pen: Pen,
    strokes: Vec<Stroke>,
    active: Option<Stroke>,
}

impl InkCanvas {
    pub fn new(size: Vec2<f32>) -> Self {
        Self {
            size,
            background: WHITE,
            pen: Pen::default(),
            strokes: Vec::new(),
            active: None,
        }
    }

    pub fn with_background(mut self, background: [u8; 4]) -> Self {
        self.background = background;
        self
    }

    pub fn with_pen(mut self, pen: Pen) -> Self {
        self.pen = pen;
        self
    }

    pub fn pen(&self) -> Pen {
        self.pen
    }

    pub fn set_pen(&mut self, pen: Pen) {
        self.pen = pen;
    }

    pub fn background(&self) -> [u8; 4] {
        self.background
    }

    pub fn set_size(&mut self, size: Vec2<f32>) {
        self.size = size;
    }

    /// Start a new stroke at `point`. An unfinished stroke is committed first.
    pub fn begin_stroke(&mut self, point: Vec2<f32>) {
        self.end_stroke();
        let mut stroke = Stroke::new(self.pen);
        stroke.points.push(point);
        self.active = Some(stroke);
    }

    /// Append `point` to the stroke in progress. Ignored when no stroke is active
    /// or the point repeats the last one.
    pub fn extend_stroke(&mut self, point: Vec2<f32>) {
        if let Some(stroke) = self.active.as_mut() {
            if stroke.points.last() != Some(&point) {
                stroke.points.push(point);
            }
        }
    }

    /// Commit the stroke in progress, if any.
    pub fn end_stroke(&mut self) {
        if let Some(stroke) = self.active.take() {
            self.strokes.push(stroke);
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.active.is_some()
    }

    pub fn add_stroke(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    /// Committed strokes, oldest first.
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty() && self.active.is_none()
    }

    /// Erase all ink, including a stroke in progress.
    pub fn clear(&mut self) {
        self.strokes.clear();
        self.active = None;
    }
}

impl Surface for InkCanvas {
    fn layout_size(&self) -> Vec2<f32> {
        self.size
    }

    fn render(&self, target: &mut RasterImage, scale: f32) {
        fill(target, self.background);
        for stroke in self.strokes.iter().chain(self.active.as_ref()) {
            paint_stroke(target, stroke, scale);
        }
    }
}

fn fill(target: &mut RasterImage, color: [u8; 4]) {
    let format = target.format();
    let pixel = encode(format, color);
    for chunk in target.data_mut().chunks_exact_mut(format.bytes_per_pixel()) {
        chunk.copy_from_slice(&pixel[..chunk.len()]);
    }
}

fn encode(format: PixelFormat, [r, g, b, a]: [u8; 4]) -> [u8; 4] {
    match format {
        PixelFormat::Gray8 => [inkdigit_image::luminance(r, g, b), 0, 0, 0],
        PixelFormat::Rgb8 => [r, g, b, 0],
        PixelFormat::Rgba8 => [r, g, b, a],
        PixelFormat::Argb8 => [a, r, g, b],
    }
}

fn decode(format: PixelFormat, pixel: &[u8]) -> [u8; 4] {
    match format {
        PixelFormat::Gray8 => [pixel[0], pixel[0], pixel[0], 255],
        PixelFormat::Rgb8 => [pixel[0], pixel[1], pixel[2], 255],
        PixelFormat::Rgba8 => [pixel[0], pixel[1], pixel[2], pixel[3]],
        PixelFormat::Argb8 => [pixel[1], pixel[2], pixel[3], pixel[0]],
    }
}

// source-over with straight alpha; `coverage` scales the source alpha
fn blend(dst: [u8; 4], src: [u8; 4], coverage: f32) -> [u8; 4] {
    let sa = src[3] as f32 / 255.0 * coverage;
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return [0, 0, 0, 0];
    }
    let channel = |i: usize| {
        let c = (src[i] as f32 * sa + dst[i] as f32 * da * (1.0 - sa)) / out_a;
        c.round().clamp(0.0, 255.0) as u8
    };
    [
        channel(0),
        channel(1),
        channel(2),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ]
}

/// Paint `stroke` as round-capped segments with one-pixel anti-aliased edges.
///
/// Coverage is accumulated as a per-pixel maximum over the stroke's segments
/// before blending, so joints are not darkened twice.
fn paint_stroke(target: &mut RasterImage, stroke: &Stroke, scale: f32) {
    if stroke.points.is_empty() || stroke.pen.thickness <= 0.0 {
        return;
    }
    let points: Vec<Vec2<f32>> = stroke.points.iter().map(|&p| p * scale).collect();
    let radius = stroke.pen.thickness * scale / 2.0;
    let (width, height) = (target.width() as f32, target.height() as f32);

    let (mut min, mut max) = (points[0], points[0]);
    for p in &points {
        min = Vec2::new(min.x.min(p.x), min.y.min(p.y));
        max = Vec2::new(max.x.max(p.x), max.y.max(p.y));
    }
    let pad = radius + 1.0;
    let x0 = (min.x - pad).floor().clamp(0.0, width) as usize;
    let y0 = (min.y - pad).floor().clamp(0.0, height) as usize;
    let x1 = (max.x + pad).ceil().clamp(0.0, width) as usize;
    let y1 = (max.y + pad).ceil().clamp(0.0, height) as usize;
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let box_w = x1 - x0;
    let mut coverage = vec![0.0f32; box_w * (y1 - y0)];
    let segments: Vec<(Vec2<f32>, Vec2<f32>)> = if points.len() == 1 {
        vec![(points[0], points[0])]
    } else {
        points.windows(2).map(|w| (w[0], w[1])).collect()
    };

    for (a, b) in segments {
        let sx0 = ((a.x.min(b.x) - pad).floor().max(x0 as f32)) as usize;
        let sy0 = ((a.y.min(b.y) - pad).floor().max(y0 as f32)) as usize;
        let sx1 = ((a.x.max(b.x) + pad).ceil().min(x1 as f32)) as usize;
        let sy1 = ((a.y.max(b.y) + pad).ceil().min(y1 as f32)) as usize;
        for y in sy0..sy1 {
            for x in sx0..sx1 {
                let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let d = center.distance_to_segment(a, b);
                let c = (radius + 0.5 - d).clamp(0.0, 1.0);
                let slot = &mut coverage[(y - y0) * box_w + (x - x0)];
                if c > *slot {
                    *slot = c;
                }
            }
        }
    }

    let format = target.format();
    for y in y0..y1 {
        for x in x0..x1 {
            let c = coverage[(y - y0) * box_w + (x - x0)];
            if c <= 0.0 {
                continue;
            }
            let pixel = target.pixel_mut(x, y);
            let out = encode(format, blend(decode(format, pixel), stroke.pen.color, c));
            let len = pixel.len();
            pixel.copy_from_slice(&out[..len]);
        }
    }
}
