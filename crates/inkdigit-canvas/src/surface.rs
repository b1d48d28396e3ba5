use inkdigit_base::Vec2;
use inkdigit_image::RasterImage;

/// Something that can be drawn into a bitmap.
///
/// `layout_size` is in logical units (1/96 inch). `render` paints the current
/// content into `target`, which has already been sized to
/// `layout_size * scale` pixels. Rendering must not change the surface.
pub trait Surface {
    fn layout_size(&self) -> Vec2<f32>;
    fn render(&self, target: &mut RasterImage, scale: f32);
}
