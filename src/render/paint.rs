//! Drawing placed lines onto the canvas.

use image::{Rgb, RgbImage};

use super::font::{FontSet, Typeface};
use super::layout::Layout;
use crate::error::ReportError;

/// Draw every line of `layout` in `ink`.
pub fn paint_layout(
    canvas: &mut RgbImage,
    layout: &Layout,
    fonts: &FontSet,
    ink: Rgb<u8>,
) -> Result<(), ReportError> {
    for line in &layout.lines {
        draw_text(canvas, fonts.face(line.style), line.x, line.y, &line.text, ink)?;
    }
    Ok(())
}

/// Draw `text` with its top-left corner at (`x`, `y`). Pixels outside the
/// canvas are dropped.
pub fn draw_text(
    canvas: &mut RgbImage,
    face: &Typeface,
    x: f32,
    y: f32,
    text: &str,
    ink: Rgb<u8>,
) -> Result<(), ReportError> {
    let (width, height) = canvas.dimensions();
    face.rasterize(text, x, y, |px, py, coverage| {
        if px >= 0 && py >= 0 && (px as u32) < width && (py as u32) < height {
            blend(canvas.get_pixel_mut(px as u32, py as u32), ink, coverage);
        }
    })
}

/// Mix `ink` into `pixel` by `coverage` (0.0 keeps the pixel, 1.0 replaces it).
fn blend(pixel: &mut Rgb<u8>, ink: Rgb<u8>, coverage: f32) {
    let c = coverage.clamp(0.0, 1.0);
    for channel in 0..3 {
        let mixed = pixel[channel] as f32 * (1.0 - c) + ink[channel] as f32 * c;
        pixel[channel] = mixed.round() as u8;
    }
}
