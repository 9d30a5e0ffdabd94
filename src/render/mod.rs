//! # Image Renderer
//!
//! Draws a composed [`Report`] onto its template image and encodes the result
//! as PNG.
//!
//! Rendering happens in three steps:
//!
//! 1. **Layout** ([`layout`]): wrap and position title and body lines,
//!    applying the variant's [`OverflowPolicy`].
//! 2. **Paint** ([`paint`]): rasterize each line onto the RGB canvas.
//! 3. **Encode**: write the canvas as PNG bytes.
//!
//! ## Example
//!
//! ```
//! use agroreporte::render::{self, font::FontFiles};
//! use agroreporte::report::Report;
//! use agroreporte::sheet::Row;
//! use agroreporte::variant::ReportVariant;
//! use image::RgbImage;
//! use std::io::Cursor;
//!
//! // A plain white template
//! let mut template = Vec::new();
//! RgbImage::from_pixel(1080, 1080, image::Rgb([255, 255, 255]))
//!     .write_to(&mut Cursor::new(&mut template), image::ImageFormat::Png)
//!     .unwrap();
//!
//! let variant = ReportVariant::RAPIDO;
//! let report = Report::from_row(&Row::default(), &variant, 2024);
//! let png = render::render_png(&template, &report, &variant, &FontFiles::builtin()).unwrap();
//! assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
//! ```

pub mod font;
pub mod layout;
pub mod paint;
pub mod wrap;

use std::io::Cursor;

use image::{Rgb, RgbImage};

use crate::error::ReportError;
use crate::report::Report;
use crate::variant::{OverflowPolicy, ReportVariant};
use font::FontFiles;

/// Background used for canvas area added by [`OverflowPolicy::Grow`].
const GROW_FILL: Rgb<u8> = Rgb([255, 255, 255]);

/// Decode template bytes into an RGB canvas.
pub fn decode_template(bytes: &[u8]) -> Result<RgbImage, ReportError> {
    image::load_from_memory(bytes)
        .map(|img| img.to_rgb8())
        .map_err(|e| ReportError::ImageLoad(format!("Failed to decode template image: {}", e)))
}

/// Draw `report` onto the decoded `template`.
pub fn render_report(
    template: &[u8],
    report: &Report,
    variant: &ReportVariant,
    files: &FontFiles,
) -> Result<RgbImage, ReportError> {
    let mut canvas = decode_template(template)?;
    let fitted = layout::fit_layout(report, variant, files);

    if fitted.variant.overflow == OverflowPolicy::Grow {
        let needed = (fitted.layout.content_bottom() + fitted.variant.line_spacing).ceil() as u32;
        canvas = grow_canvas(canvas, needed);
    }

    paint::paint_layout(&mut canvas, &fitted.layout, &fitted.fonts, Rgb(fitted.variant.ink))?;
    Ok(canvas)
}

/// Encode a canvas as PNG.
pub fn encode_png(canvas: &RgbImage) -> Result<Vec<u8>, ReportError> {
    let mut png_bytes = Vec::new();
    canvas
        .write_to(&mut Cursor::new(&mut png_bytes), image::ImageFormat::Png)
        .map_err(|e| ReportError::Render(format!("PNG encoding failed: {}", e)))?;
    Ok(png_bytes)
}

/// Render `report` onto `template` and return PNG bytes.
pub fn render_png(
    template: &[u8],
    report: &Report,
    variant: &ReportVariant,
    files: &FontFiles,
) -> Result<Vec<u8>, ReportError> {
    let canvas = render_report(template, report, variant, files)?;
    encode_png(&canvas)
}

/// Extend `canvas` downward to at least `height` pixels.
fn grow_canvas(canvas: RgbImage, height: u32) -> RgbImage {
    if height <= canvas.height() {
        return canvas;
    }
    let mut grown = RgbImage::from_pixel(canvas.width(), height, GROW_FILL);
    image::imageops::replace(&mut grown, &canvas, 0, 0);
    grown
}
