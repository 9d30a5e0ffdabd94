//! Fonts for report rendering.
//!
//! TrueType faces are rendered with ab_glyph. When a font file is missing or
//! unreadable the built-in Spleen 12×24 bitmap font is used instead, scaled to
//! the requested size, so a report can always be drawn.

use std::path::Path;

use ab_glyph::{Font, FontArc, Glyph, PxScale, ScaleFont, point};
use spleen_font::{FONT_12X24, PSF2Font};

use super::layout::Style;
use crate::error::ReportError;
use crate::variant::ReportVariant;

pub const REGULAR_FONT_FILE: &str = "Poppins-Regular.ttf";
pub const BOLD_FONT_FILE: &str = "Poppins-Bold.ttf";

const BITMAP_CELL_WIDTH: usize = 12;
const BITMAP_CELL_HEIGHT: usize = 24;

/// The regular and bold font files, loaded once at start-up.
///
/// `None` means the file could not be used and the bitmap font stands in.
#[derive(Clone, Default)]
pub struct FontFiles {
    pub regular: Option<FontArc>,
    pub bold: Option<FontArc>,
}

impl FontFiles {
    /// Load `Poppins-Regular.ttf` and `Poppins-Bold.ttf` from `dir`.
    pub fn load(dir: &Path) -> Self {
        Self {
            regular: load_font(&dir.join(REGULAR_FONT_FILE)),
            bold: load_font(&dir.join(BOLD_FONT_FILE)),
        }
    }

    /// Only the built-in bitmap font.
    pub fn builtin() -> Self {
        Self::default()
    }
}

fn load_font(path: &Path) -> Option<FontArc> {
    let loaded = std::fs::read(path)
        .map_err(|e| e.to_string())
        .and_then(|bytes| FontArc::try_from_vec(bytes).map_err(|e| e.to_string()));

    match loaded {
        Ok(font) => {
            tracing::info!(path = %path.display(), "loaded font");
            Some(font)
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "font unavailable, falling back to built-in bitmap font"
            );
            None
        }
    }
}

#[derive(Clone)]
enum Face {
    Outline(FontArc),
    Bitmap,
}

/// A font at a fixed size, in pixels per em.
#[derive(Clone)]
pub struct Typeface {
    face: Face,
    size: f32,
}

impl Typeface {
    /// The TrueType font if available, otherwise the bitmap font.
    pub fn new(font: Option<FontArc>, size: f32) -> Self {
        match font {
            Some(font) => Self::outline(font, size),
            None => Self::bitmap(size),
        }
    }

    pub fn outline(font: FontArc, size: f32) -> Self {
        Self {
            face: Face::Outline(font),
            size,
        }
    }

    pub fn bitmap(size: f32) -> Self {
        Self {
            face: Face::Bitmap,
            size,
        }
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn is_bitmap(&self) -> bool {
        matches!(self.face, Face::Bitmap)
    }

    /// Horizontal advance of `text`.
    pub fn width(&self, text: &str) -> f32 {
        match &self.face {
            Face::Outline(font) => self.layout_glyphs(font, text, 0.0, 0.0).1,
            Face::Bitmap => text.chars().count() as f32 * self.bitmap_advance() as f32,
        }
    }

    /// Distance from the top of the line to the bottom of its lowest ink.
    ///
    /// Blank text has height 0.
    pub fn line_height(&self, text: &str) -> f32 {
        match &self.face {
            Face::Outline(font) => {
                let (glyphs, _) = self.layout_glyphs(font, text, 0.0, 0.0);
                glyphs
                    .into_iter()
                    .filter_map(|glyph| font.outline_glyph(glyph))
                    .map(|outlined| outlined.px_bounds().max.y.ceil())
                    .fold(0.0, f32::max)
            }
            Face::Bitmap => {
                if text.chars().any(|c| !c.is_whitespace()) {
                    self.bitmap_height() as f32
                } else {
                    0.0
                }
            }
        }
    }

    /// Rasterize `text` with its top-left corner at (`x`, `y`).
    ///
    /// `plot` receives every covered pixel with its coverage in 0.0..=1.0.
    /// Pixels may fall outside any canvas; clipping is up to the caller.
    pub fn rasterize(
        &self,
        text: &str,
        x: f32,
        y: f32,
        mut plot: impl FnMut(i32, i32, f32),
    ) -> Result<(), ReportError> {
        match &self.face {
            Face::Outline(font) => {
                let (glyphs, _) = self.layout_glyphs(font, text, x, y);
                for glyph in glyphs {
                    if let Some(outlined) = font.outline_glyph(glyph) {
                        let bounds = outlined.px_bounds();
                        outlined.draw(|px, py, coverage| {
                            plot(
                                px as i32 + bounds.min.x as i32,
                                py as i32 + bounds.min.y as i32,
                                coverage,
                            );
                        });
                    }
                }
                Ok(())
            }
            Face::Bitmap => self.rasterize_bitmap(text, x, y, plot),
        }
    }

    /// Pixel scale whose em square is `size` pixels tall.
    fn px_scale(&self, font: &FontArc) -> PxScale {
        let units_per_em = font.units_per_em().unwrap_or(1000.0);
        PxScale::from(self.size * font.height_unscaled() / units_per_em)
    }

    /// Position glyphs on a baseline one ascent below `y`.
    /// Returns the glyphs and the total advance.
    fn layout_glyphs(&self, font: &FontArc, text: &str, x: f32, y: f32) -> (Vec<Glyph>, f32) {
        let scale = self.px_scale(font);
        let scaled = font.as_scaled(scale);
        let baseline = y + scaled.ascent();

        let mut glyphs = Vec::with_capacity(text.len());
        let mut caret = 0.0f32;
        let mut previous = None;

        for ch in text.chars() {
            let id = font.glyph_id(ch);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            glyphs.push(id.with_scale_and_position(scale, point(x + caret, baseline)));
            caret += scaled.h_advance(id);
            previous = Some(id);
        }

        (glyphs, caret)
    }

    fn bitmap_advance(&self) -> usize {
        (self.size * BITMAP_CELL_WIDTH as f32 / BITMAP_CELL_HEIGHT as f32)
            .round()
            .max(1.0) as usize
    }

    fn bitmap_height(&self) -> usize {
        self.size.round().max(1.0) as usize
    }

    /// Draw Spleen glyphs scaled from 12×24 to the face size (nearest neighbor).
    fn rasterize_bitmap(
        &self,
        text: &str,
        x: f32,
        y: f32,
        mut plot: impl FnMut(i32, i32, f32),
    ) -> Result<(), ReportError> {
        let mut font = PSF2Font::new(FONT_12X24)
            .map_err(|_| ReportError::Render("Built-in bitmap font is corrupt".to_string()))?;
        let advance = self.bitmap_advance();
        let height = self.bitmap_height();
        let top = y.round() as i32;
        let mut cursor = x.round() as i32;

        for ch in text.chars() {
            let utf8 = ch.to_string();
            if let Some(glyph) = font.glyph_for_utf8(utf8.as_bytes()) {
                let mut cell = [[false; BITMAP_CELL_WIDTH]; BITMAP_CELL_HEIGHT];
                for (row_y, row) in glyph.enumerate() {
                    for (col_x, on) in row.enumerate() {
                        if row_y < BITMAP_CELL_HEIGHT && col_x < BITMAP_CELL_WIDTH {
                            cell[row_y][col_x] = on;
                        }
                    }
                }

                for dy in 0..height {
                    for dx in 0..advance {
                        let sx = dx * BITMAP_CELL_WIDTH / advance;
                        let sy = dy * BITMAP_CELL_HEIGHT / height;
                        if cell[sy][sx] {
                            plot(cursor + dx as i32, top + dy as i32, 1.0);
                        }
                    }
                }
            }
            cursor += advance as i32;
        }

        Ok(())
    }
}

/// The three faces a report is drawn with.
#[derive(Clone)]
pub struct FontSet {
    pub title: Typeface,
    pub body: Typeface,
    pub label: Typeface,
}

impl FontSet {
    pub fn for_variant(files: &FontFiles, variant: &ReportVariant) -> Self {
        Self {
            title: Typeface::new(files.bold.clone(), variant.title_size),
            body: Typeface::new(files.regular.clone(), variant.body_size),
            label: Typeface::new(files.bold.clone(), variant.label_size),
        }
    }

    pub fn face(&self, style: Style) -> &Typeface {
        match style {
            Style::Title => &self.title,
            Style::Body => &self.body,
            Style::Label => &self.label,
        }
    }
}

/// DejaVu Sans written under the Poppins file names and loaded from there.
#[cfg(test)]
pub(crate) fn outline_test_files(tag: &str) -> FontFiles {
    let dir = std::env::temp_dir().join(format!("agroreporte-{}-{}", std::process::id(), tag));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(REGULAR_FONT_FILE), include_bytes!("fonts/DejaVuSans.ttf")).unwrap();
    std::fs::write(dir.join(BOLD_FONT_FILE), include_bytes!("fonts/DejaVuSans-Bold.ttf")).unwrap();
    FontFiles::load(&dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitmap_metrics_scale_with_size() {
        let face = Typeface::bitmap(24.0);
        assert_eq!(face.width("abc"), 36.0);
        assert_eq!(face.line_height("abc"), 24.0);

        let small = Typeface::bitmap(22.0);
        assert_eq!(small.width("abc"), 33.0);
        assert_eq!(small.line_height("Á"), 22.0);
    }

    #[test]
    fn test_blank_text_has_no_height() {
        let face = Typeface::bitmap(22.0);
        assert_eq!(face.line_height(""), 0.0);
        assert_eq!(face.line_height("   "), 0.0);
        assert_eq!(face.width(""), 0.0);
    }

    #[test]
    fn test_bitmap_rasterize_stays_in_cell() {
        let face = Typeface::bitmap(22.0);
        let mut pixels = Vec::new();
        face.rasterize("Hi", 10.0, 5.0, |x, y, c| pixels.push((x, y, c)))
            .unwrap();

        assert!(!pixels.is_empty());
        for &(x, y, c) in &pixels {
            assert!((10..10 + 22).contains(&x), "x = {}", x);
            assert!((5..5 + 22).contains(&y), "y = {}", y);
            assert_eq!(c, 1.0);
        }
    }

    #[test]
    fn test_missing_font_files_fall_back() {
        let files = FontFiles::load(Path::new("/nonexistent/fonts"));
        assert!(files.regular.is_none());
        assert!(files.bold.is_none());

        let fonts = FontSet::for_variant(&files, &ReportVariant::RAPIDO);
        assert!(fonts.title.is_bitmap());
        assert_eq!(fonts.label.size(), 21.0);
        assert_eq!(fonts.face(Style::Body).size(), 22.0);
    }

    #[test]
    fn test_invalid_font_file_falls_back() {
        let dir = std::env::temp_dir().join("agroreporte-font-test");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(REGULAR_FONT_FILE), b"not a font").unwrap();

        let files = FontFiles::load(&dir);
        assert!(files.regular.is_none());
    }

    #[test]
    fn test_outline_fonts_load() {
        let files = outline_test_files("font-load");
        assert!(files.regular.is_some());
        assert!(files.bold.is_some());

        let fonts = FontSet::for_variant(&files, &ReportVariant::RAPIDO);
        assert!(!fonts.title.is_bitmap());
        assert!(!fonts.body.is_bitmap());
        assert!(!fonts.label.is_bitmap());
    }

    #[test]
    fn test_outline_width_scales_with_size() {
        let files = outline_test_files("font-width");
        let small = Typeface::new(files.regular.clone(), 22.0);
        let large = Typeface::new(files.regular, 44.0);

        let width = small.width("Acción Local");
        assert!(width > 0.0);
        assert!((large.width("Acción Local") - 2.0 * width).abs() < 1.0);
        assert!(small.width("Helada intensa") > small.width("Helada"));
    }

    #[test]
    fn test_outline_line_height_follows_size() {
        let files = outline_test_files("font-height");
        let small = Typeface::new(files.bold.clone(), 22.0);
        let large = Typeface::new(files.bold, 44.0);

        let height = small.line_height("Helada");
        assert!((11.0..=33.0).contains(&height), "height = {}", height);
        assert!(large.line_height("Helada") > 1.8 * height);
        // Descenders reach below the baseline
        assert!(small.line_height("papa") > small.line_height("nene"));
        assert_eq!(small.line_height("  "), 0.0);
    }

    #[test]
    fn test_outline_rasterize_is_anti_aliased() {
        let files = outline_test_files("font-raster");
        let face = Typeface::new(files.regular, 22.0);
        let width = face.width("Helada");
        let height = face.line_height("Helada");

        let mut pixels = Vec::new();
        face.rasterize("Helada", 100.0, 50.0, |x, y, c| pixels.push((x, y, c)))
            .unwrap();

        assert!(pixels.iter().any(|&(_, _, c)| c > 0.01 && c < 0.99));
        for &(x, y, c) in &pixels {
            if c > 0.0 {
                assert!((98..=(100.0 + width) as i32 + 2).contains(&x), "x = {}", x);
                assert!((50..=(50.0 + height) as i32 + 1).contains(&y), "y = {}", y);
            }
        }
    }
}
