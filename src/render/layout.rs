//! Text placement.
//!
//! Layout is a pure pass: it measures and positions every line without
//! touching the canvas, so overflow policies can inspect the result before
//! anything is drawn.

use super::font::{FontFiles, FontSet};
use super::wrap::wrap_text;
use crate::report::Report;
use crate::variant::{OverflowPolicy, ReportVariant};

/// A block whose first line contains this character starts with a label.
pub const LABEL_SEPARATOR: char = ':';

/// Which face a line is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Title,
    Label,
    Body,
}

/// A line of text at its final position.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub style: Style,
    pub x: f32,
    pub y: f32,
    pub height: f32,
}

impl PlacedLine {
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Every line of a report, in drawing order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    pub lines: Vec<PlacedLine>,
}

impl Layout {
    /// Lowest ink bottom of any line.
    pub fn content_bottom(&self) -> f32 {
        self.lines.iter().map(PlacedLine::bottom).fold(0.0, f32::max)
    }

    pub fn lines_with_style(&self, style: Style) -> impl Iterator<Item = &PlacedLine> {
        self.lines.iter().filter(move |line| line.style == style)
    }
}

/// A layout together with the variant and faces it was computed for.
///
/// With [`OverflowPolicy::Shrink`] these differ from the requested ones.
#[derive(Clone)]
pub struct FittedLayout {
    pub layout: Layout,
    pub variant: ReportVariant,
    pub fonts: FontSet,
}

/// Split composed body text into blocks separated by blank lines.
///
/// A block that starts with a newline (left over from an empty value before
/// it) has that newline dropped; blank blocks are skipped. Its label line
/// therefore still counts as the first line and is drawn in the label face,
/// rather than the block being treated as unlabeled body text.
pub fn split_blocks(body: &str) -> impl Iterator<Item = &str> {
    body.trim()
        .split("\n\n")
        .map(|block| block.trim_start_matches('\n'))
        .filter(|block| !block.trim().is_empty())
}

/// Place title and body lines for `report`.
pub fn layout_report(report: &Report, variant: &ReportVariant, fonts: &FontSet) -> Layout {
    let text_box = variant.text_box;
    let mut lines = Vec::new();

    // Title: centered in the box, with a slight left bias
    let mut y = text_box.y0 + variant.title_top_pad;
    for text in &report.title {
        let width = fonts.title.width(text);
        let height = fonts.title.line_height(text);
        lines.push(PlacedLine {
            text: text.clone(),
            style: Style::Title,
            x: text_box.x0 + (text_box.width() - width) / 2.0 - variant.title_left_bias,
            y,
            height,
        });
        y += height + variant.title_line_gap;
    }

    // Body: labeled blocks, left aligned inside the indented box
    let x = text_box.x0 + variant.body_indent;
    let max_width = variant.body_width();
    let mut y = y + variant.body_top_gap;

    let mut place = |text: &str, style: Style, y: &mut f32| {
        let face = fonts.face(style);
        for line in wrap_text(text, face, max_width) {
            let height = face.line_height(&line);
            lines.push(PlacedLine {
                text: line,
                style,
                x,
                y: *y,
                height,
            });
            *y += height + variant.line_spacing;
        }
    };

    let body = report.body();
    for block in split_blocks(&body) {
        let (first, rest) = block.split_once('\n').unwrap_or((block, ""));
        if first.contains(LABEL_SEPARATOR) {
            place(first, Style::Label, &mut y);
            if !rest.trim().is_empty() {
                place(rest, Style::Body, &mut y);
            }
        } else {
            place(block, Style::Body, &mut y);
        }
        y += variant.line_spacing;
    }

    Layout { lines }
}

/// Lay out `report` and apply the variant's overflow policy.
///
/// `Grow` is resolved later against the canvas; here it behaves like
/// `Overflow`.
pub fn fit_layout(report: &Report, variant: &ReportVariant, files: &FontFiles) -> FittedLayout {
    let bottom_limit = variant.text_box.y1;
    let mut variant = *variant;
    let mut fonts = FontSet::for_variant(files, &variant);
    let mut layout = layout_report(report, &variant, &fonts);

    match variant.overflow {
        OverflowPolicy::Overflow | OverflowPolicy::Grow => {}
        OverflowPolicy::Clip => {
            let before = layout.lines.len();
            layout.lines.retain(|line| line.bottom() <= bottom_limit);
            if layout.lines.len() < before {
                tracing::debug!(
                    dropped = before - layout.lines.len(),
                    "clipped lines below the text box"
                );
            }
        }
        OverflowPolicy::Shrink => {
            while layout.content_bottom() > bottom_limit && !variant.at_min_size() {
                variant = variant.shrunk_by(1.0);
                fonts = FontSet::for_variant(files, &variant);
                layout = layout_report(report, &variant, &fonts);
            }
            tracing::debug!(
                body_size = variant.body_size,
                fits = layout.content_bottom() <= bottom_limit,
                "shrunk report text"
            );
        }
    }

    FittedLayout {
        layout,
        variant,
        fonts,
    }
}
