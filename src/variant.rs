//! # Report Variants
//!
//! Every report variant uses the same pipeline and differs only in cosmetic
//! constants: title text, where the text box sits on the template, font sizes
//! and spacing.
//!
//! ## Text Box
//!
//! ```text
//! (x0, y0) ┌──────────────── box width ────────────────┐
//!          │            centered title lines            │
//!          │                                            │
//!          │ indent ┌─ body (box width - 2·indent) ─┐   │
//!          │        │ 1. Label:                     │   │
//!          │        │ value                         │   │
//!          └────────┴───────────────────────────────┴───┘ (x1, y1)
//! ```
//!
//! ## Usage
//!
//! ```
//! use agroreporte::variant::{ReportVariant, VariantKind};
//!
//! let variant = ReportVariant::for_kind(VariantKind::Rapido);
//! assert_eq!(variant.text_box.width(), 530.0);
//! ```

use std::fmt;

/// Report variant selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum VariantKind {
    /// Quick report ("REPORTE RÁPIDO")
    Rapido,
    /// Follow-up report ("REPORTE COMPLEMENTARIO")
    Complementario,
}

/// Rectangular pixel region the report text must fit into horizontally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl TextBox {
    #[inline]
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }
}

/// What to do when the body runs past the bottom of the text box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OverflowPolicy {
    /// Keep drawing below the box (text may run off the template).
    #[default]
    Overflow,
    /// Drop lines that would end below the box.
    Clip,
    /// Reduce every font size until the text fits.
    Shrink,
    /// Extend the canvas downward so nothing is cut off.
    Grow,
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Overflow => "overflow",
            Self::Clip => "clip",
            Self::Shrink => "shrink",
            Self::Grow => "grow",
        })
    }
}

/// Default upstream resources for a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultResources {
    pub sheet_id: &'static str,
    pub sheet_name: &'static str,
    /// Share link or file id of the template image.
    pub template: &'static str,
}

/// # Report Variant
///
/// Layout and wording for one kind of report. All distances are in template
/// pixels; font sizes are pixels per em.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportVariant {
    pub kind: VariantKind,
    /// First part of the numbered title line, e.g. "REPORTE RÁPIDO"
    pub title_prefix: &'static str,
    /// Fixed organizational lines below the numbered title line
    pub title_suffix_lines: &'static [&'static str],
    pub text_box: TextBox,
    pub title_size: f32,
    pub body_size: f32,
    pub label_size: f32,
    /// Extra space after every body line, and once more after every block
    pub line_spacing: f32,
    /// Extra space after every title line
    pub title_line_gap: f32,
    /// Distance from the top of the box to the first title line
    pub title_top_pad: f32,
    /// Shift applied to centered title lines, towards the left
    pub title_left_bias: f32,
    /// Horizontal inset of the body on both sides of the box
    pub body_indent: f32,
    /// Gap between the last title line and the first body line
    pub body_top_gap: f32,
    /// Smallest size `OverflowPolicy::Shrink` may reduce fonts to
    pub min_font_size: f32,
    pub ink: [u8; 3],
    pub overflow: OverflowPolicy,
    pub resources: DefaultResources,
}

const ORGANIZATION_LINES: &[&str] = &["SG-ODNGRD-COESMIDAGRI"];

const FORM_RESOURCES: DefaultResources = DefaultResources {
    sheet_id: "1N2ZviQnjLIdTPARD2ksI47Wt-0Jzyjmndu4wtYqvc0k",
    sheet_name: "formulario de prueba",
    template: "https://drive.google.com/file/d/1NfH4W8DiOtVnaz2pSf11goWHEpiKmFlH/view?usp=sharing",
};

impl ReportVariant {
    /// # Quick report
    ///
    /// | Property | Value |
    /// |----------|-------|
    /// | Text box | (280, 250) – (810, 480) |
    /// | Title / body / label size | 22 / 22 / 21 |
    /// | Line spacing | 8 |
    pub const RAPIDO: Self = Self {
        kind: VariantKind::Rapido,
        title_prefix: "REPORTE RÁPIDO",
        title_suffix_lines: ORGANIZATION_LINES,
        text_box: TextBox {
            x0: 280.0,
            y0: 250.0,
            x1: 810.0,
            y1: 480.0,
        },
        title_size: 22.0,
        body_size: 22.0,
        label_size: 21.0,
        line_spacing: 8.0,
        title_line_gap: 4.0,
        title_top_pad: 10.0,
        title_left_bias: 5.0,
        body_indent: 15.0,
        body_top_gap: 30.0,
        min_font_size: 10.0,
        ink: [0, 0, 0],
        overflow: OverflowPolicy::Overflow,
        resources: FORM_RESOURCES,
    };

    /// # Follow-up report
    ///
    /// Same sheet and template as the quick report with a wider, taller box
    /// and slightly smaller type.
    pub const COMPLEMENTARIO: Self = Self {
        kind: VariantKind::Complementario,
        title_prefix: "REPORTE COMPLEMENTARIO",
        title_suffix_lines: ORGANIZATION_LINES,
        text_box: TextBox {
            x0: 250.0,
            y0: 240.0,
            x1: 840.0,
            y1: 520.0,
        },
        title_size: 20.0,
        body_size: 20.0,
        label_size: 19.0,
        line_spacing: 6.0,
        title_line_gap: 4.0,
        title_top_pad: 8.0,
        title_left_bias: 5.0,
        body_indent: 15.0,
        body_top_gap: 24.0,
        min_font_size: 10.0,
        ink: [0, 0, 0],
        overflow: OverflowPolicy::Overflow,
        resources: FORM_RESOURCES,
    };

    pub fn for_kind(kind: VariantKind) -> Self {
        match kind {
            VariantKind::Rapido => Self::RAPIDO,
            VariantKind::Complementario => Self::COMPLEMENTARIO,
        }
    }

    pub fn with_overflow(self, overflow: OverflowPolicy) -> Self {
        Self { overflow, ..self }
    }

    /// Maximum width of a wrapped body line.
    #[inline]
    pub fn body_width(&self) -> f32 {
        self.text_box.width() - 2.0 * self.body_indent
    }

    /// Copy of this variant with every font size reduced by `step` pixels,
    /// never below `min_font_size`.
    pub fn shrunk_by(&self, step: f32) -> Self {
        let shrink = |size: f32| (size - step).max(self.min_font_size);
        Self {
            title_size: shrink(self.title_size),
            body_size: shrink(self.body_size),
            label_size: shrink(self.label_size),
            ..*self
        }
    }

    /// True if no font size can be reduced any further.
    pub fn at_min_size(&self) -> bool {
        [self.title_size, self.body_size, self.label_size]
            .iter()
            .all(|&size| size <= self.min_font_size)
    }
}

impl Default for ReportVariant {
    fn default() -> Self {
        Self::RAPIDO
    }
}
