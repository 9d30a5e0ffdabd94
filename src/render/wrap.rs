//! Greedy word wrapping against measured pixel widths.

use super::font::Typeface;

/// Wrap `text` so that no line is wider than `max_width`.
///
/// Each `\n`-separated paragraph is filled word by word; a word that does not
/// fit starts a new line. A single word wider than `max_width` gets a line of
/// its own. Every paragraph yields at least one (possibly empty) line.
pub fn wrap_text(text: &str, face: &Typeface, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split(' ') {
            let candidate = format!("{}{} ", line, word);
            if line.trim().is_empty() || face.width(&candidate) <= max_width {
                line = candidate;
            } else {
                lines.push(line.trim().to_string());
                line = format!("{} ", word);
            }
        }
        lines.push(line.trim().to_string());
    }

    lines
}
