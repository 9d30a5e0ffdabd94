//! Field normalization: turns cells into clean display strings.

use crate::sheet::Cell;

/// Format a cell for display.
///
/// - missing, NaN, `"nan"`, `"none"` and blank text become `""`
/// - whole numbers lose their fractional part (`12345.0` → `"12345"`)
/// - other numbers keep their usual form (`3.14` → `"3.14"`)
/// - text is handled by [`format_text`]
pub fn format_cell(cell: &Cell) -> String {
    match cell {
        Cell::Empty => String::new(),
        Cell::Number(n) if n.is_nan() => String::new(),
        // `+ 0.0` turns -0.0 into 0.0
        Cell::Number(n) if n.is_finite() && n.fract() == 0.0 => format!("{:.0}", n + 0.0),
        Cell::Number(n) => n.to_string(),
        Cell::Text(s) => format_text(s),
    }
}

/// Format free text for display.
///
/// Numeric-looking text ending in `.0` loses that suffix (`"12345.0"` →
/// `"12345"`); anything else is trimmed.
pub fn format_text(raw: &str) -> String {
    let value = raw.trim();
    if is_missing(value) {
        return String::new();
    }
    if is_plain_number(value) {
        if let Some(whole) = value.strip_suffix(".0") {
            return whole.to_string();
        }
    }
    value.to_string()
}

fn is_missing(trimmed: &str) -> bool {
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") || trimmed.eq_ignore_ascii_case("none")
}

/// Digits only, allowing a single decimal point anywhere.
fn is_plain_number(value: &str) -> bool {
    let digits = value.replacen('.', "", 1);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_numbers_drop_fraction() {
        assert_eq!(format_cell(&Cell::Number(12345.0)), "12345");
        assert_eq!(format_cell(&Cell::Number(-3.0)), "-3");
        assert_eq!(format_cell(&Cell::Number(0.0)), "0");
        assert_eq!(format_cell(&Cell::Number(-0.0)), "0");
        assert_eq!(format_cell(&Cell::Text("12345.0".into())), "12345");
        assert_eq!(format_cell(&Cell::Text(" 7.0 ".into())), "7");
    }

    #[test]
    fn test_negative_zero_from_export() {
        let table = crate::sheet::export::parse_table("Código SINPAD\n-0\n").unwrap();
        let row = table.latest_row().unwrap();
        assert_eq!(format_cell(row.get("Código SINPAD")), "0");
    }

    #[test]
    fn test_large_whole_number_keeps_every_digit() {
        assert_eq!(format_cell(&Cell::Number(20241234567.0)), "20241234567");
    }

    #[test]
    fn test_fractional_numbers_unchanged() {
        assert_eq!(format_cell(&Cell::Number(3.14)), "3.14");
        assert_eq!(format_cell(&Cell::Text("12.50".into())), "12.50");
        assert_eq!(format_cell(&Cell::Text("1.05".into())), "1.05");
    }

    #[test]
    fn test_missing_values_are_blank() {
        assert_eq!(format_cell(&Cell::Empty), "");
        assert_eq!(format_cell(&Cell::Number(f64::NAN)), "");
        for raw in ["", "   ", "nan", "NaN", " None ", "none"] {
            assert_eq!(format_cell(&Cell::Text(raw.into())), "", "input {:?}", raw);
        }
    }

    #[test]
    fn test_text_is_trimmed() {
        assert_eq!(format_cell(&Cell::Text(" En proceso ".into())), "En proceso");
        assert_eq!(format_text("Helada"), "Helada");
    }

    #[test]
    fn test_non_numeric_dot_zero_kept() {
        assert_eq!(format_text("v1.0"), "v1.0");
        assert_eq!(format_text("1.2.0"), "1.2.0");
        assert_eq!(format_text("-5.0"), "-5.0");
    }

    #[test]
    fn test_formatting_is_idempotent() {
        for raw in ["12345.0", " En proceso ", "3.14", "", "nan"] {
            let once = format_text(raw);
            assert_eq!(format_text(&once), once);
        }
    }
}
