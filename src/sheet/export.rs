//! Parsing of the sheet's CSV export.
//!
//! The first record is the header. A column is numeric when every non-missing
//! value in it parses as a finite number; otherwise the whole column is text.
//! This happens once here so that downstream code only matches on [`Cell`].

use super::{Cell, Row, Table};
use crate::error::ReportError;

/// Parse a CSV export into a [`Table`].
pub fn parse_table(content: &str) -> Result<Table, ReportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ReportError::DataUnavailable(format!("Invalid CSV header: {}", e)))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| {
            ReportError::DataUnavailable(format!("Invalid CSV row {}: {}", index + 1, e))
        })?;
        let mut values: Vec<String> = record.iter().map(str::to_string).collect();
        values.resize(headers.len(), String::new());
        raw_rows.push(values);
    }

    let numeric: Vec<bool> = (0..headers.len())
        .map(|col| {
            let mut present = raw_rows
                .iter()
                .map(|row| row[col].as_str())
                .filter(|raw| !Cell::is_missing_marker(raw))
                .peekable();
            present.peek().is_some() && present.all(|raw| Cell::parse_number(raw).is_some())
        })
        .collect();

    let rows = raw_rows
        .into_iter()
        .map(|values| {
            values
                .into_iter()
                .zip(&headers)
                .zip(&numeric)
                .map(|((raw, header), &is_numeric)| (header.clone(), to_cell(raw, is_numeric)))
                .collect::<Row>()
        })
        .collect();

    Ok(Table { headers, rows })
}

fn to_cell(raw: String, numeric: bool) -> Cell {
    if Cell::is_missing_marker(&raw) {
        return Cell::Empty;
    }
    match numeric.then(|| Cell::parse_number(&raw)).flatten() {
        Some(n) => Cell::Number(n),
        None => Cell::Text(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const EXPORT: &str = "\"Marca temporal\",\"Tipo de evento\",\"Número\",\"Hora\"\n\
                          \"1/1/2024 8:00:00\",\"Helada\",\"7\",\"08:00\"\n\
                          \"2/1/2024 9:30:00\",\" Granizada \",\"\",\"09:30\"\n";

    #[test]
    fn test_headers_and_rows() {
        let table = parse_table(EXPORT).unwrap();
        assert_eq!(
            table.headers,
            vec!["Marca temporal", "Tipo de evento", "Número", "Hora"]
        );
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn test_numeric_column_inference() {
        let table = parse_table(EXPORT).unwrap();
        assert_eq!(table.rows[0].get("Número"), &Cell::Number(7.0));
        assert_eq!(table.rows[1].get("Número"), &Cell::Empty);
        // "08:00" keeps the whole column textual
        assert_eq!(table.rows[0].get("Hora"), &Cell::Text("08:00".into()));
    }

    #[test]
    fn test_text_keeps_raw_spacing() {
        let table = parse_table(EXPORT).unwrap();
        assert_eq!(
            table.rows[1].get("Tipo de evento"),
            &Cell::Text(" Granizada ".into())
        );
    }

    #[test]
    fn test_mixed_column_stays_text() {
        let table = parse_table("A\n1.0\nabc\n").unwrap();
        assert_eq!(table.rows[0].get("A"), &Cell::Text("1.0".into()));
    }

    #[test]
    fn test_short_rows_are_padded() {
        let table = parse_table("A,B\n1\n").unwrap();
        assert_eq!(table.rows[0].get("B"), &Cell::Empty);
    }

    #[test]
    fn test_header_only() {
        let table = parse_table("A,B\n").unwrap();
        assert!(table.rows.is_empty());
    }
}
