//! Text composition: numbered label/value blocks and the report title.

use std::fmt::Write as _;

use super::format::{format_cell, format_text};
use crate::sheet::{Cell, Row};
use crate::variant::ReportVariant;

/// Column holding the running report number.
pub const REPORT_NUMBER_COLUMN: &str = "Número de Reporte (Sólo número correlativo)";

/// Where the value of a report field comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSource {
    /// A single column, formatted as-is.
    Column(&'static str),
    /// Date and time columns combined as `"{date} - {time} horas"`.
    DateTime {
        date: &'static str,
        time: &'static str,
    },
}

/// A report field: its printed label and its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub label: &'static str,
    pub source: FieldSource,
}

/// The fields of every report, in print order.
pub const REPORT_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        label: "Tipo de evento",
        source: FieldSource::Column("Tipo de evento"),
    },
    FieldSpec {
        label: "Fecha y Hora",
        source: FieldSource::DateTime {
            date: "Fecha",
            time: "Hora",
        },
    },
    FieldSpec {
        label: "Lugar",
        source: FieldSource::Column(
            "Lugar (Departamento/Provincia/Distrito/Centro Poblado-caserío-etc)",
        ),
    },
    FieldSpec {
        label: "Afectación Preliminar",
        source: FieldSource::Column("Afectación Preliminar"),
    },
    FieldSpec {
        label: "Acción Local",
        source: FieldSource::Column("Acción Local"),
    },
    FieldSpec {
        label: "Acción Sectorial",
        source: FieldSource::Column("Acción Sectorial"),
    },
    FieldSpec {
        label: "Código SINPAD",
        source: FieldSource::Column("Código SINPAD"),
    },
    FieldSpec {
        label: "Fuente",
        source: FieldSource::Column("Fuente"),
    },
];

/// A label with its display value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedField {
    pub label: String,
    pub value: String,
}

impl FieldSpec {
    /// Read and format this field from a row.
    pub fn extract(&self, row: &Row) -> FormattedField {
        let value = match self.source {
            FieldSource::Column(column) => format_cell(row.get(column)),
            FieldSource::DateTime { date, time } => {
                let date = row.get(date).to_string();
                let time = row.get(time).to_string();
                format_text(&format!("{} - {} horas", date.trim(), time.trim()))
            }
        };
        FormattedField {
            label: self.label.to_string(),
            value,
        }
    }
}

/// The ordered fields of a report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportText {
    pub fields: Vec<FormattedField>,
}

impl ReportText {
    pub fn from_row(row: &Row, specs: &[FieldSpec]) -> Self {
        Self {
            fields: specs.iter().map(|spec| spec.extract(row)).collect(),
        }
    }

    /// Serialize as numbered blocks: `"{n}. {label}:\n{value}\n\n"`.
    pub fn body(&self) -> String {
        let mut out = String::new();
        for (i, field) in self.fields.iter().enumerate() {
            // Writing to a String cannot fail
            let _ = write!(out, "{}. {}:\n{}\n\n", i + 1, field.label, field.value);
        }
        out
    }
}

/// Running report number: float-parsed then truncated, 0 when unusable.
pub fn report_number(cell: &Cell) -> i64 {
    let value = match cell {
        Cell::Number(n) => Some(*n),
        Cell::Text(s) => s.trim().parse::<f64>().ok(),
        Cell::Empty => None,
    };
    value
        .filter(|n| n.is_finite())
        .map(|n| n.trunc() as i64)
        .unwrap_or(0)
}

/// Title lines: the numbered line followed by the variant's fixed lines.
pub fn title_lines(variant: &ReportVariant, number: i64, year: i32) -> Vec<String> {
    std::iter::once(format!("{} N° {}-{}-", variant.title_prefix, number, year))
        .chain(variant.title_suffix_lines.iter().map(|line| line.to_string()))
        .collect()
}
