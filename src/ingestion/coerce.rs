//! Spreadsheet cell → [`Cell`] coercion.

use calamine::Data;

use crate::types::Cell;

/// How text cells are turned into numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NumberCoercion {
    /// Trimmed text must parse as a finite `f64` as-is (`"12.5"`, `"-3"`, `"1e3"`).
    #[default]
    Strict,
    /// Also accepts currency symbols, thousands separators, decimal commas and accounting
    /// parentheses (`"$1,234.56"`, `"90,00"`, `"(5)"`).
    Lenient,
}

const CURRENCY_SYMBOLS: [char; 8] = ['$', '€', '£', '¥', '₹', '₽', '₩', '฿'];

/// Convert a raw spreadsheet value into a [`Cell`].
pub fn coerce_cell(data: &Data, mode: NumberCoercion) -> Cell {
    match data {
        Data::Empty => Cell::Missing,
        Data::Int(i) => Cell::Numeric(*i as f64),
        Data::Float(f) if f.is_finite() => Cell::Numeric(*f),
        Data::Float(f) => Cell::NonNumeric(f.to_string()),
        Data::String(s) => coerce_text(s, mode),
        Data::Bool(b) => Cell::NonNumeric(b.to_string()),
        Data::DateTime(dt) => Cell::NonNumeric(dt.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::NonNumeric(s.clone()),
        Data::Error(e) => Cell::NonNumeric(format!("#ERR:{e:?}")),
    }
}

/// Coerce a text value; empty (after trimming) text is [`Cell::Missing`].
pub fn coerce_text(raw: &str, mode: NumberCoercion) -> Cell {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Cell::Missing;
    }

    let parsed = match mode {
        NumberCoercion::Strict => parse_finite(trimmed),
        NumberCoercion::Lenient => parse_lenient(trimmed),
    };

    match parsed {
        Some(v) => Cell::Numeric(v),
        None => Cell::NonNumeric(trimmed.to_string()),
    }
}

fn parse_finite(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_lenient(s: &str) -> Option<f64> {
    let mut cleaned: String = s
        .chars()
        .filter(|c| !CURRENCY_SYMBOLS.contains(c) && !c.is_whitespace())
        .collect();

    // (123) -> -123
    if cleaned.len() > 2 && cleaned.starts_with('(') && cleaned.ends_with(')') {
        cleaned = format!("-{}", &cleaned[1..cleaned.len() - 1]);
    }

    let has_comma = cleaned.contains(',');
    let has_dot = cleaned.contains('.');
    if has_comma && has_dot {
        cleaned = cleaned.replace(',', "");
    } else if has_comma {
        cleaned = cleaned.replace(',', ".");
    }

    parse_finite(&cleaned)
}
