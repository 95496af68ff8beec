use std::io::Cursor;

use calamine::{Data, Range, Reader, Xlsx};

use crate::error::{EngineError, EngineResult};
use crate::types::{Cell, Column, TabularDocument};

use super::coerce::{coerce_cell, NumberCoercion};

/// How to locate the header row within the sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HeaderRow {
    /// The first row containing at least one non-empty cell (default).
    #[default]
    FirstNonEmpty,
    /// Scan sheet rows `1..=search_rows` and pick the one matching the most `candidates`
    /// (trimmed, case-insensitive; blank candidates never match). Falls back to the first
    /// non-empty row within that window.
    Detect {
        candidates: Vec<String>,
        search_rows: usize,
    },
}

/// Options controlling how uploaded bytes become a [`TabularDocument`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub header_row: HeaderRow,
    pub coercion: NumberCoercion,
}

/// Parse `.xlsx` bytes into a [`TabularDocument`] using default options.
///
/// Reads the first sheet, takes its first non-empty row as the header, and strictly coerces the
/// remaining cells.
pub fn parse(bytes: &[u8]) -> EngineResult<TabularDocument> {
    parse_with_options(bytes, &ParseOptions::default())
}

/// Parse `.xlsx` bytes into a [`TabularDocument`].
///
/// Behavior:
/// - Reads the first (default) sheet of the workbook; other sheets are ignored
/// - Locates the header row per [`ParseOptions::header_row`]
/// - Drops columns whose header cell is empty
/// - Converts every cell below the header with [`ParseOptions::coercion`]
pub fn parse_with_options(bytes: &[u8], options: &ParseOptions) -> EngineResult<TabularDocument> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(EngineError::NoSheets)??;

    document_from_range(&range, options)
}

fn document_from_range(range: &Range<Data>, options: &ParseOptions) -> EngineResult<TabularDocument> {
    let rows: Vec<&[Data]> = range.rows().collect();
    // `rows` starts at the first used row of the sheet, not necessarily sheet row 1.
    let start_row = range.start().map_or(0, |(row, _)| row as usize);

    let header_idx = match &options.header_row {
        HeaderRow::FirstNonEmpty => first_non_empty_row(&rows, rows.len()),
        HeaderRow::Detect {
            candidates,
            search_rows,
        } => detect_header_row(&rows, candidates, search_rows.saturating_sub(start_row)),
    }
    .ok_or_else(|| EngineError::NoHeader {
        message: "sheet has no non-empty rows".to_string(),
    })?;

    // (column index, header name) for every addressable column.
    let header: Vec<(usize, String)> = rows[header_idx]
        .iter()
        .enumerate()
        .map(|(idx, cell)| (idx, cell_to_header_string(cell)))
        .filter(|(_, name)| !name.trim().is_empty())
        .collect();
    let sheet_row = start_row + header_idx + 1;
    if header.is_empty() {
        return Err(EngineError::NoHeader {
            message: format!("header row {sheet_row} has no named columns"),
        });
    }

    tracing::debug!(
        header_row = sheet_row,
        columns = header.len(),
        data_rows = rows.len() - header_idx - 1,
        "located header row"
    );

    let data_rows = &rows[header_idx + 1..];
    let columns = header
        .into_iter()
        .map(|(col_idx, name)| {
            let cells: Vec<Cell> = data_rows
                .iter()
                .map(|row| coerce_cell(row.get(col_idx).unwrap_or(&Data::Empty), options.coercion))
                .collect();
            Column::new(name, cells)
        })
        .collect();

    Ok(TabularDocument::new(columns))
}

fn is_non_empty_row(row: &[Data]) -> bool {
    row.iter().any(|c| !cell_to_header_string(c).trim().is_empty())
}

fn first_non_empty_row(rows: &[&[Data]], limit: usize) -> Option<usize> {
    rows.iter().take(limit).position(|row| is_non_empty_row(row))
}

fn detect_header_row(rows: &[&[Data]], candidates: &[String], search_rows: usize) -> Option<usize> {
    let wanted: Vec<String> = candidates
        .iter()
        .map(|c| normalize(c))
        .filter(|c| !c.is_empty())
        .collect();

    let mut best: Option<(usize, usize)> = None;
    for (idx, row) in rows.iter().take(search_rows).enumerate() {
        if !is_non_empty_row(row) {
            continue;
        }
        let names: Vec<String> = row
            .iter()
            .map(|c| normalize(&cell_to_header_string(c)))
            .filter(|n| !n.is_empty())
            .collect();
        let matches = wanted.iter().filter(|w| names.contains(w)).count();
        if matches > best.map_or(0, |(_, m)| m) {
            best = Some((idx, matches));
        }
    }

    match best {
        Some((idx, _)) => Some(idx),
        None => first_non_empty_row(rows, search_rows),
    }
}

/// Trimmed, lower-cased form used for tolerant header matching.
pub(crate) fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

fn cell_to_header_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(f) => f.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{e:?}"),
        Data::Empty => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use calamine::{Data, Range};

    use super::{document_from_range, parse, HeaderRow, ParseOptions};
    use crate::error::EngineError;
    use crate::ingestion::coerce::NumberCoercion;
    use crate::types::Cell;

    fn range_from(rows: &[Vec<Data>]) -> Range<Data> {
        let width = rows.iter().map(Vec::len).max().unwrap_or(1).max(1);
        let mut range = Range::new((0, 0), (rows.len().max(1) as u32 - 1, width as u32 - 1));
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                range.set_value((r as u32, c as u32), cell.clone());
            }
        }
        range
    }

    fn s(v: &str) -> Data {
        Data::String(v.to_string())
    }

    #[test]
    fn first_row_becomes_header() {
        let range = range_from(&[
            vec![s("A"), s("B")],
            vec![Data::Float(10.0), s("x")],
            vec![Data::Int(20), Data::Empty],
        ]);
        let doc = document_from_range(&range, &ParseOptions::default()).unwrap();

        assert_eq!(doc.column_names().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(doc.row_count(), 2);
        assert_eq!(
            doc.column("A").unwrap().cells,
            vec![Cell::Numeric(10.0), Cell::Numeric(20.0)]
        );
        assert_eq!(
            doc.column("B").unwrap().cells,
            vec![Cell::NonNumeric("x".to_string()), Cell::Missing]
        );
    }

    #[test]
    fn leading_blank_rows_are_skipped() {
        let range = range_from(&[
            vec![Data::Empty, Data::Empty],
            vec![s("A"), s("B")],
            vec![Data::Int(1), Data::Int(2)],
        ]);
        let doc = document_from_range(&range, &ParseOptions::default()).unwrap();
        assert_eq!(doc.column_names().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(doc.row_count(), 1);
    }

    #[test]
    fn unnamed_columns_are_dropped() {
        let range = range_from(&[
            vec![s("A"), Data::Empty, s("C")],
            vec![Data::Int(1), Data::Int(2), Data::Int(3)],
        ]);
        let doc = document_from_range(&range, &ParseOptions::default()).unwrap();
        assert_eq!(doc.column_names().collect::<Vec<_>>(), vec!["A", "C"]);
        assert_eq!(doc.column("C").unwrap().cells, vec![Cell::Numeric(3.0)]);
    }

    #[test]
    fn numeric_headers_render_without_fraction() {
        let range = range_from(&[vec![Data::Float(2024.0)], vec![Data::Int(1)]]);
        let doc = document_from_range(&range, &ParseOptions::default()).unwrap();
        assert_eq!(doc.column_names().collect::<Vec<_>>(), vec!["2024"]);
    }

    #[test]
    fn all_empty_sheet_has_no_header() {
        let range = range_from(&[vec![Data::Empty], vec![Data::Empty]]);
        let err = document_from_range(&range, &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, EngineError::NoHeader { .. }));
    }

    #[test]
    fn detect_picks_row_with_most_matches() {
        let range = range_from(&[
            vec![s("Quarterly report"), Data::Empty],
            vec![s("generated"), s("2024-01-01")],
            vec![s(" CURRENT USD "), s("Current CAD")],
            vec![Data::Int(5), s("$1,000.50")],
        ]);
        let options = ParseOptions {
            header_row: HeaderRow::Detect {
                candidates: vec!["current usd".to_string(), "CURRENT CAD".to_string()],
                search_rows: 5,
            },
            coercion: NumberCoercion::Lenient,
        };
        let doc = document_from_range(&range, &options).unwrap();

        assert_eq!(
            doc.column_names().collect::<Vec<_>>(),
            vec![" CURRENT USD ", "Current CAD"]
        );
        assert_eq!(doc.column("Current CAD").unwrap().cells, vec![Cell::Numeric(1000.5)]);
    }

    #[test]
    fn detect_falls_back_to_first_non_empty_row() {
        let range = range_from(&[
            vec![Data::Empty],
            vec![s("A")],
            vec![Data::Int(1)],
        ]);
        let options = ParseOptions {
            header_row: HeaderRow::Detect {
                candidates: vec!["nope".to_string()],
                search_rows: 5,
            },
            ..Default::default()
        };
        let doc = document_from_range(&range, &options).unwrap();
        assert_eq!(doc.column_names().collect::<Vec<_>>(), vec!["A"]);
    }

    #[test]
    fn detect_gives_up_outside_search_window() {
        let range = range_from(&[vec![Data::Empty], vec![Data::Empty], vec![s("A")]]);
        let options = ParseOptions {
            header_row: HeaderRow::Detect {
                candidates: Vec::new(),
                search_rows: 2,
            },
            ..Default::default()
        };
        assert!(matches!(
            document_from_range(&range, &options),
            Err(EngineError::NoHeader { .. })
        ));
    }

    #[test]
    fn whitespace_only_header_cells_are_dropped() {
        let range = range_from(&[
            vec![s("A"), s("   ")],
            vec![Data::Int(1), Data::Int(2)],
        ]);
        let doc = document_from_range(&range, &ParseOptions::default()).unwrap();
        assert_eq!(doc.column_names().collect::<Vec<_>>(), vec!["A"]);
    }

    #[test]
    fn blank_candidates_never_match_empty_cells() {
        let range = range_from(&[
            vec![s("Report title")],
            vec![s("A"), s("B")],
            vec![Data::Int(1)],
        ]);
        let options = ParseOptions {
            header_row: HeaderRow::Detect {
                candidates: vec![String::new(), "  ".to_string(), "b".to_string()],
                search_rows: 5,
            },
            ..Default::default()
        };
        let doc = document_from_range(&range, &options).unwrap();
        assert_eq!(doc.column_names().collect::<Vec<_>>(), vec!["A", "B"]);
    }

    #[test]
    fn detect_window_counts_sheet_rows() {
        // Used range begins at sheet row 3.
        let mut range = Range::new((2, 0), (3, 0));
        range.set_value((2, 0), s("A"));
        range.set_value((3, 0), Data::Int(1));

        let within = ParseOptions {
            header_row: HeaderRow::Detect {
                candidates: vec!["a".to_string()],
                search_rows: 3,
            },
            ..Default::default()
        };
        let doc = document_from_range(&range, &within).unwrap();
        assert_eq!(doc.column_names().collect::<Vec<_>>(), vec!["A"]);

        let outside = ParseOptions {
            header_row: HeaderRow::Detect {
                candidates: vec!["a".to_string()],
                search_rows: 2,
            },
            ..Default::default()
        };
        assert!(matches!(
            document_from_range(&range, &outside),
            Err(EngineError::NoHeader { .. })
        ));
    }

    #[test]
    fn garbage_bytes_are_a_workbook_error() {
        let err = parse(b"definitely not a zip archive").unwrap_err();
        assert!(matches!(err, EngineError::Workbook(_)));
    }
}
