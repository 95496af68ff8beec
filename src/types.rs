//! Core data model types.
//!
//! Parsing produces a [`TabularDocument`]: an ordered list of named [`Column`]s whose cells are
//! tagged [`Cell`] values. Callers describe what they want summarized with a [`ColumnRequest`].

use serde::Serialize;

/// A single cell value after numeric coercion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Cell {
    /// A finite number, either stored as such or coerced from text.
    Numeric(f64),
    /// A present value that does not coerce to a number (text, bool, date, error cell).
    NonNumeric(String),
    /// Empty cell.
    Missing,
}

impl Cell {
    /// Returns the numeric value, if any.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Numeric(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Self::NonNumeric(s.to_string())
    }
}

/// A single named column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    /// Header name, as declared in the header row.
    pub name: String,
    /// Cell values in row order.
    pub cells: Vec<Cell>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }
}

/// In-memory table built from an uploaded sheet.
///
/// Column-major storage. Every column holds exactly [`TabularDocument::row_count`] cells and
/// header names are unique.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabularDocument {
    columns: Vec<Column>,
    row_count: usize,
}

impl TabularDocument {
    /// Build a document from columns.
    ///
    /// Shorter columns are padded with [`Cell::Missing`] so that every column has the same
    /// length. Duplicate names resolve last-value-wins: the name keeps the position of its first
    /// occurrence and takes the cells of its last occurrence.
    pub fn new(columns: Vec<Column>) -> Self {
        let row_count = columns.iter().map(|c| c.cells.len()).max().unwrap_or(0);

        let mut unique: Vec<Column> = Vec::with_capacity(columns.len());
        for mut column in columns {
            column.cells.resize(row_count, Cell::Missing);
            match unique.iter_mut().find(|c| c.name == column.name) {
                Some(existing) => {
                    tracing::debug!(column = %column.name, "duplicate header; keeping last occurrence");
                    existing.cells = column.cells;
                }
                None => unique.push(column),
            }
        }

        Self {
            columns: unique,
            row_count,
        }
    }

    /// Number of data rows (excluding the header).
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Columns in header order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Iterate header names in order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Look up a column by exact (case-sensitive) name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Ordered list of requested column names.
///
/// May be empty (meaning "summarize every column"), and may contain duplicates or names that
/// are absent from the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnRequest {
    names: Vec<String>,
}

impl ColumnRequest {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// An empty request: summarize every header column.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }
}

impl<S: Into<String>> FromIterator<S> for ColumnRequest {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
