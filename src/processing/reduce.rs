//! Single-pass numeric reduction over a column's [`Cell`]s.

use crate::types::Cell;

/// Running sum/min/max/count over numeric cells.
///
/// Non-numeric and missing cells are ignored by the numeric aggregates and tallied in
/// `non_numeric`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NumericAccumulator {
    pub sum: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub numeric: usize,
    pub non_numeric: usize,
}

impl NumericAccumulator {
    /// Fold one cell into the accumulator.
    pub fn push(&mut self, cell: &Cell) {
        match cell.as_f64() {
            Some(v) => {
                self.sum += v;
                self.numeric += 1;
                self.min = Some(self.min.map_or(v, |m| m.min(v)));
                self.max = Some(self.max.map_or(v, |m| m.max(v)));
            }
            None => self.non_numeric += 1,
        }
    }

    /// Mean of the numeric cells; `None` when there were none.
    pub fn mean(&self) -> Option<f64> {
        (self.numeric > 0).then(|| self.sum / self.numeric as f64)
    }
}

/// Reduce a sequence of cells.
pub fn reduce<'a, I>(cells: I) -> NumericAccumulator
where
    I: IntoIterator<Item = &'a Cell>,
{
    cells.into_iter().fold(NumericAccumulator::default(), |mut acc, cell| {
        acc.push(cell);
        acc
    })
}
