use rustc_hash::FxHashMap;

use crate::error::Error;
use crate::value::Scalar;

/// An imported sheet: one header row plus typed data rows.
///
/// Every data row is exactly `headers.len()` wide — missing trailing
/// cells are `Scalar::Empty`, excess cells are dropped. Duplicate
/// headers are retained as encountered; lookup resolves to the first
/// occurrence.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Scalar>>,
    header_index: FxHashMap<String, usize>,
}

impl Table {
    /// Build a table from a raw 2D grid where row 0 is the header row.
    ///
    /// Fails with `Error::EmptySheet` when there is no header+data pair.
    pub fn from_grid(grid: Vec<Vec<Scalar>>) -> Result<Table, Error> {
        if grid.len() < 2 {
            return Err(Error::EmptySheet);
        }

        let mut iter = grid.into_iter();
        let headers: Vec<String> = iter
            .next()
            .unwrap_or_default()
            .iter()
            .map(Scalar::display)
            .collect();

        let width = headers.len();
        let rows: Vec<Vec<Scalar>> = iter
            .map(|mut row| {
                row.truncate(width);
                row.resize(width, Scalar::Empty);
                row
            })
            .collect();

        Ok(Table::from_parts(headers, rows))
    }

    fn from_parts(headers: Vec<String>, rows: Vec<Vec<Scalar>>) -> Table {
        let mut header_index = FxHashMap::default();
        for (idx, name) in headers.iter().enumerate() {
            // First occurrence wins for duplicate headers
            header_index.entry(name.clone()).or_insert(idx);
        }
        Table {
            headers,
            rows,
            header_index,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Scalar>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Index of a header by exact name - O(1).
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header_index.get(name).copied()
    }
}
