// File I/O operations

use std::path::Path;

use serde::Serialize;

use restock_engine::table::Table;
use restock_engine::Error;

pub mod csv;
pub mod xlsx;

pub use xlsx::{EXPORT_FILE_NAME, EXPORT_SHEET_NAME};

/// What an import actually read, for display at the boundary.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    /// Sheet name for workbook sources; None for CSV/TSV.
    pub sheet: Option<String>,
    pub rows: usize,
    pub columns: usize,
    /// Workbooks are read first-sheet-only; additional sheets are counted here.
    pub sheets_ignored: usize,
}

impl ImportReport {
    /// One-line summary suitable for display.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(sheet) = &self.sheet {
            parts.push(format!("sheet '{}'", sheet));
        }
        parts.push(format!(
            "{} row{}",
            self.rows,
            if self.rows == 1 { "" } else { "s" }
        ));
        parts.push(format!(
            "{} column{}",
            self.columns,
            if self.columns == 1 { "" } else { "s" }
        ));
        if self.sheets_ignored > 0 {
            parts.push(format!(
                "{} additional sheet{} ignored",
                self.sheets_ignored,
                if self.sheets_ignored == 1 { "" } else { "s" }
            ));
        }
        parts.join(" · ")
    }

    pub(crate) fn for_table(table: &Table) -> ImportReport {
        ImportReport {
            sheet: None,
            rows: table.row_count(),
            columns: table.headers().len(),
            sheets_ignored: 0,
        }
    }
}

/// Import a tabular file, dispatching on its extension.
///
/// Workbook formats go through calamine (first sheet only); csv/tsv go
/// through the CSV reader. Anything else is rejected up front.
pub fn import_path(path: &Path) -> Result<(Table, ImportReport), Error> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let bytes = std::fs::read(path)
        .map_err(|e| Error::Parse(format!("{}: {}", path.display(), e)))?;

    match ext.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => xlsx::import_bytes(&bytes),
        "csv" => csv::import_bytes(&bytes),
        "tsv" => csv::import_bytes_with_delimiter(&bytes, b'\t'),
        other => Err(Error::Parse(format!(
            "unsupported file extension '{}' (expected xlsx, xls, xlsb, ods, csv or tsv)",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_summary_workbook() {
        let report = ImportReport {
            sheet: Some("Inventory".to_string()),
            rows: 12,
            columns: 4,
            sheets_ignored: 2,
        };
        assert_eq!(
            report.summary(),
            "sheet 'Inventory' · 12 rows · 4 columns · 2 additional sheets ignored"
        );
    }

    #[test]
    fn test_report_summary_csv() {
        let report = ImportReport {
            sheet: None,
            rows: 1,
            columns: 3,
            sheets_ignored: 0,
        };
        assert_eq!(report.summary(), "1 row · 3 columns");
    }

    #[test]
    fn test_import_path_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.pdf");
        std::fs::write(&path, b"not a sheet").unwrap();
        let err = import_path(&path).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
        assert!(err.to_string().contains("unsupported file extension"));
    }

    #[test]
    fn test_import_path_missing_file() {
        let err = import_path(Path::new("/nonexistent/stock.xlsx")).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }
}
