// Excel workbook import (xlsx, xls, xlsb, ods) and export (xlsx only)
//
// Import: first sheet only, one-way conversion into a typed Table.
// Export: serializes a computed suggestion list for sharing.

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook, Worksheet, XlsxError};

use restock_engine::suggest::{SuggestionEntry, ENTRY_COLUMNS};
use restock_engine::table::Table;
use restock_engine::value::Scalar;
use restock_engine::Error;

use crate::ImportReport;

/// Sheet name used for exported suggestion lists.
pub const EXPORT_SHEET_NAME: &str = "Purchase Suggestions";

/// Default file name for exported suggestion lists.
pub const EXPORT_FILE_NAME: &str = "purchase_suggestions.xlsx";

/// Import the first sheet of a workbook from an in-memory byte buffer.
pub fn import_bytes(bytes: &[u8]) -> Result<(Table, ImportReport), Error> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| Error::Parse(e.to_string()))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let first = sheet_names
        .first()
        .cloned()
        .ok_or_else(|| Error::Parse("workbook contains no sheets".to_string()))?;

    let range = workbook
        .worksheet_range(&first)
        .map_err(|e| Error::Parse(format!("failed to read sheet '{}': {}", first, e)))?;

    let grid: Vec<Vec<Scalar>> = range
        .rows()
        .map(|row| row.iter().map(cell_to_scalar).collect())
        .collect();

    let table = Table::from_grid(grid)?;
    let report = ImportReport {
        sheet: Some(first),
        rows: table.row_count(),
        columns: table.headers().len(),
        sheets_ignored: sheet_names.len() - 1,
    };
    Ok((table, report))
}

/// Import the first sheet of a workbook file.
pub fn import(path: &Path) -> Result<(Table, ImportReport), Error> {
    let bytes = std::fs::read(path)
        .map_err(|e| Error::Parse(format!("{}: {}", path.display(), e)))?;
    import_bytes(&bytes)
}

fn cell_to_scalar(cell: &Data) -> Scalar {
    match cell {
        Data::Empty => Scalar::Empty,
        Data::String(s) => Scalar::from_input(s),
        Data::Float(n) => Scalar::Number(*n),
        Data::Int(n) => Scalar::Number(*n as f64),
        // TRUE/FALSE text, same as typing the value into a sheet
        Data::Bool(b) => Scalar::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        // Error cells become their text representation
        Data::Error(e) => Scalar::Text(format!("#{:?}", e)),
        // Date/time serials participate in arithmetic as plain numbers
        Data::DateTime(dt) => Scalar::Number(dt.as_f64()),
        Data::DateTimeIso(s) => Scalar::Text(s.clone()),
        Data::DurationIso(s) => Scalar::Text(s.clone()),
    }
}

// =============================================================================
// Export
// =============================================================================

/// Serialize a suggestion list to an XLSX byte buffer.
///
/// Single sheet, header row from the entry field names, values written
/// field-by-field exactly as stored (quantities already rounded).
pub fn export_suggestions(entries: &[SuggestionEntry]) -> Result<Vec<u8>, String> {
    let mut workbook = build_workbook(entries)?;
    workbook
        .save_to_buffer()
        .map_err(|e| format!("failed to serialize workbook: {}", e))
}

/// Write the exported suggestion list to a file.
pub fn export_to_path(entries: &[SuggestionEntry], path: &Path) -> Result<(), String> {
    let mut workbook = build_workbook(entries)?;
    workbook
        .save(path)
        .map_err(|e| format!("failed to save {}: {}", path.display(), e))
}

fn build_workbook(entries: &[SuggestionEntry]) -> Result<XlsxWorkbook, String> {
    let mut workbook = XlsxWorkbook::new();
    let worksheet = workbook
        .add_worksheet()
        .set_name(EXPORT_SHEET_NAME)
        .map_err(|e| format!("failed to create sheet: {}", e))?;

    let header_format = Format::new().set_bold();
    for (col, label) in ENTRY_COLUMNS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *label, &header_format)
            .map_err(|e| format!("failed to write header '{}': {}", label, e))?;
    }

    for (idx, entry) in entries.iter().enumerate() {
        write_entry(worksheet, idx as u32 + 1, entry)
            .map_err(|e| format!("failed to write row {}: {}", idx + 1, e))?;
    }

    Ok(workbook)
}

fn write_entry(
    worksheet: &mut Worksheet,
    row: u32,
    entry: &SuggestionEntry,
) -> Result<(), XlsxError> {
    worksheet.write_string(row, 0, &entry.product)?;
    worksheet.write_number(row, 1, entry.current_stock)?;
    worksheet.write_number(row, 2, entry.units_sold)?;
    worksheet.write_number(row, 3, entry.estimated_demand as f64)?;
    worksheet.write_number(row, 4, entry.suggested_purchase as f64)?;
    worksheet.write_number(row, 5, entry.unit_cost)?;
    worksheet.write_number(row, 6, entry.total_value)?;
    worksheet.write_string(row, 7, entry.status.as_str())?;
    worksheet.write_string(row, 8, entry.priority.as_str())?;
    Ok(())
}
