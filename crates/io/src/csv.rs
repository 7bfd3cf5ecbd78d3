// CSV/TSV import

use std::path::Path;

use restock_engine::table::Table;
use restock_engine::value::Scalar;
use restock_engine::Error;

use crate::ImportReport;

/// Import CSV bytes, sniffing the delimiter from the first lines.
pub fn import_bytes(bytes: &[u8]) -> Result<(Table, ImportReport), Error> {
    let content = decode_utf8(bytes);
    let delimiter = sniff_delimiter(&content);
    import_from_string(&content, delimiter)
}

/// Import with an explicit delimiter (tsv, semicolon exports, etc.).
pub fn import_bytes_with_delimiter(
    bytes: &[u8],
    delimiter: u8,
) -> Result<(Table, ImportReport), Error> {
    let content = decode_utf8(bytes);
    import_from_string(&content, delimiter)
}

/// Import a CSV file.
pub fn import(path: &Path) -> Result<(Table, ImportReport), Error> {
    let bytes = std::fs::read(path)
        .map_err(|e| Error::Parse(format!("{}: {}", path.display(), e)))?;
    import_bytes(&bytes)
}

/// Decode to UTF-8, falling back to Windows-1252 (common for
/// Excel-exported CSVs).
fn decode_utf8(bytes: &[u8]) -> String {
    match String::from_utf8(bytes.to_vec()) {
        Ok(s) => s,
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            decoded.into_owned()
        }
    }
}

/// Detect the most likely field delimiter by checking consistency across
/// the first few lines.
///
/// For each candidate (tab, semicolon, comma, pipe), count fields per
/// line. The delimiter that produces the most consistent field count
/// (>1 field) wins.
fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b'\t', b';', b',', b'|'];
    let sample_lines: Vec<&str> = content.lines().take(10).collect();

    if sample_lines.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        // Must produce >1 field on the first line to be viable
        if counts.first().copied().unwrap_or(0) <= 1 {
            continue;
        }

        // Score: (number of lines with same field count as line 1) * field_count
        // Higher field count breaks ties — more columns = more likely real delimiter
        let target = counts[0];
        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

fn import_from_string(content: &str, delimiter: u8) -> Result<(Table, ImportReport), Error> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut grid: Vec<Vec<Scalar>> = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| Error::Parse(e.to_string()))?;
        grid.push(record.iter().map(Scalar::from_input).collect());
    }

    let table = Table::from_grid(grid)?;
    let report = ImportReport::for_table(&table);
    Ok((table, report))
}
