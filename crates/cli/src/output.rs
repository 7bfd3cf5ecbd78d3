//! Rendering of suggestion lists for the terminal and machine formats.

use unicode_width::UnicodeWidthStr;

use restock_engine::suggest::{SuggestionEntry, ENTRY_COLUMNS};
use restock_engine::summary::Summary;

/// Terminal table column labels, priority first as in the original
/// suggestion view.
const TABLE_COLUMNS: [&str; 9] = [
    "priority",
    "product",
    "stock",
    "sold",
    "demand",
    "purchase",
    "unit cost",
    "total",
    "status",
];

/// Render an aligned text table plus the summary block.
pub fn render_table(entries: &[SuggestionEntry], summary: &Summary) -> String {
    let rows: Vec<[String; 9]> = entries
        .iter()
        .map(|e| {
            [
                e.priority.to_string(),
                e.product.clone(),
                format_quantity(e.current_stock),
                format_quantity(e.units_sold),
                e.estimated_demand.to_string(),
                e.suggested_purchase.to_string(),
                format!("{:.2}", e.unit_cost),
                format!("{:.2}", e.total_value),
                e.status.to_string(),
            ]
        })
        .collect();

    let mut widths: [usize; 9] = [0; 9];
    for (idx, label) in TABLE_COLUMNS.iter().enumerate() {
        widths[idx] = UnicodeWidthStr::width(*label);
    }
    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(cell.as_str()));
        }
    }

    let mut lines = Vec::new();
    lines.push(render_row(&TABLE_COLUMNS.map(String::from), &widths));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in &rows {
        lines.push(render_row(row, &widths));
    }

    lines.push(String::new());
    lines.push(format!(
        "{} product{} to purchase · {} high priority",
        summary.products,
        if summary.products == 1 { "" } else { "s" },
        summary.high_priority
    ));
    lines.push(format!("total investment: {:.2}", summary.total_investment));
    lines.push(format!(
        "  high {:.2} · medium {:.2} · low {:.2}",
        summary.high_investment, summary.medium_investment, summary.low_investment
    ));

    lines.join("\n")
}

fn render_row(cells: &[String; 9], widths: &[usize; 9]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| pad_right(cell, *width))
        .collect();
    padded.join("  ").trim_end().to_string()
}

/// Pad a string to `width` display columns (Unicode-aware).
fn pad_right(s: &str, width: usize) -> String {
    let sw = UnicodeWidthStr::width(s);
    if sw >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - sw))
    }
}

/// Stock/sold quantities: integers without a trailing fraction.
fn format_quantity(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Render the entry list + summary as a JSON document.
pub fn render_json(entries: &[SuggestionEntry], summary: &Summary) -> Result<String, String> {
    let doc = serde_json::json!({
        "suggestions": entries,
        "summary": summary,
    });
    serde_json::to_string_pretty(&doc).map_err(|e| e.to_string())
}

/// Render the entry list as CSV, columns in entry field order.
pub fn render_csv(entries: &[SuggestionEntry]) -> Result<String, String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(ENTRY_COLUMNS)
        .map_err(|e| e.to_string())?;

    for e in entries {
        writer
            .write_record(&[
                e.product.clone(),
                format_quantity(e.current_stock),
                format_quantity(e.units_sold),
                e.estimated_demand.to_string(),
                e.suggested_purchase.to_string(),
                format!("{:.2}", e.unit_cost),
                format!("{:.2}", e.total_value),
                e.status.to_string(),
                e.priority.to_string(),
            ])
            .map_err(|e| e.to_string())?;
    }

    let bytes = writer.into_inner().map_err(|e| e.to_string())?;
    String::from_utf8(bytes).map_err(|e| e.to_string())
}
