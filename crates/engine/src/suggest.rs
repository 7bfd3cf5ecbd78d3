use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::mapping::{ColumnMapping, ResolvedColumns};
use crate::table::Table;
use crate::value::Scalar;

/// Fallback name for rows whose product cell is empty.
pub const UNNAMED_PRODUCT: &str = "Unnamed product";

/// Stock health classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Critical,
    Restock,
    Adequate,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Critical => "critical",
            Status::Restock => "restock",
            Status::Adequate => "adequate",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Purchase ordering rank. Only used to sort the output list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// high(3) > medium(2) > low(1)
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One computed purchase suggestion. Immutable once produced —
/// recomputation replaces the whole list.
///
/// Field declaration order is the export column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionEntry {
    pub product: String,
    pub current_stock: f64,
    pub units_sold: f64,
    pub estimated_demand: i64,
    pub suggested_purchase: i64,
    pub unit_cost: f64,
    pub total_value: f64,
    pub status: Status,
    pub priority: Priority,
}

/// Column labels for rendered/exported output, in entry field order.
pub const ENTRY_COLUMNS: [&str; 9] = [
    "product",
    "current_stock",
    "units_sold",
    "estimated_demand",
    "suggested_purchase",
    "unit_cost",
    "total_value",
    "status",
    "priority",
];

/// Compute the sorted, filtered suggestion list for a table.
///
/// Pure: same table + mapping always yields the same ordered output.
/// The mapping is resolved before any row is processed, so a bad
/// configuration never produces a partial result.
pub fn compute_suggestions(
    table: &Table,
    mapping: &ColumnMapping,
) -> Result<Vec<SuggestionEntry>, Error> {
    let columns = mapping.resolve(table)?;

    let mut entries: Vec<SuggestionEntry> = table
        .rows()
        .iter()
        .map(|row| compute_entry(row, &columns, mapping))
        .filter(|entry| entry.suggested_purchase > 0 || entry.status == Status::Critical)
        .collect();

    // Stable sort keeps original row order within a priority band
    entries.sort_by_key(|entry| Reverse(entry.priority.rank()));

    Ok(entries)
}

fn compute_entry(
    row: &[Scalar],
    columns: &ResolvedColumns,
    mapping: &ColumnMapping,
) -> SuggestionEntry {
    let current_stock = row[columns.stock].to_number();
    let units_sold = row[columns.sold].to_number();
    let unit_cost = columns.cost.map_or(0.0, |idx| row[idx].to_number());

    let product = {
        let name = row[columns.product].display();
        if name.is_empty() {
            UNNAMED_PRODUCT.to_string()
        } else {
            name
        }
    };

    let estimated_demand = units_sold * mapping.safety_multiplier;
    let suggested_purchase = (estimated_demand - current_stock + mapping.min_stock).max(0.0);

    // Classification uses the raw quantity; the stored field (and the
    // output filter) use the rounded one.
    let status = if current_stock <= mapping.min_stock {
        Status::Critical
    } else if suggested_purchase > 0.0 {
        Status::Restock
    } else {
        Status::Adequate
    };

    let priority = if current_stock <= mapping.min_stock {
        Priority::High
    } else if suggested_purchase > units_sold {
        Priority::Medium
    } else {
        Priority::Low
    };

    let rounded_purchase = suggested_purchase.round() as i64;
    let total_value = round2(rounded_purchase as f64 * unit_cost);

    SuggestionEntry {
        product,
        current_stock,
        units_sold,
        estimated_demand: estimated_demand.round() as i64,
        suggested_purchase: rounded_purchase,
        unit_cost,
        total_value,
        status,
        priority,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(cells: &[&[&str]]) -> Table {
        Table::from_grid(
            cells
                .iter()
                .map(|row| row.iter().map(|c| Scalar::from_input(c)).collect())
                .collect(),
        )
        .unwrap()
    }

    fn mapping() -> ColumnMapping {
        ColumnMapping {
            product_column: "Product".to_string(),
            stock_column: "Stock".to_string(),
            sold_column: "Sold".to_string(),
            cost_column: Some("Cost".to_string()),
            min_stock: 5.0,
            safety_multiplier: 1.2,
        }
    }

    #[test]
    fn test_critical_row_computed() {
        // stock 3, sold 10, cost 2.5 -> demand 12, purchase 14, value 35.00
        let t = table(&[
            &["Product", "Stock", "Sold", "Cost"],
            &["Widget", "3", "10", "2.5"],
        ]);
        let entries = compute_suggestions(&t, &mapping()).unwrap();
        assert_eq!(entries.len(), 1);
        let e = &entries[0];
        assert_eq!(e.product, "Widget");
        assert_eq!(e.estimated_demand, 12);
        assert_eq!(e.suggested_purchase, 14);
        assert_eq!(e.total_value, 35.0);
        assert_eq!(e.status, Status::Critical);
        assert_eq!(e.priority, Priority::High);
    }

    #[test]
    fn test_well_stocked_row_filtered_out() {
        // stock 20, sold 5 -> demand 6, purchase max(0, 6-20+5) = 0
        let t = table(&[
            &["Product", "Stock", "Sold", "Cost"],
            &["Gadget", "20", "5", "1"],
        ]);
        let entries = compute_suggestions(&t, &mapping()).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_restock_row_medium_priority() {
        // stock 10 (> min 5), sold 2 -> demand 2.4, purchase 2.4-10+5 = 0 -> adequate
        // stock 6, sold 10 -> demand 12, purchase 11 > sold -> medium
        let t = table(&[
            &["Product", "Stock", "Sold", "Cost"],
            &["Bolt", "6", "10", "0.1"],
        ]);
        let entries = compute_suggestions(&t, &mapping()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].status, Status::Restock);
        assert_eq!(entries[0].priority, Priority::Medium);
        assert_eq!(entries[0].suggested_purchase, 11);
    }

    #[test]
    fn test_low_priority_when_purchase_below_sold() {
        // stock 7, sold 20 -> demand 24, purchase 24-7+5 = 22, > sold -> medium
        // stock 28, sold 30 -> demand 36, purchase 36-28+5 = 13, <= sold -> low
        let t = table(&[
            &["Product", "Stock", "Sold", "Cost"],
            &["Nut", "28", "30", "0.05"],
        ]);
        let entries = compute_suggestions(&t, &mapping()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].priority, Priority::Low);
        assert_eq!(entries[0].status, Status::Restock);
    }

    #[test]
    fn test_critical_kept_even_with_zero_purchase() {
        // stock 0, sold 0 -> purchase 0-0+5 = 5 > 0. Force a true zero-purchase
        // critical row: negative sold drives demand below stock.
        let t = table(&[
            &["Product", "Stock", "Sold", "Cost"],
            &["Return", "4", "-10", "1"],
        ]);
        let entries = compute_suggestions(&t, &mapping()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].suggested_purchase, 0);
        assert_eq!(entries[0].status, Status::Critical);
    }

    #[test]
    fn test_fractional_purchase_rounds_before_filter() {
        // stock 6, sold 1 -> demand 1.2, purchase 1.2-6+5 = 0.2 -> rounds to 0,
        // status restock (raw > 0) but not critical -> dropped
        let t = table(&[
            &["Product", "Stock", "Sold", "Cost"],
            &["Trickle", "6", "1", "9.99"],
        ]);
        let entries = compute_suggestions(&t, &mapping()).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_unnamed_product_fallback() {
        let t = table(&[
            &["Product", "Stock", "Sold"],
            &["", "1", "10"],
        ]);
        let mut m = mapping();
        m.cost_column = None;
        let entries = compute_suggestions(&t, &m).unwrap();
        assert_eq!(entries[0].product, UNNAMED_PRODUCT);
    }

    #[test]
    fn test_cost_defaults_to_zero_without_mapping() {
        let t = table(&[
            &["Product", "Stock", "Sold", "Cost"],
            &["Widget", "3", "10", "2.5"],
        ]);
        let mut m = mapping();
        m.cost_column = None;
        let entries = compute_suggestions(&t, &m).unwrap();
        assert_eq!(entries[0].unit_cost, 0.0);
        assert_eq!(entries[0].total_value, 0.0);
    }

    #[test]
    fn test_non_numeric_cells_coerce_to_zero() {
        let t = table(&[
            &["Product", "Stock", "Sold", "Cost"],
            &["Widget", "n/a", "10", "oops"],
        ]);
        let entries = compute_suggestions(&t, &mapping()).unwrap();
        // stock 0 <= min 5 -> critical, purchase 12-0+5 = 17
        assert_eq!(entries[0].current_stock, 0.0);
        assert_eq!(entries[0].suggested_purchase, 17);
        assert_eq!(entries[0].status, Status::Critical);
    }

    #[test]
    fn test_sort_descending_with_stable_ties() {
        let t = table(&[
            &["Product", "Stock", "Sold", "Cost"],
            &["LowA", "28", "30", "1"],   // low
            &["HighA", "1", "10", "1"],   // high
            &["MedA", "6", "10", "1"],    // medium
            &["HighB", "2", "10", "1"],   // high
            &["MedB", "7", "12", "1"],    // medium
        ]);
        let entries = compute_suggestions(&t, &mapping()).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.product.as_str()).collect();
        assert_eq!(names, ["HighA", "HighB", "MedA", "MedB", "LowA"]);
    }

    #[test]
    fn test_idempotent() {
        let t = table(&[
            &["Product", "Stock", "Sold", "Cost"],
            &["A", "3", "10", "2.5"],
            &["B", "6", "10", "1"],
        ]);
        let m = mapping();
        let first = compute_suggestions(&t, &m).unwrap();
        let second = compute_suggestions(&t, &m).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_mapping_checked_before_rows() {
        let t = table(&[
            &["Product", "Stock", "Sold"],
            &["Widget", "3", "10"],
        ]);
        let m = ColumnMapping {
            product_column: "Product".to_string(),
            sold_column: "Sold".to_string(),
            ..ColumnMapping::default()
        };
        let err = compute_suggestions(&t, &m).unwrap_err();
        assert_eq!(err, Error::MissingMapping(crate::mapping::Field::Stock));
    }

    #[test]
    fn test_total_value_uses_rounded_quantity() {
        // stock 6, sold 10, multiplier 1.27 -> demand 12.7,
        // purchase 12.7-6+5 = 11.7 -> rounds to 12
        // total = 12 * 3 = 36, not 11.7 * 3 = 35.1
        let t = table(&[
            &["Product", "Stock", "Sold", "Cost"],
            &["Widget", "6", "10", "3"],
        ]);
        let mut m = mapping();
        m.safety_multiplier = 1.27;
        let entries = compute_suggestions(&t, &m).unwrap();
        assert_eq!(entries[0].suggested_purchase, 12);
        assert_eq!(entries[0].total_value, 36.0);
    }

    #[test]
    fn test_entry_serializes_lowercase_classifications() {
        let t = table(&[
            &["Product", "Stock", "Sold", "Cost"],
            &["Widget", "3", "10", "2.5"],
        ]);
        let entries = compute_suggestions(&t, &mapping()).unwrap();
        let json = serde_json::to_value(&entries[0]).unwrap();
        assert_eq!(json["status"], "critical");
        assert_eq!(json["priority"], "high");
    }
}
