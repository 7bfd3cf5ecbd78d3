use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::table::Table;

/// The semantic fields a sheet column can be mapped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Product,
    Stock,
    Sold,
    Cost,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Product => "product",
            Field::Stock => "stock",
            Field::Sold => "sold",
            Field::Cost => "cost",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-chosen correspondence between semantic fields and sheet headers,
/// plus the two tuning knobs for the demand computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub product_column: String,
    pub stock_column: String,
    pub sold_column: String,
    /// Optional; entries get a unit cost of 0 when unset.
    pub cost_column: Option<String>,
    pub min_stock: f64,
    pub safety_multiplier: f64,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            product_column: String::new(),
            stock_column: String::new(),
            sold_column: String::new(),
            cost_column: None,
            min_stock: 5.0,
            safety_multiplier: 1.2,
        }
    }
}

/// Column indices resolved against a concrete table. Resolution happens
/// once, before any row is processed; the per-row path never looks up
/// headers by name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedColumns {
    pub product: usize,
    pub stock: usize,
    pub sold: usize,
    pub cost: Option<usize>,
}

impl ColumnMapping {
    /// Resolve the mapping against a table's headers.
    ///
    /// The three required columns must be set and present; the cost
    /// column is optional but must be present when set.
    pub fn resolve(&self, table: &Table) -> Result<ResolvedColumns, Error> {
        let product = resolve_required(table, Field::Product, &self.product_column)?;
        let stock = resolve_required(table, Field::Stock, &self.stock_column)?;
        let sold = resolve_required(table, Field::Sold, &self.sold_column)?;

        let cost = match self.cost_column.as_deref() {
            None | Some("") => None,
            Some(name) => Some(table.column_index(name).ok_or_else(|| {
                Error::UnknownColumn {
                    field: Field::Cost,
                    column: name.to_string(),
                }
            })?),
        };

        Ok(ResolvedColumns {
            product,
            stock,
            sold,
            cost,
        })
    }
}

fn resolve_required(table: &Table, field: Field, column: &str) -> Result<usize, Error> {
    if column.is_empty() {
        return Err(Error::MissingMapping(field));
    }
    table
        .column_index(column)
        .ok_or_else(|| Error::UnknownColumn {
            field,
            column: column.to_string(),
        })
}
