use serde::{Deserialize, Serialize};

use crate::suggest::{Priority, SuggestionEntry};

/// Aggregate totals over a suggestion list. Carries no state of its
/// own — always recomputed from the current list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub products: usize,
    pub high_priority: usize,
    pub medium_priority: usize,
    pub low_priority: usize,
    pub total_investment: f64,
    pub high_investment: f64,
    pub medium_investment: f64,
    pub low_investment: f64,
}

impl Summary {
    pub fn from_entries(entries: &[SuggestionEntry]) -> Summary {
        let mut summary = Summary {
            products: entries.len(),
            ..Summary::default()
        };

        for entry in entries {
            summary.total_investment += entry.total_value;
            match entry.priority {
                Priority::High => {
                    summary.high_priority += 1;
                    summary.high_investment += entry.total_value;
                }
                Priority::Medium => {
                    summary.medium_priority += 1;
                    summary.medium_investment += entry.total_value;
                }
                Priority::Low => {
                    summary.low_priority += 1;
                    summary.low_investment += entry.total_value;
                }
            }
        }

        summary
    }

    /// Investment subtotal for one priority band.
    pub fn investment_for(&self, priority: Priority) -> f64 {
        match priority {
            Priority::High => self.high_investment,
            Priority::Medium => self.medium_investment,
            Priority::Low => self.low_investment,
        }
    }
}
