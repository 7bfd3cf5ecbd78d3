use crate::error::Error;
use crate::mapping::ColumnMapping;
use crate::suggest::{compute_suggestions, SuggestionEntry};
use crate::summary::Summary;
use crate::table::Table;

/// Ticket identifying one load request. Only the most recently issued
/// ticket may install its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// In-memory session state: the current table, the column mapping, and
/// the last successfully computed suggestion list.
///
/// Every stage consumes an immutable snapshot and produces a new value;
/// a failed compute leaves the previous suggestions untouched. Loads
/// are guarded by a monotone ticket so a parse that finishes late
/// cannot overwrite a newer one.
#[derive(Debug, Default)]
pub struct Session {
    mapping: ColumnMapping,
    table: Option<Table>,
    suggestions: Vec<SuggestionEntry>,
    issued_seq: u64,
    applied_seq: u64,
}

impl Session {
    pub fn new() -> Session {
        Session::default()
    }

    pub fn with_mapping(mapping: ColumnMapping) -> Session {
        Session {
            mapping,
            ..Session::default()
        }
    }

    /// Register a new load request. Issuing a ticket invalidates all
    /// earlier outstanding tickets.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued_seq += 1;
        LoadTicket(self.issued_seq)
    }

    /// Install a parsed table, replacing the previous one wholesale.
    ///
    /// Returns false (and discards the table) when the ticket is stale —
    /// a newer load has been issued or applied since.
    pub fn complete_load(&mut self, ticket: LoadTicket, table: Table) -> bool {
        if ticket.0 != self.issued_seq || ticket.0 <= self.applied_seq {
            return false;
        }
        self.applied_seq = ticket.0;
        self.table = Some(table);
        true
    }

    pub fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    pub fn set_mapping(&mut self, mapping: ColumnMapping) {
        self.mapping = mapping;
    }

    /// Recompute the suggestion list from the current table and mapping.
    ///
    /// On success the list is replaced wholesale; on error the previous
    /// list is left untouched.
    pub fn recompute(&mut self) -> Result<&[SuggestionEntry], Error> {
        let table = self.table.as_ref().ok_or(Error::EmptySheet)?;
        let entries = compute_suggestions(table, &self.mapping)?;
        self.suggestions = entries;
        Ok(&self.suggestions)
    }

    pub fn suggestions(&self) -> &[SuggestionEntry] {
        &self.suggestions
    }

    pub fn summary(&self) -> Summary {
        Summary::from_entries(&self.suggestions)
    }
}
