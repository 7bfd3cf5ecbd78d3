use crate::mapping::Field;

/// Errors surfaced to the caller. All are recoverable at the boundary:
/// the operation aborts cleanly and prior state stays untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The sheet has a header row but no data rows (or nothing at all).
    EmptySheet,
    /// A required column mapping was not set before compute.
    MissingMapping(Field),
    /// A mapping names a header the sheet does not contain.
    UnknownColumn { field: Field, column: String },
    /// The workbook bytes could not be read.
    Parse(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::EmptySheet => {
                write!(f, "sheet must have a header row and at least one data row")
            }
            Error::MissingMapping(field) => {
                write!(f, "no column mapped for {}", field.as_str())
            }
            Error::UnknownColumn { field, column } => {
                write!(
                    f,
                    "column '{}' mapped for {} not found in sheet headers",
                    column,
                    field.as_str()
                )
            }
            Error::Parse(msg) => write!(f, "failed to read workbook: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
