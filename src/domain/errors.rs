//! Domain errors

/// Errors raised by the chart engines and catalog lookups
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BaziError {
    /// A birth-moment field is out of range
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A guide id is not present in the catalog
    #[error("Unknown catalog entry: {0}")]
    UnknownCatalogEntry(String),
}
