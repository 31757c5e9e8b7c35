//! Error types for the point table.

use thiserror::Error;

/// Errors raised while loading, building or querying the point table.
#[derive(Error, Debug)]
pub enum TableError {
    /// CSV parsing or I/O error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header
    #[error("Missing required column: {column}")]
    MissingColumn {
        /// Name of the missing column
        column: String,
    },

    /// No row survived validation, so there is nothing to plot
    #[error("No valid rows to plot ({dropped} dropped)")]
    Empty {
        /// Number of rows rejected during build
        dropped: usize,
    },

    /// Lookup of an id outside `[0, size)`
    #[error("Point id {id} out of range (table has {size} points)")]
    OutOfRange {
        /// Requested id
        id: usize,
        /// Number of points in the table
        size: usize,
    },

    /// Display fraction outside `(0, 1]`
    #[error("Display fraction must be in (0, 1], got {0}")]
    InvalidFraction(f64),
}
