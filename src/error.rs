//! Error types for input acquisition.

use thiserror::Error;

/// Errors found while reading or validating a cutting demand.
///
/// The packer itself never fails; everything here is caught before it runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// The input contained no demand rows at all.
    #[error("no data found in the input sheet")]
    NoData,

    /// The stock length is missing, non-numeric or not a positive integer.
    #[error("invalid stock length: {0}")]
    InvalidStockLength(String),

    /// Pieces and quantities are not parallel sequences.
    #[error("mismatched sizes of pieces ({pieces}) and quantities ({quantities})")]
    MismatchedLengths { pieces: usize, quantities: usize },

    /// A piece or quantity is not a non-negative whole number.
    #[error("invalid numerical format in {field} at row {row}: {value}")]
    InvalidNumber {
        field: &'static str,
        row: usize,
        value: String,
    },

    /// A piece has zero length.
    #[error("piece length must be non-zero at row {row}")]
    ZeroLength { row: usize },

    /// A piece can never fit into one stock unit.
    #[error("piece length {piece} exceeds the stock length {stock}")]
    PieceExceedsStock { piece: u32, stock: u32 },

    /// The expanded cut list is larger than the caller allows.
    #[error("demand expands to {count} cuts, more than the limit of {max}")]
    TooManyCuts { count: u64, max: u64 },
}
