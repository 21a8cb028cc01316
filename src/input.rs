//! Reading and validating cutting demands before they reach the packer.

use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::types::PieceRequest;

const DEFAULT_MAX_CUTS: u64 = 100_000;

/// Demand as it arrives from a caller, before any checks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDemand {
    pub pieces: Vec<f64>,
    pub quantities: Vec<f64>,
    pub stock_length: f64,
}

/// Validated demand, safe to pack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub stock_length: u32,
    pub requests: Vec<PieceRequest>,
}

impl Job {
    pub fn pieces(&self) -> Vec<u32> {
        self.requests.iter().map(|r| r.length).collect()
    }

    pub fn quantities(&self) -> Vec<u32> {
        self.requests.iter().map(|r| r.quantity).collect()
    }

    pub fn cut_count(&self) -> u64 {
        self.requests.iter().map(|r| r.quantity as u64).sum()
    }
}

/// Bounds the work a single request may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_cuts: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_cuts: DEFAULT_MAX_CUTS,
        }
    }
}

fn whole_number(value: f64) -> Option<u32> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64 {
        Some(value as u32)
    } else {
        None
    }
}

pub fn validate(raw: &RawDemand, limits: &Limits) -> Result<Job, InputError> {
    let stock_length = match whole_number(raw.stock_length) {
        Some(n) if n > 0 => n,
        _ => {
            return Err(InputError::InvalidStockLength(
                raw.stock_length.to_string(),
            ));
        }
    };

    if raw.pieces.len() != raw.quantities.len() {
        return Err(InputError::MismatchedLengths {
            pieces: raw.pieces.len(),
            quantities: raw.quantities.len(),
        });
    }

    let mut requests = Vec::with_capacity(raw.pieces.len());
    let mut count: u64 = 0;
    for (i, (&piece, &qty)) in raw.pieces.iter().zip(&raw.quantities).enumerate() {
        let row = i + 1;
        let length = whole_number(piece).ok_or_else(|| InputError::InvalidNumber {
            field: "pieces",
            row,
            value: piece.to_string(),
        })?;
        let quantity = whole_number(qty).ok_or_else(|| InputError::InvalidNumber {
            field: "quantities",
            row,
            value: qty.to_string(),
        })?;

        if length == 0 {
            return Err(InputError::ZeroLength { row });
        }
        if length > stock_length {
            return Err(InputError::PieceExceedsStock {
                piece: length,
                stock: stock_length,
            });
        }

        count += quantity as u64;
        requests.push(PieceRequest { length, quantity });
    }

    if count > limits.max_cuts {
        return Err(InputError::TooManyCuts {
            count,
            max: limits.max_cuts,
        });
    }

    tracing::debug!(
        stock_length,
        rows = requests.len(),
        cuts = count,
        "validated demand"
    );

    Ok(Job {
        stock_length,
        requests,
    })
}

fn split_row(line: &str) -> Vec<&str> {
    let delim = if line.contains('\t') {
        '\t'
    } else if line.contains(';') {
        ';'
    } else {
        ','
    };
    line.split(delim).map(str::trim).collect()
}

fn parse_cell(cell: &str, field: &'static str, row: usize) -> Result<f64, InputError> {
    cell.parse::<f64>()
        .ok()
        .filter(|v| !v.is_nan())
        .ok_or_else(|| InputError::InvalidNumber {
            field,
            row,
            value: cell.to_string(),
        })
}

/// Parses an input sheet laid out as `piece, quantity, stock` columns.
///
/// The first line is a header. The stock length is read from the third column
/// of the first data row; later rows may leave it empty. Blank rows are skipped
/// and rows are numbered from 1 at the first data row.
pub fn parse_sheet(text: &str) -> Result<RawDemand, InputError> {
    let mut raw = RawDemand::default();
    let mut stock: Option<f64> = None;
    let mut seen_rows = false;

    for (i, line) in text.lines().skip(1).enumerate() {
        let row = i + 1;
        let cells = split_row(line);
        if cells.iter().all(|c| c.is_empty()) {
            continue;
        }
        seen_rows = true;

        if stock.is_none() {
            let cell = cells.get(2).copied().unwrap_or("");
            if cell.is_empty() {
                return Err(InputError::InvalidStockLength("missing".to_string()));
            }
            stock = Some(
                cell.parse::<f64>()
                    .map_err(|_| InputError::InvalidStockLength(cell.to_string()))?,
            );
        }

        let piece = cells.first().copied().unwrap_or("");
        let qty = cells.get(1).copied().unwrap_or("");
        // A row carrying only the stock length is not a demand row.
        if piece.is_empty() && qty.is_empty() {
            continue;
        }
        raw.pieces.push(parse_cell(piece, "pieces", row)?);
        raw.quantities.push(parse_cell(qty, "quantities", row)?);
    }

    if !seen_rows {
        return Err(InputError::NoData);
    }
    raw.stock_length = stock.unwrap_or(f64::NAN);
    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pieces: &[f64], quantities: &[f64], stock_length: f64) -> RawDemand {
        RawDemand {
            pieces: pieces.to_vec(),
            quantities: quantities.to_vec(),
            stock_length,
        }
    }

    #[test]
    fn test_validate_ok() {
        let job = validate(&raw(&[6.0, 4.0], &[1.0, 2.0], 10.0), &Limits::default()).unwrap();
        assert_eq!(job.stock_length, 10);
        assert_eq!(job.pieces(), vec![6, 4]);
        assert_eq!(job.quantities(), vec![1, 2]);
        assert_eq!(job.cut_count(), 3);
    }

    #[test]
    fn test_validate_empty_demand_is_ok() {
        let job = validate(&raw(&[], &[], 10.0), &Limits::default()).unwrap();
        assert!(job.requests.is_empty());
    }

    #[test]
    fn test_validate_zero_quantity_is_ok() {
        let job = validate(&raw(&[10.0], &[0.0], 10.0), &Limits::default()).unwrap();
        assert_eq!(job.cut_count(), 0);
    }

    #[test]
    fn test_validate_bad_stock() {
        for stock in [0.0, -5.0, f64::NAN, 2.5, f64::INFINITY] {
            assert!(matches!(
                validate(&raw(&[], &[], stock), &Limits::default()),
                Err(InputError::InvalidStockLength(_))
            ));
        }
    }

    #[test]
    fn test_validate_mismatched() {
        assert_eq!(
            validate(&raw(&[1.0, 2.0], &[1.0], 10.0), &Limits::default()),
            Err(InputError::MismatchedLengths {
                pieces: 2,
                quantities: 1
            })
        );
    }

    #[test]
    fn test_validate_invalid_numbers() {
        let err = validate(&raw(&[1.0, f64::NAN], &[1.0, 1.0], 10.0), &Limits::default());
        assert!(matches!(
            err,
            Err(InputError::InvalidNumber {
                field: "pieces",
                row: 2,
                ..
            })
        ));

        let err = validate(&raw(&[1.0], &[-1.0], 10.0), &Limits::default());
        assert!(matches!(
            err,
            Err(InputError::InvalidNumber {
                field: "quantities",
                row: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_validate_zero_length_piece() {
        assert_eq!(
            validate(&raw(&[0.0], &[1.0], 10.0), &Limits::default()),
            Err(InputError::ZeroLength { row: 1 })
        );
    }

    #[test]
    fn test_validate_piece_exceeds_stock() {
        assert_eq!(
            validate(&raw(&[11.0], &[1.0], 10.0), &Limits::default()),
            Err(InputError::PieceExceedsStock {
                piece: 11,
                stock: 10
            })
        );
    }

    #[test]
    fn test_validate_limit() {
        let limits = Limits { max_cuts: 5 };
        assert!(validate(&raw(&[1.0], &[5.0], 10.0), &limits).is_ok());
        assert_eq!(
            validate(&raw(&[1.0, 2.0], &[5.0, 1.0], 10.0), &limits),
            Err(InputError::TooManyCuts { count: 6, max: 5 })
        );
    }

    #[test]
    fn test_parse_sheet_comma() {
        let text = "piece,qty,stock\n600,2,2400\n450,3,\n\n300,1\n";
        let raw = parse_sheet(text).unwrap();
        assert_eq!(raw.pieces, vec![600.0, 450.0, 300.0]);
        assert_eq!(raw.quantities, vec![2.0, 3.0, 1.0]);
        assert_eq!(raw.stock_length, 2400.0);
    }

    #[test]
    fn test_parse_sheet_tab_and_semicolon() {
        let tab = parse_sheet("a\tb\tc\n5\t1\t10\n").unwrap();
        assert_eq!(tab, raw(&[5.0], &[1.0], 10.0));
        let semi = parse_sheet("a;b;c\n5;1;10\n").unwrap();
        assert_eq!(semi, tab);
    }

    #[test]
    fn test_parse_sheet_stock_only_row() {
        let raw = parse_sheet("piece,qty,stock\n,,10\n").unwrap();
        assert!(raw.pieces.is_empty());
        assert_eq!(raw.stock_length, 10.0);
    }

    #[test]
    fn test_parse_sheet_no_data() {
        assert_eq!(parse_sheet("piece,qty,stock\n\n"), Err(InputError::NoData));
        assert_eq!(parse_sheet(""), Err(InputError::NoData));
    }

    #[test]
    fn test_parse_sheet_bad_cells() {
        assert!(matches!(
            parse_sheet("piece,qty,stock\n5,1,10\nabc,1\n"),
            Err(InputError::InvalidNumber {
                field: "pieces",
                row: 2,
                ..
            })
        ));
        assert!(matches!(
            parse_sheet("piece,qty,stock\n5,,10\n"),
            Err(InputError::InvalidNumber {
                field: "quantities",
                row: 1,
                ..
            })
        ));
        assert!(matches!(
            parse_sheet("piece,qty,stock\n5,1\n"),
            Err(InputError::InvalidStockLength(_))
        ));
    }
}
