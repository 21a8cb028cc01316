use crate::error::InputError;
use crate::expand::{expand, expand_requests};
use crate::input::{self, Limits, RawDemand};
use crate::packer::{self, PackStats};
use crate::types::{PackingResult, PieceRequest};

pub struct Solver {
    stock_length: u32,
    requests: Vec<PieceRequest>,
}

impl Solver {
    pub fn new(stock_length: u32, requests: Vec<PieceRequest>) -> Self {
        Self {
            stock_length,
            requests,
        }
    }

    pub fn solve(&self) -> PackingResult {
        self.solve_with_stats().0
    }

    pub fn solve_with_stats(&self) -> (PackingResult, PackStats) {
        let cuts = expand_requests(&self.requests);
        if cuts.is_empty() {
            return (PackingResult::empty(self.stock_length), PackStats::default());
        }

        let (result, stats) = packer::pack_with_stats(cuts, self.stock_length);
        tracing::debug!(
            bins = result.bin_count(),
            cuts = result.cut_count(),
            candidates = stats.candidates_examined,
            early_exits = stats.early_exits,
            "packed demand"
        );
        (result, stats)
    }
}

/// Expands `pieces` by `quantities` and packs them into `stock_length` units.
///
/// Inputs must already be validated; see [`plan`] for the checked path.
pub fn process_cuts(pieces: &[u32], quantities: &[u32], stock_length: u32) -> PackingResult {
    packer::pack(expand(pieces, quantities), stock_length)
}

/// Validates raw demand and packs it.
pub fn plan(raw: &RawDemand, limits: &Limits) -> Result<PackingResult, InputError> {
    let job = input::validate(raw, limits)?;
    Ok(Solver::new(job.stock_length, job.requests).solve())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_solution_valid(result: &PackingResult, expected_cuts: usize) {
        assert_eq!(result.bin_count(), result.bins.len());
        assert_eq!(
            result.cut_count(),
            expected_cuts,
            "expected {} cuts placed, got {}",
            expected_cuts,
            result.cut_count()
        );
        for (i, bin) in result.bins.iter().enumerate() {
            assert!(
                bin.used() <= result.stock_length as u64,
                "bin {i} ({:?}) exceeds stock length {}",
                bin.cuts,
                result.stock_length
            );
        }
    }

    #[test]
    fn test_single_piece() {
        let result = process_cuts(&[5], &[1], 10);
        assert_eq!(result.bin_count(), 1);
        assert_eq!(result.patterns(), vec![vec![5]]);
    }

    #[test]
    fn test_two_pieces_fit_one_unit() {
        let result = process_cuts(&[6, 4], &[1, 1], 10);
        assert_eq!(result.bin_count(), 1);
        assert_eq!(result.patterns(), vec![vec![6, 4]]);
    }

    #[test]
    fn test_two_pieces_need_two_units() {
        let result = process_cuts(&[7, 7], &[1, 1], 10);
        assert_eq!(result.bin_count(), 2);
        assert_eq!(result.patterns(), vec![vec![7], vec![7]]);
    }

    #[test]
    fn test_four_threes() {
        let result = process_cuts(&[3, 3, 3, 3], &[1, 1, 1, 1], 10);
        assert_eq!(result.bin_count(), 2);
        assert_eq!(result.patterns(), vec![vec![3, 3, 3], vec![3]]);
    }

    #[test]
    fn test_no_demands() {
        let result = process_cuts(&[], &[], 10);
        assert_eq!(result.bin_count(), 0);
        assert!(result.bins.is_empty());
    }

    #[test]
    fn test_zero_quantity() {
        let result = process_cuts(&[10], &[0], 10);
        assert_eq!(result.bin_count(), 0);
        assert!(result.bins.is_empty());
    }

    #[test]
    fn test_solver_matches_process_cuts() {
        let requests = vec![
            PieceRequest::new(2400, 1),
            PieceRequest::new(900, 7),
            PieceRequest::new(650, 4),
            PieceRequest::new(300, 9),
        ];
        let solver = Solver::new(6000, requests.clone());
        let result = solver.solve();
        let pieces: Vec<u32> = requests.iter().map(|r| r.length).collect();
        let quantities: Vec<u32> = requests.iter().map(|r| r.quantity).collect();

        assert_solution_valid(&result, 21);
        assert_eq!(result, process_cuts(&pieces, &quantities, 6000));
    }

    /// Typical joinery list cut from 6 m lengths.
    #[test]
    fn test_mixed_lengths() {
        let pieces = [2200, 1800, 1450, 1200, 760, 540, 330];
        let quantities = [3, 4, 6, 5, 8, 10, 12];
        let result = process_cuts(&pieces, &quantities, 6000);
        assert_solution_valid(&result, 48);

        let total: u64 = pieces
            .iter()
            .zip(&quantities)
            .map(|(&p, &q)| p as u64 * q as u64)
            .sum();
        assert!(result.bin_count() as u64 >= total.div_ceil(6000));
        assert!(result.total_waste_percent() < 100.0);
    }

    #[test]
    fn test_plan_validates_first() {
        let raw = RawDemand {
            pieces: vec![12.0],
            quantities: vec![1.0],
            stock_length: 10.0,
        };
        assert_eq!(
            plan(&raw, &Limits::default()),
            Err(InputError::PieceExceedsStock {
                piece: 12,
                stock: 10
            })
        );
    }

    #[test]
    fn test_plan_ok() {
        let raw = RawDemand {
            pieces: vec![6.0, 4.0],
            quantities: vec![2.0, 2.0],
            stock_length: 10.0,
        };
        let result = plan(&raw, &Limits::default()).unwrap();
        assert_eq!(result.patterns(), vec![vec![6, 4], vec![6, 4]]);
    }
}
