use crate::types::{Bin, PackingResult};

/// Counters describing how much scanning a packing run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PackStats {
    /// Bin-filling passes, equal to the number of bins opened.
    pub passes: usize,
    /// Candidates compared against a bin's remaining capacity.
    pub candidates_examined: usize,
    /// Passes cut short because the smallest cut no longer fit.
    pub early_exits: usize,
}

/// Packs `cuts` into bins of `stock_length` with best-fit-decreasing.
///
/// Every cut must be non-zero and no longer than `stock_length`.
pub fn pack(cuts: Vec<u32>, stock_length: u32) -> PackingResult {
    pack_with_stats(cuts, stock_length).0
}

pub fn pack_with_stats(mut cuts: Vec<u32>, stock_length: u32) -> (PackingResult, PackStats) {
    let mut stats = PackStats::default();
    let mut bins = Vec::new();

    cuts.sort_unstable_by(|a, b| b.cmp(a));

    while !cuts.is_empty() {
        let mut remaining = stock_length;
        let mut bin = Bin::new();
        let mut i = 0;

        while i < cuts.len() {
            // The list stays sorted descending, so the tail is the smallest cut.
            if cuts[cuts.len() - 1] > remaining {
                stats.early_exits += 1;
                break;
            }

            stats.candidates_examined += 1;
            if cuts[i] <= remaining {
                // Order-preserving removal; `i` now points at the next candidate.
                let cut = cuts.remove(i);
                remaining -= cut;
                bin.push(cut);
            } else {
                i += 1;
            }
        }

        assert!(
            !bin.is_empty(),
            "cut of length {} does not fit stock length {stock_length}",
            cuts[0]
        );

        tracing::trace!(
            bin = bins.len() + 1,
            cuts = bin.len(),
            offcut = remaining,
            "closed bin"
        );
        stats.passes += 1;
        bins.push(bin);
    }

    (PackingResult { stock_length, bins }, stats)
}
