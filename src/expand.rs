use std::collections::BTreeMap;

use crate::types::PieceRequest;

/// Repeats each piece length by its quantity.
///
/// `pieces` and `quantities` are parallel; callers validate that their lengths
/// match. Zero quantities contribute nothing.
pub fn expand(pieces: &[u32], quantities: &[u32]) -> Vec<u32> {
    let mut cuts = Vec::with_capacity(quantities.iter().map(|&q| q as usize).sum());
    for (&length, &qty) in pieces.iter().zip(quantities) {
        for _ in 0..qty {
            cuts.push(length);
        }
    }
    cuts
}

pub fn expand_requests(requests: &[PieceRequest]) -> Vec<u32> {
    let mut cuts = Vec::new();
    for r in requests {
        cuts.extend(std::iter::repeat_n(r.length, r.quantity as usize));
    }
    cuts
}

/// Groups unit cuts back into one request per distinct length, longest first.
pub fn aggregate(cuts: &[u32]) -> Vec<PieceRequest> {
    let mut counts: BTreeMap<u32, u32> = BTreeMap::new();
    for &c in cuts {
        *counts.entry(c).or_default() += 1;
    }
    counts
        .into_iter()
        .rev()
        .map(|(length, quantity)| PieceRequest { length, quantity })
        .collect()
}
