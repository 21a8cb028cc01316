use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// A required piece length and how many units of it to cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceRequest {
    pub length: u32,
    pub quantity: u32,
}

impl PieceRequest {
    pub fn new(length: u32, quantity: u32) -> Self {
        Self { length, quantity }
    }
}

impl std::fmt::Display for PieceRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.length, self.quantity)
    }
}

/// The cutting pattern of one stock unit, in assignment order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bin {
    pub cuts: Vec<u32>,
}

impl Bin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cut: u32) {
        self.cuts.push(cut);
    }

    pub fn is_empty(&self) -> bool {
        self.cuts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cuts.len()
    }

    pub fn used(&self) -> u64 {
        self.cuts.iter().map(|&c| c as u64).sum()
    }

    /// Offcut left over when this pattern is cut from `stock_length`.
    pub fn waste(&self, stock_length: u32) -> u64 {
        (stock_length as u64).saturating_sub(self.used())
    }
}

impl From<Vec<u32>> for Bin {
    fn from(cuts: Vec<u32>) -> Self {
        Self { cuts }
    }
}

/// Output of one packing run: every bin shares `stock_length`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackingResult {
    pub stock_length: u32,
    pub bins: Vec<Bin>,
}

impl PackingResult {
    pub fn empty(stock_length: u32) -> Self {
        Self {
            stock_length,
            bins: vec![],
        }
    }

    /// Number of stock units needed.
    pub fn bin_count(&self) -> usize {
        self.bins.len()
    }

    pub fn cut_count(&self) -> usize {
        self.bins.iter().map(Bin::len).sum()
    }

    pub fn total_used(&self) -> u64 {
        self.bins.iter().map(Bin::used).sum()
    }

    pub fn total_waste_percent(&self) -> f64 {
        let total_stock = self.stock_length as u64 * self.bins.len() as u64;
        if total_stock == 0 {
            return 0.0;
        }
        (total_stock - self.total_used()) as f64 / total_stock as f64 * 100.0
    }

    /// Bins as plain length sequences.
    pub fn patterns(&self) -> Vec<Vec<u32>> {
        self.bins.iter().map(|b| b.cuts.clone()).collect()
    }
}

impl Serialize for PackingResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("PackingResult", 4)?;
        s.serialize_field("bin_count", &self.bin_count())?;
        s.serialize_field("stock_length", &self.stock_length)?;
        s.serialize_field("waste_percent", &self.total_waste_percent())?;
        s.serialize_field("bins", &self.bins)?;
        s.end()
    }
}
