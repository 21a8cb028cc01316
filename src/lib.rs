//! One-dimensional cutting-stock planning.
//!
//! Demands are expanded into unit cuts and packed into stock units of a single
//! length with a best-fit-decreasing heuristic.

pub mod error;
pub mod expand;
pub mod input;
pub mod packer;
pub mod render;
pub mod solver;
pub mod types;

pub use error::InputError;
pub use input::{Job, Limits, RawDemand};
pub use solver::{plan, process_cuts};
pub use types::{Bin, PackingResult, PieceRequest};
