//! Computational core of a Hashlife engine: a bit-parallel 8x8 cell
//! kernel, a hash-consed quadtree of macrocells with memoized futures,
//! and the tiered node tables tying them together.

pub mod config;
pub mod domain;
pub mod error;

pub use config::Config;
pub use domain::cell_block::CellBlock;
pub use domain::universe::Universe;
pub use error::HashlifeError;
