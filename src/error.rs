//! Error types surfaced at the universe-wiring layer. The hot-path
//! primitives (bit kernel, arena, hash-consing set) report failure through
//! plain `Option`/bounded return values; this type wraps those outcomes
//! only where a caller needs a single propagatable error.

use thiserror::Error;

/// Failure modes a [`crate::domain::universe::Universe`] can report.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum HashlifeError {
    /// A bump-allocated arena had no room left for the requested slots.
    #[error("arena exhausted")]
    ArenaExhausted,

    /// A hash-consing table's bounded probe window saturated before
    /// finding an empty or matching slot.
    #[error("hash-consing table at tier {tier} saturated")]
    TableSaturated { tier: usize },

    /// A [`crate::config::Config`] requested a zero-sized table.
    #[error("invalid capacity requested: {requested}")]
    InvalidCapacity { requested: usize },
}
