//! Named cell-block factories for the canonical still-lifes, oscillators
//! and spaceships used throughout the test suite and available to hosts
//! that want canned starting patterns.

use super::cell_block::CellBlock;

/// The empty 8x8 block.
pub fn empty_square() -> CellBlock {
    CellBlock::parse("")
}

/// A fully alive 8x8 block; used to exercise the stitching identities.
pub fn filled() -> CellBlock {
    CellBlock::from_bits(u64::MAX)
}

/// The 2x2 still life.
pub fn block() -> CellBlock {
    CellBlock::parse("........$........$..**....$..**....$........$........$........$........")
}

/// The six-cell still life.
pub fn beehive() -> CellBlock {
    CellBlock::parse(
        "........$........$...**...$..*..*..$...**...$........$........$........",
    )
}

/// The seven-cell still life.
pub fn loaf() -> CellBlock {
    CellBlock::parse(
        "........$........$...**...$..*..*..$...*.*..$....*...$........$........",
    )
}

/// The six-cell still life shaped like a boat.
pub fn boat() -> CellBlock {
    CellBlock::parse(
        "........$........$..**....$..*.*...$...*....$........$........$........",
    )
}

/// The four-cell still life shaped like a tub.
pub fn tub() -> CellBlock {
    CellBlock::parse(
        "........$........$...*....$..*.*...$...*....$........$........$........",
    )
}

/// The three-cell, period-2 oscillator.
pub fn blinker() -> CellBlock {
    CellBlock::parse("........$........$..***...$........$........$........$........$........")
}

/// The six-cell, period-2 oscillator.
pub fn toad() -> CellBlock {
    CellBlock::parse(
        "........$........$...***..$..***...$........$........$........$........",
    )
}

/// The six-cell, period-2 oscillator.
pub fn beacon() -> CellBlock {
    CellBlock::parse(
        "........$..**....$..**....$....**..$....**..$........$........$........",
    )
}

/// The canonical five-cell glider, placed with a one-cell margin so that
/// four generations of travel stay inside the block.
pub fn glider() -> CellBlock {
    CellBlock::parse("........$..*.....$...*....$.***....$........$........$........$........")
}
