use thiserror::Error;

// Precondition failures surfaced by generators. Degenerate numeric input
// (zero-range intervals, a perlin scale larger than the grid) is handled
// locally with documented fallbacks and never reaches this enum.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NoiseError {
    #[error("generator cannot produce {0}-dimensional output")]
    UnsupportedDimensions(u8),

    #[error("diamond-square needs a square grid, got {width}x{height}")]
    NotSquare { width: usize, height: usize },

    #[error("diamond-square needs a side length of 2^n+1, got {side}")]
    BadSideLength { side: usize },

    #[error("combine inputs must match the output grid's dimensions")]
    DimensionMismatch,
}

// Gradient invariants are checked at query time; one variant per invariant
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GradientError {
    #[error("gradient has no nodes")]
    Empty,

    #[error("first gradient node must sit at position 0.0")]
    FirstNodeNotZero,

    #[error("last gradient node must sit at position 1.0")]
    LastNodeNotOne,

    #[error("gradient node {0} is not strictly after its predecessor")]
    UnorderedNodes(usize),
}
