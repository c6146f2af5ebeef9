//! World error types.

/// Errors raised when building or addressing a tile grid.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorldError {
    /// Grid dimensions were zero or too large to address.
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Tile edge length was not a positive finite number.
    #[error("invalid tile size {0}")]
    InvalidTileSize(f32),

    /// A cell coordinate fell outside the grid extent.
    #[error("tile ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },
}
