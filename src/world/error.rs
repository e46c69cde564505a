//! Error types for level data loading.

use thiserror::Error;

use super::data::LayoutLayer;

/// Fatal configuration errors raised while reading or planning a level.
#[derive(Debug, Error)]
pub enum LevelError {
    /// Layout file could not be read.
    #[error("Failed to read layout '{path}': {details}")]
    ReadError { path: String, details: String },

    /// Layer dimensions don't match the boundary layer.
    #[error("Grid mismatch in {layer} layer: expected {expected_width}x{expected_height}, got {actual_width}x{actual_height}")]
    GridMismatch {
        layer: LayoutLayer,
        expected_width: usize,
        expected_height: usize,
        actual_width: usize,
        actual_height: usize,
    },

    /// A row is shorter or longer than the boundary layer is wide.
    #[error("Row {row} of the {layer} layer has {actual} cells, expected {expected}")]
    RaggedRow {
        layer: LayoutLayer,
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Object code is not a valid index into the object graphics.
    #[error("Object code '{code}' at ({col}, {row}) does not index the {count} object graphics")]
    GraphicOutOfRange {
        code: String,
        col: usize,
        row: usize,
        count: usize,
    },

    /// A layer needs graphics but none were configured.
    #[error("No {0} graphics configured")]
    MissingGraphics(&'static str),

    /// The entities layer must contain exactly one player spawn.
    #[error("Expected exactly one player spawn (code 394), found {0}")]
    PlayerSpawnCount(usize),
}
