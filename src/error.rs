use std::path::PathBuf;

use thiserror::Error;

/// Every failure the crate can surface.
///
/// Only startup work (asset decode, config load, level parsing, window and
/// GPU bring-up) can fail; the per-tick simulation operates on clamped inputs
/// and never returns an error.
#[derive(Debug, Error)]
pub enum GameError {
    /// A required bitmap could not be read or decoded.
    #[error("failed to load asset '{}': {source}", .path.display())]
    AssetDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to read config '{}': {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config '{}': {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A level row does not match the width of the first row.
    #[error("level row {row} is {found} cells wide, expected {expected}")]
    MapShape { row: usize, expected: usize, found: usize },

    /// A level row contains a character that is neither open nor blocking.
    #[error("unknown level glyph {glyph:?} at row {row}, column {col}")]
    MapGlyph { row: usize, col: usize, glyph: char },

    #[error("level has no rows")]
    EmptyMap,

    #[error("gpu error: {0}")]
    Gpu(String),

    #[error("window error: {0}")]
    Window(String),
}
