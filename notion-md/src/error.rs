//! Error types for conversion, block sources and asset handling

use thiserror::Error;

/// Errors raised by a [`BlockSource`](crate::source::BlockSource).
#[derive(Debug, Error)]
pub enum SourceError {
    /// No children were recorded for the block
    #[error("no children recorded for block '{block_id}'")]
    NotFound { block_id: String },
    /// A pagination cursor did not match any recorded page
    #[error("cursor '{cursor}' does not match a page of block '{block_id}'")]
    UnknownCursor { block_id: String, cursor: String },
    /// The snapshot could not be parsed
    #[error("malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),
    /// Failure reported by an external transport
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors that abort a conversion.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Fetching the children of a block failed; the tree would be incomplete
    #[error("failed to fetch children of block '{block_id}': {source}")]
    Fetch {
        block_id: String,
        #[source]
        source: SourceError,
    },
}

/// Errors raised while materializing an image. These are logged, never returned to callers
/// of the conversion.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("not a valid data URI")]
    InvalidDataUri,
    #[error("invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("download failed: {0}")]
    Http(#[from] ureq::Error),
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}
