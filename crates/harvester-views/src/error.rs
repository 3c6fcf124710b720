//! Error type shared by the view functions.

use thiserror::Error;

/// Failure raised while mapping a single document.
///
/// Map functions never catch these; they propagate to the host, which
/// decides whether to skip the document, log it, or abort the batch.
#[derive(Debug, Error)]
pub enum ViewError {
    /// A field the document contract guarantees was absent when the
    /// map function accessed it unconditionally.
    #[error("required field `{path}` is missing")]
    MissingField { path: &'static str },

    /// The document could not be deserialized into the shape the view
    /// reads (for example a number where a feed URL belongs).
    #[error("document does not match the expected shape: {0}")]
    InvalidDocument(#[from] serde_json::Error),
}
