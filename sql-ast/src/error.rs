//! Error types surfaced by rendering.

use thiserror::Error;

/// Errors reported by [`render`](crate::render::render).
///
/// These are programmer-facing: they indicate a malformed statement tree or
/// a broken visitor-stack invariant, never bad end-user input.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A segment carries an empty or missing value where one is required.
    #[error("invalid argument at {path}: {message}")]
    InvalidArgument { path: String, message: String },

    /// The visitor stack was driven out of its push/pop discipline.
    #[error("visitor stack violation: {0}")]
    InvariantViolation(String),

    /// No renderer on the stack knows how to emit this segment kind.
    #[error("unsupported segment kind: {0}")]
    UnsupportedNode(&'static str),
}
