//! Error types for the generation pipeline.

use thiserror::Error;

/// Generator error type.
///
/// Everything in here is fatal: configuration and schema problems abort
/// before any file is written, template and I/O failures abort the run in
/// place. Formatter failures are the one recovered class and never surface
/// here; see [`crate::render::finish`].
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error (unknown case style, EOL token, etc.)
    #[error("configuration error: {0}")]
    Config(String),

    /// The schema model violates an invariant the pipeline relies on.
    #[error("schema error: {0}")]
    Schema(String),

    /// Template compilation or rendering failed.
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    /// Directory creation or file write failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
