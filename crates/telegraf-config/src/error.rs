//! Renderer errors

use thiserror::Error;

/// Errors that can occur while building or running a renderer
#[derive(Debug, Error)]
pub enum RenderError {
    /// An exclusion pattern failed to compile
    #[error("invalid exclusion pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    Toml(#[from] toml::ser::Error),
}
