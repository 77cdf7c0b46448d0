//! Error types shared across the page components.

use thiserror::Error;

use crate::config::ConfigError;

/// Why a contact form submission failed.
///
/// Both variants surface to the user as the same generic message; the
/// distinction only matters for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("network error: {0}")]
    Transport(String),

    #[error("endpoint answered with HTTP {0}")]
    Status(u16),
}

/// Errors raised while wiring the page.
#[derive(Debug, Error)]
pub enum UiError {
    #[error("required element `{0}` not found")]
    MissingElement(String),

    #[error("browser call failed: {0}")]
    Js(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
