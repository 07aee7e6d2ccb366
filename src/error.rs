//! Error types for the Barid inbox client.

use thiserror::Error;

/// Errors that can occur while talking to the Barid API or driving the inbox.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed (transport error or non-2xx status).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configured base URL could not be parsed.
    #[error("invalid base URL: {0}")]
    Url(#[from] url::ParseError),

    /// The endpoint answered, but reported failure or omitted its result.
    #[error("{endpoint} returned an unsuccessful response: {message}")]
    Api {
        /// Endpoint path that produced the response (e.g. `/domains`).
        endpoint: String,
        /// Short description of what was wrong with the response.
        message: String,
    },

    /// A user-supplied address could not be split into local-part and domain.
    #[error("invalid email address: {0:?}")]
    InvalidAddress(String),

    /// No clipboard backend accepted the text.
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while reading the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to resolve the platform config directory")]
    MissingDirectories,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml parse error: {0}")]
    TomlDe(#[from] toml::de::Error),
}
