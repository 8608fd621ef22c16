use thiserror::Error;

// ---------------------------------------------------------------------------
// ZoneError
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ZoneError {
    #[error("Invalid zone name {0:?}: a zone name must contain a non-whitespace character")]
    InvalidName(String),

    #[error("Zone \"{zone}\" property \"{key}\" could not be decoded")]
    Property {
        zone: String,
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience alias: the default error type is `ZoneError`.
pub type Result<T, E = ZoneError> = std::result::Result<T, E>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
