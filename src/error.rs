//! Error types for wasend

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Phone number must include digits and country code.")]
    InvalidAddress,

    #[error("Timed out waiting for WhatsApp Web.")]
    ReadinessTimeout,

    #[error("Could not find a compose box or send button on the page.")]
    DispatchFailed,

    #[error("Release metadata is malformed: {0}")]
    MalformedRelease(String),

    #[error("Release endpoint returned HTTP {0}")]
    ReleaseFetch(u16),

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Upgrade failed: {0}")]
    Upgrade(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::ReleaseFetch(404);
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_invalid_address_message() {
        let err = Error::InvalidAddress;
        assert!(err.to_string().contains("country code"));
    }
}
