//! Error types for paragraph reconstruction.
//!
//! Only the raw-input boundary can fail. Block classification and paragraph
//! assembly are infallible and fall back to explicit defaults on degenerate
//! geometry.

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading raw page layout.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Raw layout violates a structural requirement (empty block, empty line,
    /// malformed bounding box).
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    /// Raw layout JSON could not be decoded
    #[error("JSON decoding error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_layout_error() {
        let err = Error::InvalidLayout("block 3 has no lines".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("Invalid layout"));
        assert!(msg.contains("block 3 has no lines"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let err: Error = json_err.into();
        assert!(format!("{}", err).starts_with("JSON decoding error"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
