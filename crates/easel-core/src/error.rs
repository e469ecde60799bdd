//! Toolkit errors.

use thiserror::Error;

/// Errors reported by toolkit operations.
///
/// A failed call never leaves a partial mutation behind: arguments are
/// checked before any shape, window or registry is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A variable-length argument (such as a point list) is too short.
    #[error("Call to {operation} doesn't have enough arguments: {detail}")]
    MissingArgument {
        operation: String,
        detail: String,
    },
    /// An argument is present but out of range or malformed.
    #[error("Invalid {argument} in {operation}: {value}")]
    InvalidValue {
        operation: String,
        argument: &'static str,
        value: String,
    },
    /// The operation is not allowed in the target's current state.
    #[error("{operation}: {message}")]
    IllegalOperation {
        operation: String,
        message: String,
    },
    /// Loading or saving a raster failed.
    #[error("Image I/O failed for '{name}': {message}")]
    ImageIo { name: String, message: String },
    /// The host refused a request (for example creating a surface).
    #[error("Host error: {0}")]
    Host(String),
}

/// Result type for toolkit operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_operation_and_value() {
        let err = Error::InvalidValue {
            operation: "rectangle.resize".to_string(),
            argument: "dimensions",
            value: "(0, 5)".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid dimensions in rectangle.resize: (0, 5)"
        );

        let err = Error::MissingArgument {
            operation: "window.polygon".to_string(),
            detail: "expected at least 3 points, got 2".to_string(),
        };
        assert!(err.to_string().contains("window.polygon"));
        assert!(err.to_string().contains("got 2"));
    }
}
