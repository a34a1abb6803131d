//! Error types for module inspection.
//!
//! Structural faults raised by the walker ([`crate::walker::WalkError`])
//! and boundary I/O failures fold into one crate-wide error type.

use thiserror::Error;

use crate::walker::WalkError;

/// Main error type for inspection operations.
#[derive(Debug, Error)]
pub enum InspectError {
    /// Malformed or truncated module structure.
    #[error(transparent)]
    Walk(#[from] WalkError),

    /// File exceeds the configured size cap.
    #[error("file size of {found} bytes exceeds the maximum allowed size of {limit} bytes")]
    FileTooLarge { limit: u64, found: u64 },

    /// A read would exceed the configured read budget.
    #[error("read would exceed the total read limit of {limit} bytes (already read: {current})")]
    ReadLimitExceeded { limit: u64, current: u64 },

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for inspection operations
pub type Result<T> = std::result::Result<T, InspectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_errors_display_transparently() {
        let err = InspectError::from(WalkError::UnknownSectionId {
            id: 0x0d,
            remaining: 3,
        });
        assert_eq!(
            err.to_string(),
            "unknown section id 0x0d with 3 bytes unconsumed"
        );
    }

    #[test]
    fn size_cap_error_display() {
        let err = InspectError::FileTooLarge {
            limit: 100,
            found: 200,
        };
        assert_eq!(
            err.to_string(),
            "file size of 200 bytes exceeds the maximum allowed size of 100 bytes"
        );
    }
}
