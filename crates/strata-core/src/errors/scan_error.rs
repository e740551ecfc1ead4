//! Scanner errors.

/// Fatal errors raised by the scanner. Unreadable subdirectories are
/// skipped with a debug log and never reach this enum; only a missing or
/// unreadable root is fatal.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("scan root does not exist: {path}")]
    RootNotFound { path: String },

    #[error("scan root is not a directory: {path}")]
    RootNotDirectory { path: String },

    #[error("failed to read scan root {path}: {source}")]
    RootUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
