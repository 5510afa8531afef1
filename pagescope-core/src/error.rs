//! Error types for pagescope

use std::path::PathBuf;

use thiserror::Error;

use crate::types::ProcessId;

/// Pagescope error types
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Detaching the thread's filesystem context failed
    ///
    /// Raised by `unshare(CLONE_FS)`, typically for lack of privilege.
    #[error("failed to unshare filesystem context: {source}")]
    UnshareFs {
        /// Underlying OS error
        #[source]
        source: nix::Error,
    },

    /// Opening `/proc/<pid>/ns/mnt` failed
    ///
    /// The target process may have exited, or the caller cannot see it.
    #[error("failed to open mount namespace handle for pid {pid}: {source}")]
    OpenNsHandle {
        /// Process whose namespace handle was requested
        pid: ProcessId,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// Attaching the thread to the target mount namespace failed
    #[error("failed to setns into mount namespace: {source}")]
    SetNs {
        /// Underlying OS error
        #[source]
        source: nix::Error,
    },

    /// Page-cache residency probe failed
    #[error("residency probe failed for {path}: {message}")]
    Residency {
        /// File being probed
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Error message
        message: String,
    },

    /// System error from nix
    #[error("System error: {0}")]
    System(#[from] nix::Error),
}

/// Result type alias for pagescope operations
pub type Result<T> = std::result::Result<T, Error>;
