//! Unified error types for the berth workspace.
//!
//! The taxonomy distinguishes structural registry failures, which abort an
//! operation, from per-member runtime failures, which group operations
//! record and carry on past.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum BerthError {
    /// The registry file exists but cannot be parsed.
    #[error("registry file {path} is corrupt: {source}")]
    StorageCorrupt {
        /// Path of the unparsable registry file.
        path: PathBuf,
        /// Underlying deserialization error.
        source: serde_json::Error,
    },

    /// The registry file cannot be written.
    #[error("registry file {path} is unwritable: {source}")]
    StorageUnwritable {
        /// Path the write was aimed at.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// No container with the given name exists in the runtime.
    #[error("no such container: {container}")]
    NotFound {
        /// Name the runtime failed to resolve.
        container: String,
    },

    /// The alias is not registered.
    #[error("unknown alias: {alias}")]
    UnknownAlias {
        /// Alias that failed to resolve.
        alias: String,
    },

    /// The project is not registered.
    #[error("unknown project: {project}")]
    UnknownProject {
        /// Project that failed to resolve.
        project: String,
    },

    /// An opaque failure reported by the container runtime.
    #[error("runtime error: {message}")]
    Runtime {
        /// Message from the underlying runtime call, recorded verbatim.
        message: String,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, BerthError>;
