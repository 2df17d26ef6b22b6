//! Bridge failure taxonomy
//!
//! Nothing here retries: every variant terminates the current invocation and
//! is reported to the host with its original cause attached.

use std::path::PathBuf;
use thiserror::Error;
use tsbridge_core::platform::UnsupportedPlatform;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("must specify exactly one of output_file or output_dir")]
    Configuration,

    #[error(transparent)]
    UnsupportedPlatform(#[from] UnsupportedPlatform),

    #[error("bundle has no native artifact at '{path}'")]
    MissingArtifact { path: String },

    #[error("failed to extract bundled resource to {path}")]
    Extraction {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("bridge entry point not found at {path}")]
    BridgeNotFound { path: PathBuf },

    #[error("failed to list source directory {path}")]
    SourceDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not assemble the child library search path")]
    LibraryPath(#[source] std::env::JoinPathsError),

    #[error("failed to spawn compiler child process")]
    Spawn(#[source] std::io::Error),
}
