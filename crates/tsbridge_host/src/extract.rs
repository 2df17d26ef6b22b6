//! Workspace extraction
//!
//! Materializes the bundled script tree and the one resolved native engine
//! artifact into the workspace so the child process can load them from disk.
//! Every write is a full overwrite of its destination; the relative structure
//! of the script tree is preserved. Any I/O failure aborts the whole
//! extraction. Contents are copied, never interpreted.

use crate::error::BridgeError;
use crate::workspace::Workspace;
use std::path::Path;
use tracing::debug;
use tsbridge_bundle::ArtifactBundle;
use tsbridge_core::platform::PlatformKey;

/// Extract the script tree plus the native artifact for `platform`.
pub fn extract(
    bundle: &ArtifactBundle,
    platform: PlatformKey,
    workspace: &Workspace,
) -> Result<(), BridgeError> {
    workspace.create_dirs()?;

    for entry in bundle.script_entries() {
        write_blob(&workspace.root().join(entry.path), entry.bytes)?;
    }

    let native_path = platform.native_artifact();
    let native = bundle
        .native_entry(platform)
        .ok_or(BridgeError::MissingArtifact { path: native_path })?;
    write_blob(&workspace.root().join(native.path), native.bytes)?;

    debug!(root = %workspace.root().display(), "extracted compiler bundle");
    Ok(())
}

fn write_blob(dest: &Path, bytes: &[u8]) -> Result<(), BridgeError> {
    let wrap = |source| BridgeError::Extraction {
        path: dest.to_path_buf(),
        source,
    };
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent).map_err(wrap)?;
    }
    std::fs::write(dest, bytes).map_err(wrap)
}
