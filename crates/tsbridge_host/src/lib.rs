//! TypeScript Bridge Host
//!
//! Host-process side of the bridge: validates the compile configuration,
//! resolves the platform's native engine artifact, extracts the bundled
//! compiler into a scratch workspace, and launches the bridge entry point as
//! a child process with the compiler's arguments marshalled through its
//! environment.
//!
//! One invocation runs on one thread, blocks exactly once (waiting for the
//! child), and never retries. Concurrent invocations need distinct build
//! directories.

pub mod config;
pub mod error;
pub mod extract;
pub mod launch;
pub mod workspace;

pub use config::CompileConfig;
pub use error::BridgeError;
pub use launch::ChildResult;
pub use workspace::Workspace;

use std::path::Path;
use tsbridge_bundle::ArtifactBundle;
use tsbridge_core::platform::PlatformKey;

/// Run one compile invocation under `build_dir`.
///
/// `Ok` carries the child's outcome, compiler failures included; `Err` means
/// the invocation never got a meaningful child exit (bad configuration,
/// unsupported platform, extraction or spawn failure).
pub fn compile(config: &CompileConfig, build_dir: &Path) -> Result<ChildResult, BridgeError> {
    config.validate()?;
    let platform = PlatformKey::current()?;

    let workspace = Workspace::new(build_dir);
    extract::extract(&ArtifactBundle::builtin(), platform, &workspace)?;
    let bridge = launch::stage_bridge(&workspace, &launch::bridge_source()?)?;

    let args = config.build_args()?;
    let spec = launch::build_spec(&args, &workspace, platform, bridge)?;
    launch::launch(&spec)
}
