//! Child process launch
//!
//! Stages the bridge entry point into the workspace, assembles the child's
//! execution environment (argument payload, workspace root, library search
//! path), spawns it with inherited stdio, and blocks until it exits. The
//! exit code propagates unchanged; code 86 is reserved by the bridge itself
//! and lets the host tell a broken bridge from a failed compile.

use crate::error::BridgeError;
use crate::workspace::Workspace;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::info;
use tsbridge_core::platform::PlatformKey;
use tsbridge_core::{argv, EXIT_BRIDGE_FAILURE};

/// Environment override for locating the bridge executable.
pub const BOOTSTRAP_VAR: &str = "TSBRIDGE_BOOTSTRAP";

const BRIDGE_BIN: &str = "tsbridge-bootstrap";

/// Outcome of one child invocation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ChildResult {
    /// Compiler ran and reported success.
    Success,
    /// Compiler ran and reported errors with this exit code.
    CompilerFailure(i32),
    /// The bridge itself failed inside the child before or while starting
    /// the compiler script.
    BridgeFailure,
}

impl ChildResult {
    pub fn classify(code: i32) -> Self {
        match code {
            0 => ChildResult::Success,
            EXIT_BRIDGE_FAILURE => ChildResult::BridgeFailure,
            other => ChildResult::CompilerFailure(other),
        }
    }

    pub fn exit_code(self) -> i32 {
        match self {
            ChildResult::Success => 0,
            ChildResult::CompilerFailure(code) => code,
            ChildResult::BridgeFailure => EXIT_BRIDGE_FAILURE,
        }
    }

    pub fn is_success(self) -> bool {
        self == ChildResult::Success
    }
}

/// Execution environment for one child spawn. Constructed once, consumed
/// once; never persisted.
#[derive(Debug)]
pub struct LaunchSpec {
    pub program: PathBuf,
    pub payload: String,
    pub build_dir: PathBuf,
    pub library_path_var: &'static str,
    pub library_path: OsString,
}

/// Locate the bridge executable: `TSBRIDGE_BOOTSTRAP` override, else a
/// sibling of the current executable.
pub fn bridge_source() -> Result<PathBuf, BridgeError> {
    if let Some(path) = std::env::var_os(BOOTSTRAP_VAR) {
        return Ok(PathBuf::from(path));
    }
    let exe = std::env::current_exe().map_err(BridgeError::Spawn)?;
    let dir = exe.parent().unwrap_or(Path::new("."));
    Ok(dir.join(format!("{BRIDGE_BIN}{}", std::env::consts::EXE_SUFFIX)))
}

/// Copy the bridge executable into the workspace's `classes/` subarea.
pub fn stage_bridge(workspace: &Workspace, source: &Path) -> Result<PathBuf, BridgeError> {
    if !source.is_file() {
        return Err(BridgeError::BridgeNotFound {
            path: source.to_path_buf(),
        });
    }
    let name = source
        .file_name()
        .ok_or_else(|| BridgeError::BridgeNotFound {
            path: source.to_path_buf(),
        })?;
    let dest = workspace.classes_dir().join(name);
    std::fs::copy(source, &dest).map_err(|source| BridgeError::Extraction {
        path: dest.clone(),
        source,
    })?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&dest, std::fs::Permissions::from_mode(0o755)).map_err(|source| {
            BridgeError::Extraction {
                path: dest.clone(),
                source,
            }
        })?;
    }

    Ok(dest)
}

/// Assemble the launch spec: marshalled payload plus a library search path
/// listing the bridge entry point first, then the native artifact.
pub fn build_spec(
    args: &[String],
    workspace: &Workspace,
    platform: PlatformKey,
    program: PathBuf,
) -> Result<LaunchSpec, BridgeError> {
    let library_path = std::env::join_paths([workspace.classes_dir(), workspace.jars_dir()])
        .map_err(BridgeError::LibraryPath)?;
    Ok(LaunchSpec {
        program,
        payload: argv::marshal(args),
        build_dir: workspace.build_dir().to_path_buf(),
        library_path_var: platform.library_path_var(),
        library_path,
    })
}

/// Spawn the child and wait for it. Stdio is inherited so the compiler's
/// diagnostics stream straight to the user. The wait is unbounded.
pub fn launch(spec: &LaunchSpec) -> Result<ChildResult, BridgeError> {
    info!(
        program = %spec.program.display(),
        command = %spec.payload,
        "launching compiler bridge"
    );

    let status = Command::new(&spec.program)
        .env(argv::COMMAND_VAR, &spec.payload)
        .env(argv::BUILD_DIR_VAR, &spec.build_dir)
        .env(spec.library_path_var, &spec.library_path)
        .current_dir(&spec.build_dir)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(BridgeError::Spawn)?;

    // A signal-killed child has no code; treat it as a bridge-level failure
    let code = status.code().unwrap_or(EXIT_BRIDGE_FAILURE);
    Ok(ChildResult::classify(code))
}
