//! TypeScript Bridge Core
//!
//! Shared pieces of the host/child bridge:
//! - Platform detection and native artifact selection
//! - Argument marshalling across the environment channel
//! - Exit-code and layout conventions

pub mod argv;
pub mod platform;

/// Bridge version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Embedded engine version, part of the native artifact names.
pub const ENGINE_VERSION: &str = "0.6.0";

/// Workspace directory name under the host build's working area.
pub const BASE_DIR: &str = "compiler";

/// Workspace subarea holding the extracted compiler script tree.
pub const SCRIPT_DIR: &str = "typescript";

/// Workspace subarea holding the extracted native engine artifact.
pub const JARS_DIR: &str = "jars";

/// Workspace subarea holding the staged bridge entry point.
pub const CLASSES_DIR: &str = "classes";

/// Entry script of the bundled compiler, relative to the workspace root.
pub const COMPILER_SCRIPT: &str = "typescript/tsc.js";

/// Exit code reserved for bridge-level failures inside the child, so the
/// host can tell them apart from compiler-reported errors.
pub const EXIT_BRIDGE_FAILURE: i32 = 86;
