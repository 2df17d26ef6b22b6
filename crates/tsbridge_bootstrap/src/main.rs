//! Bridge entry point
//!
//! Runs inside the child process spawned by the host: reads the marshalled
//! argument vector and workspace root from the environment, verifies the
//! extracted native engine artifact, and executes the compiler script inside
//! the embedded engine. Exits with the script's own code; bridge-level
//! failures use the reserved code so the host can tell them apart.

mod engine;

use anyhow::{ensure, Context as _};
use engine::{EngineError, ScriptEngine};
use std::path::{Path, PathBuf};
use tracing::error;
use tsbridge_core::platform::PlatformKey;
use tsbridge_core::{argv, BASE_DIR, COMPILER_SCRIPT, EXIT_BRIDGE_FAILURE, JARS_DIR};

fn main() {
    tracing_subscriber::fmt::init();

    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            error!("bridge failure: {err:#}");
            EXIT_BRIDGE_FAILURE
        }
    };
    std::process::exit(code);
}

fn run() -> anyhow::Result<i32> {
    let payload = std::env::var(argv::COMMAND_VAR)
        .with_context(|| format!("{} is not set", argv::COMMAND_VAR))?;
    let build_dir: PathBuf = std::env::var_os(argv::BUILD_DIR_VAR)
        .map(PathBuf::from)
        .with_context(|| format!("{} is not set", argv::BUILD_DIR_VAR))?;

    let platform = PlatformKey::current()?;
    verify_native_binding(&build_dir, platform)?;

    // Positional placeholders (program name, script name): empty and ignored
    // by the compiler, but required by its argv convention
    let mut script_argv = vec![String::new(), String::new()];
    script_argv.extend(argv::unmarshal(&payload)?);

    let script = build_dir.join(BASE_DIR).join(COMPILER_SCRIPT);
    ensure!(
        script.is_file(),
        "compiler script not found at {}",
        script.display()
    );

    let script_engine = ScriptEngine::with_argv(&script_argv)?;
    match script_engine.run_script(&script) {
        Ok(()) => Ok(script_engine.exit_code()),
        // The script was already running, so a thrown error is the
        // compiler's failure, not the bridge's
        Err(EngineError::Script(message)) => {
            error!("compiler script threw: {message}");
            Ok(1)
        }
        Err(err) => Err(err.into()),
    }
}

/// Exactly one native engine artifact must be present, and its tag must
/// match the running platform. Anything else is fatal; loading a mismatched
/// binding would corrupt the engine silently.
fn verify_native_binding(build_dir: &Path, platform: PlatformKey) -> anyhow::Result<()> {
    let jars = build_dir.join(BASE_DIR).join(JARS_DIR);
    let mut artifacts = Vec::new();
    for entry in std::fs::read_dir(&jars)
        .with_context(|| format!("cannot read native artifact directory {}", jars.display()))?
    {
        let path = entry?.path();
        if path.is_file() {
            artifacts.push(path);
        }
    }

    ensure!(
        artifacts.len() == 1,
        "expected exactly one native engine artifact in {}, found {}",
        jars.display(),
        artifacts.len()
    );

    let tag = std::fs::read_to_string(&artifacts[0])
        .with_context(|| format!("cannot read native artifact {}", artifacts[0].display()))?;
    let platform_field = tag.split_whitespace().nth(1).unwrap_or_default();
    ensure!(
        platform_field == platform.artifact_tag(),
        "native artifact {} does not match platform tag '{}'",
        artifacts[0].display(),
        platform.artifact_tag()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jars_dir(build_dir: &Path) -> PathBuf {
        let dir = build_dir.join(BASE_DIR).join(JARS_DIR);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_single_matching_artifact_passes() {
        let tmp = tempfile::tempdir().unwrap();
        let jars = jars_dir(tmp.path());
        std::fs::write(jars.join("qjs_linux_x86_64-0.6.0.bin"), "qjs linux_x86_64 0.6.0\n")
            .unwrap();

        verify_native_binding(tmp.path(), PlatformKey::LinuxX64).unwrap();
    }

    #[test]
    fn test_mismatched_artifact_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let jars = jars_dir(tmp.path());
        std::fs::write(jars.join("qjs_win32_x86_64-0.6.0.bin"), "qjs win32_x86_64 0.6.0\n")
            .unwrap();

        assert!(verify_native_binding(tmp.path(), PlatformKey::LinuxX64).is_err());
    }

    #[test]
    fn test_multiple_artifacts_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let jars = jars_dir(tmp.path());
        std::fs::write(jars.join("a.bin"), "qjs linux_x86_64 0.6.0\n").unwrap();
        std::fs::write(jars.join("b.bin"), "qjs linux_x86_64 0.6.0\n").unwrap();

        assert!(verify_native_binding(tmp.path(), PlatformKey::LinuxX64).is_err());
    }

    #[test]
    fn test_empty_artifact_dir_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        jars_dir(tmp.path());

        assert!(verify_native_binding(tmp.path(), PlatformKey::LinuxX64).is_err());
    }
}
