//! Operating-system detection and native artifact selection
//!
//! The embedded engine ships one native artifact per supported OS. The
//! mapping is closed: an unknown OS is a hard error, never a best guess,
//! since loading a mismatched binding corrupts or crashes the child silently.

use crate::ENGINE_VERSION;
use thiserror::Error;

/// The current process runs on an operating system with no bundled
/// engine binding.
#[derive(Debug, Error)]
#[error("no embedded engine binding available for operating system '{os}'")]
pub struct UnsupportedPlatform {
    pub os: String,
}

/// Supported host platforms.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PlatformKey {
    LinuxX64,
    MacosX64,
    WindowsX64,
}

impl PlatformKey {
    /// Detect the platform of the running process.
    pub fn current() -> Result<Self, UnsupportedPlatform> {
        Self::from_os(std::env::consts::OS)
    }

    /// Map an OS identifier (as reported by `std::env::consts::OS`) to a
    /// platform key.
    pub fn from_os(os: &str) -> Result<Self, UnsupportedPlatform> {
        match os {
            "linux" => Ok(PlatformKey::LinuxX64),
            "macos" => Ok(PlatformKey::MacosX64),
            "windows" => Ok(PlatformKey::WindowsX64),
            other => Err(UnsupportedPlatform { os: other.to_string() }),
        }
    }

    /// Logical bundle path of this platform's native engine artifact.
    pub fn native_artifact(self) -> String {
        let name = match self {
            PlatformKey::LinuxX64 => "qjs_linux_x86_64",
            PlatformKey::MacosX64 => "qjs_macosx_x86_64",
            PlatformKey::WindowsX64 => "qjs_win32_x86_64",
        };
        format!("jars/{name}-{ENGINE_VERSION}.bin")
    }

    /// Tag recorded inside the native artifact, checked by the bootstrap
    /// before engine initialization.
    pub fn artifact_tag(self) -> &'static str {
        match self {
            PlatformKey::LinuxX64 => "linux_x86_64",
            PlatformKey::MacosX64 => "macosx_x86_64",
            PlatformKey::WindowsX64 => "win32_x86_64",
        }
    }

    /// Name of the dynamic-library search variable the child consults.
    pub fn library_path_var(self) -> &'static str {
        match self {
            PlatformKey::LinuxX64 => "LD_LIBRARY_PATH",
            PlatformKey::MacosX64 => "DYLD_LIBRARY_PATH",
            PlatformKey::WindowsX64 => "PATH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [PlatformKey; 3] = [
        PlatformKey::LinuxX64,
        PlatformKey::MacosX64,
        PlatformKey::WindowsX64,
    ];

    #[test]
    fn test_artifact_paths_distinct_and_nonempty() {
        let paths: Vec<String> = ALL.iter().map(|p| p.native_artifact()).collect();
        for path in &paths {
            assert!(!path.is_empty());
            assert!(path.starts_with("jars/"));
        }
        for (i, a) in paths.iter().enumerate() {
            for b in &paths[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_known_os_mapping() {
        assert_eq!(PlatformKey::from_os("linux").unwrap(), PlatformKey::LinuxX64);
        assert_eq!(PlatformKey::from_os("macos").unwrap(), PlatformKey::MacosX64);
        assert_eq!(PlatformKey::from_os("windows").unwrap(), PlatformKey::WindowsX64);
    }

    #[test]
    fn test_unknown_os_is_an_error_not_a_default() {
        for os in ["freebsd", "android", "ios", ""] {
            let err = PlatformKey::from_os(os).unwrap_err();
            assert_eq!(err.os, os);
        }
    }

    #[test]
    fn test_tags_distinct() {
        for (i, a) in ALL.iter().enumerate() {
            for b in &ALL[i + 1..] {
                assert_ne!(a.artifact_tag(), b.artifact_tag());
            }
        }
    }
}
