//! TypeScript Bridge Artifact Store
//!
//! Read-only bundle of byte blobs shipped with the host plugin: the compiler
//! script tree plus one native engine artifact per supported platform. The
//! manifest is static and known at compile time; nothing scans a resource
//! namespace at runtime.

use tsbridge_core::platform::PlatformKey;

/// One named blob in the bundle, keyed by logical path.
#[derive(Debug, Copy, Clone)]
pub struct ArtifactEntry {
    pub path: &'static str,
    pub bytes: &'static [u8],
}

/// Prefix of the compiler script tree inside the bundle.
pub const SCRIPT_PREFIX: &str = "typescript/";

static MANIFEST: &[ArtifactEntry] = &[
    ArtifactEntry {
        path: "typescript/tsc.js",
        bytes: include_bytes!("../assets/typescript/tsc.js"),
    },
    ArtifactEntry {
        path: "typescript/lib.core.d.ts",
        bytes: include_bytes!("../assets/typescript/lib.core.d.ts"),
    },
    ArtifactEntry {
        path: "jars/qjs_linux_x86_64-0.6.0.bin",
        bytes: include_bytes!("../assets/jars/qjs_linux_x86_64-0.6.0.bin"),
    },
    ArtifactEntry {
        path: "jars/qjs_macosx_x86_64-0.6.0.bin",
        bytes: include_bytes!("../assets/jars/qjs_macosx_x86_64-0.6.0.bin"),
    },
    ArtifactEntry {
        path: "jars/qjs_win32_x86_64-0.6.0.bin",
        bytes: include_bytes!("../assets/jars/qjs_win32_x86_64-0.6.0.bin"),
    },
];

/// Immutable set of bundled blobs.
#[derive(Debug, Copy, Clone)]
pub struct ArtifactBundle {
    entries: &'static [ArtifactEntry],
}

impl ArtifactBundle {
    /// The bundle compiled into this crate.
    pub fn builtin() -> Self {
        Self { entries: MANIFEST }
    }

    /// A bundle over an explicit entry list (used by tests and tooling).
    pub fn from_entries(entries: &'static [ArtifactEntry]) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ArtifactEntry] {
        self.entries
    }

    /// Look up a blob by logical path.
    pub fn get(&self, path: &str) -> Option<&'static [u8]> {
        self.entries.iter().find(|e| e.path == path).map(|e| e.bytes)
    }

    /// Entries of the compiler script tree, in manifest order.
    pub fn script_entries(&self) -> impl Iterator<Item = &ArtifactEntry> {
        self.entries.iter().filter(|e| e.path.starts_with(SCRIPT_PREFIX))
    }

    /// The single native engine artifact for the given platform.
    pub fn native_entry(&self, platform: PlatformKey) -> Option<&ArtifactEntry> {
        let path = platform.native_artifact();
        self.entries.iter().find(|e| e.path == path)
    }
}
