//! Per-invocation scratch workspace
//!
//! Fixed layout under the host build's working area:
//! `<build_dir>/compiler/{typescript,jars,classes}`. One workspace belongs to
//! exactly one invocation; concurrent invocations must use distinct build
//! directories. Cleanup is owned by the host build, not by this subsystem.

use crate::error::BridgeError;
use std::path::{Path, PathBuf};
use tsbridge_core::{BASE_DIR, CLASSES_DIR, JARS_DIR, SCRIPT_DIR};

#[derive(Debug, Clone)]
pub struct Workspace {
    build_dir: PathBuf,
    root: PathBuf,
}

impl Workspace {
    pub fn new(build_dir: impl Into<PathBuf>) -> Self {
        let build_dir = build_dir.into();
        let root = build_dir.join(BASE_DIR);
        Self { build_dir, root }
    }

    /// The host build's working area this workspace lives under.
    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// `<build_dir>/compiler`
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn script_dir(&self) -> PathBuf {
        self.root.join(SCRIPT_DIR)
    }

    pub fn jars_dir(&self) -> PathBuf {
        self.root.join(JARS_DIR)
    }

    pub fn classes_dir(&self) -> PathBuf {
        self.root.join(CLASSES_DIR)
    }

    /// Create the three subareas. Idempotent.
    pub fn create_dirs(&self) -> Result<(), BridgeError> {
        for dir in [self.script_dir(), self.jars_dir(), self.classes_dir()] {
            std::fs::create_dir_all(&dir)
                .map_err(|source| BridgeError::Extraction { path: dir.clone(), source })?;
        }
        Ok(())
    }
}
