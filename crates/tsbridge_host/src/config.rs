//! Host-facing compile configuration
//!
//! Bound by the host build tool: one or more source directories and exactly
//! one of a combined output file or an output directory. Validation happens
//! before any filesystem write.

use crate::error::BridgeError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompileConfig {
    pub source_dirs: Vec<PathBuf>,
    #[serde(default)]
    pub output_file: Option<PathBuf>,
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

impl CompileConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Exactly one output mode must be configured.
    pub fn validate(&self) -> Result<(), BridgeError> {
        match (&self.output_file, &self.output_dir) {
            (Some(_), None) | (None, Some(_)) => Ok(()),
            _ => Err(BridgeError::Configuration),
        }
    }

    /// Assemble the compiler's argument vector: every `.ts` file of every
    /// source directory (absolute paths, directories in configured order,
    /// files sorted within each directory), then the output-mode flag.
    pub fn build_args(&self) -> Result<Vec<String>, BridgeError> {
        self.validate()?;

        let mut args = Vec::new();
        for dir in &self.source_dirs {
            for file in list_typescript_files(dir)? {
                args.push(absolute_string(&file)?);
            }
        }

        if let Some(file) = &self.output_file {
            args.push("--outFile".to_string());
            args.push(absolute_string(file)?);
        } else if let Some(dir) = &self.output_dir {
            args.push("--outDir".to_string());
            args.push(absolute_string(dir)?);
        }

        Ok(args)
    }
}

/// Non-recursive `.ts` listing, sorted for deterministic builds.
fn list_typescript_files(dir: &Path) -> Result<Vec<PathBuf>, BridgeError> {
    let entries = std::fs::read_dir(dir).map_err(|source| BridgeError::SourceDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| BridgeError::SourceDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "ts") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn absolute_string(path: &Path) -> Result<String, BridgeError> {
    let abs = std::path::absolute(path).map_err(|source| BridgeError::SourceDir {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(abs.to_string_lossy().into_owned())
}
