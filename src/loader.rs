//! Discovery and loading of peck files.
//!
//! A pecks directory is walked recursively. Every `.toml` and `.json` file in it is a
//! peck definition; other files and symlinked directories are ignored. Definitions are
//! returned sorted by path, which fixes the order pecks are visited in each round.
//!
//! ```toml
//! [target]
//! method = "POST"
//! path = "/meta/ping"
//! body = { foo = "bar" }
//!
//! [config]
//! chance = 30
//! at_least_once = false
//! ```
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::PeckError;
use crate::peck::{PeckConfig, PeckDefinition, Target};

/// On-disk shape of a peck.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PeckFile {
    target: Target,
    config: PeckConfig,
}

/// Load every peck below `dir`, sorted by path.
pub fn load_dir(dir: &Path) -> Result<Vec<PeckDefinition>, PeckError> {
    let mut files = Vec::new();
    collect(dir, &mut files)?;
    files.sort();

    let pecks = files.iter().map(|p| load_file(p)).collect::<Result<Vec<_>, _>>()?;
    tracing::info!(dir = %dir.display(), pecks = pecks.len(), "loaded pecks");
    Ok(pecks)
}

/// Load and validate a single peck file.
pub fn load_file(path: &Path) -> Result<PeckDefinition, PeckError> {
    let content =
        fs::read_to_string(path).map_err(|source| PeckError::ReadFile { path: path.to_path_buf(), source })?;

    let file: PeckFile = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&content)
            .map_err(|source| PeckError::ParseToml { path: path.to_path_buf(), source })?,
        Some("json") => serde_json::from_str(&content)
            .map_err(|source| PeckError::ParseJson { path: path.to_path_buf(), source })?,
        _ => return Err(PeckError::UnsupportedExtension { path: path.to_path_buf() }),
    };

    tracing::debug!(path = %path.display(), target = %file.target, "loaded peck");
    PeckDefinition::without_hooks(file.target, file.config)
        .map_err(|e| PeckError::Invalid { path: path.to_path_buf(), source: Box::new(e) })
}

fn collect(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), PeckError> {
    let read_dir_err = |source: std::io::Error| PeckError::ReadDir { dir: dir.to_path_buf(), source };

    for entry in fs::read_dir(dir).map_err(read_dir_err)? {
        let entry = entry.map_err(read_dir_err)?;
        let path = entry.path();
        // symlinked directories are not followed, they may loop back into the tree
        if entry.file_type().map_err(read_dir_err)?.is_dir() {
            collect(&path, out)?;
        } else if is_peck_file(&path) {
            out.push(path);
        }
    }
    Ok(())
}

fn is_peck_file(path: &Path) -> bool {
    matches!(path.extension().and_then(|ext| ext.to_str()), Some("toml" | "json"))
}
