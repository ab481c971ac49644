// src/assets/files.rs

//! Turns gather and rename rules into file records
//!
//! Every matched file is read in full and embedded as a base64 data URL.
//! Any read failure aborts collection; there is no best-effort mode.

use super::dataurl;
use super::rules::{AssetManifest, GatherRule};
use crate::error::{InputError, Result};
use glob::Pattern;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Mode for files placed in a `bin` directory (r-xr-xr-x)
pub const EXECUTABLE_MODE: u32 = 0o555;

/// Mode for everything else (rw-------)
pub const PRIVATE_MODE: u32 = 0o600;

/// Owner of every added file
pub const FILE_OWNER: &str = "root";

/// A file ready to be added to `storage.files`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Absolute path on the provisioned host
    pub path: String,
    /// Contents as a data URL
    pub contents: String,
    pub mode: u32,
    pub user: String,
}

impl FileRecord {
    /// Read `source` and describe it as a file at `destination`
    ///
    /// `rule` is only used to say which rule failed if the read does.
    pub fn from_asset(source: &Path, destination: &Path, rule: &str) -> Result<Self> {
        if !destination.is_absolute() {
            return Err(InputError::RelativeDestination(destination.to_path_buf()).into());
        }

        let content = fs::read(source).map_err(|source_err| InputError::UnreadableAsset {
            rule: rule.to_string(),
            path: source.to_path_buf(),
            source: source_err,
        })?;

        Ok(Self {
            path: destination.to_string_lossy().into_owned(),
            contents: dataurl::encode(&content),
            mode: mode_for(destination),
            user: FILE_OWNER.to_string(),
        })
    }
}

/// Permission mode for a destination path
///
/// Only the immediate parent directory is considered: `/usr/local/bin/x` is
/// executable, `/usr/local/bin/sub/x` is not.
pub fn mode_for(destination: &Path) -> u32 {
    let parent_name = destination
        .parent()
        .and_then(Path::file_name)
        .and_then(|name| name.to_str());

    if parent_name == Some("bin") {
        EXECUTABLE_MODE
    } else {
        PRIVATE_MODE
    }
}

/// Resolve every gather and rename rule in the manifest
///
/// Records come out gather rules first, in rule order with each rule's
/// matches sorted by path, then rename rules in declared order.
pub fn collect_files(manifest: &AssetManifest) -> Result<Vec<FileRecord>> {
    let mut records = Vec::new();

    for rule in &manifest.gather {
        let label = rule.to_string();
        let matches = find_files(rule)?;
        info!("Found {} file(s) for {}", matches.len(), label);

        for path in matches {
            let relative = path
                .strip_prefix(&rule.root)
                .map_err(|_| InputError::OutsideRoot {
                    path: path.clone(),
                    root: rule.root.clone(),
                })?;
            let destination = rule.destination.join(relative);
            debug!("{} -> {}", path.display(), destination.display());
            records.push(FileRecord::from_asset(&path, &destination, &label)?);
        }
    }

    for rule in &manifest.rename {
        debug!("{}", rule);
        records.push(FileRecord::from_asset(
            &rule.source,
            &rule.destination,
            &rule.to_string(),
        )?);
    }

    Ok(records)
}

/// Files under the rule's root whose base name matches its pattern
///
/// The root itself and directories are never returned. A root that cannot
/// be walked, including one that does not exist, is an error.
pub fn find_files(rule: &GatherRule) -> Result<Vec<PathBuf>> {
    let pattern = Pattern::new(&rule.pattern).map_err(|source| InputError::InvalidPattern {
        pattern: rule.pattern.clone(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in WalkDir::new(&rule.root) {
        let entry = entry.map_err(|source| InputError::AssetWalk {
            rule: rule.to_string(),
            root: rule.root.clone(),
            source,
        })?;

        // Skip the search root and directories (their children are visited)
        if entry.depth() == 0 || entry.file_type().is_dir() {
            continue;
        }

        if pattern.matches(&entry.file_name().to_string_lossy()) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}
