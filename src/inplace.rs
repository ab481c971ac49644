// src/inplace.rs

//! Read-modify-write of the master Ignition config
//!
//! The config is read and decoded before any asset is touched, so a config
//! with an unsupported version fails without further I/O. Serialization
//! happens in memory; the file is then overwritten in a single write.
//!
//! There is no locking. Callers must make sure only one run targets a given
//! config at a time.

use crate::assets::AssetManifest;
use crate::augment::Augmentation;
use crate::error::{Error, InputError, Result};
use crate::ignition::{self, SchemaRevision};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Where the installer leaves the master Ignition config
pub const DEFAULT_IGNITION_PATH: &str = "/assets/master.ign";

/// Outcome of a successful run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Revision the config was written in before the run
    pub source_revision: SchemaRevision,
    pub files_added: usize,
    pub units_added: usize,
}

/// Enriches a master Ignition config with control plane assets
#[derive(Debug, Clone)]
pub struct BootstrapInPlace {
    ignition_path: PathBuf,
    manifest: AssetManifest,
}

impl BootstrapInPlace {
    pub fn new(ignition_path: impl Into<PathBuf>, manifest: AssetManifest) -> Self {
        Self {
            ignition_path: ignition_path.into(),
            manifest,
        }
    }

    /// Use the built-in single-node rule set for `asset_dir`
    pub fn for_asset_dir(ignition_path: impl Into<PathBuf>, asset_dir: impl AsRef<Path>) -> Self {
        Self::new(ignition_path, AssetManifest::bootstrap_in_place(asset_dir))
    }

    pub fn ignition_path(&self) -> &Path {
        &self.ignition_path
    }

    pub fn manifest(&self) -> &AssetManifest {
        &self.manifest
    }

    /// Decode, augment and rewrite the config
    pub fn run(&self) -> Result<RunSummary> {
        info!("Reading ignition config {}", self.ignition_path.display());
        let raw = fs::read(&self.ignition_path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => InputError::MissingConfig(self.ignition_path.clone()).into(),
            _ => Error::io(&self.ignition_path, e),
        })?;

        let (mut config, source_revision) = ignition::parse_with_revision(&raw)?;
        if source_revision != SchemaRevision::LATEST {
            info!(
                "Upgraded ignition config from {} to {}",
                source_revision,
                SchemaRevision::LATEST
            );
        }

        let augmentation = Augmentation::collect(&self.manifest)?;
        augmentation.apply(&mut config);

        let bytes = ignition::to_vec(&config)?;
        info!(
            "Writing {} file(s) and {} unit(s) to {}",
            augmentation.files.len(),
            augmentation.units.len(),
            self.ignition_path.display()
        );
        overwrite(&self.ignition_path, &bytes)?;

        Ok(RunSummary {
            source_revision,
            files_added: augmentation.files.len(),
            units_added: augmentation.units.len(),
        })
    }
}

/// Replace the contents of an existing file, keeping its permissions
fn overwrite(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(|e| Error::io(path, e))?;
    file.write_all(bytes).map_err(|e| Error::io(path, e))?;
    file.sync_all().map_err(|e| Error::io(path, e))?;
    Ok(())
}
