// src/augment.rs

//! Merges collected records into a decoded config
//!
//! Records are only ever appended. Existing files and units are left where
//! they are, untouched, and nothing is de-duplicated: applying the same
//! augmentation twice yields every added entry twice.

use crate::assets::{self, AssetManifest, FileRecord, UnitRecord};
use crate::error::Result;
use crate::ignition::{Config, v3_3};
use tracing::info;

/// Everything to add to a config in one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Augmentation {
    pub files: Vec<FileRecord>,
    pub units: Vec<UnitRecord>,
}

impl Augmentation {
    pub fn new(files: Vec<FileRecord>, units: Vec<UnitRecord>) -> Self {
        Self { files, units }
    }

    /// Run both collectors over a manifest
    pub fn collect(manifest: &AssetManifest) -> Result<Self> {
        let files = assets::collect_files(manifest)?;
        let units = assets::collect_units(manifest)?;
        Ok(Self::new(files, units))
    }

    /// Append files, then units
    pub fn apply(&self, config: &mut Config) {
        append_files(config, &self.files);
        append_units(config, &self.units);
    }
}

/// Append one `storage.files` entry per record
pub fn append_files(config: &mut Config, files: &[FileRecord]) {
    for record in files {
        info!("Adding file {}", record.path);
        config.storage.files.push(file_entry(record));
    }
}

/// Append one `systemd.units` entry per record
pub fn append_units(config: &mut Config, units: &[UnitRecord]) {
    for record in units {
        info!("Adding unit {}", record.name);
        config.systemd.units.push(unit_entry(record));
    }
}

fn file_entry(record: &FileRecord) -> v3_3::File {
    v3_3::File {
        path: record.path.clone(),
        user: v3_3::NodeUser {
            name: Some(record.user.clone()),
            ..Default::default()
        },
        contents: v3_3::Resource {
            source: Some(record.contents.clone()),
            ..Default::default()
        },
        mode: Some(record.mode),
        ..Default::default()
    }
}

fn unit_entry(record: &UnitRecord) -> v3_3::Unit {
    v3_3::Unit {
        name: record.name.clone(),
        contents: Some(record.contents.clone()),
        enabled: Some(record.enabled),
        ..Default::default()
    }
}
