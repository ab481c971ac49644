// src/assets/units.rs

//! Systemd unit collection

use super::rules::AssetManifest;
use crate::error::{InputError, Result};
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// A unit ready to be added to `systemd.units`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitRecord {
    /// Unit name, taken from the file's base name
    pub name: String,
    pub contents: String,
    pub enabled: bool,
}

impl UnitRecord {
    /// Read a unit file from disk
    pub fn from_file(path: &Path, enabled: bool) -> Result<Self> {
        let unreadable = |source| InputError::UnreadableUnit {
            path: path.to_path_buf(),
            source,
        };

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                unreadable(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "path has no file name",
                ))
            })?;

        let contents = fs::read_to_string(path).map_err(unreadable)?;

        Ok(Self {
            name,
            contents,
            enabled,
        })
    }
}

/// Read every unit listed in the manifest, in declared order
pub fn collect_units(manifest: &AssetManifest) -> Result<Vec<UnitRecord>> {
    manifest
        .units
        .iter()
        .map(|rule| {
            debug!("Reading unit {}", rule.path.display());
            UnitRecord::from_file(&rule.path, rule.enabled)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;

    const SERVICE: &str = "[Unit]\nDescription=Post reboot\n\n[Service]\nType=oneshot\nExecStart=/usr/local/bin/bootstrap-in-place-post-reboot.sh\n\n[Install]\nWantedBy=multi-user.target\n";

    #[test]
    fn test_collect_units_uses_base_name() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("bootstrap-in-place");
        fs::create_dir_all(&dir).unwrap();
        let on = dir.join("bootstrap-in-place-post-reboot.service");
        let off = dir.join("debug.service");
        fs::write(&on, SERVICE).unwrap();
        fs::write(&off, "[Unit]\n").unwrap();

        let manifest = AssetManifest::new().with_unit(&on, true).with_unit(&off, false);
        let units = collect_units(&manifest).unwrap();

        assert_eq!(
            units,
            vec![
                UnitRecord {
                    name: "bootstrap-in-place-post-reboot.service".to_string(),
                    contents: SERVICE.to_string(),
                    enabled: true,
                },
                UnitRecord {
                    name: "debug.service".to_string(),
                    contents: "[Unit]\n".to_string(),
                    enabled: false,
                },
            ]
        );
    }

    #[test]
    fn test_missing_unit_fails() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.service");
        let manifest = AssetManifest::new().with_unit(&missing, true);

        match collect_units(&manifest) {
            Err(Error::Input(InputError::UnreadableUnit { path, .. })) => assert_eq!(path, missing),
            other => panic!("expected UnreadableUnit, got {:?}", other),
        }
    }
}
