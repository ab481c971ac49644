// src/ignition/v3_2.rs

//! Ignition config spec 3.2.0
//!
//! Adds `storage.luks` for encrypted volumes. Partition `resize` and user
//! `shouldExist` also arrive in this revision but live inside sections that
//! are carried as raw JSON, so they need no translation.

use super::v3_1;
use semver::Version;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use v3_1::{
    Directory, Dropin, File, HttpHeader, Ignition, IgnitionConfig, Link, NodeGroup, NodeUser,
    Proxy, Resource, Security, Systemd, Timeouts, Tls, Unit, Verification,
};

/// Schema version accepted by this module
pub const MAX_VERSION: Version = Version::new(3, 2, 0);

/// Root of a 3.2.0 config
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    pub ignition: Ignition,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub passwd: Map<String, Value>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub storage: Storage,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub systemd: Systemd,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Storage {
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub directories: Vec<Directory>,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub disks: Vec<Value>,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub files: Vec<File>,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub filesystems: Vec<Value>,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub links: Vec<Link>,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub luks: Vec<Value>,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub raid: Vec<Value>,
}

/// Upgrade a 3.1.0 config to 3.2.0
pub fn translate(old: v3_1::Config) -> Config {
    let mut ignition = old.ignition;
    ignition.version = MAX_VERSION.to_string();

    Config {
        ignition,
        passwd: old.passwd,
        storage: Storage {
            directories: old.storage.directories,
            disks: old.storage.disks,
            files: old.storage.files,
            filesystems: old.storage.filesystems,
            links: old.storage.links,
            luks: Vec::new(),
            raid: old.storage.raid,
        },
        systemd: old.systemd,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_keeps_opaque_sections() {
        let old: v3_1::Config = serde_json::from_str(
            r#"{
                "ignition": { "version": "3.1.0" },
                "passwd": { "users": [{ "name": "core" }] },
                "storage": {
                    "disks": [{ "device": "/dev/vda", "partitions": [{ "label": "root" }] }],
                    "filesystems": [{ "device": "/dev/vda4", "format": "xfs" }],
                    "raid": [{ "name": "md0", "level": "raid1", "devices": ["/dev/vdb", "/dev/vdc"] }]
                },
                "systemd": { "units": [{ "name": "crio.service", "enabled": true }] }
            }"#,
        )
        .unwrap();

        let new = translate(old.clone());
        assert_eq!(new.ignition.version, "3.2.0");
        assert_eq!(new.passwd, old.passwd);
        assert_eq!(new.storage.disks, old.storage.disks);
        assert_eq!(new.storage.filesystems, old.storage.filesystems);
        assert_eq!(new.storage.raid, old.storage.raid);
        assert!(new.storage.luks.is_empty());
        assert_eq!(new.systemd, old.systemd);
    }

    #[test]
    fn test_parse_luks() {
        let raw = r#"{
            "ignition": { "version": "3.2.0" },
            "storage": { "luks": [{ "name": "root", "device": "/dev/disk/by-partlabel/root" }] }
        }"#;

        let config: Config = serde_json::from_str(raw).unwrap();
        assert_eq!(config.storage.luks.len(), 1);
    }
}
