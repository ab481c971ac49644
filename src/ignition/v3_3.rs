// src/ignition/v3_3.rs

//! Ignition config spec 3.3.0, the newest supported revision
//!
//! Adds the top-level `kernelArguments` section.

use super::v3_2;
use semver::Version;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use v3_2::{
    Directory, Dropin, File, HttpHeader, Ignition, IgnitionConfig, Link, NodeGroup, NodeUser,
    Proxy, Resource, Security, Storage, Systemd, Timeouts, Tls, Unit, Verification,
};

/// Schema version accepted by this module
pub const MAX_VERSION: Version = Version::new(3, 3, 0);

/// Root of a 3.3.0 config
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    pub ignition: Ignition,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub kernel_arguments: KernelArguments,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub passwd: Map<String, Value>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub storage: Storage,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub systemd: Systemd,
}

/// Kernel arguments to ensure present or absent on the installed system
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct KernelArguments {
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub should_exist: Vec<String>,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub should_not_exist: Vec<String>,
}

/// Upgrade a 3.2.0 config to 3.3.0
pub fn translate(old: v3_2::Config) -> Config {
    let mut ignition = old.ignition;
    ignition.version = MAX_VERSION.to_string();

    Config {
        ignition,
        kernel_arguments: KernelArguments::default(),
        passwd: old.passwd,
        storage: old.storage,
        systemd: old.systemd,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_adds_empty_kernel_arguments() {
        let old: v3_2::Config = serde_json::from_str(
            r#"{
                "ignition": { "version": "3.2.0" },
                "storage": { "luks": [{ "name": "var" }] }
            }"#,
        )
        .unwrap();

        let new = translate(old);
        assert_eq!(new.ignition.version, "3.3.0");
        assert_eq!(new.kernel_arguments, KernelArguments::default());
        assert_eq!(new.storage.luks.len(), 1);

        let json = serde_json::to_value(&new).unwrap();
        assert_eq!(json["kernelArguments"], serde_json::json!({}));
    }

    #[test]
    fn test_parse_kernel_arguments() {
        let raw = r#"{
            "ignition": { "version": "3.3.0" },
            "kernelArguments": { "shouldExist": ["mitigations=auto"], "shouldNotExist": ["quiet"] }
        }"#;

        let config: Config = serde_json::from_str(raw).unwrap();
        assert_eq!(config.kernel_arguments.should_exist, vec!["mitigations=auto"]);
        assert_eq!(config.kernel_arguments.should_not_exist, vec!["quiet"]);
    }
}
