// src/ignition/v3_1.rs

//! Ignition config spec 3.1.0
//!
//! Changes from 3.0.0:
//! - resources gain `compression` and `httpHeaders`
//! - `ignition.proxy` configures HTTP(S) proxies for remote resources

use super::is_default;
use super::v3_0;
use semver::Version;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use v3_0::{
    Directory, Dropin, Link, NodeGroup, NodeUser, Systemd, Timeouts, Unit, Verification,
};

/// Schema version accepted by this module
pub const MAX_VERSION: Version = Version::new(3, 1, 0);

/// Root of a 3.1.0 config
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
pub struct Ignition {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub config: IgnitionConfig,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub proxy: Proxy,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub security: Security,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub timeouts: Timeouts,
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct IgnitionConfig {
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub merge: Vec<Resource>,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "is_default"
    )]
    pub replace: Resource,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Proxy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_proxy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub https_proxy: Option<String>,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub no_proxy: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Security {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub tls: Tls,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Tls {
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub certificate_authorities: Vec<Resource>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Resource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compression: Option<String>,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub http_headers: Vec<HttpHeader>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "is_default"
    )]
    pub verification: Verification,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HttpHeader {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
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
    pub raid: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct File {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overwrite: Option<bool>,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "is_default"
    )]
    pub user: NodeUser,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "is_default"
    )]
    pub group: NodeGroup,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub append: Vec<Resource>,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "is_default"
    )]
    pub contents: Resource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<u32>,
}

/// Upgrade a 3.0.0 config to 3.1.0
pub fn translate(old: v3_0::Config) -> Config {
    Config {
        ignition: Ignition {
            config: IgnitionConfig {
                merge: translate_resources(old.ignition.config.merge),
                replace: translate_resource(old.ignition.config.replace),
            },
            proxy: Proxy::default(),
            security: Security {
                tls: Tls {
                    certificate_authorities: translate_resources(
                        old.ignition.security.tls.certificate_authorities,
                    ),
                },
            },
            timeouts: old.ignition.timeouts,
            version: MAX_VERSION.to_string(),
        },
        passwd: old.passwd,
        storage: Storage {
            directories: old.storage.directories,
            disks: old.storage.disks,
            files: old.storage.files.into_iter().map(translate_file).collect(),
            filesystems: old.storage.filesystems,
            links: old.storage.links,
            raid: old.storage.raid,
        },
        systemd: old.systemd,
    }
}

fn translate_resource(old: v3_0::Resource) -> Resource {
    Resource {
        compression: None,
        http_headers: Vec::new(),
        source: old.source,
        verification: old.verification,
    }
}

fn translate_resources(old: Vec<v3_0::Resource>) -> Vec<Resource> {
    old.into_iter().map(translate_resource).collect()
}

fn translate_file(old: v3_0::File) -> File {
    File {
        path: old.path,
        overwrite: old.overwrite,
        user: old.user,
        group: old.group,
        append: translate_resources(old.append),
        contents: translate_resource(old.contents),
        mode: old.mode,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v3_0_config() -> v3_0::Config {
        serde_json::from_str(
            r#"{
                "ignition": {
                    "version": "3.0.0",
                    "config": { "replace": { "source": "https://example.com/master.ign" } },
                    "security": { "tls": { "certificateAuthorities": [{ "source": "data:,ca" }] } },
                    "timeouts": { "httpResponseHeaders": 10 }
                },
                "storage": {
                    "files": [{
                        "path": "/etc/motd",
                        "overwrite": true,
                        "user": { "name": "root" },
                        "append": [{ "source": "data:,more" }],
                        "contents": {
                            "source": "data:,hello",
                            "verification": { "hash": "sha512-00" }
                        },
                        "mode": 420
                    }],
                    "directories": [{ "path": "/var/lib/extra", "mode": 493 }]
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_translate_forwards_resources() {
        let new = translate(v3_0_config());

        assert_eq!(new.ignition.version, "3.1.0");
        assert_eq!(
            new.ignition.config.replace.source.as_deref(),
            Some("https://example.com/master.ign")
        );
        assert_eq!(new.ignition.security.tls.certificate_authorities.len(), 1);
        assert_eq!(new.ignition.timeouts.http_response_headers, Some(10));
        assert_eq!(new.ignition.proxy, Proxy::default());

        let file = &new.storage.files[0];
        assert_eq!(file.path, "/etc/motd");
        assert_eq!(file.overwrite, Some(true));
        assert_eq!(file.user.name.as_deref(), Some("root"));
        assert_eq!(file.append[0].source.as_deref(), Some("data:,more"));
        assert_eq!(file.contents.source.as_deref(), Some("data:,hello"));
        assert_eq!(file.contents.verification.hash.as_deref(), Some("sha512-00"));
        assert!(file.contents.compression.is_none());
        assert!(file.contents.http_headers.is_empty());
        assert_eq!(file.mode, Some(420));
        assert_eq!(new.storage.directories[0].mode, Some(493));
    }

    #[test]
    fn test_parse_compressed_contents() {
        let raw = r#"{
            "ignition": {
                "version": "3.1.0",
                "proxy": { "httpsProxy": "http://proxy:3128", "noProxy": ["10.0.0.0/8"] }
            },
            "storage": {
                "files": [{
                    "path": "/opt/blob",
                    "contents": {
                        "source": "https://example.com/blob.gz",
                        "compression": "gzip",
                        "httpHeaders": [{ "name": "Authorization", "value": "Bearer x" }]
                    }
                }]
            }
        }"#;

        let config: Config = serde_json::from_str(raw).unwrap();
        assert_eq!(config.ignition.proxy.https_proxy.as_deref(), Some("http://proxy:3128"));
        assert_eq!(config.storage.files[0].contents.compression.as_deref(), Some("gzip"));
        assert_eq!(config.storage.files[0].contents.http_headers[0].name, "Authorization");
    }
}
