// src/assets/rules.rs

//! Declarative rules describing which assets end up in the config

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Kubernetes configuration root on the provisioned host
pub const KUBE_DIR: &str = "/etc/kubernetes";

/// Directory for executables on the provisioned host
pub const BIN_DIR: &str = "/usr/local/bin";

/// etcd data directory, copied verbatim from the bootstrap host
pub const ETCD_DATA_DIR: &str = "/var/lib/etcd";

/// Collect every file under `root` whose base name matches `pattern`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatherRule {
    /// Directory to search recursively
    pub root: PathBuf,
    /// Glob matched against each file's base name
    pub pattern: String,
    /// Directory in the config that replaces `root`
    pub destination: PathBuf,
}

impl GatherRule {
    pub fn new(
        root: impl Into<PathBuf>,
        pattern: impl Into<String>,
        destination: impl Into<PathBuf>,
    ) -> Self {
        Self {
            root: root.into(),
            pattern: pattern.into(),
            destination: destination.into(),
        }
    }
}

impl fmt::Display for GatherRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "gather {}/{} -> {}",
            self.root.display(),
            self.pattern,
            self.destination.display()
        )
    }
}

/// Place one file at an explicit destination, bypassing pattern matching
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameRule {
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl RenameRule {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

impl fmt::Display for RenameRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rename {} -> {}",
            self.source.display(),
            self.destination.display()
        )
    }
}

/// A systemd unit file to install
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRule {
    pub path: PathBuf,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// The complete rule set for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetManifest {
    #[serde(default)]
    pub gather: Vec<GatherRule>,
    #[serde(default)]
    pub rename: Vec<RenameRule>,
    #[serde(default)]
    pub units: Vec<UnitRule>,
}

impl AssetManifest {
    /// Create an empty manifest
    pub fn new() -> Self {
        Self::default()
    }

    /// The rule set for a single-node bootstrap-in-place install
    ///
    /// Control plane static pods, TLS material, etcd bootstrap secrets and the
    /// post-reboot service come from `asset_dir`. Bootstrap kubelet configs
    /// and the etcd data directory are taken from the running host.
    pub fn bootstrap_in_place(asset_dir: impl AsRef<Path>) -> Self {
        let asset_dir = asset_dir.as_ref();
        let kube_dir = Path::new(KUBE_DIR);

        Self::new()
            .with_gather(
                asset_dir.join("bootstrap-manifests"),
                "kube*",
                kube_dir.join("manifests"),
            )
            .with_gather(
                kube_dir.join("bootstrap-configs"),
                "*",
                kube_dir.join("bootstrap-configs"),
            )
            .with_gather(
                asset_dir.join("tls"),
                "*",
                kube_dir.join("bootstrap-secrets"),
            )
            .with_gather(
                asset_dir.join("etcd-bootstrap/bootstrap-manifests/secrets"),
                "*",
                kube_dir.join("static-pod-resources/etcd-member"),
            )
            .with_gather(
                asset_dir.join("bootstrap-in-place"),
                "bootstrap-in-place-post-reboot.sh",
                BIN_DIR,
            )
            .with_gather(ETCD_DATA_DIR, "*", ETCD_DATA_DIR)
            .with_rename(
                asset_dir.join("auth/kubeconfig-loopback"),
                kube_dir.join("bootstrap-secrets/kubeconfig"),
            )
            .with_rename(
                asset_dir.join("tls/etcd-ca-bundle.crt"),
                kube_dir.join("static-pod-resources/etcd-member/ca.crt"),
            )
            .with_rename(
                asset_dir.join("etcd-bootstrap/bootstrap-manifests/etcd-member-pod.yaml"),
                kube_dir.join("manifests/etcd-pod.yaml"),
            )
            .with_unit(
                asset_dir.join("bootstrap-in-place/bootstrap-in-place-post-reboot.service"),
                true,
            )
    }

    /// Load a manifest from TOML; relative source paths resolve against `asset_dir`
    pub fn from_file(path: &Path, asset_dir: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::parse(&content, asset_dir)
    }

    /// Parse a TOML manifest; relative source paths resolve against `asset_dir`
    pub fn parse(content: &str, asset_dir: &Path) -> Result<Self> {
        let manifest: AssetManifest =
            toml::from_str(content).map_err(|e| Error::Manifest(e.to_string()))?;
        Ok(manifest.rooted_at(asset_dir))
    }

    /// Add a gather rule
    pub fn with_gather(
        mut self,
        root: impl Into<PathBuf>,
        pattern: impl Into<String>,
        destination: impl Into<PathBuf>,
    ) -> Self {
        self.gather.push(GatherRule::new(root, pattern, destination));
        self
    }

    /// Add a rename rule
    pub fn with_rename(
        mut self,
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
    ) -> Self {
        self.rename.push(RenameRule::new(source, destination));
        self
    }

    /// Add a systemd unit
    pub fn with_unit(mut self, path: impl Into<PathBuf>, enabled: bool) -> Self {
        self.units.push(UnitRule {
            path: path.into(),
            enabled,
        });
        self
    }

    fn rooted_at(mut self, asset_dir: &Path) -> Self {
        for rule in &mut self.gather {
            rule.root = asset_dir.join(&rule.root);
        }
        for rule in &mut self.rename {
            rule.source = asset_dir.join(&rule.source);
        }
        for rule in &mut self.units {
            rule.path = asset_dir.join(&rule.path);
        }
        self
    }
}
