// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use cluster_bootstrap::AssetManifest;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const POST_REBOOT_SERVICE: &str = "[Unit]\nDescription=Bootstrap in place post reboot\n\n[Service]\nType=oneshot\nExecStart=/usr/local/bin/bootstrap-in-place-post-reboot.sh\n\n[Install]\nWantedBy=multi-user.target\n";

/// Write a file relative to `root`, creating parent directories.
pub fn write_asset(root: &Path, rel: &str, content: impl AsRef<[u8]>) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

/// Write an ignition config with the given version and storage/systemd JSON.
pub fn write_ignition(dir: &Path, version: &str, storage: &str, systemd: &str) -> PathBuf {
    let path = dir.join("master.ign");
    fs::write(
        &path,
        format!(
            r#"{{"ignition":{{"version":"{}"}},"storage":{},"systemd":{}}}"#,
            version, storage, systemd
        ),
    )
    .unwrap();
    path
}

/// Create a complete asset directory for the built-in bootstrap-in-place layout.
///
/// Returns (TempDir, asset_dir) - keep the TempDir alive to prevent cleanup.
pub fn setup_asset_dir() -> (TempDir, PathBuf) {
    let temp_dir = tempfile::tempdir().unwrap();
    let assets = temp_dir.path().join("assets");

    write_asset(&assets, "bootstrap-manifests/kube-apiserver-pod.yaml", "kind: Pod\nmetadata:\n  name: kube-apiserver\n");
    write_asset(&assets, "bootstrap-manifests/kube-scheduler-pod.yaml", "kind: Pod\nmetadata:\n  name: kube-scheduler\n");
    write_asset(&assets, "bootstrap-manifests/cluster-version-operator-pod.yaml", "kind: Pod\n");
    write_asset(&assets, "tls/admin.crt", "-----BEGIN CERTIFICATE-----\n");
    write_asset(&assets, "tls/etcd-ca-bundle.crt", "-----BEGIN CERTIFICATE-----\netcd\n");
    write_asset(&assets, "etcd-bootstrap/bootstrap-manifests/secrets/etcd-all-certs/peer.crt", "peer");
    write_asset(&assets, "etcd-bootstrap/bootstrap-manifests/etcd-member-pod.yaml", "kind: Pod\nmetadata:\n  name: etcd\n");
    write_asset(&assets, "auth/kubeconfig-loopback", "apiVersion: v1\nkind: Config\n");
    write_asset(&assets, "bootstrap-in-place/bootstrap-in-place-post-reboot.sh", "#!/bin/bash\nset -euo pipefail\n");
    write_asset(&assets, "bootstrap-in-place/bootstrap-in-place-post-reboot.service", POST_REBOOT_SERVICE);

    (temp_dir, assets)
}

/// The built-in rule set, minus the rules that read from the host itself.
pub fn asset_only_manifest(asset_dir: &Path) -> AssetManifest {
    let mut manifest = AssetManifest::bootstrap_in_place(asset_dir);
    manifest.gather.retain(|rule| rule.root.starts_with(asset_dir));
    manifest
}
