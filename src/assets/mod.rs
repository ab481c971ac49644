// src/assets/mod.rs

//! Asset collection for bootstrap-in-place
//!
//! An [`AssetManifest`] lists what to pick up from the asset directory:
//!
//! - **Gather rules**: every file under a root matching a glob, placed under
//!   a destination directory with its relative path preserved
//! - **Rename rules**: one source file at one explicit destination
//! - **Unit rules**: systemd unit files, enabled or not
//!
//! The collectors only read; merging the records into a config is the job
//! of [`crate::augment`].

pub mod dataurl;
mod files;
mod rules;
mod units;

pub use files::{
    EXECUTABLE_MODE, FILE_OWNER, FileRecord, PRIVATE_MODE, collect_files, find_files, mode_for,
};
pub use rules::{AssetManifest, BIN_DIR, ETCD_DATA_DIR, GatherRule, KUBE_DIR, RenameRule, UnitRule};
pub use units::{UnitRecord, collect_units};
