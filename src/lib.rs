// src/lib.rs

//! Bootstrap-in-place support for single-node clusters
//!
//! Enriches the master Ignition config with the control plane static pod
//! manifests, TLS material, etcd bootstrap secrets and the post-reboot
//! service, so the node can bring itself up after its first reboot.
//!
//! # Architecture
//!
//! - `ignition`: versioned config types, version detection and the
//!   3.0 → 3.1 → 3.2 → 3.3 translator chain
//! - `assets`: gather/rename/unit rules and the collectors that read them
//! - `augment`: appends collected records to a decoded config
//! - `inplace`: the read-modify-write of the config file

pub mod assets;
pub mod augment;
mod error;
pub mod ignition;
pub mod inplace;

pub use assets::{AssetManifest, FileRecord, GatherRule, RenameRule, UnitRecord, UnitRule};
pub use augment::Augmentation;
pub use error::{Error, InputError, Result, SchemaError, TranslationError};
pub use ignition::{Config, SchemaRevision, VersionedConfig};
pub use inplace::{BootstrapInPlace, DEFAULT_IGNITION_PATH, RunSummary};
