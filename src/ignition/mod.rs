// src/ignition/mod.rs

//! Versioned Ignition config handling
//!
//! Ignition configs declare their schema in `ignition.version`. Each
//! supported revision has its own module with its own types; older
//! documents are decoded with their own revision and then translated
//! forward one step at a time until they reach [`v3_3`].
//!
//! ```text
//! raw bytes ─▶ version::resolve ─▶ SchemaRevision::decode ─▶ VersionedConfig
//!                                                               │
//!                              3.0.0 ─▶ 3.1.0 ─▶ 3.2.0 ─▶ 3.3.0 ◀┘ into_latest
//! ```

mod chain;
pub mod v3_0;
pub mod v3_1;
pub mod v3_2;
pub mod v3_3;
pub mod version;

pub use chain::VersionedConfig;
pub use version::{SchemaRevision, resolve};

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer};

/// A config at the newest supported revision
pub type Config = v3_3::Config;

/// Parse a config of any supported revision into the newest revision
pub fn parse(raw: &[u8]) -> Result<Config> {
    parse_with_revision(raw).map(|(config, _)| config)
}

/// Like [`parse`], also reporting the revision the document was written in
pub fn parse_with_revision(raw: &[u8]) -> Result<(Config, SchemaRevision)> {
    let revision = resolve(raw)?;
    let config = revision.decode(raw)?.into_latest()?;
    Ok((config, revision))
}

/// Serialize a config to its compact JSON wire form
pub fn to_vec(config: &Config) -> Result<Vec<u8>> {
    serde_json::to_vec(config).map_err(Error::Serialize)
}

pub(crate) fn is_default<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

/// Read an explicit `null` as the field's empty value, like an absent key
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
