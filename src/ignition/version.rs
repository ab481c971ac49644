// src/ignition/version.rs

//! Schema version detection
//!
//! Only `ignition.version` is read here. The rest of the document is left
//! alone until the matching revision decodes it, since an older document
//! would not validate against the newest schema.

use super::chain::VersionedConfig;
use super::{v3_0, v3_1, v3_2, v3_3};
use crate::error::{InputError, Result, SchemaError};
use semver::Version;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fmt;
use tracing::debug;

#[derive(Deserialize)]
struct VersionStub {
    #[serde(default)]
    ignition: IgnitionStub,
}

#[derive(Default, Deserialize)]
struct IgnitionStub {
    #[serde(default)]
    version: Option<String>,
}

/// A supported Ignition config schema revision, oldest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SchemaRevision {
    V3_0,
    V3_1,
    V3_2,
    V3_3,
}

impl SchemaRevision {
    /// Every supported revision in upgrade order
    pub const ALL: [SchemaRevision; 4] = [Self::V3_0, Self::V3_1, Self::V3_2, Self::V3_3];

    /// The revision every document is upgraded to
    pub const LATEST: SchemaRevision = Self::V3_3;

    /// The exact semantic version this revision accepts
    pub fn version(&self) -> Version {
        match self {
            Self::V3_0 => v3_0::MAX_VERSION,
            Self::V3_1 => v3_1::MAX_VERSION,
            Self::V3_2 => v3_2::MAX_VERSION,
            Self::V3_3 => v3_3::MAX_VERSION,
        }
    }

    /// Look up the revision for an exact version; no range matching
    pub fn from_version(version: &Version) -> Option<Self> {
        Self::ALL.into_iter().find(|rev| rev.version() == *version)
    }

    /// Decode a full document with this revision's types
    pub fn decode(&self, raw: &[u8]) -> Result<VersionedConfig> {
        let config = match self {
            Self::V3_0 => VersionedConfig::V3_0(self.decode_as::<v3_0::Config>(raw)?),
            Self::V3_1 => VersionedConfig::V3_1(self.decode_as::<v3_1::Config>(raw)?),
            Self::V3_2 => VersionedConfig::V3_2(self.decode_as::<v3_2::Config>(raw)?),
            Self::V3_3 => VersionedConfig::V3_3(self.decode_as::<v3_3::Config>(raw)?),
        };
        Ok(config)
    }

    fn decode_as<T: DeserializeOwned>(&self, raw: &[u8]) -> Result<T> {
        serde_json::from_slice(raw).map_err(|source| {
            SchemaError::MalformedField {
                version: self.to_string(),
                source,
            }
            .into()
        })
    }
}

impl fmt::Display for SchemaRevision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.version())
    }
}

/// Determine which schema revision a raw document declares
pub fn resolve(raw: &[u8]) -> Result<SchemaRevision> {
    if raw.is_empty() {
        return Err(InputError::EmptyInput.into());
    }

    let stub: VersionStub = serde_json::from_slice(raw)
        .map_err(|e| SchemaError::MalformedVersionField(e.to_string()))?;

    let declared = stub.ignition.version.ok_or_else(|| {
        SchemaError::MalformedVersionField("ignition.version is not set".to_string())
    })?;

    let version = Version::parse(&declared)
        .map_err(|e| SchemaError::MalformedVersionField(format!("'{}': {}", declared, e)))?;

    let revision = SchemaRevision::from_version(&version)
        .ok_or(SchemaError::UnsupportedVersion { version: declared })?;

    debug!("Detected ignition config version {}", revision);
    Ok(revision)
}
