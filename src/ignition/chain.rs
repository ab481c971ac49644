// src/ignition/chain.rs

//! Revision translator chain
//!
//! A decoded document is tagged with its revision. [`VersionedConfig::upgrade`]
//! moves it exactly one revision forward using that revision's `translate`
//! function; [`VersionedConfig::into_latest`] repeats until the newest
//! revision is reached. Supporting a new revision means adding its module,
//! one variant here and one arm in `upgrade`.

use super::version::SchemaRevision;
use super::{v3_0, v3_1, v3_2, v3_3};
use crate::error::TranslationError;
use tracing::debug;

/// A decoded config at whichever revision it was written in
#[derive(Debug, Clone, PartialEq)]
pub enum VersionedConfig {
    V3_0(v3_0::Config),
    V3_1(v3_1::Config),
    V3_2(v3_2::Config),
    V3_3(v3_3::Config),
}

impl VersionedConfig {
    /// The revision this config is currently at
    pub fn revision(&self) -> SchemaRevision {
        match self {
            Self::V3_0(_) => SchemaRevision::V3_0,
            Self::V3_1(_) => SchemaRevision::V3_1,
            Self::V3_2(_) => SchemaRevision::V3_2,
            Self::V3_3(_) => SchemaRevision::V3_3,
        }
    }

    pub fn is_latest(&self) -> bool {
        self.revision() == SchemaRevision::LATEST
    }

    /// Translate to the immediately following revision
    pub fn upgrade(self) -> Result<Self, TranslationError> {
        match self {
            Self::V3_0(cfg) => Ok(Self::V3_1(v3_1::translate(cfg))),
            Self::V3_1(cfg) => Ok(Self::V3_2(v3_2::translate(cfg))),
            Self::V3_2(cfg) => Ok(Self::V3_3(v3_3::translate(cfg))),
            Self::V3_3(_) => Err(TranslationError::NoSuccessor {
                version: SchemaRevision::V3_3.to_string(),
            }),
        }
    }

    /// Walk the chain one revision at a time up to the newest
    pub fn into_latest(self) -> Result<v3_3::Config, TranslationError> {
        let mut current = self;
        loop {
            match current {
                Self::V3_3(cfg) => return Ok(cfg),
                older => {
                    let from = older.revision();
                    current = older.upgrade()?;
                    debug!("Translated config {} -> {}", from, current.revision());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upgrade_steps_one_revision() {
        let cfg = VersionedConfig::V3_0(v3_0::Config {
            ignition: v3_0::Ignition {
                version: "3.0.0".to_string(),
                ..Default::default()
            },
            ..Default::default()
        });

        let mut current = cfg;
        let mut seen = vec![current.revision()];
        while !current.is_latest() {
            current = current.upgrade().unwrap();
            seen.push(current.revision());
        }

        assert_eq!(seen, SchemaRevision::ALL.to_vec());
    }

    #[test]
    fn test_upgrade_past_latest_fails() {
        let cfg = VersionedConfig::V3_3(v3_3::Config::default());
        assert!(matches!(
            cfg.upgrade(),
            Err(TranslationError::NoSuccessor { version }) if version == "3.3.0"
        ));
    }

    #[test]
    fn test_latest_is_returned_untouched() {
        let mut cfg = v3_3::Config::default();
        cfg.ignition.version = "3.3.0".to_string();
        cfg.kernel_arguments.should_exist.push("nosmt".to_string());

        let out = VersionedConfig::V3_3(cfg.clone()).into_latest().unwrap();
        assert_eq!(out, cfg);
    }
}
