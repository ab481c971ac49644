// src/cli/mod.rs
//! CLI definitions for cluster-bootstrap
//!
//! This module contains all command-line interface definitions using clap.
//! The actual command implementations are in the `commands` module.

use clap::{Parser, Subcommand};

mod bootstrap;

pub use bootstrap::BootstrapInPlaceArgs;

#[derive(Parser)]
#[command(name = "cluster-bootstrap")]
#[command(version)]
#[command(about = "Bootstrap tooling for cluster control planes", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Enrich the master Ignition with control plane static pods manifests and all required resources
    BootstrapInPlace(BootstrapInPlaceArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_bootstrap_in_place_defaults() {
        let cli = Cli::try_parse_from(["cluster-bootstrap", "bootstrap-in-place", "--asset-dir", "/assets"])
            .unwrap();
        let Commands::BootstrapInPlace(args) = cli.command;
        assert_eq!(args.asset_dir, "/assets");
        assert_eq!(args.ignition_path, "/assets/master.ign");
        assert!(args.manifest.is_none());
    }

    #[test]
    fn test_asset_dir_is_required() {
        assert!(Cli::try_parse_from(["cluster-bootstrap", "bootstrap-in-place"]).is_err());
    }
}
