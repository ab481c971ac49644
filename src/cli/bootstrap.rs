// src/cli/bootstrap.rs

//! CLI definitions for bootstrap-in-place

use clap::Args;

#[derive(Args, Debug)]
pub struct BootstrapInPlaceArgs {
    /// Path to the cluster asset folder
    #[arg(long)]
    pub asset_dir: String,

    /// The location of master ignition
    #[arg(long, default_value = cluster_bootstrap::DEFAULT_IGNITION_PATH)]
    pub ignition_path: String,

    /// TOML rule manifest to use instead of the built-in asset layout
    #[arg(long)]
    pub manifest: Option<String>,
}
