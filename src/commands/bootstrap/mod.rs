// src/commands/bootstrap/mod.rs

//! Bootstrap command implementations

use anyhow::{Context, Result};
use cluster_bootstrap::{AssetManifest, BootstrapInPlace, SchemaRevision};
use std::path::Path;

use crate::cli::BootstrapInPlaceArgs;

/// Reject empty flag values before any work is done
pub fn validate_bootstrap_in_place(args: &BootstrapInPlaceArgs) -> Result<()> {
    if args.ignition_path.is_empty() {
        anyhow::bail!("missing required flag: --ignition-path");
    }
    if args.asset_dir.is_empty() {
        anyhow::bail!("missing required flag: --asset-dir");
    }
    Ok(())
}

/// Enrich the master Ignition config with bootstrap-in-place assets
pub fn cmd_bootstrap_in_place(args: &BootstrapInPlaceArgs) -> Result<()> {
    validate_bootstrap_in_place(args)?;

    let asset_dir = Path::new(&args.asset_dir);
    let bootstrap = match args.manifest {
        Some(ref path) => {
            let manifest = AssetManifest::from_file(Path::new(path), asset_dir)
                .with_context(|| format!("Failed to load asset manifest {}", path))?;
            BootstrapInPlace::new(&args.ignition_path, manifest)
        }
        None => BootstrapInPlace::for_asset_dir(&args.ignition_path, asset_dir),
    };

    let manifest = bootstrap.manifest();
    println!("Updating ignition config with bootstrap-in-place data...");
    println!("  Ignition path: {}", bootstrap.ignition_path().display());
    println!("  Asset directory: {}", args.asset_dir);
    println!(
        "  Rules: {} gather, {} rename, {} unit",
        manifest.gather.len(),
        manifest.rename.len(),
        manifest.units.len()
    );

    let summary = bootstrap
        .run()
        .with_context(|| format!("Failed to update ignition config {}", args.ignition_path))?;

    println!(
        "\n[OK] Added {} file(s) and {} unit(s)",
        summary.files_added, summary.units_added
    );
    if summary.source_revision != SchemaRevision::LATEST {
        println!(
            "  Config upgraded from {} to {}",
            summary.source_revision,
            SchemaRevision::LATEST
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(asset_dir: &str, ignition_path: &str) -> BootstrapInPlaceArgs {
        BootstrapInPlaceArgs {
            asset_dir: asset_dir.to_string(),
            ignition_path: ignition_path.to_string(),
            manifest: None,
        }
    }

    #[test]
    fn test_validate_rejects_empty_flags() {
        let err = validate_bootstrap_in_place(&args("", "/assets/master.ign")).unwrap_err();
        assert!(err.to_string().contains("--asset-dir"));

        let err = validate_bootstrap_in_place(&args("/assets", "")).unwrap_err();
        assert!(err.to_string().contains("--ignition-path"));

        assert!(validate_bootstrap_in_place(&args("/assets", "/assets/master.ign")).is_ok());
    }
}
