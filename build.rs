// build.rs

use clap::{Arg, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

fn build_cli() -> Command {
    Command::new("cluster-bootstrap")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Bootstrap tooling for cluster control planes")
        .subcommand_required(true)
        .subcommand(
            Command::new("bootstrap-in-place")
                .about("Enrich the master Ignition with control plane static pods manifests and all required resources")
                .arg(
                    Arg::new("asset_dir")
                        .long("asset-dir")
                        .value_name("DIR")
                        .required(true)
                        .help("Path to the cluster asset folder"),
                )
                .arg(
                    Arg::new("ignition_path")
                        .long("ignition-path")
                        .value_name("PATH")
                        .default_value("/assets/master.ign")
                        .help("The location of master ignition"),
                )
                .arg(
                    Arg::new("manifest")
                        .long("manifest")
                        .value_name("PATH")
                        .help("TOML rule manifest to use instead of the built-in asset layout"),
                ),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Create man directory - use CARGO_MANIFEST_DIR which is always set by cargo
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("cluster-bootstrap.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
