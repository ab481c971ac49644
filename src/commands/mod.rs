// src/commands/mod.rs
//! Command handlers for the cluster-bootstrap CLI

mod bootstrap;

pub use bootstrap::cmd_bootstrap_in_place;
